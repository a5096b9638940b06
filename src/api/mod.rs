// ==========================================
// 网络成本估算系统 - API 层
// ==========================================
// 职责: 提供估算与目录管理的业务 API 接口
// ==========================================

pub mod catalog_api;
pub mod error;
pub mod estimate_api;
pub mod validator;

// 重导出核心类型
pub use catalog_api::CatalogApi;
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use estimate_api::EstimateApi;
pub use validator::{CatalogValidator, ParameterValidator};
