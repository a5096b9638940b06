// ==========================================
// 网络成本估算系统 - 领域模型层
// ==========================================
// 职责: 定义项目参数、目录实体、估算结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod defaults;
pub mod estimate;
pub mod parameters;
pub mod types;

// 重导出核心类型
pub use catalog::{CalculationRule, CatalogSnapshot, CostItem, Region};
pub use estimate::{CostResult, CostResultItem};
pub use parameters::ProjectParameters;
pub use types::{CostCategory, ProjectComplexity};
