// ==========================================
// 网络成本估算系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 网络安装项目成本估算（设备/人工/线路）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 参数、目录与估算结果
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 规则评估、定价、汇总
pub mod engine;

// 导入层 - 价目表
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CostCategory, ProjectComplexity};

// 领域实体
pub use domain::{
    CalculationRule, CatalogSnapshot, CostItem, CostResult, CostResultItem, ProjectParameters,
    Region,
};

// 引擎
pub use engine::{CalculatorConfig, CostAggregator, CostCalculator, PricingResolver, RuleEvaluator};

// API
pub use api::{ApiError, ApiResult, CatalogApi, EstimateApi};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "网络成本估算系统";

// 数据库版本
pub const DB_VERSION: &str = "v1";
