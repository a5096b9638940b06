// ==========================================
// 网络成本估算系统 - 引擎层
// ==========================================
// 职责: 成本计算核心 (规则评估 / 定价 / 汇总)
// 红线: Engine 不访问数据库, 只读取传入的目录快照
// ==========================================

pub mod aggregator;
pub mod calculator;
pub mod pricing;
pub mod rule_evaluator;

// 重导出核心引擎
pub use aggregator::CostAggregator;
pub use calculator::{CalculatorConfig, CostCalculator};
pub use pricing::PricingResolver;
pub use rule_evaluator::{ContributionPolicy, ContributionRequest, LineText, RuleEvaluator};
