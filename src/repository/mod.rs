// ==========================================
// 网络成本估算系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供目录与估算状态的数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod catalog_repo;
pub mod equipment_repo;
pub mod error;
pub mod estimate_state_repo;
pub mod region_repo;
pub mod rule_repo;

// 重导出核心仓储
pub use catalog_repo::{CatalogRepository, SeedReport};
pub use equipment_repo::{EquipmentRepository, UpsertCounts};
pub use error::{RepositoryError, RepositoryResult};
pub use estimate_state_repo::EstimateStateRepository;
pub use region_repo::RegionRepository;
pub use rule_repo::CalculationRuleRepository;

use chrono::Utc;
use rust_decimal::Decimal;
use rusqlite::types::Type;
use rusqlite::Row;
use std::str::FromStr;
use uuid::Uuid;

/// 新记录主键
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn now_text() -> String {
    Utc::now().to_rfc3339()
}

/// 读取 TEXT 列中的十进制金额
pub(crate) fn read_decimal(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(raw.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
