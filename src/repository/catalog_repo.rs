// ==========================================
// 网络成本估算系统 - 目录快照仓储
// ==========================================
// 职责: 在单个读事务内读取价目/规则/地区, 生成一致快照
// 职责: 首次启动时写入内置默认目录
// ==========================================

use crate::config::config_keys;
use crate::domain::catalog::CatalogSnapshot;
use crate::domain::defaults::{default_equipment, default_regions, default_rules};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{equipment_repo, region_repo, rule_repo};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 默认目录写入统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub equipment_seeded: usize,
    pub rules_seeded: usize,
    pub regions_seeded: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.equipment_seeded == 0 && self.rules_seeded == 0 && self.regions_seeded == 0
    }
}

// ==========================================
// CatalogRepository - 目录快照仓储
// ==========================================
pub struct CatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        crate::db::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取目录快照
    ///
    /// 三张表在同一读事务内读取，计算期间的目录编辑不可见
    pub fn load_snapshot(&self) -> RepositoryResult<CatalogSnapshot> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let snapshot = CatalogSnapshot {
            equipment: equipment_repo::query_all(&tx)?,
            rules: rule_repo::query_all(&tx)?,
            regions: region_repo::query_all(&tx)?,
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::debug!(
            equipment = snapshot.equipment.len(),
            rules = snapshot.rules.len(),
            regions = snapshot.regions.len(),
            "目录快照已读取"
        );

        Ok(snapshot)
    }

    /// 首次启动时写入内置默认数据
    ///
    /// 每个集合独立判断, 已有数据的集合不受影响。
    /// 写入后在 config_kv 记录标记, 此后即使管理员清空某个集合也不再补种。
    pub fn seed_defaults_once(&self) -> RepositoryResult<SeedReport> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let seeded: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM config_kv WHERE scope_id = 'global' AND key = ?1)",
            params![config_keys::CATALOG_SEEDED],
            |row| row.get(0),
        )?;
        if seeded {
            tracing::debug!("默认目录已写入过, 跳过补种");
            return Ok(SeedReport::default());
        }

        let mut report = SeedReport::default();

        if equipment_repo::count(&tx)? == 0 {
            for item in default_equipment() {
                equipment_repo::insert_row(&tx, &item)?;
                report.equipment_seeded += 1;
            }
        }

        if rule_repo::count(&tx)? == 0 {
            for rule in default_rules() {
                rule_repo::insert_row(&tx, &rule)?;
                report.rules_seeded += 1;
            }
        }

        if region_repo::count(&tx)? == 0 {
            for region in default_regions() {
                region_repo::insert_row(&tx, &region)?;
                report.regions_seeded += 1;
            }
        }

        tx.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global', ?1, 'true', datetime('now'))",
            params![config_keys::CATALOG_SEEDED],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        if !report.is_empty() {
            tracing::info!(
                equipment = report.equipment_seeded,
                rules = report.rules_seeded,
                regions = report.regions_seeded,
                "已写入默认目录"
            );
        }

        Ok(report)
    }
}
