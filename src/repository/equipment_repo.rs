// ==========================================
// 网络成本估算系统 - 设备价目仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: cost_item (按 rowid 保持录入顺序)
// ==========================================

use crate::domain::catalog::CostItem;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{generate_id, now_text, read_decimal};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "SELECT id, name, description, category, unit_cost, is_active FROM cost_item";

fn map_row(row: &Row) -> SqliteResult<CostItem> {
    Ok(CostItem {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        unit_cost: read_decimal(row, 4)?,
        is_active: row.get(5)?,
    })
}

/// 读取全部价目（供目录快照复用同一连接/事务）
pub(crate) fn query_all(conn: &Connection) -> RepositoryResult<Vec<CostItem>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS))?;
    let items = stmt
        .query_map([], map_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(items)
}

/// 按原样写入（保留传入 id）
pub(crate) fn insert_row(conn: &Connection, item: &CostItem) -> RepositoryResult<()> {
    let now = now_text();
    conn.execute(
        r#"
        INSERT INTO cost_item (
            id, name, description, category, unit_cost, is_active, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
        "#,
        params![
            item.id,
            item.name,
            item.description,
            item.category,
            item.unit_cost.to_string(),
            item.is_active,
            now,
        ],
    )?;
    Ok(())
}

/// 按 id 覆写, 返回受影响行数
fn update_row(conn: &Connection, item: &CostItem) -> RepositoryResult<usize> {
    let affected = conn.execute(
        r#"
        UPDATE cost_item
        SET name = ?2, description = ?3, category = ?4, unit_cost = ?5,
            is_active = ?6, updated_at = ?7
        WHERE id = ?1
        "#,
        params![
            item.id,
            item.name,
            item.description,
            item.category,
            item.unit_cost.to_string(),
            item.is_active,
            now_text(),
        ],
    )?;
    Ok(affected)
}

fn query_by_name(conn: &Connection, name: &str) -> RepositoryResult<Option<CostItem>> {
    let item = conn
        .query_row(
            &format!("{} WHERE name = ?1 ORDER BY rowid ASC LIMIT 1", SELECT_COLUMNS),
            params![name],
            map_row,
        )
        .optional()?;
    Ok(item)
}

pub(crate) fn count(conn: &Connection) -> RepositoryResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM cost_item", [], |row| row.get(0))?)
}

/// 批量按 name 写入的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertCounts {
    pub inserted: usize,
    pub updated: usize,
}

// ==========================================
// EquipmentRepository - 设备价目仓储
// ==========================================
/// 职责: 管理 cost_item 表的 CRUD 操作
pub struct EquipmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EquipmentRepository {
    /// 创建新的 EquipmentRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        crate::db::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部价目（录入顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<CostItem>> {
        let conn = self.get_conn()?;
        query_all(&conn)
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(CostItem)): 找到
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<CostItem>> {
        let conn = self.get_conn()?;
        let item = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id], map_row)
            .optional()?;
        Ok(item)
    }

    /// 按 name 查询（首条）
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<CostItem>> {
        let conn = self.get_conn()?;
        query_by_name(&conn, name)
    }

    /// 新增价目（分配新 id）
    ///
    /// # 返回
    /// 写入后的条目（含 id）
    pub fn insert(&self, item: &CostItem) -> RepositoryResult<CostItem> {
        let stored = CostItem {
            id: generate_id(),
            ..item.clone()
        };
        let conn = self.get_conn()?;
        insert_row(&conn, &stored)?;
        Ok(stored)
    }

    /// 更新价目
    ///
    /// # 错误
    /// - NotFound: id 不存在
    pub fn update(&self, item: &CostItem) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = update_row(&conn, item)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CostItem".to_string(),
                id: item.id.clone(),
            });
        }
        Ok(())
    }

    /// 批量按 name 写入 (单事务)
    ///
    /// - 同名条目已存在: 覆写, 保留原 id
    /// - 不存在: 分配新 id 插入
    ///
    /// 任一行写入失败时整批回滚
    pub fn upsert_by_name(&self, items: &[CostItem]) -> RepositoryResult<UpsertCounts> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut counts = UpsertCounts::default();
        for item in items {
            match query_by_name(&tx, &item.name)? {
                Some(existing) => {
                    update_row(
                        &tx,
                        &CostItem {
                            id: existing.id,
                            ..item.clone()
                        },
                    )?;
                    counts.updated += 1;
                }
                None => {
                    insert_row(
                        &tx,
                        &CostItem {
                            id: generate_id(),
                            ..item.clone()
                        },
                    )?;
                    counts.inserted += 1;
                }
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(counts)
    }

    /// 设置启用/停用
    pub fn set_active(&self, id: &str, is_active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE cost_item SET is_active = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, is_active, now_text()],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CostItem".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 删除价目
    ///
    /// # 返回
    /// - true: 已删除
    /// - false: 记录不存在
    pub fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM cost_item WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        count(&conn)
    }
}
