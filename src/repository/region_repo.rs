// ==========================================
// 网络成本估算系统 - 地区系数仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: region
// ==========================================

use crate::domain::catalog::Region;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{generate_id, now_text, read_decimal};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "SELECT id, name, cost_multiplier, is_active FROM region";

fn map_row(row: &Row) -> SqliteResult<Region> {
    Ok(Region {
        id: row.get(0)?,
        name: row.get(1)?,
        cost_multiplier: read_decimal(row, 2)?,
        is_active: row.get(3)?,
    })
}

pub(crate) fn query_all(conn: &Connection) -> RepositoryResult<Vec<Region>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS))?;
    let regions = stmt
        .query_map([], map_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(regions)
}

pub(crate) fn insert_row(conn: &Connection, region: &Region) -> RepositoryResult<()> {
    let now = now_text();
    conn.execute(
        r#"
        INSERT INTO region (id, name, cost_multiplier, is_active, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        "#,
        params![
            region.id,
            region.name,
            region.cost_multiplier.to_string(),
            region.is_active,
            now,
        ],
    )?;
    Ok(())
}

pub(crate) fn count(conn: &Connection) -> RepositoryResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM region", [], |row| row.get(0))?)
}

// ==========================================
// RegionRepository - 地区系数仓储
// ==========================================
pub struct RegionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RegionRepository {
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

    pub fn list_all(&self) -> RepositoryResult<Vec<Region>> {
        let conn = self.get_conn()?;
        query_all(&conn)
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Region>> {
        let conn = self.get_conn()?;
        let region = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id], map_row)
            .optional()?;
        Ok(region)
    }

    /// 名称是否已被其他地区占用 (`exclude_id` 为自身 id, 更新时排除)
    pub fn name_taken(&self, name: &str, exclude_id: Option<&str>) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let taken: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM region WHERE name = ?1 AND id <> COALESCE(?2, ''))",
            params![name, exclude_id],
            |row| row.get(0),
        )?;
        Ok(taken)
    }

    pub fn insert(&self, region: &Region) -> RepositoryResult<Region> {
        let stored = Region {
            id: generate_id(),
            ..region.clone()
        };
        let conn = self.get_conn()?;
        insert_row(&conn, &stored)?;
        Ok(stored)
    }

    pub fn update(&self, region: &Region) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE region
            SET name = ?2, cost_multiplier = ?3, is_active = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
            params![
                region.id,
                region.name,
                region.cost_multiplier.to_string(),
                region.is_active,
                now_text(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Region".to_string(),
                id: region.id.clone(),
            });
        }
        Ok(())
    }

    pub fn set_active(&self, id: &str, is_active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE region SET is_active = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, is_active, now_text()],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Region".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM region WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}
