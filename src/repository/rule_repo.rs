// ==========================================
// 网络成本估算系统 - 计算规则仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: calculation_rule (priority 升序, 同优先级按录入顺序)
// ==========================================

use crate::domain::catalog::CalculationRule;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{generate_id, now_text};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "SELECT id, name, description, condition_expr, action_expr, priority, is_active FROM calculation_rule";

fn map_row(row: &Row) -> SqliteResult<CalculationRule> {
    Ok(CalculationRule {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        condition: row.get(3)?,
        action: row.get(4)?,
        priority: row.get(5)?,
        is_active: row.get(6)?,
    })
}

pub(crate) fn query_all(conn: &Connection) -> RepositoryResult<Vec<CalculationRule>> {
    let mut stmt = conn.prepare(&format!(
        "{} ORDER BY priority ASC, rowid ASC",
        SELECT_COLUMNS
    ))?;
    let rules = stmt
        .query_map([], map_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rules)
}

pub(crate) fn insert_row(conn: &Connection, rule: &CalculationRule) -> RepositoryResult<()> {
    let now = now_text();
    conn.execute(
        r#"
        INSERT INTO calculation_rule (
            id, name, description, condition_expr, action_expr, priority, is_active,
            created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
        "#,
        params![
            rule.id,
            rule.name,
            rule.description,
            rule.condition,
            rule.action,
            rule.priority,
            rule.is_active,
            now,
        ],
    )?;
    Ok(())
}

pub(crate) fn count(conn: &Connection) -> RepositoryResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM calculation_rule", [], |row| row.get(0))?)
}

// ==========================================
// CalculationRuleRepository - 计算规则仓储
// ==========================================
pub struct CalculationRuleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CalculationRuleRepository {
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

    /// 查询全部规则（按执行顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<CalculationRule>> {
        let conn = self.get_conn()?;
        query_all(&conn)
    }

    /// 查询启用的规则（按执行顺序）
    pub fn list_active(&self) -> RepositoryResult<Vec<CalculationRule>> {
        Ok(self.list_all()?.into_iter().filter(|r| r.is_active).collect())
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<CalculationRule>> {
        let conn = self.get_conn()?;
        let rule = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id], map_row)
            .optional()?;
        Ok(rule)
    }

    pub fn insert(&self, rule: &CalculationRule) -> RepositoryResult<CalculationRule> {
        let stored = CalculationRule {
            id: generate_id(),
            ..rule.clone()
        };
        let conn = self.get_conn()?;
        insert_row(&conn, &stored)?;
        Ok(stored)
    }

    pub fn update(&self, rule: &CalculationRule) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE calculation_rule
            SET name = ?2, description = ?3, condition_expr = ?4, action_expr = ?5,
                priority = ?6, is_active = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
            params![
                rule.id,
                rule.name,
                rule.description,
                rule.condition,
                rule.action,
                rule.priority,
                rule.is_active,
                now_text(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CalculationRule".to_string(),
                id: rule.id.clone(),
            });
        }
        Ok(())
    }

    pub fn set_active(&self, id: &str, is_active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE calculation_rule SET is_active = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, is_active, now_text()],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CalculationRule".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM calculation_rule WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}
