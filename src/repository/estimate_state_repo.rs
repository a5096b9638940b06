// ==========================================
// 网络成本估算系统 - 当前估算状态仓储
// ==========================================
// 职责: 保存/读取最近一次的项目参数与估算结果 (JSON)
// 表: estimate_state (state_key → payload_json)
// ==========================================

use crate::domain::estimate::CostResult;
use crate::domain::parameters::ProjectParameters;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::now_text;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};

const CURRENT_PARAMS_KEY: &str = "current_params";
const CURRENT_RESULT_KEY: &str = "current_result";

pub struct EstimateStateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EstimateStateRepository {
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

    fn save<T: Serialize>(&self, key: &str, value: &T) -> RepositoryResult<()> {
        let payload = serde_json::to_string(value)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO estimate_state (state_key, payload_json, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(state_key) DO UPDATE SET payload_json = ?2, updated_at = ?3
            "#,
            params![key, payload, now_text()],
        )?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> RepositoryResult<Option<T>> {
        let conn = self.get_conn()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload_json FROM estimate_state WHERE state_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_current_parameters(&self, params: &ProjectParameters) -> RepositoryResult<()> {
        self.save(CURRENT_PARAMS_KEY, params)
    }

    pub fn load_current_parameters(&self) -> RepositoryResult<Option<ProjectParameters>> {
        self.load(CURRENT_PARAMS_KEY)
    }

    pub fn save_current_result(&self, result: &CostResult) -> RepositoryResult<()> {
        self.save(CURRENT_RESULT_KEY, result)
    }

    pub fn load_current_result(&self) -> RepositoryResult<Option<CostResult>> {
        self.load(CURRENT_RESULT_KEY)
    }

    /// 清空当前估算状态
    pub fn clear(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute("DELETE FROM estimate_state", [])?;
        Ok(())
    }
}
