// ==========================================
// 网络成本估算系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::engine::calculator::CalculatorConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const DEFAULT_ADMIN_ACCOUNT: &str = "admin";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        crate::db::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取布尔配置，缺失或格式错误时取默认值
    fn get_bool_or(&self, key: &str, default: bool) -> RepositoryResult<bool> {
        let value = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => {
                tracing::warn!("配置值格式错误, 使用默认值: key={}, value={}", key, other);
                Ok(default)
            }
        }
    }

    /// 读取正整数配置，缺失或格式错误时取默认值
    fn get_u32_or(&self, key: &str, default: u32) -> RepositoryResult<u32> {
        let value = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match value.trim().parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => {
                tracing::warn!("配置值格式错误, 使用默认值: key={}, value={}", key, value);
                Ok(default)
            }
        }
    }

    // ===== 计算引擎配置 =====

    /// 组装计算引擎配置
    pub fn calculator_config(&self) -> RepositoryResult<CalculatorConfig> {
        let defaults = CalculatorConfig::default();
        Ok(CalculatorConfig {
            enforce_active_items: self
                .get_bool_or(config_keys::ENFORCE_ACTIVE_ITEMS, defaults.enforce_active_items)?,
            switch_ports: self.get_u32_or(config_keys::SWITCH_PORTS, defaults.switch_ports)?,
            poe_switch_ports: self
                .get_u32_or(config_keys::POE_SWITCH_PORTS, defaults.poe_switch_ports)?,
        })
    }

    // ===== 管理员登录标记 =====

    pub fn is_admin_authenticated(&self) -> RepositoryResult<bool> {
        self.get_bool_or(config_keys::ADMIN_AUTHENTICATED, false)
    }

    pub fn set_admin_authenticated(&self, value: bool) -> RepositoryResult<()> {
        self.set_config_value(config_keys::ADMIN_AUTHENTICATED, &value.to_string())
    }

    /// 管理员账号（未配置时为 admin/admin）
    pub fn admin_credentials(&self) -> RepositoryResult<(String, String)> {
        let username = self
            .get_config_value(config_keys::ADMIN_USERNAME)?
            .unwrap_or_else(|| DEFAULT_ADMIN_ACCOUNT.to_string());
        let password = self
            .get_config_value(config_keys::ADMIN_PASSWORD)?
            .unwrap_or_else(|| DEFAULT_ADMIN_ACCOUNT.to_string());
        Ok((username, password))
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 定价
    pub const ENFORCE_ACTIVE_ITEMS: &str = "pricing.enforce_active_items";

    // 交换机端口数
    pub const SWITCH_PORTS: &str = "engine.switch_ports";
    pub const POE_SWITCH_PORTS: &str = "engine.poe_switch_ports";

    // 管理员登录标记
    pub const ADMIN_AUTHENTICATED: &str = "auth.admin_authenticated";
    pub const ADMIN_USERNAME: &str = "auth.admin_username";
    pub const ADMIN_PASSWORD: &str = "auth.admin_password";

    // 默认目录已写入 (之后清空的集合不再补种)
    pub const CATALOG_SEEDED: &str = "catalog.seeded";
}
