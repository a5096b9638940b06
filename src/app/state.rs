// ==========================================
// 网络成本估算系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{CatalogApi, EstimateApi};
use crate::config::ConfigManager;
use crate::importer::PriceListImporter;
use crate::repository::{
    CalculationRuleRepository, CatalogRepository, EquipmentRepository, EstimateStateRepository,
    RegionRepository, RepositoryResult, SeedReport,
};

/// 应用状态
///
/// 所有仓储共享同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 估算API
    pub estimate_api: Arc<EstimateApi>,

    /// 目录管理API
    pub catalog_api: Arc<CatalogApi>,

    /// 价目表导入
    pub price_list_importer: Arc<PriceListImporter>,

    /// 启动时补种的默认目录
    pub seed_report: SeedReport,
}

impl AppState {
    /// 打开数据库、建表、补种默认目录并组装 API
    pub fn new(db_path: String) -> RepositoryResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = crate::db::open_sqlite_connection(&db_path)?;
        crate::db::init_schema(&conn)?;
        if let Some(version) = crate::db::read_schema_version(&conn)? {
            if version > crate::db::CURRENT_SCHEMA_VERSION {
                tracing::warn!(
                    "数据库 schema_version={} 高于当前程序支持的 {}",
                    version,
                    crate::db::CURRENT_SCHEMA_VERSION
                );
            }
        }
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let equipment_repo = Arc::new(EquipmentRepository::from_connection(conn.clone()));
        let rule_repo = Arc::new(CalculationRuleRepository::from_connection(conn.clone()));
        let region_repo = Arc::new(RegionRepository::from_connection(conn.clone()));
        let catalog_repo = Arc::new(CatalogRepository::from_connection(conn.clone()));
        let state_repo = Arc::new(EstimateStateRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn)?);

        let seed_report = catalog_repo.seed_defaults_once()?;

        // ==========================================
        // 初始化API层
        // ==========================================
        let estimate_api = Arc::new(EstimateApi::new(
            catalog_repo,
            state_repo,
            config_manager.clone(),
        ));
        let catalog_api = Arc::new(CatalogApi::new(
            equipment_repo.clone(),
            rule_repo,
            region_repo,
            config_manager,
        ));
        let price_list_importer = Arc::new(PriceListImporter::new(equipment_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            estimate_api,
            catalog_api,
            price_list_importer,
            seed_report,
        })
    }
}
