// ==========================================
// 网络成本估算系统 - 目录管理 API
// ==========================================
// 职责: 设备价目/计算规则/地区系数的管理端 CRUD
// 红线: 所有写操作须先登录; 读操作不受限
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::CatalogValidator;
use crate::config::ConfigManager;
use crate::domain::catalog::{CalculationRule, CostItem, Region};
use crate::repository::{CalculationRuleRepository, EquipmentRepository, RegionRepository};

// ==========================================
// CatalogApi - 目录管理 API
// ==========================================

/// 目录管理API
///
/// 职责：
/// 1. 管理员登录/登出
/// 2. 价目、规则、地区的增删改查
/// 3. 启用/停用
pub struct CatalogApi {
    equipment_repo: Arc<EquipmentRepository>,
    rule_repo: Arc<CalculationRuleRepository>,
    region_repo: Arc<RegionRepository>,
    config_manager: Arc<ConfigManager>,
}

impl CatalogApi {
    pub fn new(
        equipment_repo: Arc<EquipmentRepository>,
        rule_repo: Arc<CalculationRuleRepository>,
        region_repo: Arc<RegionRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            equipment_repo,
            rule_repo,
            region_repo,
            config_manager,
        }
    }

    // ==========================================
    // 登录
    // ==========================================

    /// 管理员登录
    ///
    /// # 返回
    /// - Ok(()): 登录成功, 标记持久化
    /// - Err(ApiError::Unauthorized): 账号或密码错误
    pub fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let (expected_user, expected_password) = self.config_manager.admin_credentials()?;

        if username != expected_user || password != expected_password {
            tracing::warn!(username = %username, "管理员登录失败");
            return Err(ApiError::Unauthorized("用户名或密码错误".to_string()));
        }

        self.config_manager.set_admin_authenticated(true)?;
        tracing::info!(username = %username, "管理员已登录");
        Ok(())
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.config_manager.set_admin_authenticated(false)?;
        tracing::info!("管理员已登出");
        Ok(())
    }

    pub fn is_authenticated(&self) -> ApiResult<bool> {
        Ok(self.config_manager.is_admin_authenticated()?)
    }

    fn ensure_admin(&self) -> ApiResult<()> {
        if self.is_authenticated()? {
            Ok(())
        } else {
            Err(ApiError::Unauthorized("目录修改需要管理员登录".to_string()))
        }
    }

    fn require_removed(removed: bool, entity: &str, id: &str) -> ApiResult<()> {
        if removed {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("{}(id={})不存在", entity, id)))
        }
    }

    /// 地区按名称选取, 名称须唯一
    fn ensure_region_name_free(&self, name: &str, own_id: Option<&str>) -> ApiResult<()> {
        if self.region_repo.name_taken(name, own_id)? {
            return Err(ApiError::BusinessRuleViolation(format!("地区已存在: {}", name)));
        }
        Ok(())
    }

    // ==========================================
    // 设备价目
    // ==========================================

    pub fn list_equipment(&self) -> ApiResult<Vec<CostItem>> {
        Ok(self.equipment_repo.list_all()?)
    }

    pub fn get_equipment(&self, id: &str) -> ApiResult<CostItem> {
        self.equipment_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("CostItem(id={})不存在", id)))
    }

    /// 新增价目, 返回带新 id 的条目
    pub fn add_equipment(&self, item: &CostItem) -> ApiResult<CostItem> {
        self.ensure_admin()?;
        CatalogValidator::validate_cost_item(item)?;

        let stored = self.equipment_repo.insert(item)?;
        tracing::info!(id = %stored.id, name = %stored.name, unit_cost = %stored.unit_cost, "新增价目");
        Ok(stored)
    }

    pub fn update_equipment(&self, item: &CostItem) -> ApiResult<()> {
        self.ensure_admin()?;
        CatalogValidator::validate_cost_item(item)?;

        self.equipment_repo.update(item)?;
        tracing::info!(id = %item.id, name = %item.name, unit_cost = %item.unit_cost, "更新价目");
        Ok(())
    }

    pub fn set_equipment_active(&self, id: &str, is_active: bool) -> ApiResult<()> {
        self.ensure_admin()?;
        self.equipment_repo.set_active(id, is_active)?;
        tracing::info!(id = %id, is_active, "价目启停");
        Ok(())
    }

    pub fn delete_equipment(&self, id: &str) -> ApiResult<()> {
        self.ensure_admin()?;
        Self::require_removed(self.equipment_repo.delete(id)?, "CostItem", id)?;
        tracing::info!(id = %id, "删除价目");
        Ok(())
    }

    // ==========================================
    // 计算规则
    // ==========================================

    /// 按优先级升序
    pub fn list_rules(&self) -> ApiResult<Vec<CalculationRule>> {
        Ok(self.rule_repo.list_all()?)
    }

    pub fn add_rule(&self, rule: &CalculationRule) -> ApiResult<CalculationRule> {
        self.ensure_admin()?;
        CatalogValidator::validate_rule(rule)?;

        let stored = self.rule_repo.insert(rule)?;
        tracing::info!(id = %stored.id, name = %stored.name, priority = stored.priority, "新增规则");
        Ok(stored)
    }

    pub fn update_rule(&self, rule: &CalculationRule) -> ApiResult<()> {
        self.ensure_admin()?;
        CatalogValidator::validate_rule(rule)?;

        self.rule_repo.update(rule)?;
        tracing::info!(id = %rule.id, name = %rule.name, "更新规则");
        Ok(())
    }

    pub fn set_rule_active(&self, id: &str, is_active: bool) -> ApiResult<()> {
        self.ensure_admin()?;
        self.rule_repo.set_active(id, is_active)?;
        tracing::info!(id = %id, is_active, "规则启停");
        Ok(())
    }

    pub fn delete_rule(&self, id: &str) -> ApiResult<()> {
        self.ensure_admin()?;
        Self::require_removed(self.rule_repo.delete(id)?, "CalculationRule", id)?;
        tracing::info!(id = %id, "删除规则");
        Ok(())
    }

    // ==========================================
    // 地区系数
    // ==========================================

    pub fn list_regions(&self) -> ApiResult<Vec<Region>> {
        Ok(self.region_repo.list_all()?)
    }

    pub fn add_region(&self, region: &Region) -> ApiResult<Region> {
        self.ensure_admin()?;
        CatalogValidator::validate_region(region)?;

        self.ensure_region_name_free(&region.name, None)?;

        let stored = self.region_repo.insert(region)?;
        tracing::info!(id = %stored.id, name = %stored.name, multiplier = %stored.cost_multiplier, "新增地区");
        Ok(stored)
    }

    pub fn update_region(&self, region: &Region) -> ApiResult<()> {
        self.ensure_admin()?;
        CatalogValidator::validate_region(region)?;
        self.ensure_region_name_free(&region.name, Some(&region.id))?;

        self.region_repo.update(region)?;
        tracing::info!(id = %region.id, name = %region.name, multiplier = %region.cost_multiplier, "更新地区");
        Ok(())
    }

    pub fn set_region_active(&self, id: &str, is_active: bool) -> ApiResult<()> {
        self.ensure_admin()?;
        self.region_repo.set_active(id, is_active)?;
        tracing::info!(id = %id, is_active, "地区启停");
        Ok(())
    }

    pub fn delete_region(&self, id: &str) -> ApiResult<()> {
        self.ensure_admin()?;
        Self::require_removed(self.region_repo.delete(id)?, "Region", id)?;
        tracing::info!(id = %id, "删除地区");
        Ok(())
    }
}
