// ==========================================
// 网络成本估算系统 - 估算 API
// ==========================================
// 职责: 参数校验 → 目录快照 → 引擎计算 → 保存当前状态
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::validator::ParameterValidator;
use crate::config::ConfigManager;
use crate::domain::estimate::CostResult;
use crate::domain::parameters::ProjectParameters;
use crate::engine::CostCalculator;
use crate::repository::{CatalogRepository, EstimateStateRepository};

// ==========================================
// EstimateApi - 估算 API
// ==========================================
pub struct EstimateApi {
    catalog_repo: Arc<CatalogRepository>,
    state_repo: Arc<EstimateStateRepository>,
    config_manager: Arc<ConfigManager>,
}

impl EstimateApi {
    pub fn new(
        catalog_repo: Arc<CatalogRepository>,
        state_repo: Arc<EstimateStateRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            catalog_repo,
            state_repo,
            config_manager,
        }
    }

    /// 执行估算并保存为当前估算
    ///
    /// # 返回
    /// - Ok(CostResult): 估算结果
    /// - Err(ApiError): 参数校验失败或数据库错误
    pub fn run_estimate(&self, params: &ProjectParameters) -> ApiResult<CostResult> {
        let result = self.preview_estimate(params)?;

        self.state_repo.save_current_parameters(params)?;
        self.state_repo.save_current_result(&result)?;

        tracing::info!(
            requestor = %params.requestor,
            region = params.cable_region.as_deref().unwrap_or("-"),
            lines = result.line_count(),
            total_cost = %result.total_cost,
            "估算完成"
        );

        Ok(result)
    }

    /// 仅计算, 不保存
    pub fn preview_estimate(&self, params: &ProjectParameters) -> ApiResult<CostResult> {
        ParameterValidator::validate(params)?;

        let snapshot = self.catalog_repo.load_snapshot()?;
        let config = self.config_manager.calculator_config()?;

        Ok(CostCalculator::new(config).calculate(params, &snapshot))
    }

    /// 最近一次估算的参数
    pub fn current_parameters(&self) -> ApiResult<Option<ProjectParameters>> {
        Ok(self.state_repo.load_current_parameters()?)
    }

    /// 最近一次估算的结果
    pub fn current_result(&self) -> ApiResult<Option<CostResult>> {
        Ok(self.state_repo.load_current_result()?)
    }

    /// 清空当前估算
    pub fn reset(&self) -> ApiResult<()> {
        Ok(self.state_repo.clear()?)
    }
}
