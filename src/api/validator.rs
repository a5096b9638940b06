// ==========================================
// 网络成本估算系统 - 输入校验器
// ==========================================
// 职责: 估算参数与目录条目的录入校验
// 说明: 计算引擎本身不校验, 校验在 API 层完成
// ==========================================

use rust_decimal::Decimal;

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::catalog::{CalculationRule, CostItem, Region};
use crate::domain::parameters::ProjectParameters;

fn into_result(reason: &str, violations: Vec<ValidationViolation>) -> ApiResult<()> {
    if violations.is_empty() {
        return Ok(());
    }

    tracing::warn!("{}: {}项违规", reason, violations.len());
    Err(ApiError::ValidationError {
        reason: format!("{}（{}项）", reason, violations.len()),
        violations,
    })
}

// ==========================================
// ParameterValidator - 估算参数校验器
// ==========================================
pub struct ParameterValidator;

impl ParameterValidator {
    /// 校验估算参数
    ///
    /// # 规则
    /// - requestor 不能为空
    /// - riskFactor 不能为负
    pub fn validate(params: &ProjectParameters) -> ApiResult<()> {
        let mut violations = Vec::new();

        if params.requestor.trim().is_empty() {
            violations.push(ValidationViolation::new("requestor", "申请人不能为空"));
        }

        if let Some(risk_factor) = params.risk_factor {
            if risk_factor < Decimal::ZERO {
                violations.push(ValidationViolation::new(
                    "riskFactor",
                    format!("风险系数不能为负: {}", risk_factor),
                ));
            }
        }

        into_result("估算参数校验失败", violations)
    }
}

// ==========================================
// CatalogValidator - 目录条目校验器
// ==========================================
pub struct CatalogValidator;

impl CatalogValidator {
    /// 价目: name/description 非空, unitCost >= 0
    pub fn validate_cost_item(item: &CostItem) -> ApiResult<()> {
        let mut violations = Vec::new();

        if item.name.trim().is_empty() {
            violations.push(ValidationViolation::new("name", "名称不能为空"));
        }
        if item.description.trim().is_empty() {
            violations.push(ValidationViolation::new("description", "描述不能为空"));
        }
        if item.unit_cost < Decimal::ZERO {
            violations.push(ValidationViolation::new(
                "unitCost",
                format!("单价不能为负: {}", item.unit_cost),
            ));
        }

        into_result("价目校验失败", violations)
    }

    /// 规则: name 非空
    pub fn validate_rule(rule: &CalculationRule) -> ApiResult<()> {
        let mut violations = Vec::new();

        if rule.name.trim().is_empty() {
            violations.push(ValidationViolation::new("name", "名称不能为空"));
        }

        into_result("规则校验失败", violations)
    }

    /// 地区: name 非空, costMultiplier > 0
    pub fn validate_region(region: &Region) -> ApiResult<()> {
        let mut violations = Vec::new();

        if region.name.trim().is_empty() {
            violations.push(ValidationViolation::new("name", "名称不能为空"));
        }
        if region.cost_multiplier <= Decimal::ZERO {
            violations.push(ValidationViolation::new(
                "costMultiplier",
                format!("地区系数必须大于0: {}", region.cost_multiplier),
            ));
        }

        into_result("地区校验失败", violations)
    }
}
