// ==========================================
// 网络成本估算系统 - 成本计算引擎
// ==========================================
// 职责: 编排 规则评估 → 定价 → 汇总
// 输入: ProjectParameters + CatalogSnapshot
// 输出: CostResult
// ==========================================
// 红线: 纯函数, 无 I/O; 相同输入必得相同结果
// ==========================================

use crate::domain::catalog::CatalogSnapshot;
use crate::domain::estimate::CostResult;
use crate::domain::parameters::ProjectParameters;
use crate::engine::aggregator::CostAggregator;
use crate::engine::pricing::PricingResolver;
use crate::engine::rule_evaluator::RuleEvaluator;

// ==========================================
// CalculatorConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// 定价时是否排除停用价目
    pub enforce_active_items: bool,
    /// 话机交换机端口数
    pub switch_ports: u32,
    /// 无线 POE 交换机端口数
    pub poe_switch_ports: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            enforce_active_items: false,
            switch_ports: 24,
            poe_switch_ports: 48,
        }
    }
}

// ==========================================
// CostCalculator - 成本计算引擎
// ==========================================
pub struct CostCalculator {
    evaluator: RuleEvaluator,
    resolver: PricingResolver,
    aggregator: CostAggregator,
}

impl CostCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            evaluator: RuleEvaluator::new(config.switch_ports, config.poe_switch_ports),
            resolver: PricingResolver::new(config.enforce_active_items),
            aggregator: CostAggregator::new(),
        }
    }

    /// 计算估算结果
    ///
    /// # 参数
    /// - `params`: 项目参数
    /// - `snapshot`: 本次计算使用的目录快照
    ///
    /// # 说明
    /// - 价目缺失的贡献静默跳过, 不报错
    /// - 地区未指定/未匹配时系数为 1.0
    pub fn calculate(&self, params: &ProjectParameters, snapshot: &CatalogSnapshot) -> CostResult {
        let region_multiplier = snapshot.find_multiplier(params.cable_region.as_deref());
        let requests = self.evaluator.evaluate(params);

        tracing::debug!(
            %region_multiplier,
            requests = requests.len(),
            catalog_rules = snapshot.active_rules().len(),
            "开始计算"
        );

        let mut items = Vec::with_capacity(requests.len());
        for request in &requests {
            if let Some(required) = request.requires {
                if self.resolver.lookup(snapshot, required).is_none() {
                    tracing::debug!(
                        key = request.lookup_key,
                        required,
                        "前置价目缺失, 跳过"
                    );
                    continue;
                }
            }

            match self.resolver.resolve(request, snapshot, region_multiplier) {
                Some(item) => items.push(item),
                None => {
                    tracing::debug!(
                        key = request.lookup_key,
                        policy = ?request.policy,
                        "未生成明细行, 跳过"
                    );
                }
            }
        }

        self.aggregator
            .aggregate(items, params.risk_factor_or_zero())
    }
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CostItem, Region};
    use crate::domain::defaults::{default_equipment, default_regions};
    use crate::engine::rule_evaluator::{SWITCH_24_PORT, SWITCH_INSTALLATION};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn default_snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(default_equipment(), default_regions())
    }

    #[test]
    fn test_empty_parameters_empty_result() {
        let calculator = CostCalculator::default();
        let result = calculator.calculate(&ProjectParameters::default(), &default_snapshot());

        assert_eq!(result.line_count(), 0);
        assert_eq!(result.total_cost, Decimal::ZERO);
        assert_eq!(result.complexity_risk_premium, None);
    }

    #[test]
    fn test_install_skipped_when_switch_missing() {
        let equipment: Vec<CostItem> = default_equipment()
            .into_iter()
            .filter(|i| i.name != SWITCH_24_PORT)
            .collect();
        let snapshot = CatalogSnapshot::new(equipment, vec![]);
        let params = ProjectParameters {
            standard_phones_qty: 10,
            ..Default::default()
        };

        let result = CostCalculator::default().calculate(&params, &snapshot);

        assert!(result
            .one_time_items
            .iter()
            .all(|i| i.description != "Vendor labor to install network switches"));
        // 跳线与 VoIP 不受影响
        assert_eq!(result.one_time_items.len(), 1);
        assert_eq!(result.recurring_items.len(), 1);
    }

    #[test]
    fn test_install_present_with_switch() {
        let params = ProjectParameters {
            standard_phones_qty: 10,
            ..Default::default()
        };
        let result = CostCalculator::default().calculate(&params, &default_snapshot());

        let install = default_snapshot()
            .find_by_name_or_description(SWITCH_INSTALLATION)
            .cloned()
            .unwrap();
        assert!(result
            .one_time_items
            .iter()
            .any(|i| i.description == install.description && i.required_quantity == 1));
    }

    #[test]
    fn test_switch_ports_configurable() {
        let calculator = CostCalculator::new(CalculatorConfig {
            switch_ports: 12,
            ..Default::default()
        });
        let params = ProjectParameters {
            standard_phones_qty: 13,
            ..Default::default()
        };

        let result = calculator.calculate(&params, &default_snapshot());
        assert_eq!(result.one_time_items[0].required_quantity, 2);
    }

    #[test]
    fn test_zero_multiplier_region_falls_back() {
        let snapshot = CatalogSnapshot::new(
            default_equipment(),
            vec![Region {
                id: "z".to_string(),
                name: "Nowhere".to_string(),
                cost_multiplier: Decimal::ZERO,
                is_active: true,
            }],
        );
        let params = ProjectParameters {
            standard_phones_qty: 1,
            cable_region: Some("Nowhere".to_string()),
            ..Default::default()
        };

        let result = CostCalculator::default().calculate(&params, &snapshot);
        assert_eq!(result.one_time_items[0].unit_cost, dec!(3780.00));
    }
}
