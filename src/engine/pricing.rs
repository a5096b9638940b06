// ==========================================
// 网络成本估算系统 - 定价解析器
// ==========================================
// 职责: 把贡献请求落成带价格的明细行
// 规则: 一次性成本 × 地区系数; 周期性成本按原价
// 红线: 地区系数只在此处乘一次
// ==========================================

use crate::domain::catalog::{CatalogSnapshot, CostItem};
use crate::domain::estimate::CostResultItem;
use crate::engine::rule_evaluator::{ContributionRequest, LineText};
use rust_decimal::Decimal;

// ==========================================
// PricingResolver - 定价解析器
// ==========================================
pub struct PricingResolver {
    /// true: 停用价目视为不存在; false: 沿用不区分启停的查找
    enforce_active_items: bool,
}

impl PricingResolver {
    pub fn new(enforce_active_items: bool) -> Self {
        Self {
            enforce_active_items,
        }
    }

    /// 查找价目条目 (name 优先, description 兜底)
    pub fn lookup<'a>(&self, snapshot: &'a CatalogSnapshot, key: &str) -> Option<&'a CostItem> {
        if self.enforce_active_items {
            snapshot.find_active_by_name_or_description(key)
        } else {
            snapshot.find_by_name_or_description(key)
        }
    }

    /// 按类别调整单价, 超出 Decimal 表示范围时返回 None
    pub fn adjusted_unit_cost(
        &self,
        request: &ContributionRequest,
        unit_cost: Decimal,
        region_multiplier: Decimal,
    ) -> Option<Decimal> {
        if request.category.is_region_adjusted() {
            unit_cost.checked_mul(region_multiplier)
        } else {
            Some(unit_cost)
        }
    }

    /// 定价
    ///
    /// # 返回
    /// - Some(CostResultItem): 定价完成的明细行
    /// - None: 价目缺失或金额溢出, 该贡献跳过
    pub fn resolve(
        &self,
        request: &ContributionRequest,
        snapshot: &CatalogSnapshot,
        region_multiplier: Decimal,
    ) -> Option<CostResultItem> {
        let item = self.lookup(snapshot, request.lookup_key)?;

        let description = match &request.label {
            LineText::CatalogDescription => item.description.clone(),
            LineText::Fixed(text) => text.to_string(),
        };
        let detail = match &request.detail {
            LineText::CatalogDescription => item.description.clone(),
            LineText::Fixed(text) => text.to_string(),
        };

        let line = self
            .adjusted_unit_cost(request, item.unit_cost, region_multiplier)
            .and_then(|unit_cost| {
                CostResultItem::try_new(
                    description,
                    request.quantity,
                    unit_cost,
                    Some(detail),
                    request.category,
                )
            });

        if line.is_none() {
            tracing::warn!(
                key = request.lookup_key,
                quantity = request.quantity,
                unit_cost = %item.unit_cost,
                %region_multiplier,
                "金额溢出, 跳过该行"
            );
        }
        line
    }
}

impl Default for PricingResolver {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CostItem, Region};
    use crate::domain::types::CostCategory;
    use crate::engine::rule_evaluator::ContributionPolicy;
    use rust_decimal_macros::dec;

    fn snapshot_with(item: CostItem) -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![item],
            vec![Region {
                id: "r".to_string(),
                name: "Northeast".to_string(),
                cost_multiplier: dec!(1.15),
                is_active: true,
            }],
        )
    }

    fn widget(is_active: bool) -> CostItem {
        CostItem {
            id: "w".to_string(),
            name: "Widget".to_string(),
            description: "Widget, boxed".to_string(),
            category: "Test".to_string(),
            unit_cost: dec!(100),
            is_active,
        }
    }

    fn request(category: CostCategory) -> ContributionRequest {
        ContributionRequest {
            policy: ContributionPolicy::SwitchSizing,
            lookup_key: "Widget",
            quantity: 2,
            category,
            label: LineText::CatalogDescription,
            detail: LineText::Fixed("two widgets"),
            requires: None,
        }
    }

    #[test]
    fn test_one_time_applies_multiplier_once() {
        let resolver = PricingResolver::default();
        let snapshot = snapshot_with(widget(true));

        let line = resolver
            .resolve(&request(CostCategory::OneTime), &snapshot, dec!(1.15))
            .unwrap();

        assert_eq!(line.unit_cost, dec!(115));
        assert_eq!(line.extended_cost, dec!(230));
        assert_eq!(line.description, "Widget, boxed");
        assert_eq!(line.detailed_description.as_deref(), Some("two widgets"));
    }

    #[test]
    fn test_recurring_ignores_multiplier() {
        let resolver = PricingResolver::default();
        let snapshot = snapshot_with(widget(true));

        let line = resolver
            .resolve(&request(CostCategory::Recurring), &snapshot, dec!(1.15))
            .unwrap();

        assert_eq!(line.unit_cost, dec!(100));
        assert_eq!(line.extended_cost, dec!(200));
        assert_eq!(line.category, CostCategory::Recurring);
    }

    #[test]
    fn test_missing_item_is_skipped() {
        let resolver = PricingResolver::default();
        let snapshot = CatalogSnapshot::default();
        assert!(resolver
            .resolve(&request(CostCategory::OneTime), &snapshot, Decimal::ONE)
            .is_none());
    }

    #[test]
    fn test_overflowing_line_is_skipped() {
        let resolver = PricingResolver::default();
        let mut huge = widget(true);
        huge.unit_cost = Decimal::MAX;
        let snapshot = snapshot_with(huge);

        // 地区系数溢出
        assert!(resolver
            .resolve(&request(CostCategory::OneTime), &snapshot, dec!(1.15))
            .is_none());
        // 数量 × 单价溢出
        assert!(resolver
            .resolve(&request(CostCategory::Recurring), &snapshot, Decimal::ONE)
            .is_none());
    }

    #[test]
    fn test_inactive_item_lookup_modes() {
        let snapshot = snapshot_with(widget(false));

        let legacy = PricingResolver::new(false);
        assert!(legacy
            .resolve(&request(CostCategory::OneTime), &snapshot, Decimal::ONE)
            .is_some());

        let strict = PricingResolver::new(true);
        assert!(strict
            .resolve(&request(CostCategory::OneTime), &snapshot, Decimal::ONE)
            .is_none());
    }
}
