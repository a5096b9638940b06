// ==========================================
// 网络成本估算系统 - 估算结果领域模型
// ==========================================
// 职责: 成本明细行与估算结果
// 红线: extended_cost 只能由 required_quantity × unit_cost 派生
// 红线: 结果构造后不再修改, 重新计算产生新结果
// ==========================================

use crate::domain::types::CostCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// CostResultItem - 成本明细行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResultItem {
    pub description: String,
    pub calculated_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_quantity: Option<u32>,
    pub required_quantity: u32,
    pub unit_cost: Decimal,
    pub extended_cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    pub category: CostCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

impl CostResultItem {
    /// 构造明细行
    ///
    /// # 参数
    /// - `unit_cost`: 已完成地区调整的单价
    ///
    /// calculated_quantity 与 required_quantity 取同一数量
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        unit_cost: Decimal,
        detailed_description: Option<String>,
        category: CostCategory,
    ) -> Self {
        Self {
            description: description.into(),
            calculated_quantity: quantity,
            adjustment_quantity: None,
            required_quantity: quantity,
            unit_cost,
            extended_cost: Decimal::from(quantity) * unit_cost,
            detailed_description,
            category,
            subcategory: None,
        }
    }

    /// 同 `new`, 但数量×单价超出 Decimal 表示范围时返回 None
    pub fn try_new(
        description: impl Into<String>,
        quantity: u32,
        unit_cost: Decimal,
        detailed_description: Option<String>,
        category: CostCategory,
    ) -> Option<Self> {
        let extended_cost = Decimal::from(quantity).checked_mul(unit_cost)?;
        Some(Self {
            description: description.into(),
            calculated_quantity: quantity,
            adjustment_quantity: None,
            required_quantity: quantity,
            unit_cost,
            extended_cost,
            detailed_description,
            category,
            subcategory: None,
        })
    }

    /// 校验派生金额是否与数量×单价一致
    pub fn is_consistent(&self) -> bool {
        Decimal::from(self.required_quantity).checked_mul(self.unit_cost)
            == Some(self.extended_cost)
    }
}

// ==========================================
// CostResult - 估算结果
// ==========================================
// one_time_subtotal 包含风险溢价行
// total_cost = one_time_subtotal + recurring_subtotal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    pub one_time_items: Vec<CostResultItem>,
    pub recurring_items: Vec<CostResultItem>,
    pub one_time_subtotal: Decimal,
    pub recurring_subtotal: Decimal,
    /// None 表示未计溢价 (区别于 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_risk_premium: Option<Decimal>,
    pub total_cost: Decimal,
}

impl CostResult {
    /// 全部明细 (一次性在前, 周期性在后)
    pub fn all_items(&self) -> impl Iterator<Item = &CostResultItem> {
        self.one_time_items.iter().chain(self.recurring_items.iter())
    }

    pub fn line_count(&self) -> usize {
        self.one_time_items.len() + self.recurring_items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extended_cost_is_derived() {
        let item = CostResultItem::new("Switch", 3, dec!(3780), None, CostCategory::OneTime);
        assert_eq!(item.calculated_quantity, 3);
        assert_eq!(item.required_quantity, 3);
        assert_eq!(item.extended_cost, dec!(11340));
        assert!(item.is_consistent());
    }

    #[test]
    fn test_try_new_rejects_overflow() {
        assert!(CostResultItem::try_new("Huge", 10, Decimal::MAX, None, CostCategory::OneTime)
            .is_none());

        let item = CostResultItem::try_new("Switch", 3, dec!(3780), None, CostCategory::OneTime)
            .unwrap();
        assert_eq!(item, CostResultItem::new("Switch", 3, dec!(3780), None, CostCategory::OneTime));
    }

    #[test]
    fn test_optional_fields_omitted_in_json() {
        let item = CostResultItem::new("Line", 1, dec!(12.74), None, CostCategory::Recurring);
        let json = serde_json::to_value(&item).unwrap();

        assert!(json.get("detailedDescription").is_none());
        assert!(json.get("subcategory").is_none());
        assert_eq!(json["category"], "recurring");
        assert_eq!(json["requiredQuantity"], 1);
    }
}
