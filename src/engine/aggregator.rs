// ==========================================
// 网络成本估算系统 - 成本汇总器
// ==========================================
// 职责: 明细分组、小计、复杂度风险溢价、总价
// 输入: 按生成顺序排列的明细行 + 风险系数(百分比)
// 输出: CostResult
// ==========================================
// 说明: 不做入参校验 (负数等由调用方负责)
// ==========================================

use crate::domain::estimate::{CostResult, CostResultItem};
use crate::domain::types::CostCategory;
use rust_decimal::Decimal;

pub const RISK_PREMIUM_DETAIL: &str =
    "To be used as a catch all for additional required cost not spelled out in other line items.";

// ==========================================
// CostAggregator - 成本汇总器
// ==========================================
pub struct CostAggregator {
    // 无状态
}

impl CostAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总明细行
    ///
    /// # 参数
    /// - `items`: 定价后的明细行 (生成顺序)
    /// - `risk_factor`: 风险系数百分比, 10 表示 10%
    ///
    /// # 步骤
    /// 1. 分组 (保持生成顺序), 同时累计小计与总价
    /// 2. 溢价 > 0 时追加溢价行
    /// 3. 总价 = 一次性小计 + 周期性小计
    ///
    /// 会使小计或总价超出 Decimal 表示范围的明细行被丢弃 (warn)
    pub fn aggregate(&self, items: Vec<CostResultItem>, risk_factor: Decimal) -> CostResult {
        debug_assert!(items.iter().all(CostResultItem::is_consistent));

        let mut totals = RunningTotals::default();
        let mut one_time_items = Vec::new();
        let mut recurring_items = Vec::new();

        for item in items {
            if !totals.admit(item.category, item.extended_cost) {
                tracing::warn!(
                    description = %item.description,
                    extended_cost = %item.extended_cost,
                    "小计溢出, 丢弃该行"
                );
                continue;
            }
            match item.category {
                CostCategory::OneTime => one_time_items.push(item),
                CostCategory::Recurring => recurring_items.push(item),
            }
        }

        let premium = Self::risk_premium(totals.one_time, risk_factor)
            .filter(|premium| totals.admit(CostCategory::OneTime, *premium));
        if let Some(premium) = premium {
            // 溢价已是最终金额, 不再做地区调整
            one_time_items.push(CostResultItem::new(
                format!(
                    "Complexity Risk Premium - Risk Factor: {}",
                    risk_factor.normalize()
                ),
                1,
                premium,
                Some(RISK_PREMIUM_DETAIL.to_string()),
                CostCategory::OneTime,
            ));
        }

        tracing::debug!(
            one_time_lines = one_time_items.len(),
            recurring_lines = recurring_items.len(),
            one_time_subtotal = %totals.one_time,
            recurring_subtotal = %totals.recurring,
            total_cost = %totals.total,
            "成本汇总完成"
        );

        CostResult {
            one_time_items,
            recurring_items,
            one_time_subtotal: totals.one_time,
            recurring_subtotal: totals.recurring,
            complexity_risk_premium: premium,
            total_cost: totals.total,
        }
    }

    /// 风险溢价 = 一次性小计 × 风险系数 / 100
    ///
    /// # 返回
    /// - Some(premium): 溢价为正
    /// - None: 风险系数未设置/非正, 溢价不为正, 或乘积溢出
    pub fn risk_premium(one_time_subtotal: Decimal, risk_factor: Decimal) -> Option<Decimal> {
        if risk_factor <= Decimal::ZERO {
            return None;
        }

        let Some(product) = one_time_subtotal.checked_mul(risk_factor) else {
            tracing::warn!(%one_time_subtotal, %risk_factor, "风险溢价溢出, 不计溢价");
            return None;
        };

        let premium = product / Decimal::ONE_HUNDRED;
        if premium > Decimal::ZERO {
            Some(premium)
        } else {
            None
        }
    }
}

// ==========================================
// RunningTotals - 累计小计
// ==========================================
// 三个累计值同时可表示时才接纳一行, 保证 total == one_time + recurring
#[derive(Debug, Default)]
struct RunningTotals {
    one_time: Decimal,
    recurring: Decimal,
    total: Decimal,
}

impl RunningTotals {
    fn admit(&mut self, category: CostCategory, amount: Decimal) -> bool {
        let subtotal = match category {
            CostCategory::OneTime => self.one_time,
            CostCategory::Recurring => self.recurring,
        };
        let (Some(subtotal), Some(total)) =
            (subtotal.checked_add(amount), self.total.checked_add(amount))
        else {
            return false;
        };

        match category {
            CostCategory::OneTime => self.one_time = subtotal,
            CostCategory::Recurring => self.recurring = subtotal,
        }
        self.total = total;
        true
    }
}

impl Default for CostAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn one_time(cost: Decimal) -> CostResultItem {
        CostResultItem::new("item", 1, cost, None, CostCategory::OneTime)
    }

    fn recurring(cost: Decimal) -> CostResultItem {
        CostResultItem::new("monthly", 1, cost, None, CostCategory::Recurring)
    }

    #[test]
    fn test_partition_preserves_order() {
        let aggregator = CostAggregator::new();
        let items = vec![
            CostResultItem::new("a", 1, dec!(1), None, CostCategory::OneTime),
            CostResultItem::new("r1", 1, dec!(2), None, CostCategory::Recurring),
            CostResultItem::new("b", 1, dec!(3), None, CostCategory::OneTime),
            CostResultItem::new("r2", 1, dec!(4), None, CostCategory::Recurring),
        ];

        let result = aggregator.aggregate(items, Decimal::ZERO);

        let one_time: Vec<&str> = result.one_time_items.iter().map(|i| i.description.as_str()).collect();
        let rec: Vec<&str> = result.recurring_items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(one_time, vec!["a", "b"]);
        assert_eq!(rec, vec!["r1", "r2"]);
        assert_eq!(result.one_time_subtotal, dec!(4));
        assert_eq!(result.recurring_subtotal, dec!(6));
        assert_eq!(result.total_cost, dec!(10));
    }

    #[test]
    fn test_risk_premium_line() {
        let aggregator = CostAggregator::new();
        let result = aggregator.aggregate(vec![one_time(dec!(1000)), recurring(dec!(50))], dec!(10));

        assert_eq!(result.complexity_risk_premium, Some(dec!(100)));
        assert_eq!(result.one_time_subtotal, dec!(1100));
        assert_eq!(result.recurring_subtotal, dec!(50));
        assert_eq!(result.total_cost, dec!(1150));

        let premium_line = result.one_time_items.last().unwrap();
        assert_eq!(premium_line.description, "Complexity Risk Premium - Risk Factor: 10");
        assert_eq!(premium_line.required_quantity, 1);
        assert_eq!(premium_line.unit_cost, dec!(100));
        assert_eq!(premium_line.extended_cost, dec!(100));
    }

    #[test]
    fn test_premium_ignores_recurring_costs() {
        let aggregator = CostAggregator::new();
        let result = aggregator.aggregate(vec![recurring(dec!(1000))], dec!(10));

        assert_eq!(result.complexity_risk_premium, None);
        assert!(result.one_time_items.is_empty());
        assert_eq!(result.total_cost, dec!(1000));
    }

    #[test]
    fn test_zero_risk_factor_leaves_premium_unset() {
        let aggregator = CostAggregator::new();
        let result = aggregator.aggregate(vec![one_time(dec!(1000))], Decimal::ZERO);

        assert_eq!(result.complexity_risk_premium, None);
        assert_eq!(result.one_time_items.len(), 1);
        assert_eq!(result.one_time_subtotal, dec!(1000));
    }

    #[test]
    fn test_negative_risk_factor_not_validated() {
        // 负风险系数不报错也不修正, 只是不产生溢价
        let aggregator = CostAggregator::new();
        let result = aggregator.aggregate(vec![one_time(dec!(1000))], dec!(-5));

        assert_eq!(result.complexity_risk_premium, None);
        assert_eq!(result.total_cost, dec!(1000));
    }

    #[test]
    fn test_huge_risk_factor_yields_no_premium() {
        let aggregator = CostAggregator::new();
        let result = aggregator.aggregate(vec![one_time(dec!(11340))], Decimal::MAX);

        assert_eq!(result.complexity_risk_premium, None);
        assert_eq!(result.one_time_items.len(), 1);
        assert_eq!(result.total_cost, dec!(11340));
    }

    #[test]
    fn test_overflowing_subtotal_drops_line() {
        let aggregator = CostAggregator::new();
        let result = aggregator.aggregate(
            vec![one_time(Decimal::MAX), one_time(dec!(1)), recurring(dec!(5))],
            Decimal::ZERO,
        );

        assert_eq!(result.one_time_items.len(), 1);
        assert_eq!(result.one_time_subtotal, Decimal::MAX);
        // 总价同样无法容纳周期性行
        assert!(result.recurring_items.is_empty());
        assert_eq!(result.total_cost, result.one_time_subtotal + result.recurring_subtotal);
    }

    #[test]
    fn test_fractional_risk_factor_label() {
        let aggregator = CostAggregator::new();
        let result = aggregator.aggregate(vec![one_time(dec!(200))], dec!(7.50));

        assert_eq!(result.complexity_risk_premium, Some(dec!(15)));
        assert_eq!(
            result.one_time_items[1].description,
            "Complexity Risk Premium - Risk Factor: 7.5"
        );
    }
}
