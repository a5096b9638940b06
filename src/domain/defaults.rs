// ==========================================
// 网络成本估算系统 - 内置默认目录
// ==========================================
// 职责: 空库首次启动时写入的价目、规则、地区
// ==========================================

use crate::domain::catalog::{CalculationRule, CostItem, Region};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cost_item(id: &str, name: &str, description: &str, category: &str, unit_cost: Decimal) -> CostItem {
    CostItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        unit_cost,
        is_active: true,
    }
}

fn rule(id: &str, name: &str, description: &str, condition: &str, action: &str, priority: i32) -> CalculationRule {
    CalculationRule {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        condition: condition.to_string(),
        action: action.to_string(),
        priority,
        is_active: true,
    }
}

fn region(id: &str, name: &str, cost_multiplier: Decimal) -> Region {
    Region {
        id: id.to_string(),
        name: name.to_string(),
        cost_multiplier,
        is_active: true,
    }
}

/// 默认设备/人工价目
pub fn default_equipment() -> Vec<CostItem> {
    vec![
        cost_item(
            "eq1",
            "24-Port Layer 2 Switch",
            "Network Equipment - 24-Port Layer 2 Switch",
            "Network Equipment",
            dec!(3780.00),
        ),
        cost_item(
            "eq2",
            "Network Equipment Installation",
            "Vendor labor to install network switches",
            "Labor",
            dec!(150.00),
        ),
        cost_item("eq3", "Conference Phone", "Model 8832 + Mic Kit", "Phones", dec!(1212.60)),
        cost_item(
            "eq4",
            "Patch Cord - Category 6",
            "Patch Cords: Rack/Cabinet side - Category 6",
            "Cabling",
            dec!(4.73),
        ),
        cost_item(
            "eq5",
            "48-Port Layer 2 POE Switch",
            "Wireless Network Equipment - 48-Port Layer 2 POE Switches for APs",
            "Wireless Equipment",
            dec!(6324.00),
        ),
        cost_item(
            "eq6",
            "Wireless Access Point (Outdoor)",
            "Meraki MR86 Cloud Managed AP (For Outdoors)",
            "Wireless Equipment",
            dec!(1947.00),
        ),
        cost_item(
            "eq7",
            "Meraki Dual-band Antenna",
            "Meraki Dual-band Omni Antenna MA-ANT-20",
            "Wireless Equipment",
            dec!(133.80),
        ),
        cost_item("eq8", "VoIP Monthly Line", "VoIP Monthly Line Charges", "Recurring", dec!(12.74)),
        cost_item(
            "eq9",
            "Wireless Access Point Patch Cord",
            "Wireless Access Point - 2X CAT6a Patch Cord 5' by default",
            "Cabling",
            dec!(5.94),
        ),
    ]
}

/// 默认计算规则 (记录用途, 引擎按固定流程计算)
pub fn default_rules() -> Vec<CalculationRule> {
    vec![
        rule(
            "rule1",
            "Conference Phone Calculation",
            "Calculate cost for conference phones based on input quantity",
            "conferencePhonesQty > 0",
            "ADD_ITEM: 'Conference Phone', conferencePhonesQty",
            10,
        ),
        rule(
            "rule2",
            "Switch Calculation",
            "Calculate Layer 2 switches based on phone quantities",
            "premiumPhonesQty + standardPhonesQty + conferencePhonesQty > 0",
            "ADD_ITEM: '24-Port Layer 2 Switch', Math.ceil((premiumPhonesQty + standardPhonesQty + conferencePhonesQty) / 24)",
            20,
        ),
        rule(
            "rule3",
            "Network Equipment Installation",
            "Labor cost for switch installation",
            "true",
            "ADD_LABOR: 'Network Equipment Installation', TOTAL_SWITCHES",
            30,
        ),
        rule(
            "rule4",
            "Patch Cord Calculation",
            "Calculate patch cords based on phone quantities",
            "premiumPhonesQty + standardPhonesQty + conferencePhonesQty > 0",
            "ADD_ITEM: 'Patch Cord - Category 6', premiumPhonesQty + standardPhonesQty + conferencePhonesQty",
            40,
        ),
        rule(
            "rule5",
            "Wireless Access Point Switch",
            "Calculate POE switches needed for wireless access points",
            "wirelessPredictiveSurveyResultsQty > 0",
            "ADD_ITEM: '48-Port Layer 2 POE Switch', Math.ceil(wirelessPredictiveSurveyResultsQty / 48)",
            50,
        ),
        rule(
            "rule6",
            "Wireless Equipment",
            "Calculate wireless equipment costs",
            "wireless === true",
            "ADD_WIRELESS_EQUIPMENT",
            60,
        ),
        rule(
            "rule7",
            "Risk Factor Premium",
            "Apply complexity risk premium",
            "riskFactor > 0",
            "APPLY_RISK_PREMIUM: riskFactor",
            100,
        ),
    ]
}

/// 默认地区系数
pub fn default_regions() -> Vec<Region> {
    vec![
        region("reg1", "Northeast", dec!(1.15)),
        region("reg2", "Southeast", dec!(1.05)),
        region("reg3", "Midwest", dec!(1.00)),
        region("reg4", "Southwest", dec!(1.08)),
        region("reg5", "West", dec!(1.12)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_invariants() {
        assert_eq!(default_equipment().len(), 9);
        assert!(default_equipment().iter().all(|i| i.unit_cost >= Decimal::ZERO));
        assert!(default_regions().iter().all(|r| r.cost_multiplier > Decimal::ZERO));

        let priorities: Vec<i32> = default_rules().iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }
}
