// ==========================================
// 网络成本估算系统 - 领域类型定义
// ==========================================
// 职责: 成本类别、项目复杂度等枚举类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 成本类别 (Cost Category)
// ==========================================
// 一次性成本受地区系数影响; 周期性成本按原价计
// 序列化格式: "one-time" / "recurring"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostCategory {
    OneTime,   // 一次性 (设备、安装人工)
    Recurring, // 周期性 (月租等)
}

impl CostCategory {
    /// 是否应用地区系数
    pub fn is_region_adjusted(&self) -> bool {
        matches!(self, CostCategory::OneTime)
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            CostCategory::OneTime => "one-time",
            CostCategory::Recurring => "recurring",
        }
    }
}

impl Default for CostCategory {
    fn default() -> Self {
        CostCategory::OneTime
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 项目复杂度 (Project Complexity)
// ==========================================
// 仅作为输入记录, 引擎当前不据此调整金额
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectComplexity {
    Low,
    Medium,
    High,
}

impl fmt::Display for ProjectComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectComplexity::Low => write!(f, "Low"),
            ProjectComplexity::Medium => write!(f, "Medium"),
            ProjectComplexity::High => write!(f, "High"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_category_serde() {
        let json = serde_json::to_string(&CostCategory::OneTime).unwrap();
        assert_eq!(json, "\"one-time\"");

        let parsed: CostCategory = serde_json::from_str("\"recurring\"").unwrap();
        assert_eq!(parsed, CostCategory::Recurring);
    }

    #[test]
    fn test_region_adjustment_flag() {
        assert!(CostCategory::OneTime.is_region_adjusted());
        assert!(!CostCategory::Recurring.is_region_adjusted());
    }
}
