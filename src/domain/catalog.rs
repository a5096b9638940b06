// ==========================================
// 网络成本估算系统 - 目录领域模型
// ==========================================
// 职责: 设备/人工价目、计算规则、地区系数, 以及计算用的目录快照
// 红线: 计算期间只读; 同一次计算只使用一个快照
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// CostItem - 价目条目
// ==========================================
// name: 规则/定价查找键; description: 展示名称
// 约束: unit_cost >= 0 (由目录管理保证)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub unit_cost: Decimal,
    pub is_active: bool,
}

// ==========================================
// CalculationRule - 计算规则
// ==========================================
// condition/action 为自由文本, 仅作记录与管理
// 排序: priority 升序, 同优先级按原始顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub condition: String,
    pub action: String,
    pub priority: i32,
    pub is_active: bool,
}

// ==========================================
// Region - 地区
// ==========================================
// 约束: cost_multiplier > 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub name: String,
    pub cost_multiplier: Decimal,
    pub is_active: bool,
}

// ==========================================
// CatalogSnapshot - 目录快照
// ==========================================
/// 一次计算所读取的一致目录视图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub equipment: Vec<CostItem>,
    pub rules: Vec<CalculationRule>,
    pub regions: Vec<Region>,
}

impl CatalogSnapshot {
    pub fn new(equipment: Vec<CostItem>, regions: Vec<Region>) -> Self {
        Self {
            equipment,
            rules: Vec::new(),
            regions,
        }
    }

    /// 按查找键定位价目条目
    ///
    /// 先精确匹配 name, 未命中再精确匹配 description。
    /// 不过滤 is_active (停用控制属于目录管理)。
    pub fn find_by_name_or_description(&self, key: &str) -> Option<&CostItem> {
        self.equipment
            .iter()
            .find(|item| item.name == key)
            .or_else(|| self.equipment.iter().find(|item| item.description == key))
    }

    /// 同上, 但停用条目视为不存在
    pub fn find_active_by_name_or_description(&self, key: &str) -> Option<&CostItem> {
        self.equipment
            .iter()
            .find(|item| item.is_active && item.name == key)
            .or_else(|| {
                self.equipment
                    .iter()
                    .find(|item| item.is_active && item.description == key)
            })
    }

    /// 地区系数
    ///
    /// # 返回
    /// - 名称精确匹配的地区系数
    /// - 未指定或未匹配时返回 1.0
    pub fn find_multiplier(&self, region_name: Option<&str>) -> Decimal {
        let name = match region_name {
            Some(n) if !n.is_empty() => n,
            _ => return Decimal::ONE,
        };

        self.regions
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.cost_multiplier)
            // 系数为 0 视同未配置
            .filter(|m| !m.is_zero())
            .unwrap_or(Decimal::ONE)
    }

    /// 处于启用状态的规则, 按 priority 升序 (稳定排序)
    pub fn active_rules(&self) -> Vec<&CalculationRule> {
        let mut rules: Vec<&CalculationRule> =
            self.rules.iter().filter(|r| r.is_active).collect();
        rules.sort_by_key(|r| r.priority);
        rules
    }
}
