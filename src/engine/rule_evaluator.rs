// ==========================================
// 网络成本估算系统 - 规则评估器
// ==========================================
// 职责: 根据项目参数决定哪些成本项适用及其数量
// 输入: ProjectParameters
// 输出: 有序的 ContributionRequest 列表 (尚未定价)
// ==========================================
// 顺序即展示顺序:
//   10 交换机配置 → 20 跳线 → 30 会议话机 → 40 无线套件 → 50 VoIP 月租
// ==========================================

use crate::domain::parameters::ProjectParameters;
use crate::domain::types::CostCategory;

// ===== 目录查找键 =====
pub const SWITCH_24_PORT: &str = "24-Port Layer 2 Switch";
pub const SWITCH_INSTALLATION: &str = "Network Equipment Installation";
pub const PATCH_CORD_CAT6: &str = "Patch Cord - Category 6";
pub const CONFERENCE_PHONE: &str = "Conference Phone";
pub const POE_SWITCH_48_PORT: &str = "48-Port Layer 2 POE Switch";
pub const WIRELESS_AP_OUTDOOR: &str = "Wireless Access Point (Outdoor)";
pub const DUAL_BAND_ANTENNA: &str = "Meraki Dual-band Antenna";
pub const WIRELESS_AP_PATCH_CORD: &str = "Wireless Access Point Patch Cord";
pub const VOIP_MONTHLY_LINE: &str = "VoIP Monthly Line";

// ==========================================
// ContributionPolicy - 成本贡献策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContributionPolicy {
    SwitchSizing,
    PatchCords,
    ConferencePhones,
    WirelessBundle,
    RecurringVoip,
}

impl ContributionPolicy {
    /// 执行优先级 (小者先行)
    pub fn priority(&self) -> i32 {
        match self {
            ContributionPolicy::SwitchSizing => 10,
            ContributionPolicy::PatchCords => 20,
            ContributionPolicy::ConferencePhones => 30,
            ContributionPolicy::WirelessBundle => 40,
            ContributionPolicy::RecurringVoip => 50,
        }
    }

    pub fn all() -> [ContributionPolicy; 5] {
        [
            ContributionPolicy::SwitchSizing,
            ContributionPolicy::PatchCords,
            ContributionPolicy::ConferencePhones,
            ContributionPolicy::WirelessBundle,
            ContributionPolicy::RecurringVoip,
        ]
    }
}

/// 明细行展示文本的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineText {
    /// 取价目条目的 description
    CatalogDescription,
    Fixed(&'static str),
}

// ==========================================
// ContributionRequest - 成本贡献请求
// ==========================================
/// "按类别 Y 加入 N 个 X" 的决定, 由定价解析器落成明细行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRequest {
    pub policy: ContributionPolicy,
    pub lookup_key: &'static str,
    pub quantity: u32,
    pub category: CostCategory,
    pub label: LineText,
    pub detail: LineText,
    /// 前置条目: 该条目在目录中缺失时本请求一并跳过
    pub requires: Option<&'static str>,
}

impl ContributionRequest {
    fn one_time(
        policy: ContributionPolicy,
        lookup_key: &'static str,
        quantity: u32,
        label: LineText,
        detail: LineText,
    ) -> Self {
        Self {
            policy,
            lookup_key,
            quantity,
            category: CostCategory::OneTime,
            label,
            detail,
            requires: None,
        }
    }
}

// ==========================================
// RuleEvaluator - 规则评估器
// ==========================================
pub struct RuleEvaluator {
    switch_ports: u32,
    poe_switch_ports: u32,
}

impl RuleEvaluator {
    /// 构造函数
    ///
    /// # 参数
    /// - `switch_ports`: 话机交换机端口数 (默认 24)
    /// - `poe_switch_ports`: 无线 POE 交换机端口数 (默认 48)
    pub fn new(switch_ports: u32, poe_switch_ports: u32) -> Self {
        Self {
            switch_ports: switch_ports.max(1),
            poe_switch_ports: poe_switch_ports.max(1),
        }
    }

    /// 评估全部策略, 按优先级输出贡献请求
    pub fn evaluate(&self, params: &ProjectParameters) -> Vec<ContributionRequest> {
        let mut requests = Vec::new();

        for policy in ContributionPolicy::all() {
            let before = requests.len();
            match policy {
                ContributionPolicy::SwitchSizing => self.switch_sizing(params, &mut requests),
                ContributionPolicy::PatchCords => self.patch_cords(params, &mut requests),
                ContributionPolicy::ConferencePhones => {
                    self.conference_phones(params, &mut requests)
                }
                ContributionPolicy::WirelessBundle => self.wireless_bundle(params, &mut requests),
                ContributionPolicy::RecurringVoip => self.recurring_voip(params, &mut requests),
            }

            tracing::debug!(
                policy = ?policy,
                fired = requests.len() > before,
                requests = requests.len() - before,
                "规则评估"
            );
        }

        requests
    }

    /// 交换机配置: 每 switch_ports 部话机一台交换机, 安装人工按台计
    fn switch_sizing(&self, params: &ProjectParameters, out: &mut Vec<ContributionRequest>) {
        let total_phones = params.total_phones();
        if total_phones == 0 {
            return;
        }

        let switches_needed = total_phones.div_ceil(self.switch_ports);

        out.push(ContributionRequest::one_time(
            ContributionPolicy::SwitchSizing,
            SWITCH_24_PORT,
            switches_needed,
            LineText::CatalogDescription,
            LineText::Fixed("New 24-port layer 2 switch @ 40% expansion"),
        ));

        out.push(ContributionRequest {
            requires: Some(SWITCH_24_PORT),
            ..ContributionRequest::one_time(
                ContributionPolicy::SwitchSizing,
                SWITCH_INSTALLATION,
                switches_needed,
                LineText::CatalogDescription,
                LineText::Fixed("Vendor labor to install network switches"),
            )
        });
    }

    /// 跳线: 每部话机一根
    fn patch_cords(&self, params: &ProjectParameters, out: &mut Vec<ContributionRequest>) {
        let total_phones = params.total_phones();
        if total_phones == 0 {
            return;
        }

        out.push(ContributionRequest::one_time(
            ContributionPolicy::PatchCords,
            PATCH_CORD_CAT6,
            total_phones,
            LineText::CatalogDescription,
            LineText::Fixed("Cord 7' by default"),
        ));
    }

    /// 会议话机: 独立明细行, 明细说明取价目描述
    fn conference_phones(&self, params: &ProjectParameters, out: &mut Vec<ContributionRequest>) {
        if params.conference_phones_qty == 0 {
            return;
        }

        out.push(ContributionRequest::one_time(
            ContributionPolicy::ConferencePhones,
            CONFERENCE_PHONE,
            params.conference_phones_qty,
            LineText::Fixed("Conference Phones"),
            LineText::CatalogDescription,
        ));
    }

    /// 无线套件: 需同时开启无线且勘测数量 > 0
    fn wireless_bundle(&self, params: &ProjectParameters, out: &mut Vec<ContributionRequest>) {
        let survey_qty = params.wireless_predictive_survey_results_qty;
        if !params.wireless || survey_qty == 0 {
            return;
        }

        out.push(ContributionRequest::one_time(
            ContributionPolicy::WirelessBundle,
            POE_SWITCH_48_PORT,
            survey_qty.div_ceil(self.poe_switch_ports),
            LineText::CatalogDescription,
            LineText::Fixed("New 48-port switches required to support WAPs only @ 40% expansion"),
        ));

        out.push(ContributionRequest::one_time(
            ContributionPolicy::WirelessBundle,
            WIRELESS_AP_OUTDOOR,
            survey_qty,
            LineText::Fixed("Wireless Network Equipment - Wireless Access Points (For Outdoors)"),
            LineText::CatalogDescription,
        ));

        out.push(ContributionRequest::one_time(
            ContributionPolicy::WirelessBundle,
            DUAL_BAND_ANTENNA,
            survey_qty,
            LineText::Fixed("Wireless Network Equipment - Meraki Dual-band Antenna - Omni"),
            LineText::CatalogDescription,
        ));

        out.push(ContributionRequest::one_time(
            ContributionPolicy::WirelessBundle,
            WIRELESS_AP_PATCH_CORD,
            survey_qty,
            LineText::Fixed(
                "Patch Cords: Rack/Cabinet side & Wireless Access Points - Category 6A",
            ),
            LineText::CatalogDescription,
        ));
    }

    /// VoIP 月租: 周期性成本, 按话机数计
    fn recurring_voip(&self, params: &ProjectParameters, out: &mut Vec<ContributionRequest>) {
        let total_phones = params.total_phones();
        if total_phones == 0 {
            return;
        }

        out.push(ContributionRequest {
            category: CostCategory::Recurring,
            ..ContributionRequest::one_time(
                ContributionPolicy::RecurringVoip,
                VOIP_MONTHLY_LINE,
                total_phones,
                LineText::CatalogDescription,
                LineText::Fixed("Annual Cost for VoIP Line Charges"),
            )
        });
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new(24, 48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(premium: u32, standard: u32, conference: u32, single: u32) -> ProjectParameters {
        ProjectParameters {
            premium_phones_qty: premium,
            standard_phones_qty: standard,
            conference_phones_qty: conference,
            single_line_phones_qty: single,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_phones_no_requests() {
        let evaluator = RuleEvaluator::default();
        assert!(evaluator.evaluate(&ProjectParameters::default()).is_empty());
    }

    #[test]
    fn test_switch_count_rounds_up() {
        let evaluator = RuleEvaluator::default();

        let requests = evaluator.evaluate(&phones(10, 20, 5, 15));
        let switch = requests.iter().find(|r| r.lookup_key == SWITCH_24_PORT).unwrap();
        let install = requests.iter().find(|r| r.lookup_key == SWITCH_INSTALLATION).unwrap();

        assert_eq!(switch.quantity, 3);
        // 安装人工按交换机台数计, 而非话机数
        assert_eq!(install.quantity, 3);
        assert_eq!(install.requires, Some(SWITCH_24_PORT));

        let requests = evaluator.evaluate(&phones(24, 0, 0, 0));
        assert_eq!(requests[0].quantity, 1);
        let requests = evaluator.evaluate(&phones(25, 0, 0, 0));
        assert_eq!(requests[0].quantity, 2);
    }

    #[test]
    fn test_policy_order() {
        let evaluator = RuleEvaluator::default();
        let params = ProjectParameters {
            wireless: true,
            wireless_predictive_survey_results_qty: 10,
            ..phones(1, 1, 2, 0)
        };

        let keys: Vec<&str> = evaluator.evaluate(&params).iter().map(|r| r.lookup_key).collect();
        assert_eq!(
            keys,
            vec![
                SWITCH_24_PORT,
                SWITCH_INSTALLATION,
                PATCH_CORD_CAT6,
                CONFERENCE_PHONE,
                POE_SWITCH_48_PORT,
                WIRELESS_AP_OUTDOOR,
                DUAL_BAND_ANTENNA,
                WIRELESS_AP_PATCH_CORD,
                VOIP_MONTHLY_LINE,
            ]
        );
    }

    #[test]
    fn test_wireless_requires_flag_and_survey() {
        let evaluator = RuleEvaluator::default();

        let flag_off = ProjectParameters {
            wireless: false,
            wireless_predictive_survey_results_qty: 10,
            ..Default::default()
        };
        assert!(evaluator.evaluate(&flag_off).is_empty());

        let no_survey = ProjectParameters {
            wireless: true,
            ..Default::default()
        };
        assert!(evaluator.evaluate(&no_survey).is_empty());

        let both = ProjectParameters {
            wireless: true,
            wireless_predictive_survey_results_qty: 49,
            ..Default::default()
        };
        let requests = evaluator.evaluate(&both);
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].quantity, 2); // ceil(49 / 48)
        assert!(requests[1..].iter().all(|r| r.quantity == 49));
        assert!(requests.iter().all(|r| r.category == CostCategory::OneTime));
    }

    #[test]
    fn test_voip_is_recurring() {
        let evaluator = RuleEvaluator::default();
        let requests = evaluator.evaluate(&phones(0, 3, 0, 0));
        let voip = requests.last().unwrap();

        assert_eq!(voip.lookup_key, VOIP_MONTHLY_LINE);
        assert_eq!(voip.category, CostCategory::Recurring);
        assert_eq!(voip.quantity, 3);
    }

    #[test]
    fn test_priorities_ascend() {
        let priorities: Vec<i32> = ContributionPolicy::all().iter().map(|p| p.priority()).collect();
        assert!(priorities.windows(2).all(|w| w[0] < w[1]));
    }
}
