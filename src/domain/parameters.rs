// ==========================================
// 网络成本估算系统 - 项目参数领域模型
// ==========================================
// 职责: 一次估算请求的全部输入
// 约束: 数量字段缺省为 0; 评估期间不可变
// ==========================================

use crate::domain::types::ProjectComplexity;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// ProjectParameters - 项目参数
// ==========================================
// JSON 字段名沿用录入表单的 camelCase 命名
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectParameters {
    // ===== 项目信息 =====
    #[serde(deserialize_with = "null_as_default")]
    pub requestor: String,
    #[serde(rename = "linkToDCE")]
    pub link_to_dce: Option<String>,
    pub ritm: Option<String>,
    pub billing_profile: Option<String>,
    pub prj_or_demand: Option<String>,
    pub request_type: Option<String>,

    // ===== 项目规格 =====
    pub project_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub wireless: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub cellular_backup: bool,
    pub project_complexity: Option<ProjectComplexity>,
    pub station_cable_complexity: Option<String>,
    pub cable_region: Option<String>,
    pub risk_factor: Option<Decimal>, // 百分比, 10 表示 10%

    // ===== 话机 =====
    #[serde(deserialize_with = "null_as_default")]
    pub premium_phones_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub standard_phones_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub conference_phones_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub single_line_phones_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_expansion_modules_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub fax_analog_lines_qty: u32,

    // ===== LAN/WAN 设备 =====
    #[serde(deserialize_with = "null_as_default")]
    pub other_network_devices_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub new_network_drops_qty: u32,
    #[serde(rename = "newPSTNLinesQty")]
    #[serde(deserialize_with = "null_as_default")]
    pub new_pstn_lines_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub router_required_for_circuit: bool,
    #[serde(rename = "existingITSWANCircuit")]
    pub existing_its_wan_circuit: Option<String>,
    pub existing_circuit_speed: Option<String>,
    pub other_circuit_speed_required: Option<String>,

    // ===== 计算机设备 =====
    #[serde(deserialize_with = "null_as_default")]
    pub pcs_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub printers_qty: u32,
    #[serde(rename = "otherNetworkConnectedDevicesLAN")]
    #[serde(deserialize_with = "null_as_default")]
    pub other_network_connected_devices_lan: u32,

    // ===== 网络升级 =====
    #[serde(rename = "newNetworkDropsUPG")]
    #[serde(deserialize_with = "null_as_default")]
    pub new_network_drops_upg: u32,
    #[serde(rename = "routerRequiredForCircuitUPG")]
    #[serde(deserialize_with = "null_as_default")]
    pub router_required_for_circuit_upg: bool,
    #[serde(rename = "existingITSWANCircuitUPG")]
    pub existing_its_wan_circuit_upg: Option<String>,
    #[serde(rename = "existingCircuitSpeedUPG")]
    pub existing_circuit_speed_upg: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub qos_service_required: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub higher_speed_circuit_required: bool,
    #[serde(rename = "existingITSWANCircuitHS")]
    pub existing_its_wan_circuit_hs: Option<String>,
    #[serde(rename = "existingCircuitSpeedHS")]
    pub existing_circuit_speed_hs: Option<String>,
    #[serde(rename = "desiredWANSpeed")]
    pub desired_wan_speed: Option<String>,
    #[serde(rename = "newOrUpgradeVANQty")]
    #[serde(deserialize_with = "null_as_default")]
    pub new_or_upgrade_van_qty: u32,

    // ===== 站点布线 =====
    #[serde(deserialize_with = "null_as_default")]
    pub new_network_drops_station: u32,

    // ===== 无线 =====
    #[serde(deserialize_with = "null_as_default")]
    pub wireless_predictive_survey_results_qty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub wireless_predictive_survey_results_outdoor_qty: u32,
}

/// 表单未填项可能以 null 提交, 与缺省同样视为 0/false/空串
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProjectParameters {
    /// 话机总数 (高级 + 标准 + 会议 + 单线)
    pub fn total_phones(&self) -> u32 {
        self.premium_phones_qty
            .saturating_add(self.standard_phones_qty)
            .saturating_add(self.conference_phones_qty)
            .saturating_add(self.single_line_phones_qty)
    }

    /// 风险系数 (未设置视为 0)
    pub fn risk_factor_or_zero(&self) -> Decimal {
        self.risk_factor.unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let params: ProjectParameters =
            serde_json::from_str(r#"{"requestor": "alice", "standardPhonesQty": 5}"#).unwrap();

        assert_eq!(params.requestor, "alice");
        assert_eq!(params.standard_phones_qty, 5);
        assert_eq!(params.premium_phones_qty, 0);
        assert!(!params.wireless);
        assert_eq!(params.cable_region, None);
        assert_eq!(params.risk_factor_or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_form_field_names() {
        let params: ProjectParameters = serde_json::from_str(
            r#"{
                "requestor": "bob",
                "linkToDCE": "https://dce/1",
                "newPSTNLinesQty": 2,
                "existingITSWANCircuitUPG": "T1",
                "wirelessPredictiveSurveyResultsQty": 12,
                "projectComplexity": "High",
                "riskFactor": 10
            }"#,
        )
        .unwrap();

        assert_eq!(params.link_to_dce.as_deref(), Some("https://dce/1"));
        assert_eq!(params.new_pstn_lines_qty, 2);
        assert_eq!(params.existing_its_wan_circuit_upg.as_deref(), Some("T1"));
        assert_eq!(params.wireless_predictive_survey_results_qty, 12);
        assert_eq!(params.project_complexity, Some(ProjectComplexity::High));
        assert_eq!(params.risk_factor, Some(dec!(10)));
    }

    #[test]
    fn test_null_fields_default_to_zero() {
        let params: ProjectParameters = serde_json::from_str(
            r#"{
                "requestor": null,
                "premiumPhonesQty": null,
                "standardPhonesQty": 3,
                "wireless": null,
                "riskFactor": null
            }"#,
        )
        .unwrap();

        assert_eq!(params.requestor, "");
        assert_eq!(params.premium_phones_qty, 0);
        assert_eq!(params.standard_phones_qty, 3);
        assert!(!params.wireless);
        assert_eq!(params.risk_factor, None);
        assert_eq!(params.total_phones(), 3);
    }

    #[test]
    fn test_total_phones() {
        let params = ProjectParameters {
            premium_phones_qty: 10,
            standard_phones_qty: 20,
            conference_phones_qty: 5,
            single_line_phones_qty: 15,
            phone_expansion_modules_qty: 99, // 不计入话机总数
            ..Default::default()
        };
        assert_eq!(params.total_phones(), 50);
    }
}
