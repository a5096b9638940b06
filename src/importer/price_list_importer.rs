// ==========================================
// 网络成本估算系统 - 价目表导入
// ==========================================
// 流程: 解析 CSV → 字段映射/校验 → 按 name UPSERT 到 cost_item
// 红线: 单行数据错误只拒绝该行, 不中断整批
// 红线: 数据库写入失败时整批回滚
// ==========================================

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::CostItem;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, FileParser, RawRecord};
use crate::repository::EquipmentRepository;

/// category 为空时的分组名
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// 必需列
pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "description", "category", "unit_cost"];

/// 被拒绝的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

/// 导入结果汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total_rows: usize,
    pub inserted: usize,
    pub updated: usize,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

// ==========================================
// PriceListImporter - 价目表导入器
// ==========================================
pub struct PriceListImporter {
    equipment_repo: Arc<EquipmentRepository>,
}

impl PriceListImporter {
    pub fn new(equipment_repo: Arc<EquipmentRepository>) -> Self {
        Self { equipment_repo }
    }

    /// 导入价目表文件
    ///
    /// # 返回
    /// - Ok(ImportReport): 新增/更新/拒绝统计
    /// - Err(ImportError): 文件级错误（文件不存在、缺列、CSV 损坏、数据库错误）
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportReport> {
        let path = path.as_ref();
        tracing::info!(file = %path.display(), "开始导入价目表");

        let (headers, records) = CsvParser.parse_to_raw_records(path)?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn(column.to_string()));
            }
        }

        let mut report = ImportReport {
            total_rows: records.len(),
            ..Default::default()
        };

        let mut accepted = Vec::with_capacity(records.len());
        for record in &records {
            match map_record(record) {
                Ok(item) => accepted.push(item),
                Err(err) => {
                    tracing::warn!(row = record.row, error = %err, "价目行被拒绝");
                    report.rejected.push(RejectedRow {
                        row: record.row,
                        reason: err.to_string(),
                    });
                }
            }
        }

        // 合格行在同一事务内写入, 数据库错误时整批回滚
        let counts = self.equipment_repo.upsert_by_name(&accepted)?;
        report.inserted = counts.inserted;
        report.updated = counts.updated;

        tracing::info!(
            total = report.total_rows,
            inserted = report.inserted,
            updated = report.updated,
            rejected = report.rejected_count(),
            "价目表导入完成"
        );

        Ok(report)
    }
}

// ==========================================
// 字段映射
// ==========================================

/// 单行映射为 CostItem（id 由仓储分配）
///
/// - name 必填
/// - description 为空时取 name
/// - category 为空时取 Uncategorized
/// - unit_cost 必须为非负十进制数
/// - is_active 缺省为 true
fn map_record(record: &RawRecord) -> ImportResult<CostItem> {
    let row = record.row;
    let field = |name: &str| record.get(name).unwrap_or("").trim();

    let name = field("name");
    if name.is_empty() {
        return Err(conversion_error(row, "name", "名称不能为空"));
    }

    let description = match field("description") {
        "" => name,
        d => d,
    };

    let category = match field("category") {
        "" => DEFAULT_CATEGORY.to_string(),
        c => c.to_string(),
    };

    let raw_cost = field("unit_cost").trim_start_matches('$').replace(',', "");
    let unit_cost = Decimal::from_str(&raw_cost)
        .map_err(|e| conversion_error(row, "unit_cost", format!("{} ({})", e, raw_cost)))?;
    if unit_cost < Decimal::ZERO {
        return Err(conversion_error(row, "unit_cost", format!("单价不能为负: {}", unit_cost)));
    }

    let is_active = match field("is_active").to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        other => {
            return Err(conversion_error(row, "is_active", format!("无法识别的布尔值: {}", other)))
        }
    };

    Ok(CostItem {
        id: String::new(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        unit_cost,
        is_active,
    })
}

fn conversion_error(row: usize, field: &str, message: impl Into<String>) -> ImportError {
    ImportError::TypeConversionError {
        row,
        field: field.to_string(),
        message: message.into(),
    }
}
