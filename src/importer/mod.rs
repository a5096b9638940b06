// ==========================================
// 网络成本估算系统 - 价目表导入模块
// ==========================================
// 职责: 从 CSV 批量装载设备/人工价目
// ==========================================

pub mod error;
pub mod file_parser;
pub mod price_list_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, FileParser, RawRecord};
pub use price_list_importer::{ImportReport, PriceListImporter, RejectedRow};
