// ==========================================
// 网络成本估算系统 - 价目表文件解析
// ==========================================
// 支持: CSV (.csv), 首行为表头
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 一行原始记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 文件中的行号（表头为第 1 行）
    pub row: usize,
    /// 表头(小写) -> 单元格值
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// 文件解析器
pub trait FileParser {
    /// 返回表头与非空数据行
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<(Vec<String>, Vec<RawRecord>)>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, path: &Path) -> ImportResult<(Vec<String>, Vec<RawRecord>)> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(csv::Trim::All)
            .from_reader(file);

        // 表头统一小写, 兼容 Unit_Cost 之类写法
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_ascii_lowercase())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut fields = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), value.to_string());
                }
            }

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRecord {
                row: idx + 2,
                fields,
            });
        }

        Ok((headers, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Name, Description ,category,unit_cost").unwrap();
        writeln!(temp_file, "Cable Drop,Station cable drop,Labor,150.00").unwrap();

        let (headers, records) = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(headers, vec!["name", "description", "category", "unit_cost"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].row, 2);
        assert_eq!(records[0].get("description"), Some("Station cable drop"));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_rejects_other_extensions() {
        let temp_file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let result = CsvParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,unit_cost").unwrap();
        writeln!(temp_file, "A,1").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "B,2").unwrap();

        let (_, records) = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].row, 4);
    }
}
