// ==========================================
// 库存盘点系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls/.xlsm/.ods) / CSV (.csv) / JSON 记录数组 (.json)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, RawRow, RawSheet};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 检查文件存在与扩展名
fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let ext = extension_of(path);
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 按表头组装行记录（空白行由导入器按配置处理）
///
/// 单元格原样保留,TRIM 由清洗器按字段决定；重复表头以第一次出现为准
fn push_row(rows: &mut Vec<RawRow>, headers: &[String], values: Vec<String>, row_number: usize) {
    let mut cells = HashMap::with_capacity(headers.len());
    for (header, value) in headers.iter().zip(values) {
        if header.is_empty() {
            continue;
        }
        cells.entry(header.clone()).or_insert(value);
    }
    rows.push(RawRow { row_number, cells });
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 根据表头行推断分隔符（',' 或 ';'）
    fn detect_delimiter(content: &str) -> u8 {
        let header_line = content.lines().next().unwrap_or("");
        let semicolons = header_line.matches(';').count();
        let commas = header_line.matches(',').count();
        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }

    pub fn parse_str(&self, content: &str) -> ImportResult<RawSheet> {
        let content = content.trim_start_matches('\u{feff}');
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .delimiter(Self::detect_delimiter(content))
            .from_reader(content.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyFile("CSV".to_string()));
        }

        // 读取所有行
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let values = record.iter().map(str::to_string).collect();
            push_row(&mut rows, &headers, values, idx + 2);
        }

        Ok(RawSheet { headers, rows })
    }
}

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_file(file_path, self.extensions())?;
        let content = fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_file(file_path, self.extensions())?;

        // 打开 Excel 文件（按扩展名自动选择格式）
        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("planilha sem abas".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| ImportError::EmptyFile(sheet_name.clone()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyFile(sheet_name));
        }

        // 读取数据行
        let (start_row, _) = range.start().unwrap_or((0, 0));
        let mut rows = Vec::new();
        for (idx, data_row) in rows_iter.enumerate() {
            let values = data_row.iter().map(|cell| cell.to_string()).collect();
            push_row(&mut rows, &headers, values, start_row as usize + idx + 2);
        }

        Ok(RawSheet { headers, rows })
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xlsx", "xls", "xlsm", "xlsb", "ods"]
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 格式: [{"COD": "A1", "QTD": 5, ...}, ...]
pub struct JsonParser;

impl JsonParser {
    fn cell_text(value: &JsonValue) -> String {
        match value {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }

    pub fn parse_str(&self, content: &str) -> ImportResult<RawSheet> {
        let root: JsonValue = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;
        let records = root.as_array().ok_or_else(|| {
            ImportError::JsonParseError("esperado um array de registros".to_string())
        })?;

        // 表头: 按首次出现顺序汇总所有键
        let mut headers: Vec<String> = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                ImportError::JsonParseError(format!("registro {} não é um objeto", idx + 1))
            })?;
            for key in object.keys() {
                let key = key.trim();
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.to_string());
                }
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let mut cells = HashMap::new();
            if let Some(object) = record.as_object() {
                for (key, value) in object {
                    cells
                        .entry(key.trim().to_string())
                        .or_insert_with(|| Self::cell_text(value));
                }
            }
            rows.push(RawRow {
                row_number: idx + 2,
                cells,
            });
        }

        Ok(RawSheet { headers, rows })
    }
}

impl FileParser for JsonParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_file(file_path, self.extensions())?;
        let content = fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawSheet> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        let parsers: [&dyn FileParser; 3] = [&ExcelParser, &CsvParser, &JsonParser];
        match parsers.iter().find(|p| p.extensions().contains(&ext.as_str())) {
            Some(parser) => parser.parse(path),
            None if !path.exists() => Err(ImportError::FileNotFound(path.display().to_string())),
            None => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::LoadErrorKind;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_with_ext(ext: &str) -> NamedTempFile {
        Builder::new().suffix(ext).tempfile().unwrap()
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = temp_with_ext(".csv");
        writeln!(temp_file, "COD,PRODUTO,QTD").unwrap();
        writeln!(temp_file, "0012,Parafuso,5").unwrap();
        writeln!(temp_file, "A1,Porca,3").unwrap();

        let sheet = CsvParser.parse(temp_file.path()).unwrap();

        assert_eq!(sheet.headers, vec!["COD", "PRODUTO", "QTD"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].get("COD"), Some("0012"));
        assert_eq!(sheet.rows[1].row_number, 3);
    }

    #[test]
    fn test_csv_parser_semicolon_delimiter() {
        let sheet = CsvParser
            .parse_str("COD;VL. UNT.;QTD\nA1;10,50;5\n")
            .unwrap();

        assert_eq!(sheet.headers.len(), 3);
        assert_eq!(sheet.rows[0].get("VL. UNT."), Some("10,50"));
    }

    #[test]
    fn test_csv_parser_keeps_blank_rows() {
        let sheet = CsvParser.parse_str("COD,QTD\nA1,2\n,\nB2,3\n").unwrap();
        assert_eq!(sheet.rows.len(), 3);
        assert!(sheet.rows[1].is_blank());
        assert_eq!(sheet.rows[2].row_number, 4);
    }

    #[test]
    fn test_csv_parser_keeps_cells_verbatim() {
        let sheet = CsvParser.parse_str("COD,QTD\n\" 0012 \", 5 \n").unwrap();
        assert_eq!(sheet.rows[0].get("COD"), Some(" 0012 "));
        assert_eq!(sheet.rows[0].get("QTD"), Some(" 5 "));
    }

    #[test]
    fn test_csv_parser_duplicate_header_keeps_first() {
        let sheet = CsvParser.parse_str("COD,QTD,COD\nA1,5,B2\n").unwrap();
        assert_eq!(sheet.headers, vec!["COD", "QTD", "COD"]);
        assert_eq!(sheet.rows[0].get("COD"), Some("A1"));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse(Path::new("nao_existe.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_json_parser_records() {
        let sheet = JsonParser
            .parse_str(r#"[{"COD": "007", "QTD": 5, "CONTAGEM": null}, {"COD": "B", "QTD": 2.5, "EXTRA": "x"}]"#)
            .unwrap();

        assert_eq!(sheet.headers, vec!["COD", "QTD", "CONTAGEM", "EXTRA"]);
        assert_eq!(sheet.rows[0].get("COD"), Some("007"));
        assert_eq!(sheet.rows[0].get("CONTAGEM"), Some(""));
        assert_eq!(sheet.rows[1].get("QTD"), Some("2.5"));
        assert_eq!(sheet.rows[1].get("CONTAGEM"), None);
    }

    #[test]
    fn test_json_parser_rejects_non_array() {
        let err = JsonParser.parse_str(r#"{"COD": "A"}"#).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::MalformedFile);

        let err = JsonParser.parse_str("not json").unwrap_err();
        assert!(matches!(err, ImportError::JsonParseError(_)));
    }

    #[test]
    fn test_excel_parser_reads_first_sheet() {
        let temp_file = temp_with_ext(".xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "COD").unwrap();
        sheet.write_string(0, 1, "QTD").unwrap();
        sheet.write_string(1, 0, "0099").unwrap();
        sheet.write_number(1, 1, 12.0).unwrap();
        sheet.write_number(2, 0, 123.0).unwrap();
        sheet.write_number(2, 1, 0.5).unwrap();
        workbook.save(temp_file.path()).unwrap();

        let sheet = ExcelParser.parse(temp_file.path()).unwrap();

        assert_eq!(sheet.headers, vec!["COD", "QTD"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].get("COD"), Some("0099"));
        assert_eq!(sheet.rows[0].get("QTD"), Some("12"));
        assert_eq!(sheet.rows[1].get("COD"), Some("123"));
        assert_eq!(sheet.rows[1].get("QTD"), Some("0.5"));
    }

    #[test]
    fn test_universal_parser_unsupported_extension() {
        let temp_file = temp_with_ext(".txt");
        let err = UniversalFileParser.parse(temp_file.path()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ref e) if e == "txt"));
    }

    #[test]
    fn test_universal_parser_corrupt_excel() {
        let mut temp_file = temp_with_ext(".xlsx");
        write!(temp_file, "isto não é uma planilha").unwrap();

        let err = UniversalFileParser.parse(temp_file.path()).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::MalformedFile);
    }
}
