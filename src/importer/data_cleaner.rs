// ==========================================
// 库存盘点系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值解析（pt-BR 与 en 两种写法）
// 约定: COD 原样保留,只有空单元格视为缺失
// ==========================================

use crate::format::{parse_decimal, ParseDecimalError};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use rust_decimal::Decimal;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty()
                || trimmed.eq_ignore_ascii_case("nan")
                || trimmed.eq_ignore_ascii_case("null")
            {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_number(
        &self,
        value: Option<&str>,
        row: usize,
        field: &str,
    ) -> ImportResult<Option<Decimal>> {
        let Some(text) = self.normalize_null(value) else {
            return Ok(None);
        };
        match parse_decimal(&text) {
            Ok(v) => Ok(Some(v)),
            Err(ParseDecimalError::Empty) => Ok(None),
            Err(ParseDecimalError::Invalid(_)) => Err(ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                message: format!("valor não numérico '{}'", text),
            }),
        }
    }
}

impl DataCleaner {
    /// 解析数值字段,空值按 0 处理并记录告警
    pub fn number_or_zero(
        &self,
        value: Option<&str>,
        row: usize,
        field: &str,
    ) -> ImportResult<Decimal> {
        match self.parse_number(value, row, field)? {
            Some(v) => Ok(v),
            None => {
                tracing::warn!(row, field, "célula numérica vazia, assumindo 0");
                Ok(Decimal::ZERO)
            }
        }
    }

    /// 编码字段: 原样保留（不 TRIM、不识别 "nan"/"null"）,仅空单元格返回 None
    pub fn code_text(&self, value: Option<&str>) -> Option<String> {
        value
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    }

    /// 清洗可选文本字段（空值 → 空字符串）
    pub fn text_or_empty(&self, value: Option<&str>) -> String {
        value.map(|v| self.clean_text(v)).unwrap_or_default()
    }
}
