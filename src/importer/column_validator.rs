// ==========================================
// 库存盘点系统 - 列校验器
// ==========================================
// 职责: 校验必需列是否齐全（COD / PRODUTO / VL. UNT. / ENDEREÇO / QTD）
// 说明: CONTAGEM 为可选列,缺失时所有行视为未盘点
// ==========================================

use crate::domain::Column;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::HeaderMap;

pub struct ColumnValidator;

impl ColumnValidator {
    /// 校验必需列
    ///
    /// # 返回
    /// - Ok(()): 必需列齐全
    /// - Err(MissingColumn): 按标准列顺序报告第一个缺失的列
    pub fn validate(&self, headers: &HeaderMap) -> ImportResult<()> {
        match self.missing_columns(headers).first() {
            Some(column) => Err(ImportError::MissingColumn {
                column: column.header().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 列出全部缺失的必需列
    pub fn missing_columns(&self, headers: &HeaderMap) -> Vec<Column> {
        Column::REQUIRED
            .iter()
            .copied()
            .filter(|c| !headers.has(*c))
            .collect()
    }
}
