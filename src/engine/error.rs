// ==========================================
// 库存盘点系统 - 核算引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::RowId;
use rust_decimal::Decimal;
use thiserror::Error;

/// 盘点输入校验错误
///
/// 任一错误发生时,目标行保持不变
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Valor inválido para a contagem: '{input}'. Informe um número (ex.: 7 ou 7,5).")]
    NonNumericInput { input: String },

    #[error("A contagem não pode ser negativa: {value}")]
    NegativeInput { value: Decimal },

    #[error("Linha {0} não encontrada no inventário")]
    UnknownRow(RowId),
}

/// 校验错误分类（对外契约）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    NonNumericInput,
    NegativeInput,
    UnknownRow,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::NonNumericInput { .. } => ValidationErrorKind::NonNumericInput,
            ValidationError::NegativeInput { .. } => ValidationErrorKind::NegativeInput,
            ValidationError::UnknownRow(_) => ValidationErrorKind::UnknownRow,
        }
    }
}

/// Result 类型别名
pub type ValidationResult<T> = Result<T, ValidationError>;
