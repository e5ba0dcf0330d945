// ==========================================
// 库存盘点系统 - API层错误类型
// ==========================================
// 职责: 汇总各模块错误,转换为操作员可读的错误消息
// 规则: 所有错误均在触发操作处恢复,盘点表保持不变
// ==========================================

use crate::config::ConfigError;
use crate::engine::ValidationError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Nenhuma planilha carregada. Use 'load <arquivo>' primeiro.")]
    NoTableLoaded,

    #[error("Erro ao carregar: {0}")]
    Load(#[from] ImportError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Erro ao salvar: {0}")]
    Save(#[from] ExportError),

    #[error("Erro de configuração: {0}")]
    Config(#[from] ConfigError),
}

/// 错误分类（用于退出码与日志字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    NoTableLoaded,
    Load,
    Validation,
    Save,
    Config,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::NoTableLoaded => ApiErrorKind::NoTableLoaded,
            ApiError::Load(_) => ApiErrorKind::Load,
            ApiError::Validation(_) => ApiErrorKind::Validation,
            ApiError::Save(_) => ApiErrorKind::Save,
            ApiError::Config(_) => ApiErrorKind::Config,
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RowId;

    #[test]
    fn test_messages_are_readable() {
        let err: ApiError = ImportError::MissingColumn {
            column: "QTD".into(),
        }
        .into();
        assert_eq!(err.kind(), ApiErrorKind::Load);
        assert!(err.to_string().contains("QTD"));

        let err: ApiError = ValidationError::UnknownRow(RowId(9)).into();
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert!(err.to_string().contains('9'));

        assert!(ApiError::NoTableLoaded.to_string().contains("load"));
    }
}
