// ==========================================
// 库存盘点系统 - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 一律为 IoFailure（文件系统 / xlsx / JSON 序列化）
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Falha ao gravar o arquivo {path}: {message}")]
    Io { path: String, message: String },

    #[error("Falha ao gerar a planilha: {0}")]
    Xlsx(String),

    #[error("Falha ao serializar o JSON: {0}")]
    Json(String),
}

/// 导出错误分类（对外契约）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveErrorKind {
    IoFailure,
}

impl ExportError {
    pub fn kind(&self) -> SaveErrorKind {
        SaveErrorKind::IoFailure
    }

    pub(crate) fn io(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        ExportError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Xlsx(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json(err.to_string())
    }
}

/// 对外名称: 保存错误
pub type SaveError = ExportError;

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
