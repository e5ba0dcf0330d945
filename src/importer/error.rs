// ==========================================
// 库存盘点系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: MissingColumn（缺列）/ MalformedFile（其余一切文件问题）
// ==========================================

use rust_decimal::Decimal;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de arquivo não suportado: '{0}' (use .xlsx, .xls, .ods, .csv ou .json)")]
    UnsupportedFormat(String),

    #[error("Falha ao ler o arquivo: {0}")]
    FileReadError(String),

    #[error("Falha ao interpretar a planilha: {0}")]
    ExcelParseError(String),

    #[error("Falha ao interpretar o CSV: {0}")]
    CsvParseError(String),

    #[error("Falha ao interpretar o JSON: {0}")]
    JsonParseError(String),

    #[error("Arquivo sem cabeçalho: {0}")]
    EmptyFile(String),

    // ===== 列校验错误 =====
    #[error("Coluna obrigatória '{column}' não encontrada")]
    MissingColumn { column: String },

    // ===== 行数据错误 =====
    #[error("Linha {row}: código (COD) vazio")]
    MissingCode { row: usize },

    #[error("Linha {row}, coluna {field}: {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("Linha {row}: contagem negativa ({value})")]
    NegativeCount { row: usize, value: Decimal },
}

/// 导入错误分类（对外契约）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    MissingColumn,
    MalformedFile,
}

impl ImportError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            ImportError::MissingColumn { .. } => LoadErrorKind::MissingColumn,
            _ => LoadErrorKind::MalformedFile,
        }
    }

    /// 缺失的列名（仅 MissingColumn）
    pub fn missing_column(&self) -> Option<&str> {
        match self {
            ImportError::MissingColumn { column } => Some(column),
            _ => None,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// 对外名称: 加载错误
pub type LoadError = ImportError;

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
