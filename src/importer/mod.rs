// ==========================================
// 库存盘点系统 - 导入层
// ==========================================
// 职责: 外部盘点表导入,生成 InventoryTable
// 支持: Excel (xlsx/xls/xlsm/ods), CSV, JSON 记录数组
// ==========================================

// 模块声明
pub mod column_validator;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod inventory_importer;

// 重导出核心类型
pub use column_validator::ColumnValidator;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult, LoadError, LoadErrorKind};
pub use field_mapper::{normalize_header, FieldMapper, HeaderMap};
pub use file_parser::{CsvParser, ExcelParser, JsonParser, UniversalFileParser};
pub use inventory_importer::InventoryImporter;

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FileParser, RawRow, RawSheet};
