// ==========================================
// 库存盘点系统 - 导出层
// ==========================================
// 职责: 盘点表持久化（JSON 记录）与 xlsx 导出
// ==========================================

pub mod error;
pub mod json_writer;
pub mod xlsx_writer;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub use error::{ExportError, ExportResult, SaveError, SaveErrorKind};
pub use json_writer::JsonRecordWriter;
pub use xlsx_writer::XlsxExporter;

/// 导出统计
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub exported_at: DateTime<Utc>,
}
