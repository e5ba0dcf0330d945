// ==========================================
// 库存盘点系统 - 引擎层
// ==========================================
// 职责: 核算、汇总、筛选排序规则
// 红线: 引擎不读写文件,不接触展示字符串（汇总展示行除外）
// ==========================================

pub mod error;
pub mod reconciliation;
pub mod summary;
pub mod view;

// 重导出核心引擎
pub use error::{ValidationError, ValidationErrorKind, ValidationResult};
pub use reconciliation::ReconciliationEngine;
pub use summary::{SummaryEngine, SUMMARY_ROW_KEYS};
pub use view::{TextFilter, ViewService};
