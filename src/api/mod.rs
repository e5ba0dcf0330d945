// ==========================================
// 库存盘点系统 - API 层
// ==========================================
// 职责: 提供盘点会话 API,供 shell 命令与一次性子命令调用
// ==========================================

pub mod error;
pub mod inventory_api;

// 重导出核心类型
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use inventory_api::InventoryApi;
