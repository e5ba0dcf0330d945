// ==========================================
// 库存盘点系统 - 会话命令（按域拆分）
// ==========================================
// 职责: 会话命令定义,连接 shell 与盘点会话 API
// 约定: 每个命令返回 Ok(文本块) 或 Err(错误行),失败不终止会话
// ==========================================

mod common;
mod config;
mod count;
mod file;
mod view;

pub use common::map_api_error;
pub use config::*;
pub use count::*;
pub use file::*;
pub use view::*;
