// ==========================================
// 库存盘点系统 - 应用层
// ==========================================
// 职责: 会话 shell 与命令,连接操作员与盘点会话 API
// ==========================================

pub mod commands;
pub mod render;
pub mod shell;
pub mod state;

// 重导出
pub use shell::{execute_line, run, ShellCommand, ShellOutcome};
pub use state::{get_default_config_path, AppState};
