// ==========================================
// 库存盘点系统 - 配置层
// ==========================================
// 职责: 应用配置管理（语言、货币符号、导出表名、表头别名）
// 存储: JSON 文件
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, AppConfig, ConfigError, ConfigManager, ConfigResult, CONFIG_ENV_VAR,
};
