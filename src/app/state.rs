// ==========================================
// 库存盘点系统 - 应用状态
// ==========================================
// 职责: 持有配置与盘点会话,供命令层调用
// ==========================================

use crate::api::InventoryApi;
use crate::config::{AppConfig, ConfigManager};
use crate::i18n;

/// 应用状态
///
/// 单线程会话: 命令层以 &mut 访问,无需加锁
pub struct AppState {
    /// 配置管理器（来源路径 + 当前配置）
    pub config_manager: ConfigManager,

    /// 盘点会话
    pub api: InventoryApi,
}

impl AppState {
    /// 创建应用状态
    pub fn new(config_manager: ConfigManager) -> Self {
        let api = InventoryApi::new(config_manager.config().clone());
        tracing::debug!(
            locale = %config_manager.config().locale,
            config_path = ?config_manager.path(),
            "AppState inicializado"
        );
        Self {
            config_manager,
            api,
        }
    }

    /// 仅用内存配置创建（一次性命令与测试）
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config_manager: ConfigManager::default(),
            api: InventoryApi::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        self.api.config()
    }

    /// 界面语言
    pub fn locale(&self) -> &str {
        &self.config().locale
    }

    /// 按会话语言翻译
    pub fn tr(&self, key: &str) -> String {
        i18n::t_in(key, self.locale())
    }

    /// 按会话语言翻译（带参数）
    pub fn tr_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        i18n::t_in_with_args(key, self.locale(), args)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

/// 默认配置文件路径（用于启动日志）
pub fn get_default_config_path() -> String {
    ConfigManager::default_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(indisponível)".to_string())
}
