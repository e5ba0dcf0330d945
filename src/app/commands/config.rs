use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::config::{config_keys, ConfigManager};

use super::common::map_api_error;

// ==========================================
// 配置相关命令（查看 / 修改 / 路径）
// ==========================================

/// 列出全部配置键及当前值
pub fn config_list(state: &AppState) -> Result<String, String> {
    let manager = &state.config_manager;
    let mut lines = Vec::with_capacity(config_keys::ALL.len());
    for key in config_keys::ALL {
        let value = manager
            .get_value(key)
            .map_err(|e| map_api_error(state, ApiError::Config(e)))?;
        lines.push(format!("{} = {}", key, value));
    }
    Ok(lines.join("\n"))
}

/// 读取单个配置值
pub fn config_get(state: &AppState, key: &str) -> Result<String, String> {
    state
        .config_manager
        .get_value(key)
        .map_err(|e| map_api_error(state, ApiError::Config(e)))
}

/// 修改配置值并写回配置文件
///
/// 从文件重新读取后只改这一个键,命令行的临时覆盖（如 --locale）不会被写入
pub fn config_set(state: &mut AppState, key: &str, value: &str) -> Result<String, String> {
    tracing::info!(key, "[config] alteração solicitada");

    let stored = match state.config_manager.path() {
        Some(path) => ConfigManager::from_path(path),
        None => ConfigManager::load_or_default(),
    };
    let result = stored.and_then(|mut stored| {
        stored.set_value(key, value)?;
        let path = stored.save()?;
        let saved = stored.get_value(key)?;
        state.config_manager.set_value(key, value)?;
        Ok((path, saved))
    });

    match result {
        Ok((path, saved)) => Ok(state.tr_args(
            "config.saved",
            &[
                ("key", key),
                ("value", saved.as_str()),
                ("path", &path.display().to_string()),
            ],
        )),
        Err(e) => Err(map_api_error(state, ApiError::Config(e))),
    }
}

/// 当前使用的配置文件路径
pub fn config_path(state: &AppState) -> Result<String, String> {
    Ok(state
        .config_manager
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(crate::app::get_default_config_path))
}
