// ==========================================
// 库存盘点系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、保存
// 存储: JSON 文件（$CONTAGEM_ESTOQUE_CONFIG 或 用户配置目录/contagem-estoque/config.json）
// 缺省: 文件不存在时使用默认值
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "CONTAGEM_ESTOQUE_CONFIG";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Falha ao ler a configuração {path}: {message}")]
    Read { path: String, message: String },

    #[error("Configuração inválida em {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Falha ao gravar a configuração {path}: {message}")]
    Write { path: String, message: String },

    #[error("Chave de configuração desconhecida: {0}")]
    UnknownKey(String),

    #[error("Valor inválido para '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 界面语言（pt-BR / en）
    pub locale: String,
    /// 货币符号
    pub currency_symbol: String,
    /// 导出 xlsx 的工作表名
    pub export_sheet_name: String,
    /// 附加表头别名（标准表头 → 别名列表）
    pub column_aliases: BTreeMap<String, Vec<String>>,
    /// 加载时跳过全空行
    pub skip_blank_rows: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: crate::i18n::DEFAULT_LOCALE.to_string(),
            currency_symbol: crate::format::DEFAULT_CURRENCY_SYMBOL.to_string(),
            export_sheet_name: "Contagem".to_string(),
            column_aliases: BTreeMap::new(),
            skip_blank_rows: true,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: Option<PathBuf>,
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            path: None,
            config: AppConfig::default(),
        }
    }
}

impl ConfigManager {
    /// 默认配置文件路径
    ///
    /// 优先级: 环境变量 > 用户配置目录
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("contagem-estoque").join("config.json"))
    }

    /// 从默认路径加载,文件不存在时使用默认配置
    pub fn load_or_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) => Self::from_path(path),
            None => {
                debug!("diretório de configuração indisponível, usando padrões");
                Ok(Self::default())
            }
        }
    }

    /// 从指定路径加载
    ///
    /// # 返回
    /// - Ok: 文件存在则解析；不存在则默认配置（保存时写入该路径）
    /// - Err: 读取或解析失败
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let path_str = path.display().to_string();

        if !path.exists() {
            debug!(path = %path_str, "arquivo de configuração ausente, usando padrões");
            return Ok(Self {
                path: Some(path),
                config: AppConfig::default(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        info!(path = %path_str, locale = %config.locale, "configuração carregada");
        Ok(Self {
            path: Some(path),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 读取配置值（字符串形式）
    pub fn get_value(&self, key: &str) -> ConfigResult<String> {
        let c = &self.config;
        match key {
            config_keys::LOCALE => Ok(c.locale.clone()),
            config_keys::CURRENCY_SYMBOL => Ok(c.currency_symbol.clone()),
            config_keys::EXPORT_SHEET_NAME => Ok(c.export_sheet_name.clone()),
            config_keys::SKIP_BLANK_ROWS => Ok(c.skip_blank_rows.to_string()),
            config_keys::COLUMN_ALIASES => serde_json::to_string(&c.column_aliases).map_err(|e| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: e.to_string(),
                }
            }),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// 覆写配置值（仅内存,需 save 落盘）
    pub fn set_value(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let c = &mut self.config;
        match key {
            config_keys::LOCALE => c.locale = crate::i18n::normalize_locale(value).to_string(),
            config_keys::CURRENCY_SYMBOL => c.currency_symbol = value.trim().to_string(),
            config_keys::EXPORT_SHEET_NAME => {
                let name = value.trim();
                // xlsx 工作表名上限 31 字符
                if name.is_empty() || name.chars().count() > 31 {
                    return Err(invalid());
                }
                c.export_sheet_name = name.to_string();
            }
            config_keys::SKIP_BLANK_ROWS => {
                c.skip_blank_rows = value.trim().parse().map_err(|_| invalid())?;
            }
            config_keys::COLUMN_ALIASES => {
                c.column_aliases = serde_json::from_str(value).map_err(|_| invalid())?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// 保存到加载路径（无路径时使用默认路径）
    pub fn save(&self) -> ConfigResult<PathBuf> {
        let path = self
            .path
            .clone()
            .or_else(Self::default_path)
            .ok_or_else(|| ConfigError::Write {
                path: String::new(),
                message: "diretório de configuração indisponível".to_string(),
            })?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// 保存到指定路径
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let path_str = path.display().to_string();
        let write_err = |e: String| ConfigError::Write {
            path: path_str.clone(),
            message: e,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.config).map_err(|e| write_err(e.to_string()))?;
        fs::write(path, json).map_err(|e| write_err(e.to_string()))?;

        info!(path = %path_str, "configuração gravada");
        Ok(())
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const LOCALE: &str = "locale";
    pub const CURRENCY_SYMBOL: &str = "currency_symbol";
    pub const EXPORT_SHEET_NAME: &str = "export_sheet_name";
    pub const COLUMN_ALIASES: &str = "column_aliases";
    pub const SKIP_BLANK_ROWS: &str = "skip_blank_rows";

    pub const ALL: [&str; 5] = [
        LOCALE,
        CURRENCY_SYMBOL,
        EXPORT_SHEET_NAME,
        COLUMN_ALIASES,
        SKIP_BLANK_ROWS,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.locale, "pt-BR");
        assert_eq!(config.currency_symbol, "R$");
        assert_eq!(config.export_sheet_name, "Contagem");
        assert!(config.skip_blank_rows);
        assert!(config.column_aliases.is_empty());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let manager = ConfigManager::from_path(&path).unwrap();
        assert_eq!(manager.config(), &AppConfig::default());
        assert_eq!(manager.path(), Some(path.as_path()));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"locale": "en", "column_aliases": {"COD": ["REF"]}}"#).unwrap();

        let manager = ConfigManager::from_path(&path).unwrap();
        assert_eq!(manager.config().locale, "en");
        assert_eq!(manager.config().currency_symbol, "R$");
        assert_eq!(manager.config().column_aliases["COD"], vec!["REF"]);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();

        let err = ConfigManager::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_set_value_and_save_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut manager = ConfigManager::from_path(&path).unwrap();
        manager.set_value(config_keys::LOCALE, "EN").unwrap();
        manager.set_value(config_keys::SKIP_BLANK_ROWS, "false").unwrap();
        manager.set_value(config_keys::EXPORT_SHEET_NAME, "Inventário").unwrap();
        assert_eq!(manager.save().unwrap(), path);

        let reloaded = ConfigManager::from_path(&path).unwrap();
        assert_eq!(reloaded.config().locale, "en");
        assert!(!reloaded.config().skip_blank_rows);
        assert_eq!(reloaded.get_value(config_keys::EXPORT_SHEET_NAME).unwrap(), "Inventário");
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut manager = ConfigManager::default();
        assert!(matches!(
            manager.set_value("nada", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            manager.set_value(config_keys::SKIP_BLANK_ROWS, "talvez"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(manager.set_value(config_keys::EXPORT_SHEET_NAME, "").is_err());
    }
}
