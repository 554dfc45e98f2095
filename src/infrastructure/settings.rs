//! 设置来源 - 基础设施层
//!
//! 只负责"按分区 + 名称读取一个字符串设置"，不做校验

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// 设置来源
pub trait SettingsProvider: Send + Sync {
    /// 读取 `section` 分区下名为 `name` 的设置，不存在时返回 `None`
    fn get(&self, section: &str, name: &str) -> Option<String>;
}

/// 内存设置来源（宿主直接注入或测试使用）
#[derive(Debug, Clone, Default)]
pub struct MapSettingsProvider {
    values: HashMap<(String, String), String>,
}

impl MapSettingsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        section: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.values
            .insert((section.into(), name.into()), value.into());
        self
    }

    pub fn without(mut self, section: &str, name: &str) -> Self {
        self.values.remove(&(section.to_string(), name.to_string()));
        self
    }
}

impl SettingsProvider for MapSettingsProvider {
    fn get(&self, section: &str, name: &str) -> Option<String> {
        self.values
            .get(&(section.to_string(), name.to_string()))
            .cloned()
    }
}

/// 环境变量设置来源
///
/// `Azure.OCR` + `AzureEndpoint` 对应 `AZURE_OCR_AZUREENDPOINT`
#[derive(Debug, Clone, Default)]
pub struct EnvSettingsProvider;

impl EnvSettingsProvider {
    pub fn var_name(section: &str, name: &str) -> String {
        format!("{}_{}", section, name)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl SettingsProvider for EnvSettingsProvider {
    fn get(&self, section: &str, name: &str) -> Option<String> {
        std::env::var(Self::var_name(section, name)).ok()
    }
}

/// TOML 文件设置来源
///
/// 每个表对应一个分区：
///
/// ```toml
/// ["Azure.OCR"]
/// DestinationField = "Extracted Text"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TomlSettingsProvider {
    sections: HashMap<String, HashMap<String, String>>,
}

impl TomlSettingsProvider {
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: String::new(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::SourceUnreadable {
                path: path.display().to_string(),
                source,
            })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }
}

impl SettingsProvider for TomlSettingsProvider {
    fn get(&self, section: &str, name: &str) -> Option<String> {
        self.sections
            .get(section)
            .and_then(|values| values.get(name))
            .cloned()
    }
}
