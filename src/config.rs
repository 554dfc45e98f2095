use std::time::Duration;

use tracing::debug;

use crate::error::ConfigError;
use crate::infrastructure::SettingsProvider;

/// 目标文本字段
pub const DESTINATION_FIELD: &str = "DestinationField";
/// 审计日志字段
pub const LOG_FIELD: &str = "LogField";
/// Azure 订阅密钥
pub const SUBSCRIPTION_KEY: &str = "AzureSubscriptionKey";
/// Azure 服务端点
pub const ENDPOINT: &str = "AzureEndpoint";

/// 运行参数配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的文档数量上限
    pub max_concurrent_documents: usize,
    /// 两次轮询之间的间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 轮询总时限（秒）
    pub poll_timeout_secs: u64,
    /// 单个 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 操作员设置所在的分区
    pub settings_section: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 16,
            poll_interval_ms: 1000,
            poll_timeout_secs: 300,
            request_timeout_secs: 120,
            settings_section: "Azure.OCR".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_documents: std::env::var("MAX_CONCURRENT_DOCUMENTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_documents).max(1),
            poll_interval_ms: std::env::var("OCR_POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            poll_timeout_secs: std::env::var("OCR_POLL_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_timeout_secs),
            request_timeout_secs: std::env::var("OCR_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            settings_section: std::env::var("OCR_SETTINGS_SECTION").unwrap_or(default.settings_section),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 操作员设置
///
/// 四项都必须存在且非空，否则整个批次在启动前就失败
#[derive(Clone)]
pub struct OcrSettings {
    pub destination_field: String,
    pub log_field: String,
    pub subscription_key: String,
    pub endpoint: String,
}

impl OcrSettings {
    /// 从设置来源读取并校验全部必需设置
    ///
    /// 按固定顺序读取，遇到第一个缺失或为空的设置项即返回错误
    pub fn load(provider: &dyn SettingsProvider, section: &str) -> Result<Self, ConfigError> {
        let read = |name: &str| -> Result<String, ConfigError> {
            let value = provider
                .get(section, name)
                .ok_or_else(|| ConfigError::missing(section, name))?;
            if value.trim().is_empty() {
                return Err(ConfigError::empty(section, name));
            }
            Ok(value)
        };

        let settings = Self {
            destination_field: read(DESTINATION_FIELD)?,
            log_field: read(LOG_FIELD)?,
            subscription_key: read(SUBSCRIPTION_KEY)?,
            endpoint: read(ENDPOINT)?,
        };

        debug!("设置已加载: {:?}", settings);
        Ok(settings)
    }
}

impl std::fmt::Debug for OcrSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrSettings")
            .field("destination_field", &self.destination_field)
            .field("log_field", &self.log_field)
            .field("subscription_key", &mask_secret(&self.subscription_key))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// 只保留密钥末尾 4 位
fn mask_secret(secret: &str) -> String {
    let visible: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", visible)
}
