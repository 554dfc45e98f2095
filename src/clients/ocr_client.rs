//! Azure Read API 客户端
//!
//! 封装"提交文档 → 轮询作业 → 取回文本行"的请求逻辑，不认识批次和文档库

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::config::{Config, OcrSettings};
use crate::error::OcrError;
use crate::models::{OcrOutcome, ReadOperationResult};
use crate::utils::truncate_text;

const ANALYZE_PATH: &str = "vision/v3.2/read/analyze";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "Operation-Location";

/// 进行中的远端作业
#[derive(Debug, Clone)]
pub struct OcrJobHandle {
    /// `Operation-Location` 头给出的轮询地址
    pub operation_location: String,
    pub created_at: Instant,
}

impl OcrJobHandle {
    pub fn new(operation_location: impl Into<String>) -> Self {
        Self {
            operation_location: operation_location.into(),
            created_at: Instant::now(),
        }
    }
}

/// 轮询策略：间隔与总时限互相独立
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.poll_interval(), config.poll_timeout())
    }
}

/// 远端 OCR 能力
#[async_trait]
pub trait OcrApi: Send + Sync {
    /// 提交文档内容，返回作业句柄
    async fn submit(&self, content: Vec<u8>) -> Result<OcrJobHandle, OcrError>;

    /// 轮询作业直到终态，任何情况下都返回一个 `OcrOutcome`
    async fn poll_until_complete(&self, handle: OcrJobHandle) -> OcrOutcome;
}

/// Azure Computer Vision Read 客户端
pub struct AzureReadClient {
    http: reqwest::Client,
    analyze_url: String,
    subscription_key: String,
    policy: PollPolicy,
}

impl AzureReadClient {
    /// 创建新的客户端（最低 TLS 1.2）
    pub fn new(
        endpoint: &str,
        subscription_key: impl Into<String>,
        policy: PollPolicy,
        request_timeout: Duration,
    ) -> Result<Self, OcrError> {
        let http = reqwest::Client::builder()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .timeout(request_timeout)
            .build()
            .map_err(OcrError::ClientBuildFailed)?;

        Ok(Self {
            http,
            analyze_url: analyze_url(endpoint),
            subscription_key: subscription_key.into(),
            policy,
        })
    }

    /// 按设置和运行参数创建客户端
    pub fn from_settings(settings: &OcrSettings, config: &Config) -> Result<Self, OcrError> {
        Self::new(
            &settings.endpoint,
            settings.subscription_key.clone(),
            PollPolicy::from_config(config),
            config.request_timeout(),
        )
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// 单次状态查询
    async fn fetch_status(&self, url: &str) -> Result<ReadOperationResult, OcrError> {
        let response = self
            .http
            .get(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .send()
            .await
            .map_err(|e| OcrError::request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::BadStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OcrError::request_failed(url, e))?;
        debug!("轮询响应 (长度: {}): {}", body.len(), truncate_text(&body, 500));

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl OcrApi for AzureReadClient {
    async fn submit(&self, content: Vec<u8>) -> Result<OcrJobHandle, OcrError> {
        debug!("提交 OCR 分析，内容长度: {} 字节", content.len());

        let response = self
            .http
            .post(&self.analyze_url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send()
            .await
            .map_err(|e| OcrError::request_failed(&self.analyze_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::BadStatus {
                url: self.analyze_url.clone(),
                status,
            });
        }

        let operation_location = response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| OcrError::MissingOperationLocation {
                url: self.analyze_url.clone(),
            })?;

        debug!("Operation-Location: {}", operation_location);
        Ok(OcrJobHandle::new(operation_location))
    }

    async fn poll_until_complete(&self, handle: OcrJobHandle) -> OcrOutcome {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            sleep(self.policy.interval).await;
            attempts += 1;

            let result = match self.fetch_status(&handle.operation_location).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("第 {} 次轮询失败: {}", attempts, e);
                    return OcrOutcome::Failed(e.to_string());
                }
            };

            debug!("第 {} 次轮询，作业状态: {}", attempts, result.status);

            if result.is_succeeded() {
                return match result.into_lines() {
                    Some(lines) => {
                        debug!("作业完成，共 {} 次轮询，{} 行文本", attempts, lines.len());
                        OcrOutcome::Succeeded(lines)
                    }
                    None => OcrOutcome::Failed("成功响应缺少 analyzeResult".to_string()),
                };
            }

            if result.is_failed() {
                return OcrOutcome::Failed(format!("作业状态: {}", result.status));
            }

            if started.elapsed() >= self.policy.timeout {
                warn!(
                    "作业在 {:?} 内未完成 (已轮询 {} 次, 创建于 {:?} 前)",
                    self.policy.timeout,
                    attempts,
                    handle.created_at.elapsed()
                );
                return OcrOutcome::TimedOut;
            }
        }
    }
}

/// 拼接分析地址，兼容端点末尾有无 `/`
fn analyze_url(endpoint: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), ANALYZE_PATH)
}
