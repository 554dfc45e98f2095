//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 接收一组文档标识，为每个文档启动一个 worker，并发数不超过上限，
//! 全部完成后汇总为一个 `BatchResult`。
//!
//! ## 核心功能
//!
//! 1. **设置校验**：四项必需设置缺一不可，否则不启动任何 worker
//! 2. **并发控制**：启动前先拿到 Semaphore 许可，拿不到就等待
//! 3. **全量等待**：所有 worker 结束后才汇总
//! 4. **结果汇总**：跳过算成功，失败列出文档标识
//!
//! ## 设计特点
//!
//! - 许可随 worker 任务一起释放，不需要轮询活跃数量
//! - worker 内部 panic 也会被记为该文档失败，结果数量始终等于输入数量

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::clients::{AzureReadClient, OcrApi};
use crate::config::{Config, OcrSettings};
use crate::error::AppResult;
use crate::infrastructure::{DocumentStore, SettingsProvider};
use crate::models::{BatchResult, DocumentId, DocumentOutcome, DocumentTask};
use crate::services::AuditLogWriter;
use crate::utils::logging;
use crate::workflow::DocumentFlow;

/// 批次进度回调
///
/// 宿主可以用它更新进度条；默认实现什么都不做
pub trait StatusReporter: Send + Sync {
    fn change_status(&self, _status: &str) {}

    fn increment_count(&self, _count: usize) {}
}

/// 不上报任何进度
#[derive(Debug, Default)]
pub struct NoopReporter;

impl StatusReporter for NoopReporter {}

/// 批量文档处理器
pub struct BatchProcessor {
    config: Config,
    store: Arc<dyn DocumentStore>,
    operator: String,
    ocr: Option<Arc<dyn OcrApi>>,
    reporter: Arc<dyn StatusReporter>,
}

impl BatchProcessor {
    /// `operator` 写入审计日志，一般是当前操作员的邮箱
    pub fn new(config: Config, store: Arc<dyn DocumentStore>, operator: impl Into<String>) -> Self {
        Self {
            config,
            store,
            operator: operator.into(),
            ocr: None,
            reporter: Arc::new(NoopReporter),
        }
    }

    /// 使用指定的 OCR 实现，而不是按设置创建 Azure 客户端
    pub fn with_ocr_api(mut self, ocr: Arc<dyn OcrApi>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn StatusReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// 并发上限（至少为 1）
    pub fn max_concurrent(&self) -> usize {
        self.config.max_concurrent_documents.max(1)
    }

    /// 处理一个批次
    ///
    /// 设置不完整或客户端无法创建时直接返回失败，不启动任何 worker
    pub async fn run_batch(
        &self,
        ids: &[DocumentId],
        settings: &dyn SettingsProvider,
    ) -> BatchResult {
        let (settings, flow) = match self.prepare(settings) {
            Ok(prepared) => prepared,
            Err(e) => {
                error!("❌ 批次未启动: {}", e);
                return BatchResult::aborted(format!("批次未启动: {}", e));
            }
        };

        let tasks = ids
            .iter()
            .map(|id| {
                DocumentTask::new(
                    id.clone(),
                    settings.destination_field.clone(),
                    settings.log_field.clone(),
                )
            })
            .collect();

        self.process_tasks(flow, tasks).await
    }

    /// 校验设置并组装 worker 流程
    fn prepare(
        &self,
        provider: &dyn SettingsProvider,
    ) -> AppResult<(OcrSettings, Arc<DocumentFlow>)> {
        let settings = OcrSettings::load(provider, &self.config.settings_section)?;

        let ocr: Arc<dyn OcrApi> = match &self.ocr {
            Some(ocr) => ocr.clone(),
            None => Arc::new(AzureReadClient::from_settings(&settings, &self.config)?),
        };

        let flow = Arc::new(DocumentFlow::new(
            self.store.clone(),
            ocr,
            AuditLogWriter::new(self.operator.clone()),
        ));

        Ok((settings, flow))
    }

    /// 并发执行所有任务并汇总
    async fn process_tasks(&self, flow: Arc<DocumentFlow>, tasks: Vec<DocumentTask>) -> BatchResult {
        let max_concurrent = self.max_concurrent();
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        logging::log_batch_start(tasks.len(), max_concurrent);

        self.reporter.change_status("OCRing documents");

        let mut handles: Vec<(DocumentId, Option<JoinHandle<DocumentOutcome>>)> =
            Vec::with_capacity(tasks.len());

        for task in tasks {
            let id = task.document_id.clone();

            // 没有空闲许可时在这里等待
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("[文档 {}] 无法获取并发许可: {}", id, e);
                    handles.push((id, None));
                    continue;
                }
            };

            let flow = flow.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                flow.run(&task).await
            });
            handles.push((id, Some(handle)));

            self.reporter.increment_count(1);
        }

        self.reporter.change_status("Waiting to finish the document OCR");
        debug!("等待全部 {} 个文档完成", handles.len());

        let (ids, joins): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let finished = join_all(joins.into_iter().map(|handle| async move {
            match handle {
                Some(handle) => Some(handle.await),
                None => None,
            }
        }))
        .await;

        self.reporter
            .change_status("Checking the results of the document OCR");

        let outcomes: Vec<DocumentOutcome> = ids
            .into_iter()
            .zip(finished)
            .map(|(id, joined)| match joined {
                Some(Ok(outcome)) => outcome,
                Some(Err(e)) => {
                    error!("[文档 {}] 任务执行失败: {}", id, e);
                    DocumentOutcome::Failed(id)
                }
                None => DocumentOutcome::Failed(id),
            })
            .collect();

        let result = BatchResult::from_outcomes(&outcomes);
        logging::print_final_stats(&result);
        if !result.success {
            error!("❌ 并非所有文档都完成了 OCR: {}", result.message);
        } else {
            info!("✅ {}", result.message);
        }

        result
    }
}
