//! 文档处理流程 - 流程层
//!
//! 核心职责：定义"一个文档"的完整处理流程
//!
//! 流程顺序：
//! 1. 检查原生文件（没有则跳过）
//! 2. 下载原生文件
//! 3. 提交 OCR → 轮询作业
//! 4. 拼接文本行
//! 5. 写回文本字段
//! 6. 追加审计日志

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::clients::OcrApi;
use crate::error::DocumentError;
use crate::infrastructure::DocumentStore;
use crate::models::{DocumentOutcome, DocumentTask, OcrOutcome};
use crate::services::{text_length, AuditLogWriter};

/// 文档处理流程
///
/// - 编排单个文档的完整处理流程
/// - 所有失败都在这里转为 `DocumentOutcome::Failed`，不向上抛错
/// - 只依赖注入的存储和 OCR 能力
pub struct DocumentFlow {
    store: Arc<dyn DocumentStore>,
    ocr: Arc<dyn OcrApi>,
    audit_log: AuditLogWriter,
}

impl DocumentFlow {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        ocr: Arc<dyn OcrApi>,
        audit_log: AuditLogWriter,
    ) -> Self {
        Self {
            store,
            ocr,
            audit_log,
        }
    }

    /// 处理一个文档，总是返回一个结果
    pub async fn run(&self, task: &DocumentTask) -> DocumentOutcome {
        match self.process(task).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} ❌ {}", task, e);
                DocumentOutcome::Failed(task.document_id.clone())
            }
        }
    }

    async fn process(&self, task: &DocumentTask) -> Result<DocumentOutcome, DocumentError> {
        let id = &task.document_id;

        // ========== 1. 检查原生文件 ==========
        let has_native = self
            .store
            .has_native(id)
            .await
            .map_err(DocumentError::Eligibility)?;
        if !has_native {
            info!("{} 没有原生文件，跳过", task);
            return Ok(DocumentOutcome::Skipped);
        }

        // ========== 2. 下载原生文件 ==========
        let content = self
            .store
            .download_native(id)
            .await
            .map_err(DocumentError::Retrieval)?;
        debug!("{} 原生文件已下载 ({} 字节)", task, content.len());

        // ========== 3. 提交并轮询 ==========
        let handle = self
            .ocr
            .submit(content)
            .await
            .map_err(DocumentError::Submission)?;
        debug!("{} 作业已提交: {}", task, handle.operation_location);

        // 超时只计算作业创建之后的时间，不含上传
        let created_at = handle.created_at;

        let lines = match self.ocr.poll_until_complete(handle).await {
            OcrOutcome::Succeeded(lines) => lines,
            OcrOutcome::Failed(reason) => return Err(DocumentError::Poll(reason)),
            OcrOutcome::TimedOut => {
                return Err(DocumentError::TimedOut {
                    elapsed_ms: created_at.elapsed().as_millis(),
                })
            }
        };
        debug!("{} 识别出 {} 行文本", task, lines.len());

        // ========== 4. 拼接 ==========
        let text = lines.concat();

        // ========== 5. 写回文本 ==========
        self.store
            .write_text_field(id, &task.destination_field, &text)
            .await
            .map_err(|e| DocumentError::persistence(&task.destination_field, e))?;

        // ========== 6. 追加日志 ==========
        self.audit_log
            .append(self.store.as_ref(), id, &task.log_field, &text)
            .await?;

        info!("{} ✓ OCR 完成 (文本长度: {})", task, text_length(&text));
        Ok(DocumentOutcome::Completed)
    }
}
