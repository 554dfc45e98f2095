#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use azure_ocr_batch::config::{DESTINATION_FIELD, ENDPOINT, LOG_FIELD, SUBSCRIPTION_KEY};
use azure_ocr_batch::{
    DocumentId, DocumentStore, InMemoryDocumentStore, MapSettingsProvider, OcrApi, OcrError,
    OcrJobHandle, OcrOutcome, StoreError,
};

pub const TEXT_FIELD: &str = "Extracted Text";
pub const LOG: &str = "OCR Log";
pub const OPERATOR: &str = "reviewer@example.com";

/// 完整的四项设置
pub fn settings() -> MapSettingsProvider {
    MapSettingsProvider::new()
        .with("Azure.OCR", DESTINATION_FIELD, TEXT_FIELD)
        .with("Azure.OCR", LOG_FIELD, LOG)
        .with("Azure.OCR", SUBSCRIPTION_KEY, "test-key")
        .with("Azure.OCR", ENDPOINT, "http://127.0.0.1:9/")
}

/// 按文档内容决定行为的 OCR 替身
///
/// 内容（UTF-8）含义：
/// - `submit-fail` 提交返回 503
/// - `job-fail` 作业失败
/// - `timeout` 轮询超时
/// - `panic` worker 内部 panic
/// - 其他内容按 `,` 拆成文本行
pub struct FakeOcr {
    delay: Duration,
    active: AtomicUsize,
    max_active: AtomicUsize,
    submissions: AtomicUsize,
}

impl FakeOcr {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            submissions: AtomicUsize::new(0),
        }
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrApi for FakeOcr {
    async fn submit(&self, content: Vec<u8>) -> Result<OcrJobHandle, OcrError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        let location = String::from_utf8(content).unwrap();
        if location == "submit-fail" {
            return Err(OcrError::BadStatus {
                url: "fake".to_string(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            });
        }

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        Ok(OcrJobHandle::new(location))
    }

    async fn poll_until_complete(&self, handle: OcrJobHandle) -> OcrOutcome {
        tokio::time::sleep(self.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        match handle.operation_location.as_str() {
            "job-fail" => OcrOutcome::Failed("作业状态: failed".to_string()),
            "timeout" => OcrOutcome::TimedOut,
            "panic" => panic!("worker panic"),
            lines => OcrOutcome::Succeeded(lines.split(',').map(str::to_string).collect()),
        }
    }
}

/// 可以让指定操作失败的文档存储
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryDocumentStore,
    pub fail_has_native: HashSet<DocumentId>,
    pub fail_download: HashSet<DocumentId>,
    pub fail_write_field: Option<String>,
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn has_native(&self, id: &DocumentId) -> Result<bool, StoreError> {
        if self.fail_has_native.contains(id) {
            return Err(StoreError::Backend("has_native unavailable".to_string()));
        }
        self.inner.has_native(id).await
    }

    async fn download_native(&self, id: &DocumentId) -> Result<Vec<u8>, StoreError> {
        if self.fail_download.contains(id) {
            return Err(StoreError::Backend("download unavailable".to_string()));
        }
        self.inner.download_native(id).await
    }

    async fn write_text_field(
        &self,
        id: &DocumentId,
        field: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        if self.fail_write_field.as_deref() == Some(field) {
            return Err(StoreError::Backend(format!("{} is read-only", field)));
        }
        self.inner.write_text_field(id, field, text).await
    }

    async fn read_text_field(&self, id: &DocumentId, field: &str) -> Result<String, StoreError> {
        self.inner.read_text_field(id, field).await
    }
}

pub fn ids(range: std::ops::Range<i32>) -> Vec<DocumentId> {
    range.map(DocumentId::from).collect()
}
