//! 文档存储 - 基础设施层
//!
//! 宿主文档库的边界。worker 只通过这个 trait 读原生文件、写回文本字段

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::DocumentId;

/// 文档存储
///
/// 职责：
/// - 判断文档是否有原生文件
/// - 下载原生文件
/// - 读写长文本字段
/// - 不认识 OCR / 批次
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn has_native(&self, id: &DocumentId) -> Result<bool, StoreError>;

    async fn download_native(&self, id: &DocumentId) -> Result<Vec<u8>, StoreError>;

    async fn write_text_field(
        &self,
        id: &DocumentId,
        field: &str,
        text: &str,
    ) -> Result<(), StoreError>;

    /// 读取长文本字段，字段未赋值时返回空字符串
    async fn read_text_field(&self, id: &DocumentId, field: &str) -> Result<String, StoreError>;

    /// 统计有原生文件的文档数
    async fn count_with_native(&self, ids: &[DocumentId]) -> Result<usize, StoreError> {
        let mut count = 0;
        for id in ids {
            if self.has_native(id).await? {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// 内存中的单个文档
#[derive(Debug, Clone, Default)]
pub struct StoredDocument {
    pub native: Option<Vec<u8>>,
    pub fields: HashMap<String, String>,
}

/// 内存文档存储
///
/// 用于宿主未接入真实文档库时的本地运行和测试
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, StoredDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或替换一个文档
    pub async fn insert(&self, id: impl Into<DocumentId>, document: StoredDocument) {
        self.documents.write().await.insert(id.into(), document);
    }

    /// 插入一个带原生文件的文档
    pub async fn insert_native(&self, id: impl Into<DocumentId>, native: impl Into<Vec<u8>>) {
        self.insert(
            id,
            StoredDocument {
                native: Some(native.into()),
                fields: HashMap::new(),
            },
        )
        .await;
    }

    /// 读取字段当前值（不存在时为 `None`）
    pub async fn field(&self, id: &DocumentId, field: &str) -> Option<String> {
        self.documents
            .read()
            .await
            .get(id)
            .and_then(|doc| doc.fields.get(field).cloned())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn has_native(&self, id: &DocumentId) -> Result<bool, StoreError> {
        let documents = self.documents.read().await;
        let doc = documents
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(doc.native.is_some())
    }

    async fn download_native(&self, id: &DocumentId) -> Result<Vec<u8>, StoreError> {
        let documents = self.documents.read().await;
        let doc = documents
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        doc.native
            .clone()
            .ok_or_else(|| StoreError::Backend(format!("文档 {} 没有原生文件", id)))
    }

    async fn write_text_field(
        &self,
        id: &DocumentId,
        field: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let doc = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        doc.fields.insert(field.to_string(), text.to_string());
        Ok(())
    }

    async fn read_text_field(&self, id: &DocumentId, field: &str) -> Result<String, StoreError> {
        let documents = self.documents.read().await;
        let doc = documents
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(doc.fields.get(field).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_native_and_fields() {
        let store = InMemoryDocumentStore::new();
        store.insert_native(1001, b"%PDF".to_vec()).await;
        store.insert(1002, StoredDocument::default()).await;

        let with_native = DocumentId::from(1001);
        let without_native = DocumentId::from(1002);

        assert!(store.has_native(&with_native).await.unwrap());
        assert!(!store.has_native(&without_native).await.unwrap());
        assert_eq!(store.download_native(&with_native).await.unwrap(), b"%PDF");

        assert_eq!(store.read_text_field(&with_native, "OCR Log").await.unwrap(), "");
        store
            .write_text_field(&with_native, "OCR Log", "line\n")
            .await
            .unwrap();
        assert_eq!(
            store.field(&with_native, "OCR Log").await.as_deref(),
            Some("line\n")
        );
    }

    #[tokio::test]
    async fn test_unknown_document() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::from("missing");
        assert!(matches!(store.has_native(&id).await, Err(StoreError::NotFound(_))));
        assert!(store.write_text_field(&id, "f", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_count_with_native() {
        let store = InMemoryDocumentStore::new();
        store.insert_native(1, vec![1]).await;
        store.insert(2, StoredDocument::default()).await;
        store.insert_native(3, vec![3]).await;

        let ids: Vec<DocumentId> = vec![1.into(), 2.into(), 3.into()];
        assert_eq!(store.count_with_native(&ids).await.unwrap(), 2);
    }
}
