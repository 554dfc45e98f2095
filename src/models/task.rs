use std::fmt::Display;

/// 文档标识（宿主文档库中的不透明键）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i32> for DocumentId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for DocumentId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// 单个文档任务
///
/// 封装"处理哪个文档、写到哪个字段"这一信息，创建后不可变
#[derive(Debug, Clone)]
pub struct DocumentTask {
    /// 文档标识
    pub document_id: DocumentId,

    /// OCR 文本写入的字段
    pub destination_field: String,

    /// 审计日志字段
    pub log_field: String,
}

impl DocumentTask {
    pub fn new(
        document_id: DocumentId,
        destination_field: impl Into<String>,
        log_field: impl Into<String>,
    ) -> Self {
        Self {
            document_id,
            destination_field: destination_field.into(),
            log_field: log_field.into(),
        }
    }
}

impl Display for DocumentTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 {}]", self.document_id)
    }
}
