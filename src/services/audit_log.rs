//! 审计日志服务 - 业务能力层
//!
//! 只负责"在文档的日志字段后追加一行"能力，不关心流程

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::DocumentError;
use crate::infrastructure::DocumentStore;
use crate::models::DocumentId;

/// 日志行的来源标识
pub const AUDIT_SOURCE: &str = "Azure OCR";

/// 文本长度（UTF-16 码元数），日志行和运行日志都用这个口径
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// 审计日志写入服务
///
/// 职责：
/// - 读取现有日志，追加一行，整体写回
/// - 从不覆盖已有内容
pub struct AuditLogWriter {
    operator: String,
}

impl AuditLogWriter {
    /// `operator` 为发起批次的操作员身份（一般是邮箱）
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
        }
    }

    /// 生成一行日志：`Azure OCR;<操作员>;<MM/dd/yyyy HH:mm:ss>;<文本长度>\n`
    ///
    pub fn format_entry(&self, at: DateTime<Local>, text: &str) -> String {
        format!(
            "{};{};{};{}\n",
            AUDIT_SOURCE,
            self.operator,
            at.format("%m/%d/%Y %H:%M:%S"),
            text_length(text)
        )
    }

    /// 追加一行日志
    pub async fn append(
        &self,
        store: &dyn DocumentStore,
        id: &DocumentId,
        log_field: &str,
        text: &str,
    ) -> Result<(), DocumentError> {
        let mut log = store
            .read_text_field(id, log_field)
            .await
            .map_err(|e| DocumentError::persistence(log_field, e))?;

        let entry = self.format_entry(Local::now(), text);
        debug!("[文档 {}] 追加日志: {}", id, entry.trim_end());
        log.push_str(&entry);

        store
            .write_text_field(id, log_field, &log)
            .await
            .map_err(|e| DocumentError::persistence(log_field, e))
    }
}
