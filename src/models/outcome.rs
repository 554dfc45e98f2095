use crate::models::DocumentId;

/// 远端 OCR 作业的终态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    /// 识别成功，按服务返回顺序排列的文本行
    Succeeded(Vec<String>),
    /// 作业失败、状态请求失败或响应无法解析
    Failed(String),
    /// 超过轮询时限
    TimedOut,
}

impl OcrOutcome {
    /// 拼接全部文本行（无分隔符）
    pub fn text(&self) -> Option<String> {
        match self {
            OcrOutcome::Succeeded(lines) => Some(lines.concat()),
            _ => None,
        }
    }
}

/// 单个文档的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// 没有原生文件，跳过（不算失败）
    Skipped,
    /// 文本与日志已写回
    Completed,
    /// 处理失败
    Failed(DocumentId),
}

/// 批次汇总结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// 没有任何失败时为 true
    pub success: bool,
    /// 给操作员看的汇总信息
    pub message: String,
    /// 失败的文档（按输入顺序）
    pub failed_ids: Vec<DocumentId>,
    pub completed: usize,
    pub skipped: usize,
}

impl BatchResult {
    /// 汇总所有文档结果
    pub fn from_outcomes(outcomes: &[DocumentOutcome]) -> Self {
        let mut completed = 0;
        let mut skipped = 0;
        let mut failed_ids = Vec::new();

        for outcome in outcomes {
            match outcome {
                DocumentOutcome::Completed => completed += 1,
                DocumentOutcome::Skipped => skipped += 1,
                DocumentOutcome::Failed(id) => failed_ids.push(id.clone()),
            }
        }

        let message = if failed_ids.is_empty() {
            format!(
                "全部 {} 个文档处理完成 (OCR {}, 跳过 {})",
                outcomes.len(),
                completed,
                skipped
            )
        } else {
            let ids: Vec<String> = failed_ids.iter().map(|id| id.to_string()).collect();
            format!(
                "{}/{} 个文档 OCR 失败: {}",
                failed_ids.len(),
                outcomes.len(),
                ids.join(", ")
            )
        };

        Self {
            success: failed_ids.is_empty(),
            message,
            failed_ids,
            completed,
            skipped,
        }
    }

    /// 批次在启动任何 worker 之前就失败
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            failed_ids: Vec::new(),
            completed: 0,
            skipped: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.skipped + self.failed_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_concatenation_has_no_separator() {
        let outcome = OcrOutcome::Succeeded(vec!["AB".to_string(), "CD".to_string()]);
        assert_eq!(outcome.text().as_deref(), Some("ABCD"));
        assert_eq!(OcrOutcome::TimedOut.text(), None);
        assert_eq!(OcrOutcome::Failed("x".into()).text(), None);
    }

    #[test]
    fn test_skipped_counts_as_success() {
        let result = BatchResult::from_outcomes(&[
            DocumentOutcome::Completed,
            DocumentOutcome::Skipped,
            DocumentOutcome::Skipped,
        ]);
        assert!(result.success);
        assert!(result.failed_ids.is_empty());
        assert_eq!(result.completed, 1);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_failures_are_listed_in_order() {
        let result = BatchResult::from_outcomes(&[
            DocumentOutcome::Failed(DocumentId::from(7)),
            DocumentOutcome::Completed,
            DocumentOutcome::Failed(DocumentId::from(3)),
        ]);
        assert!(!result.success);
        assert_eq!(result.failed_ids, vec![DocumentId::from(7), DocumentId::from(3)]);
        assert!(result.message.starts_with("2/3"));
        assert!(result.message.contains("7, 3"));
    }

    #[test]
    fn test_empty_batch_succeeds() {
        let result = BatchResult::from_outcomes(&[]);
        assert!(result.success);
        assert_eq!(result.total(), 0);
    }
}
