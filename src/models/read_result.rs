//! Azure Read API 的轮询响应
//!
//! 只反序列化用得到的字段，其余字段忽略

use serde::Deserialize;

/// 作业状态
pub const STATUS_SUCCEEDED: &str = "succeeded";
pub const STATUS_FAILED: &str = "failed";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperationResult {
    pub status: String,
    #[serde(default)]
    pub analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    pub read_results: Vec<ReadResult>,
}

/// 单页识别结果
#[derive(Debug, Deserialize)]
pub struct ReadResult {
    pub lines: Vec<Line>,
}

#[derive(Debug, Deserialize)]
pub struct Line {
    pub text: String,
}

impl ReadOperationResult {
    pub fn is_succeeded(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_SUCCEEDED)
    }

    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_FAILED)
    }

    /// 按页、按行顺序展开所有文本行
    ///
    /// 成功状态下缺少 `analyzeResult` 视为响应格式错误
    pub fn into_lines(self) -> Option<Vec<String>> {
        let analyze_result = self.analyze_result?;
        Some(
            analyze_result
                .read_results
                .into_iter()
                .flat_map(|page| page.lines.into_iter().map(|line| line.text))
                .collect(),
        )
    }
}
