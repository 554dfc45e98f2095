//! 宿主批量操作生命周期
//!
//! 宿主按 校验选择 → 校验表单 → 批前准备 → 分批执行 → 批后收尾 的顺序调用，
//! 每一步都返回 `Response`

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error};

use crate::config::OcrSettings;
use crate::infrastructure::SettingsProvider;
use crate::models::DocumentId;
use crate::orchestrator::BatchProcessor;

/// 生命周期各阶段的返回值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub success: bool,
    pub message: String,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// 批量 OCR 操作
pub struct MassOperation {
    processor: BatchProcessor,
    settings: Arc<dyn SettingsProvider>,
}

impl MassOperation {
    pub fn new(processor: BatchProcessor, settings: Arc<dyn SettingsProvider>) -> Self {
        Self {
            processor,
            settings,
        }
    }

    /// 用户选中文档后：校验设置，统计可 OCR 的文档数
    pub async fn validate_selection(&self, ids: &[DocumentId]) -> Response {
        let section = &self.processor.config().settings_section;
        if let Err(e) = OcrSettings::load(self.settings.as_ref(), section) {
            error!("设置校验失败: {}", e);
            return Response::fail("设置错误");
        }

        match self.count_eligible(ids).await {
            Ok(count) => {
                debug!("可 OCR 文档数量: {}", count);
                Response::ok_with(format!("待 OCR 文档数量: {}", count))
            }
            Err(e) => {
                error!("文档数量统计失败: {:#}", e);
                Response::fail("文档数量统计失败")
            }
        }
    }

    pub fn validate_layout(&self) -> Response {
        Response::ok()
    }

    pub fn pre_mass_operation(&self) -> Response {
        Response::ok()
    }

    /// 处理宿主分配的一批文档
    pub async fn do_batch(&self, ids: &[DocumentId]) -> Response {
        let result = self.processor.run_batch(ids, self.settings.as_ref()).await;
        Response {
            success: result.success,
            message: result.message,
        }
    }

    pub fn post_mass_operation(&self) -> Response {
        Response::ok()
    }

    async fn count_eligible(&self, ids: &[DocumentId]) -> Result<usize> {
        let count = self
            .processor
            .store()
            .count_with_native(ids)
            .await
            .with_context(|| format!("统计 {} 个文档的原生文件", ids.len()))?;
        Ok(count)
    }
}
