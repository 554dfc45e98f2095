//! # Azure OCR Batch
//!
//! 通过 Azure Read API 批量识别文档文本，并把结果和审计日志写回文档库
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 外部协作方的边界，只暴露能力
//! - `DocumentStore` - 原生文件读取、长文本字段读写
//! - `SettingsProvider` - 按分区读取操作员设置
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 远端 OCR 服务
//! - `AzureReadClient` - 提交分析、轮询作业直到终态
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 只处理单个文档的单项能力
//! - `AuditLogWriter` - 追加审计日志行
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一个文档"的完整处理流程
//! - `DocumentFlow` - 检查 → 下载 → OCR → 写回 → 日志
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，控制并发并汇总结果
//! - `orchestrator/mass_operation` - 宿主批量操作的生命周期入口

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AzureReadClient, OcrApi, OcrJobHandle, PollPolicy};
pub use config::{Config, OcrSettings};
pub use error::{AppError, AppResult, ConfigError, DocumentError, OcrError, StoreError};
pub use infrastructure::{
    DocumentStore, EnvSettingsProvider, InMemoryDocumentStore, MapSettingsProvider,
    SettingsProvider, StoredDocument, TomlSettingsProvider,
};
pub use models::{BatchResult, DocumentId, DocumentOutcome, DocumentTask, OcrOutcome};
pub use orchestrator::{BatchProcessor, MassOperation, NoopReporter, Response, StatusReporter};
pub use services::AuditLogWriter;
pub use workflow::DocumentFlow;
