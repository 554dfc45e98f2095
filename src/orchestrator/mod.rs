//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 校验设置
//! - 控制并发数量（Semaphore）
//! - 等待全部 worker 并汇总结果
//!
//! ### `mass_operation` - 宿主生命周期
//! - 校验选择（统计可 OCR 文档数）
//! - 分批执行（委托 batch_processor）
//! - 其余阶段直接返回成功
//!
//! ## 层次关系
//!
//! ```text
//! mass_operation (宿主生命周期)
//!     ↓
//! batch_processor (处理 Vec<DocumentId>)
//!     ↓
//! workflow::DocumentFlow (处理单个文档)
//!     ↓
//! clients::OcrApi / services::AuditLogWriter
//!     ↓
//! infrastructure (DocumentStore / SettingsProvider)
//! ```

pub mod batch_processor;
pub mod mass_operation;

pub use batch_processor::{BatchProcessor, NoopReporter, StatusReporter};
pub use mass_operation::{MassOperation, Response};
