//! 日志工具模块
//!
//! 提供日志初始化和批次日志输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::BatchResult;

/// 初始化 tracing 日志
///
/// 通过 `RUST_LOG` 控制级别，默认 `info`；重复调用不会报错
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录批次开始信息
///
/// # 参数
/// - `total`: 文档总数
/// - `max_concurrent`: 最大并发数
pub fn log_batch_start(total: usize, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始 OCR 批次");
    info!("📄 文档数量: {}", total);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(result: &BatchResult) {
    info!("\n{}", "=".repeat(60));
    info!("📊 批次处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成: {}/{}", result.completed, result.total());
    info!("⏭️ 跳过: {}", result.skipped);
    info!("❌ 失败: {}", result.failed_ids.len());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
