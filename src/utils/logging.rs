/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
/// - `category_count`: 评分类别数量
pub fn log_startup(config: &Config, category_count: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 写作评分服务启动");
    info!("🌐 监听地址: {}", config.bind_addr);
    info!(
        "📐 评分标准: {} ({} 个类别)",
        config.rubric_file.as_deref().unwrap_or("内置"),
        category_count
    );
    info!(
        "🤖 评分模型: {} (温度 {}) | 建议模型: {} (温度 {})",
        config.scoring_model,
        config.scoring_temperature,
        config.rewrite_model,
        config.rewrite_temperature
    );
    info!(
        "📊 类别并发数: {} | 超时: {}秒 | 对比结构: {:?}",
        config.scoring_concurrency, config.llm_timeout_secs, config.compare_contract
    );
    info!("{}", "=".repeat(60));
}

/// 记录一次评分批次的结果
///
/// # 参数
/// - `mode`: 评分模式（single / compare）
/// - `total`: 类别总数
/// - `failed`: 使用占位结果的类别数
/// - `average`: 平均分
pub fn log_batch_complete(mode: &str, total: usize, failed: usize, average: &str) {
    if failed > 0 {
        info!(
            "✓ [{}] 评分完成: {}/{} 个类别成功, 平均分 {}",
            mode,
            total - failed,
            total,
            average
        );
    } else {
        info!("✓ [{}] 评分完成: {} 个类别, 平均分 {}", mode, total, average);
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("清晰度评分", 2), "清晰...");
    }
}
