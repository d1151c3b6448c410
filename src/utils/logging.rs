//! # 诊断日志
//!
//! 初始化 `tracing` 订阅者，诊断信息写到 stderr，与进度输出分开。
//!
//! `RUST_LOG` 优先；未设置时由 `-v` 次数决定级别。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber`

use tracing_subscriber::EnvFilter;

/// `-v` 次数对应的默认过滤级别
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// 初始化全局日志订阅者（重复调用无效）
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(7), "trace");
    }
}
