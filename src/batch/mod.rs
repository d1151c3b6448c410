//! # 批量处理模块
//!
//! 扫描目录并并行处理其中的图像。
//!
//! ## 功能
//! - 递归遍历并按内容筛选图像
//! - 有界线程池并行处理
//! - 协作式取消与阻塞等待
//! - 进度通知串行输出
//!
//! ## 依赖关系
//! - 被 `commands/rotate.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod context;
pub mod runner;
pub mod scanner;
pub mod sink;

pub use context::RunContext;
pub use runner::{spawn, BatchRunner, ProcessResult, RunHandle, RunReport};
pub use scanner::ImageScanner;
pub use sink::{ConsoleSink, ProgressSink};
