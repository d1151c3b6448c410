//! # 图像处理模块
//!
//! 外部图像库的薄封装，批处理器把它当作不透明的协作者。
//!
//! ## 功能
//! - 按内容探测文件类型
//! - 读取 EXIF 方向并变换像素
//! - 重新编码并原子写回
//!
//! ## 依赖关系
//! - 被 `batch/scanner.rs` 与 `commands/rotate.rs` 使用
//! - 使用 `image`、`kamadak-exif`

pub mod handle;
pub mod orientation;
pub mod probe;

#[cfg(test)]
pub(crate) mod testutil;

pub use handle::{rotate_file, RotateOutcome, SaveOptions};
