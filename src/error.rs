//! # 统一错误处理模块
//!
//! 定义 exifrotate 的所有错误类型，使用 `thiserror` 派生。
//!
//! 单个文件的处理错误只影响该文件：批处理器把它们转换为
//! `ProcessResult::Failed` 记录下来，不会中断整个批次。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// exifrotate 统一错误类型
#[derive(Error, Debug)]
pub enum ExifRotateError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    // ─────────────────────────────────────────────────────────────
    // 图像错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to decode image: {path}\nReason: {source}")]
    DecodeError {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image: {path}\nReason: {source}")]
    EncodeError {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Unrecognised image format: {path}")]
    UnknownFormat { path: String },

    #[error("Corrupt EXIF block in {path}: {reason}")]
    ExifError { path: String, reason: String },

    #[error("Invalid EXIF orientation value {value} in {path}")]
    InvalidOrientation { path: String, value: u32 },

    // ─────────────────────────────────────────────────────────────
    // 运行环境错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to install Ctrl+C handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    #[error("Processing thread panicked")]
    WorkerPanicked,

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ExifRotateError>;
