//! # 图像扫描器
//!
//! 递归遍历根目录，按内容类型筛选出图像文件。
//!
//! ## 功能
//! - 惰性产出所有普通文件（`candidates`）
//! - 按内容探测过滤（`scan`），非图像静默排除
//! - 遍历出错时默认停止枚举，保留已发现的文件
//! - 收到取消请求时提前结束遍历
//! - 跟随符号链接时按真实路径去重，同一文件只交给一个工作单元
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `imaging/probe.rs` 判断内容类型
//! - 使用 `walkdir` 遍历目录

use super::context::RunContext;
use crate::imaging::probe;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 扫描结果
#[derive(Debug, Default)]
pub struct ScanReport {
    /// 识别为图像的文件
    pub images: Vec<PathBuf>,
    /// 被排除的非图像文件数量
    pub excluded: usize,
    /// 指向已发现文件的重复路径数量（符号链接）
    pub duplicates: usize,
    /// 导致遍历提前结束的错误
    pub error: Option<walkdir::Error>,
}

impl ScanReport {
    /// 遍历是否完整
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// 图像扫描器
pub struct ImageScanner {
    /// 根目录
    root: PathBuf,
    /// 是否跟随符号链接
    follow_links: bool,
    /// 遍历出错后是否继续
    keep_going: bool,
}

impl ImageScanner {
    /// 创建新的扫描器
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            keep_going: false,
        }
    }

    /// 设置是否跟随符号链接
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// 设置遍历出错后是否继续
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 惰性产出所有普通文件，同一目录内按文件名排序
    ///
    /// 跟随的符号链接产出其目标的真实路径，写回时不会替换链接本身。
    pub fn candidates(&self) -> impl Iterator<Item = walkdir::Result<PathBuf>> {
        WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) if e.file_type().is_file() => {
                    if e.path_is_symlink() {
                        Some(Ok(fs::canonicalize(e.path()).unwrap_or_else(|_| e.into_path())))
                    } else {
                        Some(Ok(e.into_path()))
                    }
                }
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            })
    }

    /// 收集所有图像文件
    pub fn scan(&self, ctx: &RunContext) -> ScanReport {
        let mut report = ScanReport::default();
        let mut seen = HashSet::new();

        for candidate in self.candidates() {
            if ctx.is_aborted() {
                tracing::debug!("scan stopped by abort request");
                break;
            }

            match candidate {
                Ok(path) => {
                    let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
                    if !seen.insert(key) {
                        tracing::debug!(path = %path.display(), "already found via another path");
                        report.duplicates += 1;
                    } else if probe::is_image(&path) {
                        report.images.push(path);
                    } else {
                        report.excluded += 1;
                    }
                }
                Err(e) if self.keep_going => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                }
                Err(e) => {
                    tracing::error!(error = %e, "directory walk failed");
                    report.error = Some(e);
                    break;
                }
            }
        }

        tracing::info!(
            root = %self.root.display(),
            images = report.images.len(),
            excluded = report.excluded,
            duplicates = report.duplicates,
            "scan complete"
        );
        report
    }
}
