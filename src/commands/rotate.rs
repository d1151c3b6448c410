//! # 旋转命令实现
//!
//! 选择目录，扫描图像，按 EXIF 方向并行重写。
//!
//! ## 功能
//! - 根目录来自参数或交互式询问
//! - Ctrl+C 请求取消，等待进行中的文件完成后退出
//! - 汇总统计与失败列表
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的参数
//! - 使用 `batch/` 模块进行扫描和批量处理
//! - 使用 `imaging/` 模块处理单个图像
//! - 使用 `utils/output.rs`

use super::prompt;
use crate::batch::{
    self, BatchRunner, ConsoleSink, ImageScanner, ProcessResult, ProgressSink, RunContext,
    RunHandle, RunReport,
};
use crate::cli::Cli;
use crate::error::{ExifRotateError, Result};
use crate::imaging::{self, RotateOutcome, SaveOptions};
use crate::utils::output;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 失败列表最多显示的条数
const MAX_LISTED_FAILURES: usize = 10;

/// 运行结束状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// 全部处理完成（可能有单文件失败）
    Completed,
    /// 用户取消
    Aborted,
    /// 目录遍历因 I/O 错误提前结束
    Incomplete,
    /// 未选择目录
    NoRoot,
}

impl RunStatus {
    pub fn from_report(report: &RunReport) -> Self {
        if report.batch.aborted {
            RunStatus::Aborted
        } else if !report.scan.is_complete() {
            RunStatus::Incomplete
        } else {
            RunStatus::Completed
        }
    }

    /// 进程退出码
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Completed | RunStatus::Aborted | RunStatus::NoRoot => 0,
            RunStatus::Incomplete => 2,
        }
    }
}

/// 一次运行的配置
#[derive(Debug, Clone)]
pub struct RotateOptions {
    pub jobs: usize,
    pub follow_links: bool,
    pub keep_going: bool,
    pub save: SaveOptions,
}

impl From<&Cli> for RotateOptions {
    fn from(args: &Cli) -> Self {
        Self {
            jobs: args.jobs,
            follow_links: args.follow_links,
            keep_going: args.keep_going,
            save: SaveOptions {
                jpeg_quality: args.quality,
                dry_run: args.dry_run,
            },
        }
    }
}

/// 执行旋转命令
pub fn execute(args: Cli) -> Result<RunStatus> {
    output::print_header("EXIF Image-Rotation Tool");

    let root = match args.root.clone() {
        Some(root) => root,
        None => match prompt::choose_directory()? {
            Some(root) => root,
            None => {
                output::print_info("No directory selected, nothing to do.");
                return Ok(RunStatus::NoRoot);
            }
        },
    };
    let root = validate_root(&root)?;
    let options = RotateOptions::from(&args);

    output::print_info(&format!("Root directory: '{}'", root.display()));
    if options.save.dry_run {
        output::print_warning("Dry run: no file will be modified");
    }

    let ctx = Arc::new(RunContext::new());
    install_abort_handler(Arc::clone(&ctx))?;

    let sink = Arc::new(Mutex::new(ConsoleSink::new()));
    let report = start(&root, &options, ctx, sink)?.join()?;

    print_summary(&report, options.save.dry_run);
    Ok(RunStatus::from_report(&report))
}

/// 校验根目录并转为绝对路径
pub fn validate_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(ExifRotateError::DirectoryNotFound {
            path: root.display().to_string(),
        });
    }
    if !root.is_dir() {
        return Err(ExifRotateError::NotADirectory {
            path: root.display().to_string(),
        });
    }
    root.canonicalize().map_err(|e| ExifRotateError::FileReadError {
        path: root.display().to_string(),
        source: e,
    })
}

/// 在后台启动一次运行
pub fn start<S>(
    root: &Path,
    options: &RotateOptions,
    ctx: Arc<RunContext>,
    sink: Arc<Mutex<S>>,
) -> Result<RunHandle>
where
    S: ProgressSink + Send + 'static,
{
    let runner = BatchRunner::new(options.jobs)?;
    tracing::info!(jobs = runner.jobs(), root = %root.display(), "starting run");

    let scanner = ImageScanner::new(root)
        .follow_links(options.follow_links)
        .keep_going(options.keep_going);

    let save = options.save;
    batch::spawn(runner, scanner, ctx, sink, move |path| {
        process_file(path, &save)
    })
}

/// 处理单个图像
pub fn process_file(path: &Path, options: &SaveOptions) -> ProcessResult {
    match imaging::rotate_file(path, options) {
        Ok(RotateOutcome::Rotated(orientation)) => {
            tracing::debug!(path = %path.display(), orientation, "rotated");
            ProcessResult::Rotated(path.to_path_buf(), orientation)
        }
        Ok(RotateOutcome::WouldRotate(orientation)) => {
            ProcessResult::WouldRotate(path.to_path_buf(), orientation)
        }
        Ok(RotateOutcome::Unchanged) => ProcessResult::Unchanged(path.to_path_buf()),
        Err(e) => ProcessResult::Failed(path.to_path_buf(), e.to_string()),
    }
}

/// Ctrl+C 请求取消；再次按下时继续等待进行中的文件
fn install_abort_handler(ctx: Arc<RunContext>) -> Result<()> {
    ctrlc::set_handler(move || {
        if ctx.is_finished() || ctx.is_aborted() {
            return;
        }
        output::print_warning("Abort requested, waiting for running files to finish...");
        ctx.request_abort();
    })?;
    Ok(())
}

/// 打印统计
fn print_summary(report: &RunReport, dry_run: bool) {
    let batch = &report.batch;

    output::print_separator();
    if let Some(err) = &report.scan.error {
        output::print_error(&format!(
            "Directory walk stopped early, only files found before the error were processed: {}",
            err
        ));
    }

    let (rotated, label) = if dry_run {
        (batch.would_rotate, "to rotate")
    } else {
        (batch.rotated, "rotated")
    };
    output::print_success(&format!(
        "{} images: {} {}, {} unchanged, {} failed, {} cancelled ({} other files skipped)",
        batch.total(),
        rotated,
        label,
        batch.unchanged,
        batch.failed,
        batch.cancelled,
        report.scan.excluded
    ));

    if !batch.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in batch.failures.iter().take(MAX_LISTED_FAILURES) {
            output::print_error(&format!("  {}: {}", path.display(), err));
        }
        if batch.failures.len() > MAX_LISTED_FAILURES {
            output::print_warning(&format!(
                "  ... and {} more",
                batch.failures.len() - MAX_LISTED_FAILURES
            ));
        }
    }
}
