//! # 批量执行器
//!
//! 在有界线程池上并行处理图像列表，支持协作式取消。
//!
//! ## 功能
//! - 基于 rayon 的有界并行迭代
//! - 每个文件开始前检查取消标志
//! - 进度通知在互斥锁内串行写入
//! - 单文件失败不影响整个批次
//! - 后台运行与阻塞等待（`spawn` / `RunHandle::join`）
//!
//! ## 依赖关系
//! - 被 `commands/rotate.rs` 调用
//! - 使用 `batch/scanner.rs`, `batch/sink.rs`, `batch/context.rs`
//! - 使用 `rayon` 进行并行计算

use super::context::{RunContext, RunPhase};
use super::scanner::{ImageScanner, ScanReport};
use super::sink::ProgressSink;
use crate::error::{ExifRotateError, Result};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 像素已按该方向值变换并写回
    Rotated(PathBuf, u8),
    /// 试运行：需要按该方向值变换，文件未改动
    WouldRotate(PathBuf, u8),
    /// 无需变换（或试运行），文件未改动
    Unchanged(PathBuf),
    /// 处理失败
    Failed(PathBuf, String), // (文件路径, 错误信息)
    /// 取消后未开始
    Cancelled(PathBuf),
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 旋转数量
    pub rotated: usize,
    /// 试运行中需要旋转的数量
    pub would_rotate: usize,
    /// 未改动数量
    pub unchanged: usize,
    /// 失败数量
    pub failed: usize,
    /// 取消数量
    pub cancelled: usize,
    /// 失败详情
    pub failures: Vec<(PathBuf, String)>,
    /// 运行是否被取消
    pub aborted: bool,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Rotated(..) => self.rotated += 1,
            ProcessResult::WouldRotate(..) => self.would_rotate += 1,
            ProcessResult::Unchanged(_) => self.unchanged += 1,
            ProcessResult::Cancelled(_) => self.cancelled += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.rotated + self.would_rotate + self.unchanged + self.failed + self.cancelled
    }
}

/// 一次完整运行（扫描 + 处理）的结果
#[derive(Debug)]
pub struct RunReport {
    pub scan: ScanReport,
    pub batch: BatchResult,
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    pool: rayon::ThreadPool,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用 CPU 核数
    pub fn new(jobs: usize) -> Result<Self> {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("exifrotate-worker-{}", i))
            .build()?;

        Ok(Self { jobs, pool })
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    ///
    /// 每个文件：检查取消标志，发出开始通知，再调用 `processor`。
    /// 全部结束后发出完成通知并设置完成标志。
    pub fn run<F, S>(
        &self,
        files: Vec<PathBuf>,
        ctx: &RunContext,
        sink: &Mutex<S>,
        processor: F,
    ) -> BatchResult
    where
        F: Fn(&Path) -> ProcessResult + Sync + Send,
        S: ProgressSink + Send,
    {
        ctx.set_phase(RunPhase::Processing);
        lock(sink).batch_started(files.len());

        let results: Vec<ProcessResult> = self.pool.install(|| {
            files
                .into_par_iter()
                .map(|file| process_one(file, ctx, sink, &processor))
                .collect()
        });

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }
        batch_result.aborted = ctx.is_aborted();

        lock(sink).finished(&batch_result);
        ctx.mark_finished();

        tracing::info!(
            rotated = batch_result.rotated,
            unchanged = batch_result.unchanged,
            failed = batch_result.failed,
            cancelled = batch_result.cancelled,
            "batch complete"
        );
        batch_result
    }

    /// 扫描根目录并处理所有图像
    pub fn scan_and_run<F, S>(
        &self,
        scanner: &ImageScanner,
        ctx: &RunContext,
        sink: &Mutex<S>,
        processor: F,
    ) -> RunReport
    where
        F: Fn(&Path) -> ProcessResult + Sync + Send,
        S: ProgressSink + Send,
    {
        ctx.set_phase(RunPhase::Scanning);
        lock(sink).scan_started(scanner.root());

        let scan = scanner.scan(ctx);
        let batch = self.run(scan.images.clone(), ctx, sink, processor);

        RunReport { scan, batch }
    }
}

/// 处理单个文件
fn process_one<F, S>(
    file: PathBuf,
    ctx: &RunContext,
    sink: &Mutex<S>,
    processor: &F,
) -> ProcessResult
where
    F: Fn(&Path) -> ProcessResult,
    S: ProgressSink,
{
    if ctx.is_aborted() {
        return ProcessResult::Cancelled(file);
    }

    let name = display_name(&file);
    lock(sink).processing_started(&name);

    let result = processor(&file);

    let mut sink = lock(sink);
    match &result {
        ProcessResult::Rotated(_, orientation) => sink.file_rotated(&name, *orientation),
        ProcessResult::WouldRotate(_, orientation) => {
            sink.file_would_rotate(&name, *orientation)
        }
        ProcessResult::Failed(_, err) => {
            tracing::warn!(path = %file.display(), error = %err, "failed to process image");
            sink.file_failed(&name, err);
        }
        _ => {}
    }
    sink.file_done(&name);
    result
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// 获取 sink 锁；持锁线程 panic 后仍继续使用
fn lock<S>(sink: &Mutex<S>) -> MutexGuard<'_, S> {
    sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 后台运行句柄
pub struct RunHandle {
    ctx: Arc<RunContext>,
    thread: JoinHandle<RunReport>,
}

impl RunHandle {
    /// 请求取消，不等待
    #[cfg(test)]
    pub fn cancel(&self) {
        self.ctx.request_abort();
    }

    /// 阻塞直到所有工作单元结束
    pub fn join(self) -> Result<RunReport> {
        let report = self
            .thread
            .join()
            .map_err(|_| ExifRotateError::WorkerPanicked)?;
        tracing::debug!(phase = %self.ctx.phase(), "run joined");
        Ok(report)
    }

    /// 请求取消并等待生效
    #[cfg(test)]
    pub fn cancel_and_join(self) -> Result<RunReport> {
        self.cancel();
        self.join()
    }
}

/// 在后台线程上运行扫描与处理
pub fn spawn<F, S>(
    runner: BatchRunner,
    scanner: ImageScanner,
    ctx: Arc<RunContext>,
    sink: Arc<Mutex<S>>,
    processor: F,
) -> Result<RunHandle>
where
    F: Fn(&Path) -> ProcessResult + Sync + Send + 'static,
    S: ProgressSink + Send + 'static,
{
    let thread_ctx = Arc::clone(&ctx);
    let thread = std::thread::Builder::new()
        .name("exifrotate-run".to_string())
        .spawn(move || runner.scan_and_run(&scanner, &thread_ctx, &sink, processor))
        .map_err(|e| ExifRotateError::Other(format!("Failed to spawn processing thread: {}", e)))?;

    Ok(RunHandle { ctx, thread })
}
