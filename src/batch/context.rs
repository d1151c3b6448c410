//! # 运行上下文
//!
//! 一次运行中所有并发单元共享的状态：取消标志、完成标志与当前阶段。
//!
//! 由运行调用方持有，通过 `Arc` 传递给扫描器、工作线程和取消触发器，
//! 不使用任何进程级全局变量。
//!
//! ## 依赖关系
//! - 被 `batch/scanner.rs`, `batch/runner.rs`, `commands/rotate.rs` 使用

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// 运行阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Scanning,
    Processing,
    Finished,
    Aborted,
}

impl RunPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunPhase::Scanning,
            2 => RunPhase::Processing,
            3 => RunPhase::Finished,
            4 => RunPhase::Aborted,
            _ => RunPhase::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            RunPhase::Idle => 0,
            RunPhase::Scanning => 1,
            RunPhase::Processing => 2,
            RunPhase::Finished => 3,
            RunPhase::Aborted => 4,
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Idle => write!(f, "idle"),
            RunPhase::Scanning => write!(f, "scanning"),
            RunPhase::Processing => write!(f, "processing"),
            RunPhase::Finished => write!(f, "finished"),
            RunPhase::Aborted => write!(f, "aborted"),
        }
    }
}

/// 运行上下文
#[derive(Debug)]
pub struct RunContext {
    aborted: AtomicBool,
    finished: AtomicBool,
    phase: AtomicU8,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            aborted: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            phase: AtomicU8::new(RunPhase::Idle.as_u8()),
        }
    }

    /// 请求取消：尚未开始的文件将被跳过，进行中的文件继续完成
    pub fn request_abort(&self) {
        if !self.aborted.swap(true, Ordering::SeqCst) {
            tracing::info!(phase = %self.phase(), "abort requested");
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    /// 标记所有工作单元已结束，并进入终止阶段
    pub fn mark_finished(&self) {
        let terminal = if self.is_aborted() {
            RunPhase::Aborted
        } else {
            RunPhase::Finished
        };
        self.set_phase(terminal);
        self.finished.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> RunPhase {
        RunPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn set_phase(&self, phase: RunPhase) {
        tracing::debug!(%phase, "run phase changed");
        self.phase.store(phase.as_u8(), Ordering::SeqCst);
    }
}
