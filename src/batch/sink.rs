//! # 进度输出
//!
//! 处理核心与显示层之间的通知接口。
//!
//! 调用方用 `Mutex` 包装 sink，核心在锁内逐条追加，
//! 因此 sink 实现本身不需要处理并发。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - `ConsoleSink` 使用 `utils/output.rs`, `utils/progress.rs`

use super::runner::BatchResult;
use crate::utils::{output, progress};

use indicatif::ProgressBar;
use std::path::Path;

/// 进度通知接收方
pub trait ProgressSink {
    /// 开始遍历目录
    fn scan_started(&mut self, _root: &Path) {}

    /// 遍历结束，共 `total` 个图像待处理
    fn batch_started(&mut self, _total: usize) {}

    /// 某个文件即将开始旋转/保存
    fn processing_started(&mut self, name: &str);

    /// 某个文件已按 `orientation` 旋转
    fn file_rotated(&mut self, _name: &str, _orientation: u8) {}

    /// 试运行：某个文件需要按 `orientation` 旋转
    fn file_would_rotate(&mut self, _name: &str, _orientation: u8) {}

    /// 某个文件处理完成（无论结果如何）
    fn file_done(&mut self, _name: &str) {}

    /// 某个文件处理失败
    fn file_failed(&mut self, name: &str, error: &str);

    /// 所有工作单元已结束
    fn finished(&mut self, result: &BatchResult);
}

/// 终端输出：状态行打印在进度条上方
///
/// 遍历阶段显示 spinner，处理阶段切换为进度条。
#[derive(Default)]
pub struct ConsoleSink {
    pb: Option<ProgressBar>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn println(&self, print: impl FnOnce()) {
        match &self.pb {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn scan_started(&mut self, root: &Path) {
        self.pb = Some(progress::create_spinner(&format!(
            "Scanning {}",
            root.display()
        )));
    }

    fn batch_started(&mut self, total: usize) {
        if let Some(spinner) = self.pb.take() {
            spinner.finish_and_clear();
        }
        output::print_info(&format!("Found {} images", total));
        self.pb = Some(progress::create_progress_bar(total as u64, "Rotating"));
    }

    fn processing_started(&mut self, name: &str) {
        self.println(|| output::print_info(&format!("Processing: {}", name)));
    }

    fn file_rotated(&mut self, name: &str, orientation: u8) {
        self.println(|| output::print_rotation(name, orientation));
    }

    fn file_would_rotate(&mut self, name: &str, orientation: u8) {
        self.println(|| output::print_would_rotate(name, orientation));
    }

    fn file_done(&mut self, _name: &str) {
        if let Some(pb) = &self.pb {
            pb.inc(1);
        }
    }

    fn file_failed(&mut self, name: &str, error: &str) {
        self.println(|| output::print_error(&format!("{}: {}", name, error)));
    }

    fn finished(&mut self, result: &BatchResult) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
        if result.aborted {
            output::print_warning(finished_line(result));
        } else {
            output::print_done(finished_line(result));
        }
    }
}

/// 终止行：取消时也输出 FINISHED!
pub fn finished_line(result: &BatchResult) -> &'static str {
    if result.aborted {
        "FINISHED! (aborted)"
    } else {
        "FINISHED!"
    }
}

/// 记录所有通知的 sink，用于测试
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl ProgressSink for RecordingSink {
    fn processing_started(&mut self, name: &str) {
        self.lines.push(format!("Processing: {}", name));
    }

    fn file_failed(&mut self, name: &str, error: &str) {
        self.lines.push(format!("Failed: {}: {}", name, error));
    }

    fn file_would_rotate(&mut self, name: &str, orientation: u8) {
        self.lines.push(format!("Would rotate: {} ({})", name, orientation));
    }

    fn finished(&mut self, _result: &BatchResult) {
        self.lines.push("FINISHED".to_string());
    }
}
