//! # exifrotate - EXIF 方向批量归一化工具
//!
//! 递归扫描所选目录，把每个图像按其 EXIF 方向旋转后原地写回，
//! 此后查看器无需在显示时再做旋转。
//!
//! ## 流程
//! 选择根目录 → 扫描并按内容筛选图像 → 有界线程池并行处理 →
//! 逐文件报告进度 → 完成或取消
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/    (扫描、并行执行、运行状态)
//!   │     └── imaging/  (图像库封装)
//!   ├── utils/      (输出、进度条、日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod imaging;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    match commands::run(cli) {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            utils::output::print_error(&format!("{}", e));
            std::process::exit(1);
        }
    }
}
