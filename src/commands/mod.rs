//! # 命令执行模块
//!
//! 实现命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `imaging/`, `utils/`
//! - 子模块: prompt, rotate

pub mod prompt;
pub mod rotate;

use crate::cli::Cli;
use crate::error::Result;
use rotate::RunStatus;

/// 执行命令
pub fn run(cli: Cli) -> Result<RunStatus> {
    rotate::execute(cli)
}
