//! # 目录选择
//!
//! 未在命令行给出根目录时向用户询问。
//! 启用 `dialog` feature 时弹出原生目录选择框，否则在终端读取一行。
//! 取消或输入空行都返回 `None`。
//!
//! ## 依赖关系
//! - 被 `commands/rotate.rs` 调用
//! - 使用 `rfd`（`dialog` feature）或 `console`

use crate::error::Result;
use std::path::PathBuf;

/// 询问要处理的目录
#[cfg(feature = "dialog")]
pub fn choose_directory() -> Result<Option<PathBuf>> {
    Ok(rfd::FileDialog::new()
        .set_title("Select the folder to process")
        .pick_folder())
}

/// 询问要处理的目录
#[cfg(not(feature = "dialog"))]
pub fn choose_directory() -> Result<Option<PathBuf>> {
    use crate::error::ExifRotateError;
    use console::Term;

    let term = Term::stdout();
    let io_err =
        |e: std::io::Error| ExifRotateError::Other(format!("Failed to read directory: {}", e));

    term.write_str("Directory to process (empty to cancel): ")
        .map_err(io_err)?;
    let line = term.read_line().map_err(io_err)?;

    Ok(parse_answer(&line))
}

#[cfg_attr(feature = "dialog", allow(dead_code))]
fn parse_answer(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("   \n"), None);
        assert_eq!(parse_answer(" /photos/2019 \n"), Some(PathBuf::from("/photos/2019")));
        assert_eq!(
            parse_answer("'/photos/with space'"),
            Some(PathBuf::from("/photos/with space"))
        );
    }
}
