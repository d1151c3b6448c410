//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `batch/sink.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印旋转消息
pub fn print_rotation(file: &str, orientation: u8) {
    println!(
        "{} {} {} {}",
        "[ROT]".cyan().bold(),
        file,
        "->".cyan(),
        orientation_label(orientation).dimmed()
    );
}

/// 打印试运行中需要旋转的文件
pub fn print_would_rotate(file: &str, orientation: u8) {
    println!(
        "{} {} {} {}",
        "[DRY]".magenta().bold(),
        file,
        "would be".dimmed(),
        orientation_label(orientation).dimmed()
    );
}

/// EXIF 方向值的可读描述
pub fn orientation_label(orientation: u8) -> &'static str {
    match orientation {
        1 => "upright",
        2 => "mirrored",
        3 => "rotated 180°",
        4 => "flipped vertically",
        5 => "mirrored, rotated 90° CW",
        6 => "rotated 90° CW",
        7 => "mirrored, rotated 270° CW",
        8 => "rotated 270° CW",
        _ => "unknown",
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
