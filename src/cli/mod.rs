//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! 只有一个入口：选择目录，然后按 EXIF 方向重写其中所有图像。
//! 没有配置文件，所有配置来自参数或环境变量。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/rotate.rs`

use clap::Parser;
use std::path::PathBuf;

/// exifrotate - 按 EXIF 方向批量旋转图像
#[derive(Parser, Debug)]
#[command(name = "exifrotate")]
#[command(author = "Lucas Alber")]
#[command(version)]
#[command(
    about = "Rewrite every image under a directory with its EXIF orientation applied",
    long_about = None
)]
pub struct Cli {
    /// Directory to process recursively (prompted for when omitted)
    pub root: Option<PathBuf>,

    /// Number of parallel workers (0 = number of CPUs)
    #[arg(short, long, default_value_t = 0, env = "EXIFROTATE_JOBS")]
    pub jobs: usize,

    /// Follow symbolic links while walking the directory
    #[arg(long, default_value_t = false)]
    pub follow_links: bool,

    /// Continue walking after an unreadable directory instead of stopping
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,

    /// JPEG quality used when re-encoding (1-100)
    #[arg(
        short,
        long,
        default_value_t = 90,
        env = "EXIFROTATE_JPEG_QUALITY",
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// Only report which images would be rotated, write nothing
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,

    /// Increase diagnostic log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["exifrotate", "/photos"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/photos")));
        assert_eq!(cli.quality, 90);
        assert!(!cli.dry_run);
        assert!(!cli.keep_going);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "exifrotate",
            "-j",
            "3",
            "-q",
            "75",
            "-n",
            "-vv",
            "--follow-links",
        ])
        .unwrap();
        assert_eq!(cli.root, None);
        assert_eq!(cli.jobs, 3);
        assert_eq!(cli.quality, 75);
        assert!(cli.dry_run);
        assert!(cli.follow_links);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_quality_out_of_range() {
        assert!(Cli::try_parse_from(["exifrotate", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["exifrotate", "-q", "101"]).is_err());
    }
}
