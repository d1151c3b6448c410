//! # 内容类型探测
//!
//! 按文件内容（魔数）而不是扩展名判断是否为图像。
//!
//! ## 依赖关系
//! - 被 `batch/scanner.rs` 调用
//! - 使用 `image::guess_format` 识别格式

use image::ImageFormat;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// 读取的文件头字节数，足以覆盖所有支持格式的魔数
const SNIFF_LEN: u64 = 64;

/// 探测文件的 MIME 类型
///
/// 无法识别的内容返回 `Ok(None)`，读取失败返回 `Err`。
pub fn sniff_content_type(path: &Path) -> io::Result<Option<&'static str>> {
    Ok(sniff_format(path)?.map(|format| format.to_mime_type()))
}

/// 探测文件的图像格式
pub fn sniff_format(path: &Path) -> io::Result<Option<ImageFormat>> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(image::guess_format(&header).ok())
}

/// 判断路径是否为图像
///
/// 仅当类型可解析且顶级类别为 `image` 时返回 `true`。
/// 探测失败只记录日志，按非图像处理。
pub fn is_image(path: &Path) -> bool {
    match sniff_content_type(path) {
        Ok(Some(mime)) => top_level_type(mime) == "image",
        Ok(None) => {
            tracing::debug!(path = %path.display(), "content type not recognised");
            false
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to probe content type");
            false
        }
    }
}

fn top_level_type(mime: &str) -> &str {
    mime.split('/').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::testutil;

    #[test]
    fn test_top_level_type() {
        assert_eq!(top_level_type("image/jpeg"), "image");
        assert_eq!(top_level_type("text/plain"), "text");
        assert_eq!(top_level_type(""), "");
    }

    #[test]
    fn test_sniff_by_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();

        // JPEG 数据但扩展名为 .txt
        let disguised = dir.path().join("photo.txt");
        std::fs::write(&disguised, testutil::jpeg_bytes(4, 2, None)).unwrap();
        assert_eq!(sniff_content_type(&disguised).unwrap(), Some("image/jpeg"));
        assert!(is_image(&disguised));

        // 文本数据但扩展名为 .jpg
        let fake = dir.path().join("notes.jpg");
        std::fs::write(&fake, b"just some text, not a picture").unwrap();
        assert_eq!(sniff_content_type(&fake).unwrap(), None);
        assert!(!is_image(&fake));
    }

    #[test]
    fn test_png_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        testutil::write_png(&path, 3, 3);
        assert_eq!(sniff_content_type(&path).unwrap(), Some("image/png"));
    }

    #[test]
    fn test_empty_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(!is_image(&empty));

        let missing = dir.path().join("missing.jpg");
        assert!(sniff_content_type(&missing).is_err());
        assert!(!is_image(&missing));
    }
}
