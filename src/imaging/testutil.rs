//! 测试用图像生成工具

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// 生成带渐变的 RGB 图像
fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 40) as u8, (y * 40) as u8, 128])
    })
}

/// 构造只含一个 IFD 的小端 TIFF 数据
///
/// `orientation` 为 `None` 时写入 ImageWidth 标签代替。
pub fn exif_tiff(orientation: Option<u16>) -> Vec<u8> {
    let (tag, value) = match orientation {
        Some(v) => (0x0112u16, v),
        None => (0x0100u16, 4),
    };

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    // IFD0: 1 个条目
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&tag.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&value.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    // 无后续 IFD
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff
}

/// 把 APP1 段插入到 JPEG 的 SOI 标记之后
fn insert_app1(jpeg: Vec<u8>, payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() + 2) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, 95);
    gradient(width, height).write_with_encoder(encoder).unwrap();
    bytes
}

/// 生成 JPEG，可选附带 EXIF 方向
pub fn jpeg_bytes(width: u32, height: u32, orientation: Option<u16>) -> Vec<u8> {
    let jpeg = encode_jpeg(width, height);
    match orientation {
        Some(_) => {
            let mut payload = b"Exif\0\0".to_vec();
            payload.extend_from_slice(&exif_tiff(orientation));
            insert_app1(jpeg, &payload)
        }
        None => jpeg,
    }
}

/// 生成 EXIF 块无法解析的 JPEG
pub fn jpeg_with_corrupt_exif(width: u32, height: u32) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(b"XX\x00\x2Anot a tiff structure at all");
    insert_app1(encode_jpeg(width, height), &payload)
}

/// 手工构造未压缩的 8 位 RGB TIFF，可选附带 Orientation 标签
pub fn tiff_bytes(width: u16, height: u16, orientation: Option<u16>) -> Vec<u8> {
    const SHORT: u16 = 3;
    const LONG: u16 = 4;

    let pixel_len = u32::from(width) * u32::from(height) * 3;
    let mut entries: Vec<(u16, u16, u32, u32)> = vec![
        (256, SHORT, 1, u32::from(width)),
        (257, SHORT, 1, u32::from(height)),
        (258, SHORT, 3, 0), // BitsPerSample，偏移稍后填写
        (259, SHORT, 1, 1),
        (262, SHORT, 1, 2),
        (273, LONG, 1, 0), // StripOffsets，偏移稍后填写
        (277, SHORT, 1, 3),
        (278, SHORT, 1, u32::from(height)),
        (279, LONG, 1, pixel_len),
        (284, SHORT, 1, 1),
    ];
    if let Some(value) = orientation {
        entries.push((274, SHORT, 1, u32::from(value)));
        entries.sort_by_key(|entry| entry.0);
    }

    let ifd_len = 2 + entries.len() as u32 * 12 + 4;
    let bits_offset = 8 + ifd_len;
    let pixels_offset = bits_offset + 6;
    for entry in &mut entries {
        match entry.0 {
            258 => entry.3 = bits_offset,
            273 => entry.3 = pixels_offset,
            _ => {}
        }
    }

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, kind, count, value) in &entries {
        tiff.extend_from_slice(&tag.to_le_bytes());
        tiff.extend_from_slice(&kind.to_le_bytes());
        tiff.extend_from_slice(&count.to_le_bytes());
        if *kind == SHORT && *count == 1 {
            tiff.extend_from_slice(&(*value as u16).to_le_bytes());
            tiff.extend_from_slice(&[0, 0]);
        } else {
            tiff.extend_from_slice(&value.to_le_bytes());
        }
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());
    for _ in 0..3 {
        tiff.extend_from_slice(&8u16.to_le_bytes());
    }
    tiff.extend_from_slice(gradient(u32::from(width), u32::from(height)).as_raw());
    tiff
}

/// 写入 PNG 文件
pub fn write_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}
