//! # EXIF 方向
//!
//! 读取 EXIF 中的 Orientation 标签，并对像素数据应用相应的旋转/翻转。
//!
//! ## 依赖关系
//! - 被 `imaging/handle.rs` 调用
//! - 使用 `kamadak-exif` 解析 EXIF，`image` 变换像素

use exif::{In, Tag};
use image::DynamicImage;

/// JPEG APP1 段中 EXIF 数据前的标识
const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// EXIF 方向值 (1..=8)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation(u8);

impl Orientation {
    /// 无需变换的方向
    pub const UPRIGHT: Orientation = Orientation(1);

    /// 从原始 EXIF 值构造，超出 1..=8 返回 `None`
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1..=8 => Some(Orientation(value as u8)),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// 是否需要变换像素
    pub fn needs_transform(self) -> bool {
        self != Self::UPRIGHT
    }

    /// 对图像应用该方向对应的变换
    ///
    /// 方向定义参考:
    /// https://web.archive.org/web/20200412005226/https://www.impulseadventure.com/photo/exif-orientation.html
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self.0 {
            2 => image.fliph(),
            3 => image.rotate180(),
            4 => image.flipv(),
            5 => image.rotate90().fliph(),
            6 => image.rotate90(),
            7 => image.rotate270().fliph(),
            8 => image.rotate270(),
            _ => image.clone(),
        }
    }
}

/// 读取方向时的错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrientationError {
    /// EXIF 块无法解析
    Corrupt(String),
    /// Orientation 标签的值不在 1..=8
    OutOfRange(u32),
}

/// 从原始 EXIF 块读取主 IFD 的方向
///
/// 没有 Orientation 标签时返回 `Ok(None)`。
pub fn read_orientation(raw_exif: &[u8]) -> Result<Option<Orientation>, OrientationError> {
    let raw = raw_exif.strip_prefix(EXIF_HEADER).unwrap_or(raw_exif);

    let exif = exif::Reader::new()
        .read_raw(raw.to_vec())
        .map_err(|e| OrientationError::Corrupt(e.to_string()))?;

    let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) else {
        return Ok(None);
    };

    match field.value.get_uint(0) {
        Some(value) => Orientation::from_exif(value)
            .map(Some)
            .ok_or(OrientationError::OutOfRange(value)),
        None => Err(OrientationError::Corrupt(
            "orientation tag has no integer value".to_string(),
        )),
    }
}
