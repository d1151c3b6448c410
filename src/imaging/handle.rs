//! # 图像句柄
//!
//! 对外部图像库的封装：打开、方向归一化、保存。
//!
//! ## 功能
//! - 按内容识别格式并解码
//! - 读取 EXIF 方向，应用到像素并清除标签
//! - 以原格式重新编码，通过临时文件原子替换原图
//!
//! ## 依赖关系
//! - 被 `commands/rotate.rs` 通过 `rotate_file` 调用
//! - 使用 `imaging/orientation.rs`
//! - 使用 `image`、`tempfile`

use super::orientation::{self, Orientation, OrientationError};
use crate::error::{ExifRotateError, Result};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::fs;
use std::io::BufWriter;
use std::path::Path;

/// 单个文件的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// 像素已变换并写回
    Rotated(u8),
    /// 需要变换但处于试运行模式，未写回
    WouldRotate(u8),
    /// 无需变换，文件未被改动
    Unchanged,
}

/// 重新编码选项
#[derive(Debug, Clone, Copy)]
pub struct SaveOptions {
    /// JPEG 质量 (1..=100)
    pub jpeg_quality: u8,
    /// 只检查，不写回
    pub dry_run: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            dry_run: false,
        }
    }
}

/// 已打开的图像
pub struct ImageHandle {
    pixels: DynamicImage,
    format: ImageFormat,
    orientation: Option<Orientation>,
}

impl ImageHandle {
    /// 打开并解码图像
    ///
    /// EXIF 块损坏或方向值非法时返回错误。
    pub fn open(path: &Path) -> Result<Self> {
        let decode_err = |source| ExifRotateError::DecodeError {
            path: path.display().to_string(),
            source,
        };

        let reader = ImageReader::open(path)
            .map_err(|e| ExifRotateError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?
            .with_guessed_format()
            .map_err(|e| ExifRotateError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;

        let format = reader
            .format()
            .ok_or_else(|| ExifRotateError::UnknownFormat {
                path: path.display().to_string(),
            })?;

        let mut decoder = reader.into_decoder().map_err(decode_err)?;

        // EXIF 块（JPEG/PNG/WebP）先用 kamadak-exif 校验，损坏或非法值直接报错
        let from_exif = match decoder.exif_metadata().map_err(decode_err)? {
            Some(raw) => orientation::read_orientation(&raw).map_err(|e| match e {
                OrientationError::Corrupt(reason) => ExifRotateError::ExifError {
                    path: path.display().to_string(),
                    reason,
                },
                OrientationError::OutOfRange(value) => ExifRotateError::InvalidOrientation {
                    path: path.display().to_string(),
                    value,
                },
            })?,
            None => None,
        };

        // TIFF 的方向是 IFD 标签而不是 EXIF 块，交给解码器读取
        let orientation = match from_exif {
            Some(orientation) => Some(orientation),
            None => {
                let tagged = decoder.orientation().map_err(decode_err)?;
                Orientation::from_exif(u32::from(tagged.to_exif()))
            }
        };

        let pixels = DynamicImage::from_decoder(decoder).map_err(decode_err)?;

        Ok(Self {
            pixels,
            format,
            orientation,
        })
    }

    /// 识别出的格式
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// 当前仍待应用的方向
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    #[cfg(test)]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    /// 是否需要变换
    #[cfg(test)]
    pub fn needs_transform(&self) -> bool {
        self.orientation.is_some_and(Orientation::needs_transform)
    }

    /// 应用 EXIF 方向并清除标签
    ///
    /// 返回像素是否发生变化。重复调用不再变换。
    pub fn normalize_orientation(&mut self) -> bool {
        let Some(orientation) = self.orientation.take() else {
            return false;
        };
        if !orientation.needs_transform() {
            return false;
        }

        self.pixels = orientation.apply(&self.pixels);
        true
    }

    /// 以原格式写回 `path`，覆盖已有文件
    ///
    /// 先写入同目录下的临时文件再重命名，失败时原文件保持不变。
    /// 编码器不写 EXIF，因此方向标签随之清除。
    pub fn save(&self, path: &Path, jpeg_quality: u8) -> Result<()> {
        let write_err = |source| ExifRotateError::FileWriteError {
            path: path.display().to_string(),
            source,
        };
        let encode_err = |source| ExifRotateError::EncodeError {
            path: path.display().to_string(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(path).map_err(write_err)?.permissions();

        let tmp = tempfile::Builder::new()
            .prefix(".exifrotate-")
            .tempfile_in(dir)
            .map_err(write_err)?;

        {
            let mut writer = BufWriter::new(tmp.as_file());
            match self.format {
                ImageFormat::Jpeg => {
                    let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
                    self.pixels.write_with_encoder(encoder).map_err(encode_err)?;
                }
                format => self
                    .pixels
                    .write_to(&mut writer, format)
                    .map_err(encode_err)?,
            }
            std::io::Write::flush(&mut writer).map_err(write_err)?;
        }

        fs::set_permissions(tmp.path(), permissions).map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// 对单个文件执行完整的旋转流程
///
/// 无需变换的文件不会被重写，保持逐字节不变。
pub fn rotate_file(path: &Path, options: &SaveOptions) -> Result<RotateOutcome> {
    let mut handle = ImageHandle::open(path)?;

    let Some(orientation) = handle.orientation().filter(|o| o.needs_transform()) else {
        return Ok(RotateOutcome::Unchanged);
    };
    tracing::debug!(
        path = %path.display(),
        format = ?handle.format(),
        orientation = orientation.value(),
        "orientation needs transform"
    );

    if options.dry_run {
        return Ok(RotateOutcome::WouldRotate(orientation.value()));
    }

    handle.normalize_orientation();
    handle.save(path, options.jpeg_quality)?;
    Ok(RotateOutcome::Rotated(orientation.value()))
}
