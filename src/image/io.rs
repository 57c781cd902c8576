//! Disk I/O for frames and JSON reports.
//!
//! - `load_rgb_image`: decode a JPEG/PNG/etc. into an `RgbFrame`.
//! - `save_rgb_image` / `save_gray_image`: encode a frame, format by extension.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::frame::{GrayFrame, RgbFrame};
use super::traits::ImageView;
use crate::error::{LaneError, Result};
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbFrame> {
    let img = image::open(path)
        .map_err(|source| LaneError::ImageOpen {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    RgbFrame::from_raw(w, h, img.into_raw())
}

pub fn save_rgb_image(frame: &RgbFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let img = RgbImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.as_bytes().to_vec(),
    )
    .ok_or(LaneError::BufferSize {
        len: frame.as_bytes().len(),
        width: frame.width(),
        height: frame.height(),
        channels: 3,
    })?;
    img.save(path).map_err(|source| LaneError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_gray_image(frame: &GrayFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let img = GrayImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.as_bytes().to_vec(),
    )
    .ok_or(LaneError::BufferSize {
        len: frame.as_bytes().len(),
        width: frame.width(),
        height: frame.height(),
        channels: 1,
    })?;
    img.save(path).map_err(|source| LaneError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| LaneError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| LaneError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| LaneError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
