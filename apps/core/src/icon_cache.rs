use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha224};

use crate::logging;

/// Decoded window icon pixels, 8-bit RGBA rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIcon {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RawIcon {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }
}

#[derive(Debug)]
pub enum IconError {
    MissingPixels,
    BadDimensions {
        width: u32,
        height: u32,
        len: usize,
    },
    Io(std::io::Error),
    Encode(image::ImageError),
}

impl Display for IconError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPixels => write!(f, "no icon pixels available"),
            Self::BadDimensions { width, height, len } => {
                write!(f, "bad icon dimensions: {width}x{height} with {len} bytes")
            }
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Encode(error) => write!(f, "encode error: {error}"),
        }
    }
}

impl std::error::Error for IconError {}

impl From<std::io::Error> for IconError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<image::ImageError> for IconError {
    fn from(value: image::ImageError) -> Self {
        Self::Encode(value)
    }
}

/// Cache entries are content-addressed by application name alone, so every
/// window of one application shares a single file.
pub fn cache_file_name(app_name: &str) -> String {
    let digest = Sha224::digest(app_name.as_bytes());
    format!("{}.png", hex::encode(digest))
}

/// Returns a stable on-disk path for the application's icon, encoding the
/// cache entry on first use. An existing entry is reused as-is; it is never
/// re-encoded or invalidated. Any failure falls back to the bundled icon so
/// that one window cannot break listing the rest.
pub fn resolve_icon(
    app_name: &str,
    window_id: u64,
    icon: Option<&RawIcon>,
    cache_dir: &Path,
    fallback_icon: &Path,
) -> PathBuf {
    let candidate = cache_dir.join(cache_file_name(app_name));
    if candidate.is_file() {
        return candidate;
    }

    match write_entry(icon, cache_dir, &candidate) {
        Ok(()) => candidate,
        Err(error) => {
            logging::error(&format!(
                "failed to cache icon for '{app_name}' (window {window_id}): {error}"
            ));
            fallback_icon.to_path_buf()
        }
    }
}

fn write_entry(icon: Option<&RawIcon>, cache_dir: &Path, candidate: &Path) -> Result<(), IconError> {
    let icon = icon.ok_or(IconError::MissingPixels)?;

    let expected = (icon.width as usize)
        .saturating_mul(icon.height as usize)
        .saturating_mul(4);
    if icon.width == 0 || icon.height == 0 || icon.rgba.len() != expected {
        return Err(IconError::BadDimensions {
            width: icon.width,
            height: icon.height,
            len: icon.rgba.len(),
        });
    }

    std::fs::create_dir_all(cache_dir)?;

    let buffer = image::RgbaImage::from_raw(icon.width, icon.height, icon.rgba.clone()).ok_or(
        IconError::BadDimensions {
            width: icon.width,
            height: icon.height,
            len: icon.rgba.len(),
        },
    )?;
    buffer.save_with_format(candidate, image::ImageFormat::Png)?;
    Ok(())
}
