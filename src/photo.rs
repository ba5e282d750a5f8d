//! Photo loading and decoding.
//!
//! Card photos arrive as data URIs, local file paths, or raw base64. JPEG
//! sources keep their original bytes (print backends embed DCT data
//! directly); PNG sources decode to RGBA pixels. Remote URLs are left to
//! the host — this crate performs no fetching.
//!
//! The product rule "if the photo fails to load, show the placeholder" is
//! an error-recovery contract here, not a default: [`load_or_placeholder`]
//! is the one place the substitution happens, and it logs when it does.

use std::io::Cursor;

use log::warn;

use crate::error::PlacardError;
use crate::model::Role;
use crate::ComposerConfig;

/// A decoded photo ready for a print backend.
#[derive(Debug, Clone)]
pub struct LoadedPhoto {
    pub data: PhotoData,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone)]
pub enum PhotoData {
    /// Raw JPEG bytes, passed through undecoded.
    Jpeg(Vec<u8>),
    /// Decoded RGBA pixels (width * height * 4 bytes).
    Rgba(Vec<u8>),
}

/// How a photo source resolved.
#[derive(Debug, Clone)]
pub enum PhotoResolution {
    /// Decoded locally.
    Loaded(LoadedPhoto),
    /// A remote URL the host must fetch; passed through untouched.
    Remote(String),
    /// The source failed to load; the role placeholder substitutes.
    Placeholder(String),
}

/// Load a photo from a source string: a `data:image/...` URI, a file path,
/// or raw base64-encoded image data.
pub fn load(src: &str) -> Result<LoadedPhoto, PlacardError> {
    let raw_bytes = read_source_bytes(src)?;
    decode_photo_bytes(&raw_bytes)
}

/// The explicit "on load failure, substitute" contract. Remote URLs pass
/// through for the host to fetch; everything else decodes here, and any
/// failure swaps in the role-specific placeholder.
pub fn load_or_placeholder(src: &str, role: Role, config: &ComposerConfig) -> PhotoResolution {
    if src.starts_with("http") {
        return PhotoResolution::Remote(src.to_string());
    }
    match load(src) {
        Ok(photo) => PhotoResolution::Loaded(photo),
        Err(e) => {
            warn!("photo source failed to load, substituting placeholder: {e}");
            PhotoResolution::Placeholder(config.placeholder_for(role).to_string())
        }
    }
}

/// Resolve the source string to raw image bytes.
fn read_source_bytes(src: &str) -> Result<Vec<u8>, PlacardError> {
    if src.is_empty() {
        return Err(PlacardError::Photo("empty photo source".to_string()));
    }

    // Data URI: data:image/png;base64,iVBOR...
    if src.starts_with("data:image/") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| PlacardError::Photo("invalid data URI: missing comma".to_string()))?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    // Only explicit path prefixes read from disk, so base64 payloads
    // (which contain '/') aren't mistaken for paths.
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return std::fs::read(src)
            .map_err(|e| PlacardError::Photo(format!("failed to read photo file '{src}': {e}")));
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, PlacardError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input)
        .map_err(|e| PlacardError::Photo(format!("base64 decode error: {e}")))
}

/// Detect the format from magic bytes and decode accordingly.
fn decode_photo_bytes(data: &[u8]) -> Result<LoadedPhoto, PlacardError> {
    if data.len() < 4 {
        return Err(PlacardError::Photo("photo data too short".to_string()));
    }

    if is_jpeg(data) {
        decode_jpeg(data)
    } else if is_png(data) {
        decode_png(data)
    } else {
        Err(PlacardError::Photo(
            "unsupported photo format (expected JPEG or PNG)".to_string(),
        ))
    }
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

fn is_png(data: &[u8]) -> bool {
    data.len() >= 4 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47
}

/// JPEG: read dimensions only, keep the original bytes.
fn decode_jpeg(data: &[u8]) -> Result<LoadedPhoto, PlacardError> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| PlacardError::Photo(format!("JPEG format detection error: {e}")))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| PlacardError::Photo(format!("failed to read JPEG dimensions: {e}")))?;

    Ok(LoadedPhoto {
        data: PhotoData::Jpeg(data.to_vec()),
        width_px: width,
        height_px: height,
    })
}

/// PNG: decode to RGBA pixels.
fn decode_png(data: &[u8]) -> Result<LoadedPhoto, PlacardError> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| PlacardError::Photo(format!("PNG format detection error: {e}")))?;

    let img = reader
        .decode()
        .map_err(|e| PlacardError::Photo(format!("failed to decode PNG: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());

    Ok(LoadedPhoto {
        data: PhotoData::Rgba(rgba.into_raw()),
        width_px: width,
        height_px: height,
    })
}
