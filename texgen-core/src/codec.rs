//! Conversion between textures and 8-bit image files.
//!
//! Textures are written as their raw premultiplied channels truncated to 8 bits, and read back
//! by bit replication. Nothing is (un)premultiplied on the way through.

use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::{ExtendedColorType, ImageEncoder};

use crate::foundation::error::{TexgenError, TexgenResult};
use crate::raster::pixel::Pixel;
use crate::raster::texture::Texture;

/// On-disk image container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    /// Truecolor PNG with alpha.
    Png,
    /// Uncompressed 32-bit truecolor TGA, top row first.
    Tga,
}

impl ImageFormat {
    /// Pick a format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> TexgenResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("tga") => Ok(Self::Tga),
            _ => Err(TexgenError::codec(format!(
                "cannot infer image format from '{}'",
                path.display()
            ))),
        }
    }

    /// Lowercase file extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Tga => "tga",
        }
    }
}

/// Pack `tex` as RGBA8 rows, keeping the high byte of every channel.
pub fn to_rgba8(tex: &Texture) -> Vec<u8> {
    tex.pixels()
        .iter()
        .flat_map(|p| p.channels().map(|c| (c >> 8) as u8))
        .collect()
}

/// Build a texture from RGBA8 rows. Sizes must be powers of two.
pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> TexgenResult<Texture> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(TexgenError::codec(format!(
            "expected {expected} bytes for {width}x{height} RGBA8, got {}",
            rgba.len()
        )));
    }
    let pixels = rgba
        .chunks_exact(4)
        .map(|px| Pixel::from_rgba8(px[0], px[1], px[2], px[3]))
        .collect();
    Texture::from_pixels(width, height, pixels)
}

const TGA_HEADER_LEN: usize = 18;
const TGA_TRUECOLOR: u8 = 2;
const TGA_BITS_PER_PIXEL: u8 = 32;

// The descriptor byte is always written as 0 and ignored on read: rows are stored top row
// first regardless of the origin bit.
fn encode_tga(tex: &Texture) -> TexgenResult<Vec<u8>> {
    let (Ok(width), Ok(height)) = (u16::try_from(tex.width()), u16::try_from(tex.height())) else {
        return Err(TexgenError::codec(format!(
            "{}x{} does not fit a TGA header",
            tex.width(),
            tex.height()
        )));
    };

    let mut out = Vec::with_capacity(TGA_HEADER_LEN + tex.pixel_count() * 4);
    let mut header = [0u8; TGA_HEADER_LEN];
    header[2] = TGA_TRUECOLOR;
    header[12..14].copy_from_slice(&width.to_le_bytes());
    header[14..16].copy_from_slice(&height.to_le_bytes());
    header[16] = TGA_BITS_PER_PIXEL;
    out.extend_from_slice(&header);

    for p in tex.pixels() {
        let [r, g, b, a] = p.channels().map(|c| (c >> 8) as u8);
        out.extend_from_slice(&[b, g, r, a]);
    }
    Ok(out)
}

fn decode_tga(bytes: &[u8]) -> TexgenResult<Texture> {
    let Some(header) = bytes.get(..TGA_HEADER_LEN) else {
        return Err(TexgenError::codec(format!(
            "TGA needs an {TGA_HEADER_LEN}-byte header, got {} bytes",
            bytes.len()
        )));
    };
    if header[1] != 0 || header[2] != TGA_TRUECOLOR {
        return Err(TexgenError::codec(format!(
            "unsupported TGA image type {} (color map {}); only uncompressed truecolor is read",
            header[2], header[1]
        )));
    }
    if header[16] != TGA_BITS_PER_PIXEL {
        return Err(TexgenError::codec(format!(
            "unsupported TGA pixel depth {}",
            header[16]
        )));
    }

    let width = u32::from(u16::from_le_bytes([header[12], header[13]]));
    let height = u32::from(u16::from_le_bytes([header[14], header[15]]));
    let start = TGA_HEADER_LEN + usize::from(header[0]);
    let len = width as usize * height as usize * 4;
    let Some(body) = bytes.get(start..start + len) else {
        return Err(TexgenError::codec(format!(
            "TGA body truncated: {width}x{height} needs {len} bytes after the header"
        )));
    };

    let rgba: Vec<u8> = body
        .chunks_exact(4)
        .flat_map(|bgra| [bgra[2], bgra[1], bgra[0], bgra[3]])
        .collect();
    from_rgba8(width, height, &rgba)
}

/// Serialize `tex` in `format`.
#[tracing::instrument(skip(tex), fields(w = tex.width(), h = tex.height()))]
pub fn encode(tex: &Texture, format: ImageFormat) -> TexgenResult<Vec<u8>> {
    match format {
        ImageFormat::Png => {
            let rgba = to_rgba8(tex);
            let mut out = Vec::new();
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(&rgba, tex.width(), tex.height(), ExtendedColorType::Rgba8)
                .map_err(|e| TexgenError::codec(format!("encode {format:?}: {e}")))?;
            Ok(out)
        }
        ImageFormat::Tga => encode_tga(tex),
    }
}

/// Parse an image of `format`. Sizes must be powers of two.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8], format: ImageFormat) -> TexgenResult<Texture> {
    match format {
        ImageFormat::Png => {
            let img = image::ImageReader::with_format(Cursor::new(bytes), image::ImageFormat::Png)
                .decode()
                .map_err(|e| TexgenError::codec(format!("decode {format:?}: {e}")))?;
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            from_rgba8(width, height, rgba.as_raw())
        }
        ImageFormat::Tga => decode_tga(bytes),
    }
}

/// Write `tex` to `path`, choosing the format from the extension.
pub fn save(tex: &Texture, path: &Path) -> TexgenResult<()> {
    let bytes = encode(tex, ImageFormat::from_path(path)?)?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Read a texture from `path`, choosing the format from the extension.
pub fn load(path: &Path) -> TexgenResult<Texture> {
    let format = ImageFormat::from_path(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    decode(&bytes, format)
}

#[cfg(test)]
#[path = "../tests/unit/codec.rs"]
mod tests;
