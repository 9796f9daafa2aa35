//! PNG encoding for finished relief layers.
//!
//! Relief layers carry a continuous color gradient, so they are written as
//! 8-bit RGBA (color type 6) without palette extraction.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use relief_common::tile::CHANNELS;
use relief_common::{RasterTile, ReliefError, ReliefResult};
use std::io::Write;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode a tile as an RGBA PNG.
pub fn encode_tile(tile: &RasterTile) -> ReliefResult<Vec<u8>> {
    create_png(tile.as_bytes(), tile.width(), tile.height())
}

/// Create an RGBA PNG from raw pixel bytes.
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> ReliefResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(ReliefError::Encode(format!(
            "PNG dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            ReliefError::Encode(format!("{}x{} exceeds addressable memory", width, height))
        })?;
    if pixels.len() != expected {
        return Err(ReliefError::InvalidBuffer {
            expected,
            actual: pixels.len(),
        });
    }
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ReliefError::Encode(format!(
                "{}x{} exceeds PNG limits",
                width, height
            )))
        }
    };

    let mut png = Vec::with_capacity(expected / 2 + 64);
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&w.to_be_bytes());
    ihdr_data.extend_from_slice(&h.to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    let idat_data = deflate_idat_rgba(pixels, width, height)
        .map_err(|e| ReliefError::Encode(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    // CRC covers chunk type and data, not the length
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * CHANNELS;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in pixels.chunks_exact(stride) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
