//! RGBA raster tiles.
//!
//! A tile is a row-major buffer of 8-bit RGBA samples. Pixel (x, y) lives at
//! byte offset `4 * (y * width + x)`.

use crate::{ReliefError, ReliefResult};
use serde::{Deserialize, Serialize};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the value NO_DATA renders as.
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Read a pixel from the first four bytes of `px`.
    #[inline]
    pub fn from_slice(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// An owned RGBA raster of known dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterTile {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterTile {
    /// Wrap an RGBA byte buffer, checking that it holds exactly
    /// `4 * width * height` bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> ReliefResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(ReliefError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// A tile where every pixel is transparent black.
    pub fn transparent(width: usize, height: usize) -> ReliefResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Build a tile from row-major pixels.
    pub fn from_pixels(width: usize, height: usize, pixels: &[Rgba]) -> ReliefResult<Self> {
        let data: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at (x, y), or `None` outside the tile.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * CHANNELS;
        Some(Rgba::from_slice(&self.data[offset..offset + CHANNELS]))
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data.chunks_exact(CHANNELS).map(Rgba::from_slice)
    }

    /// Fail fast when `other` does not have this tile's dimensions.
    pub fn ensure_same_shape(&self, other: &RasterTile) -> ReliefResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(ReliefError::ShapeMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}

fn byte_len(width: usize, height: usize) -> ReliefResult<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            ReliefError::invalid_parameter("dimensions", format!("{}x{} overflows", width, height))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = RasterTile::new(2, 2, vec![0u8; 15]).unwrap_err();
        assert_eq!(
            err,
            ReliefError::InvalidBuffer {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_pixel_addressing() {
        let pixels = [
            Rgba::opaque(1, 0, 0),
            Rgba::opaque(2, 0, 0),
            Rgba::opaque(3, 0, 0),
            Rgba::opaque(4, 0, 0),
            Rgba::opaque(5, 0, 0),
            Rgba::opaque(6, 0, 0),
        ];
        let tile = RasterTile::from_pixels(3, 2, &pixels).unwrap();
        assert_eq!(tile.pixel(0, 0).unwrap().r, 1);
        assert_eq!(tile.pixel(2, 0).unwrap().r, 3);
        assert_eq!(tile.pixel(1, 1).unwrap().r, 5);
        assert!(tile.pixel(3, 0).is_none());
        assert!(tile.pixel(0, 2).is_none());
    }

    #[test]
    fn test_empty_tile_is_valid() {
        let tile = RasterTile::transparent(0, 0).unwrap();
        assert_eq!(tile.pixel_count(), 0);
        assert!(tile.as_bytes().is_empty());
    }

    #[test]
    fn test_ensure_same_shape() {
        let a = RasterTile::transparent(4, 4).unwrap();
        let b = RasterTile::transparent(4, 2).unwrap();
        assert!(a.ensure_same_shape(&a.clone()).is_ok());
        assert!(matches!(
            a.ensure_same_shape(&b),
            Err(ReliefError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_transparent_constant() {
        assert!(Rgba::TRANSPARENT.is_transparent());
        assert_eq!(Rgba::TRANSPARENT.to_bytes(), [0, 0, 0, 0]);
    }
}
