//! Alpha-aware multiply compositing.
//!
//! The overlay can only darken or tint the base. Where either layer is fully
//! transparent the base pixel passes through untouched, so the overlay never
//! adds coverage.

use rayon::prelude::*;
use relief_common::tile::CHANNELS;
use relief_common::{RasterTile, ReliefResult};

/// Minimum pixels to benefit from parallel blending
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// Multiply-blend `overlay` onto `base`.
///
/// Both tiles must have the same dimensions; a mismatch is rejected before
/// any output is produced.
pub fn blend_multiply(base: &RasterTile, overlay: &RasterTile) -> ReliefResult<RasterTile> {
    base.ensure_same_shape(overlay)?;

    let mut out = base.as_bytes().to_vec();
    if base.pixel_count() >= PARALLEL_THRESHOLD {
        out.par_chunks_exact_mut(CHANNELS)
            .zip(overlay.as_bytes().par_chunks_exact(CHANNELS))
            .for_each(|(px, over)| multiply_pixel(px, over));
    } else {
        out.chunks_exact_mut(CHANNELS)
            .zip(overlay.as_bytes().chunks_exact(CHANNELS))
            .for_each(|(px, over)| multiply_pixel(px, over));
    }

    RasterTile::new(base.width(), base.height(), out)
}

/// Blend one overlay pixel into a base pixel in place.
#[inline(always)]
fn multiply_pixel(px: &mut [u8], over: &[u8]) {
    if px[3] == 0 || over[3] == 0 {
        return;
    }
    for c in 0..3 {
        px[c] = multiply_channel(px[c], over[c]);
    }
    px[3] = 255;
}

/// `base * overlay / 255`, rounded to nearest.
#[inline(always)]
fn multiply_channel(base: u8, overlay: u8) -> u8 {
    ((base as u32 * overlay as u32 + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_common::Rgba;

    #[test]
    fn test_multiply_channel_extremes() {
        assert_eq!(multiply_channel(0, 255), 0);
        assert_eq!(multiply_channel(255, 255), 255);
        assert_eq!(multiply_channel(200, 255), 200);
        assert_eq!(multiply_channel(255, 0), 0);
    }

    #[test]
    fn test_multiply_channel_rounds() {
        // 128 * 128 / 255 = 64.25
        assert_eq!(multiply_channel(128, 128), 64);
        // 100 * 200 / 255 = 78.43
        assert_eq!(multiply_channel(100, 200), 78);
        // 3 * 85 / 255 = 1.0 exactly
        assert_eq!(multiply_channel(3, 85), 1);
    }

    #[test]
    fn test_translucent_base_becomes_opaque() {
        let base = RasterTile::from_pixels(1, 1, &[Rgba::new(100, 100, 100, 40)]).unwrap();
        let over = RasterTile::from_pixels(1, 1, &[Rgba::new(255, 255, 255, 10)]).unwrap();
        let out = blend_multiply(&base, &over).unwrap();
        assert_eq!(out.pixel(0, 0), Some(Rgba::opaque(100, 100, 100)));
    }
}
