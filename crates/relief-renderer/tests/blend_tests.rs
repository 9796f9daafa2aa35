//! Tests for multiply compositing.

use relief_renderer::{blend_multiply, RasterTile, ReliefError, Rgba};
use test_utils::create_random_rgba;

fn solid(width: usize, height: usize, px: Rgba) -> RasterTile {
    RasterTile::from_pixels(width, height, &vec![px; width * height]).unwrap()
}

// ============================================================================
// Pass-through rules
// ============================================================================

#[test]
fn test_transparent_overlay_is_identity() {
    let base = create_random_rgba(16, 9, 3);
    let overlay = RasterTile::transparent(16, 9).unwrap();
    assert_eq!(blend_multiply(&base, &overlay).unwrap(), base);
}

#[test]
fn test_transparent_base_passes_through() {
    let base = RasterTile::transparent(4, 4).unwrap();
    let overlay = solid(4, 4, Rgba::opaque(10, 20, 30));
    let out = blend_multiply(&base, &overlay).unwrap();
    assert!(out.pixels().all(|px| px.is_transparent()));
}

#[test]
fn test_white_overlay_is_identity() {
    let base = solid(2, 2, Rgba::new(200, 100, 50, 255));
    let overlay = solid(2, 2, Rgba::new(255, 255, 255, 255));
    let out = blend_multiply(&base, &overlay).unwrap();
    assert!(out.pixels().all(|px| px == Rgba::new(200, 100, 50, 255)));
}

#[test]
fn test_black_overlay_zeroes_color() {
    let base = create_random_rgba(8, 8, 11);
    let overlay = solid(8, 8, Rgba::opaque(0, 0, 0));
    let out = blend_multiply(&base, &overlay).unwrap();
    assert!(out.pixels().all(|px| px == Rgba::opaque(0, 0, 0)));
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_multiply_rounds_to_nearest() {
    let base = solid(1, 1, Rgba::opaque(128, 200, 255));
    let overlay = solid(1, 1, Rgba::opaque(128, 100, 1));
    let px = blend_multiply(&base, &overlay).unwrap().pixel(0, 0).unwrap();
    // 128*128/255 = 64.25, 200*100/255 = 78.43, 255*1/255 = 1
    assert_eq!(px, Rgba::opaque(64, 78, 1));
}

#[test]
fn test_partial_alpha_blends_to_opaque() {
    let base = solid(1, 1, Rgba::new(100, 100, 100, 10));
    let overlay = solid(1, 1, Rgba::new(255, 255, 255, 1));
    let px = blend_multiply(&base, &overlay).unwrap().pixel(0, 0).unwrap();
    assert_eq!(px, Rgba::new(100, 100, 100, 255));
}

#[test]
fn test_blend_never_brightens() {
    let base = create_random_rgba(32, 32, 1);
    let overlay = create_random_rgba(32, 32, 2);
    let out = blend_multiply(&base, &overlay).unwrap();
    for (b, o) in base.pixels().zip(out.pixels()) {
        assert!(o.r <= b.r && o.g <= b.g && o.b <= b.b);
    }
}

#[test]
fn test_large_tile_matches_small_tile_rule() {
    // 128x128 takes the parallel path; a 1x1 slice of it must agree.
    let base = create_random_rgba(128, 128, 5);
    let overlay = create_random_rgba(128, 128, 6);
    let out = blend_multiply(&base, &overlay).unwrap();

    let (x, y) = (77, 31);
    let single = blend_multiply(
        &solid(1, 1, base.pixel(x, y).unwrap()),
        &solid(1, 1, overlay.pixel(x, y).unwrap()),
    )
    .unwrap();
    assert_eq!(out.pixel(x, y), single.pixel(0, 0));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_shape_mismatch_rejected() {
    let base = RasterTile::transparent(4, 4).unwrap();
    let overlay = RasterTile::transparent(4, 5).unwrap();
    assert_eq!(
        blend_multiply(&base, &overlay),
        Err(ReliefError::ShapeMismatch {
            expected: (4, 4),
            actual: (4, 5),
        })
    );
}

#[test]
fn test_transposed_shape_rejected() {
    let base = RasterTile::transparent(2, 8).unwrap();
    let overlay = RasterTile::transparent(8, 2).unwrap();
    assert!(matches!(
        blend_multiply(&base, &overlay),
        Err(ReliefError::ShapeMismatch { .. })
    ));
}
