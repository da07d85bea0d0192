use super::*;

const GRAY: Rgba8 = [100, 150, 200, 255];

#[test]
fn opacity_0_is_noop_for_every_mode() {
    for mode in [
        CompositeMode::Normal,
        CompositeMode::Multiply,
        CompositeMode::Screen,
        CompositeMode::Difference,
        CompositeMode::Saturation,
        CompositeMode::Color,
        CompositeMode::DestinationOut,
    ] {
        assert_eq!(blend_pixel(GRAY, [0, 0, 0, 255], mode, 0.0), GRAY, "{mode:?}");
    }
}

#[test]
fn normal_opaque_replaces_dst() {
    assert_eq!(
        blend_pixel(GRAY, [1, 2, 3, 255], CompositeMode::Normal, 1.0),
        [1, 2, 3, 255]
    );
}

#[test]
fn copy_replaces_alpha_too() {
    assert_eq!(
        blend_pixel(GRAY, [9, 9, 9, 10], CompositeMode::Copy, 1.0),
        [9, 9, 9, 10]
    );
}

#[test]
fn difference_with_white_inverts() {
    assert_eq!(
        blend_pixel(GRAY, [255, 255, 255, 255], CompositeMode::Difference, 1.0),
        [155, 105, 55, 255]
    );
}

#[test]
fn multiply_with_black_at_40_percent_scales_down() {
    let out = blend_pixel(GRAY, [0, 0, 0, 255], CompositeMode::Multiply, 0.4);
    assert_eq!(out, [60, 90, 120, 255]);
}

#[test]
fn screen_with_white_at_40_percent_moves_toward_white() {
    let out = blend_pixel([0, 100, 255, 255], [255, 255, 255, 255], CompositeMode::Screen, 0.4);
    assert_eq!(out, [102, 162, 255, 255]);
}

#[test]
fn saturation_with_white_produces_gray() {
    let out = blend_pixel([200, 40, 40, 255], [255, 255, 255, 255], CompositeMode::Saturation, 1.0);
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
    assert_eq!(out[3], 255);
}

#[test]
fn color_keeps_backdrop_luminosity() {
    let base = [128, 128, 128, 255];
    let out = blend_pixel(base, [255, 0, 0, 255], CompositeMode::Color, 1.0);
    assert!(out[0] > out[1] && out[0] > out[2]);
    let l_out = 0.3 * f32::from(out[0]) + 0.59 * f32::from(out[1]) + 0.11 * f32::from(out[2]);
    assert!((l_out - 128.0).abs() <= 2.0, "luminosity drifted to {l_out}");
}

#[test]
fn destination_out_clears_alpha() {
    assert_eq!(
        blend_pixel(GRAY, [0, 0, 0, 255], CompositeMode::DestinationOut, 1.0),
        [0, 0, 0, 0]
    );
    let half = blend_pixel(GRAY, [0, 0, 0, 255], CompositeMode::DestinationOut, 0.5);
    assert_eq!(half, [100, 150, 200, 128]);
}

#[test]
fn normal_over_transparent_returns_source_color() {
    let out = blend_pixel([0, 0, 0, 0], [10, 20, 30, 128], CompositeMode::Normal, 1.0);
    assert_eq!(out, [10, 20, 30, 128]);
}
