use super::*;

fn noisy(w: u32, h: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(w, h);
    let mut seed = 0x2545_f491_u32;
    for y in 0..h {
        for x in 0..w {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let b = seed.to_le_bytes();
            buf.put(x, y, [b[0], b[1], b[2], b[3] | 1]);
        }
    }
    buf
}

fn one(px: [u8; 4], filters: FilterSettings) -> [u8; 4] {
    let src = PixelBuffer::filled(1, 1, px);
    bake_filters(&src, &filters).unwrap().get(0, 0)
}

#[test]
fn identity_settings_reproduce_input_exactly() {
    let src = noisy(37, 23);
    let out = bake_filters(&src, &FilterSettings::default()).unwrap();
    assert!(FilterSettings::default().is_identity());
    assert_eq!(out, src);
}

#[test]
fn brightness_scales_channels() {
    let f = FilterSettings {
        brightness: 50.0,
        ..FilterSettings::default()
    };
    assert_eq!(one([200, 100, 50, 255], f), [100, 50, 25, 255]);
}

#[test]
fn zero_contrast_is_mid_gray() {
    let f = FilterSettings {
        contrast: 0.0,
        ..FilterSettings::default()
    };
    assert_eq!(one([3, 90, 250, 77], f), [128, 128, 128, 77]);
}

#[test]
fn full_invert_and_grayscale() {
    let inv = FilterSettings {
        invert: 100.0,
        ..FilterSettings::default()
    };
    assert_eq!(one([10, 20, 30, 255], inv), [245, 235, 225, 255]);

    let gray = FilterSettings {
        grayscale: 100.0,
        ..FilterSettings::default()
    };
    assert_eq!(one([255, 0, 0, 255], gray), [54, 54, 54, 255]);
}

#[test]
fn zero_saturation_matches_full_grayscale_closely() {
    let desat = FilterSettings {
        saturation: 0.0,
        ..FilterSettings::default()
    };
    let px = one([0, 0, 255, 255], desat);
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);
}

#[test]
fn quarter_turn_swaps_dimensions() {
    let mut src = PixelBuffer::new(2, 1);
    src.put(0, 0, [1, 0, 0, 255]);
    src.put(1, 0, [2, 0, 0, 255]);
    let f = FilterSettings {
        rotation: 90,
        ..FilterSettings::default()
    };
    let out = bake_filters(&src, &f).unwrap();
    assert_eq!((out.width(), out.height()), (1, 2));
    assert_eq!(out.get(0, 0), [1, 0, 0, 255]);
    assert_eq!(out.get(0, 1), [2, 0, 0, 255]);
}

#[test]
fn half_turn_twice_is_identity() {
    let src = noisy(5, 4);
    let f = FilterSettings {
        rotation: 180,
        ..FilterSettings::default()
    };
    let once = bake_filters(&src, &f).unwrap();
    assert_ne!(once, src);
    assert_eq!(bake_filters(&once, &f).unwrap(), src);
}

#[test]
fn validation_rejects_bad_values() {
    let bad_rotation = FilterSettings {
        rotation: 45,
        ..FilterSettings::default()
    };
    assert!(bake_filters(&noisy(2, 2), &bad_rotation).is_err());
    let negative = FilterSettings {
        blur: -1.0,
        ..FilterSettings::default()
    };
    assert!(negative.validate().is_err());
}

#[test]
fn settings_parse_from_camel_case_json() {
    let f: FilterSettings = serde_json::from_str(r#"{"hueRotate": 90, "rotation": 270}"#).unwrap();
    assert_eq!(f.hue_rotate, 90.0);
    assert_eq!(f.rotation, 270);
    assert_eq!(f.brightness, 100.0);
}
