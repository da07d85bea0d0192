use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn gaussian_blur_keeps_opaque_flat_regions() {
    let buf = PixelBuffer::filled(6, 6, [90, 10, 200, 255]);
    assert_eq!(gaussian_blur(&buf, 3.0).unwrap(), buf);
}

#[test]
fn gaussian_blur_softens_an_edge() {
    let mut buf = PixelBuffer::filled(8, 1, [0, 0, 0, 255]);
    for x in 4..8 {
        buf.put(x, 0, [255, 255, 255, 255]);
    }
    let out = gaussian_blur(&buf, 1.5).unwrap();
    let left = out.get(3, 0)[0];
    let right = out.get(4, 0)[0];
    assert!(left > 0 && left < 128, "left of edge was {left}");
    assert!(right > 128 && right < 255, "right of edge was {right}");
}

#[test]
fn negative_sigma_is_rejected() {
    let buf = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
    assert!(gaussian_blur(&buf, -1.0).is_err());
}
