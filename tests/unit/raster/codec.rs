use super::*;

#[test]
fn png_roundtrip_is_lossless() {
    let mut buf = PixelBuffer::filled(3, 2, [10, 20, 30, 255]);
    buf.put(1, 1, [200, 100, 0, 64]);
    let png = encode_png(&buf).unwrap();
    assert_eq!(decode_rgba8(&png).unwrap(), buf);
}

#[test]
fn garbage_bytes_are_a_load_error() {
    let err = decode_rgba8(b"definitely not an image").unwrap_err();
    assert!(matches!(err, RetouchError::Load(_)), "{err}");
}

#[test]
fn empty_source_is_a_load_error() {
    assert!(matches!(decode_rgba8(&[]), Err(RetouchError::Load(_))));
}

#[test]
fn jpeg_output_decodes_to_same_dimensions() {
    let buf = PixelBuffer::filled(16, 8, [200, 30, 30, 255]);
    let jpg = encode_jpeg(&buf, 92, [255, 255, 255, 255]).unwrap();
    assert_eq!(&jpg[..2], &[0xFF, 0xD8]);
    let back = decode_rgba8(&jpg).unwrap();
    assert_eq!((back.width(), back.height()), (16, 8));
}
