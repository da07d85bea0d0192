use super::*;

fn det(x: f64, y: f64, w: f64, h: f64) -> FaceDetection {
    FaceDetection {
        bounding_box: BoundingBox {
            origin_x: x,
            origin_y: y,
            width: w,
            height: h,
        },
        landmarks: vec![],
        probability: 0.8,
    }
}

#[test]
fn detection_json_uses_camel_case() {
    let json = r#"{
        "boundingBox": {"originX": 1, "originY": 2, "width": 30, "height": 40},
        "landmarks": [{"x": 5, "y": 6}, {"x": 15, "y": 6}],
        "probability": 0.75
    }"#;
    let d: FaceDetection = serde_json::from_str(json).unwrap();
    assert_eq!(d.bounding_box.origin_y, 2.0);
    assert_eq!(d.landmarks[1], Point::new(15.0, 6.0));
    assert_eq!(d.probability, 0.75);
}

#[test]
fn missing_landmarks_and_probability_default() {
    let json = r#"{"boundingBox": {"originX": 0, "originY": 0, "width": 10, "height": 10}}"#;
    let d: FaceDetection = serde_json::from_str(json).unwrap();
    assert!(d.landmarks.is_empty());
    assert_eq!(d.probability, 1.0);
}

#[test]
fn validate_rejects_bad_records() {
    assert!(det(0.0, 0.0, 10.0, 10.0).validate().is_ok());
    assert!(det(0.0, 0.0, 0.0, 10.0).validate().is_err());
    assert!(det(f64::NAN, 0.0, 10.0, 10.0).validate().is_err());
    let mut d = det(0.0, 0.0, 10.0, 10.0);
    d.probability = 1.5;
    assert!(d.validate().is_err());
}

#[test]
fn filter_accepts_either_size_threshold() {
    let f = DetectionFilter::default();
    let small_img = Size::new(200, 300).unwrap();
    let big_img = Size::new(2000, 3000).unwrap();

    // 20px meets the absolute minimum on any image.
    assert!(f.accepts(&det(0.0, 0.0, 20.0, 20.0), big_img));
    // 10px is below 20px but 10 >= 0.02 * 200 = 4.
    assert!(f.accepts(&det(0.0, 0.0, 10.0, 10.0), small_img));
    // 10px fails both on a large image (0.02 * 2000 = 40).
    assert!(!f.accepts(&det(0.0, 0.0, 10.0, 10.0), big_img));
}

#[test]
fn filter_enforces_aspect_range() {
    let f = DetectionFilter::default();
    let img = Size::new(500, 500).unwrap();
    assert!(f.accepts(&det(0.0, 0.0, 100.0, 200.0), img));
    assert!(f.accepts(&det(0.0, 0.0, 200.0, 100.0), img));
    assert!(!f.accepts(&det(0.0, 0.0, 100.0, 201.0), img));
    assert!(!f.accepts(&det(0.0, 0.0, 250.0, 100.0), img));
}

#[test]
fn retain_preserves_order() {
    let f = DetectionFilter::default();
    let img = Size::new(1000, 1000).unwrap();
    let kept = f.retain(
        vec![
            det(1.0, 0.0, 50.0, 50.0),
            det(2.0, 0.0, 5.0, 5.0),
            det(3.0, 0.0, 60.0, 50.0),
        ],
        img,
    );
    let xs: Vec<f64> = kept.iter().map(|d| d.bounding_box.origin_x).collect();
    assert_eq!(xs, vec![1.0, 3.0]);
}

#[test]
fn filter_validate_rejects_empty_aspect_range() {
    let f = DetectionFilter {
        min_aspect: 2.0,
        max_aspect: 1.0,
        ..DetectionFilter::default()
    };
    assert!(f.validate().is_err());
    assert!(DetectionFilter::default().validate().is_ok());
}

#[test]
fn face_effect_names_round_trip() {
    for e in [
        FaceEffect::CensorEyes,
        FaceEffect::BlurFace,
        FaceEffect::PixelateFace,
    ] {
        assert_eq!(e.name().parse::<FaceEffect>().unwrap(), e);
    }
    assert!("smudge".parse::<FaceEffect>().is_err());
    let e: FaceEffect = serde_json::from_str("\"pixelate-face\"").unwrap();
    assert_eq!(e, FaceEffect::PixelateFace);
}
