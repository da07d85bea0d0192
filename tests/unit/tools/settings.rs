use super::*;

#[test]
fn families_split_as_expected() {
    assert_eq!(Tool::Brush.family(), ToolFamily::Stroke);
    assert_eq!(Tool::Pixelate.family(), ToolFamily::Stroke);
    assert_eq!(Tool::Darken.family(), ToolFamily::Blend);
    assert_eq!(Tool::Invert.family(), ToolFamily::Blend);
}

#[test]
fn names_parse_back() {
    for tool in [
        Tool::Brush,
        Tool::Censor,
        Tool::Eraser,
        Tool::Blur,
        Tool::Pixelate,
        Tool::Lighten,
        Tool::Darken,
        Tool::Tint,
        Tool::Desaturate,
        Tool::Invert,
    ] {
        assert_eq!(tool.name().parse::<Tool>().unwrap(), tool);
    }
    assert!("spray".parse::<Tool>().is_err());
}

#[test]
fn non_positive_settings_are_rejected() {
    assert!(BrushSettings::new(0.0, Rgb::default(), 1.0).is_err());
    assert!(BrushSettings::new(5.0, Rgb::default(), -1.0).is_err());
    assert!(BrushSettings::new(f64::NAN, Rgb::default(), 1.0).is_err());
    assert_eq!(BrushSettings::new(10.0, Rgb::default(), 2.0).unwrap().radius(), 5.0);
}

#[test]
fn serde_uses_kebab_names() {
    let json = serde_json::to_string(&Tool::Desaturate).unwrap();
    assert_eq!(json, "\"desaturate\"");
}
