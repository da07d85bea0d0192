use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RetouchError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RetouchError::load("x").to_string().contains("load error:"));
    assert!(
        RetouchError::detection("x")
            .to_string()
            .contains("face detection failed:")
    );
    assert!(
        RetouchError::edit_service("x")
            .to_string()
            .contains("edit service failure:")
    );
    assert!(
        RetouchError::configuration_missing("x")
            .to_string()
            .contains("configuration missing:")
    );
    assert!(
        RetouchError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_no_faces_is_informational() {
    assert!(RetouchError::NoFacesFound.is_informational());
    assert!(!RetouchError::detection("timeout").is_informational());
    assert!(!RetouchError::load("bad").is_informational());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RetouchError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn service_message_is_kept_verbatim() {
    let err = RetouchError::edit_service("quota exceeded for project");
    assert!(err.to_string().ends_with("quota exceeded for project"));
}
