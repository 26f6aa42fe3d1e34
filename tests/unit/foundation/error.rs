use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ProjectorError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ProjectorError::structure("x")
            .to_string()
            .contains("graph structure error:")
    );
    assert!(
        ProjectorError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        ProjectorError::UnknownProjector(ProjectorId(3)).to_string(),
        "unknown projector: #3"
    );
}

#[test]
fn only_structure_errors_are_structural() {
    assert!(ProjectorError::structure("gone").is_structural());
    assert!(!ProjectorError::validation("bad").is_structural());
    assert!(!ProjectorError::serde("bad").is_structural());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ProjectorError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde() {
    let err: ProjectorError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ProjectorError::Serde(_)));
}
