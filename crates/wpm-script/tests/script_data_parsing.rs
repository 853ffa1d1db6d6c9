//! Integration tests for parsing script service responses.

use std::fs;
use std::path::PathBuf;
use wpm_core::response::{Envelope, Items};
use wpm_script::Script;

fn load_fixture(name: &str) -> String {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_script_list() {
    let json_data = load_fixture("script_list.json");
    let parsed: Envelope<Items<Vec<Script>>> = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize script list: {e}\nJSON: {json_data}"));

    let scripts = parsed.data.items;
    assert_eq!(scripts.len(), 2);

    assert_eq!(scripts[0].id.as_str(), "8a7b3c2d1e0f");
    assert_eq!(scripts[0].tags, vec!["api", "testing"]);
    assert_eq!(scripts[0].validation_state.as_deref(), Some("VALID"));

    // numeric id, no optional fields
    assert_eq!(scripts[1].id.as_str(), "40213");
    assert!(scripts[1].description.is_none());
    assert!(scripts[1].tags.is_empty());
}
