//! Integration tests for analysis keys and profile fingerprints.

mod common;

use std::collections::HashSet;

use common::fixtures::{FIXTURE_IDS, fixture_profile};
use regrisk::hashing::{fingerprint_profile, regulation_key};
use regrisk::model::parse_profile;

#[test]
fn test_fixture_keys_are_distinct() {
    let keys: HashSet<String> = FIXTURE_IDS.iter().map(|id| regulation_key(id)).collect();
    assert_eq!(keys.len(), FIXTURE_IDS.len());
}

#[test]
fn test_key_matches_blake3_hex() {
    assert_eq!(
        regulation_key("32023R0956"),
        blake3::hash(b"32023R0956").to_hex().to_string()
    );
}

#[test]
fn test_fingerprint_independent_of_document_shape() {
    let flat = parse_profile(
        r#"{
            "name": "Hutchinson",
            "sectors": ["manufacturing", "AEROSPACE", "automotive"],
            "geographical_presence": ["China", "Mexico", "United States", "Spain", "Poland", "Germany", "France"],
            "materials": ["Aluminum", "Steel", "Synthetic Rubber", "Natural Rubber"],
            "keywords": ["rubber", "emissions", "vibration", "sealing"]
        }"#,
    )
    .unwrap();

    assert_eq!(fingerprint_profile(&flat), fingerprint_profile(&fixture_profile()));
}

#[test]
fn test_fingerprint_tracks_profile_edits() {
    let base = fixture_profile();
    let mut edited = base.clone();
    edited.geographical_presence.push("Brazil".to_string());

    assert_ne!(fingerprint_profile(&base), fingerprint_profile(&edited));
}
