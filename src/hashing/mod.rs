//! BLAKE3 keys for persisted analyses and profile fingerprints.

use blake3::Hasher;

use crate::model::CompanyProfile;
use crate::scoring::LabelSet;

/// Hex BLAKE3 digest of a regulation id, safe to use as a file name.
///
/// Ids come from external stores and may contain `/`, spaces or other characters that
/// are not valid in paths, so persisted analyses are keyed by this digest instead.
#[inline]
pub fn regulation_key(regulation_id: &str) -> String {
    blake3::hash(regulation_id.as_bytes()).to_hex().to_string()
}

/// Fingerprint of the scoring-relevant part of a profile.
///
/// Labels are normalized and sorted first, so reordering or re-casing a profile does not
/// change the fingerprint, while any change that can move a score does.
pub fn fingerprint_profile(profile: &CompanyProfile) -> String {
    let mut hasher = Hasher::new();
    for (field, labels) in [
        ("sectors", &profile.sectors),
        ("geographical_presence", &profile.geographical_presence),
        ("materials", &profile.materials),
        ("keywords", &profile.keywords),
    ] {
        hasher.update(field.as_bytes());
        hasher.update(b"=");
        for label in LabelSet::from_labels(labels).iter() {
            hasher.update(label.as_bytes());
            hasher.update(b"\x1f");
        }
        hasher.update(b"\x1e");
    }
    hasher.finalize().to_hex().to_string()
}
