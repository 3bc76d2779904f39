//! JSON file loading for regulations and profiles.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::error::{DataError, DataResult};
use super::{CompanyProfile, Regulation};

const REGULATIONS_FIELD: &str = "regulations";

/// Reads regulations from a JSON file (see [`parse_regulations`] for accepted shapes).
pub fn load_regulations(path: &Path) -> DataResult<Vec<Regulation>> {
    let raw = read(path)?;
    let regulations = parse_regulations_from(&raw, &path.display().to_string())?;
    info!(
        path = %path.display(),
        count = regulations.len(),
        "Loaded regulations"
    );
    Ok(regulations)
}

/// Reads a single company profile from a JSON file.
pub fn load_profile(path: &Path) -> DataResult<CompanyProfile> {
    let raw = read(path)?;
    let profile = parse_profile_from(&raw, &path.display().to_string())?;
    info!(
        path = %path.display(),
        company = profile.display_name(),
        "Loaded company profile"
    );
    Ok(profile)
}

/// Parses regulations from either a JSON array or an object with a `regulations` array.
///
/// Array items that are not objects become empty regulations and are dropped, since an
/// empty id cannot key a persisted analysis.
pub fn parse_regulations(raw: &str) -> DataResult<Vec<Regulation>> {
    parse_regulations_from(raw, "input")
}

/// Parses a company profile from a JSON object.
pub fn parse_profile(raw: &str) -> DataResult<CompanyProfile> {
    parse_profile_from(raw, "input")
}

fn parse_regulations_from(raw: &str, origin: &str) -> DataResult<Vec<Regulation>> {
    let value = parse_json(raw, origin)?;

    let items = match &value {
        Value::Array(items) => items,
        Value::Object(object) => match object.get(REGULATIONS_FIELD) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DataError::UnexpectedShape {
                    origin: origin.to_string(),
                    expected: "an array or an object with a `regulations` array",
                });
            }
        },
        _ => {
            return Err(DataError::UnexpectedShape {
                origin: origin.to_string(),
                expected: "an array or an object with a `regulations` array",
            });
        }
    };

    let total = items.len();
    let regulations: Vec<Regulation> = items
        .iter()
        .map(Regulation::from_value)
        .filter(|regulation| !regulation.id.is_empty())
        .collect();

    if regulations.len() < total {
        debug!(
            origin,
            dropped = total - regulations.len(),
            "Dropped regulations without an id"
        );
    }

    Ok(regulations)
}

fn parse_profile_from(raw: &str, origin: &str) -> DataResult<CompanyProfile> {
    let value = parse_json(raw, origin)?;
    if !value.is_object() {
        return Err(DataError::UnexpectedShape {
            origin: origin.to_string(),
            expected: "a profile object",
        });
    }
    Ok(CompanyProfile::from_value(&value))
}

fn parse_json(raw: &str, origin: &str) -> DataResult<Value> {
    serde_json::from_str(raw).map_err(|source| DataError::Json {
        origin: origin.to_string(),
        source,
    })
}

fn read(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}
