//! Input records: regulations and the company profile.
//!
//! Both records decode leniently from JSON. Legacy field names from the original
//! document store (`pays_concernes`, `secteurs`, `mots_cles`, ...) are accepted as
//! aliases, and wrongly-shaped fields are coerced to empty rather than rejected.

pub mod error;
mod lenient;
pub mod loader;
mod profile;
mod regulation;


pub use error::{DataError, DataResult};
pub use loader::{load_profile, load_regulations, parse_profile, parse_regulations};
pub use profile::CompanyProfile;
pub use regulation::Regulation;
