//! Test fixtures for integration tests.

use std::path::PathBuf;

use regrisk::model::{CompanyProfile, Regulation, load_profile, load_regulations};

pub const DEFAULT_REGULATION_ID: &str = "REG-0001";

/// Ids in `tests/fixtures/regulations.json`, in file order.
pub const FIXTURE_IDS: [&str; 6] = [
    "32024R1347",
    "32025L0001",
    "32025R0892",
    "FAR145067",
    "32025L0456",
    "32023R0956",
];

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_regulations() -> Vec<Regulation> {
    load_regulations(&fixture_path("regulations.json")).expect("fixture regulations should load")
}

pub fn fixture_profile() -> CompanyProfile {
    load_profile(&fixture_path("profile.json")).expect("fixture profile should load")
}

#[derive(Default)]
pub struct RegulationBuilder {
    id: Option<String>,
    text: Option<String>,
    countries: Vec<String>,
    sectors: Vec<String>,
    keywords: Vec<String>,
}

impl RegulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn countries(mut self, countries: &[&str]) -> Self {
        self.countries = countries.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn sectors(mut self, sectors: &[&str]) -> Self {
        self.sectors = sectors.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Regulation {
        Regulation::new(self.id.unwrap_or_else(|| DEFAULT_REGULATION_ID.to_string()))
            .with_text(self.text.unwrap_or_default())
            .with_countries(self.countries)
            .with_sectors(self.sectors)
            .with_keywords(self.keywords)
    }
}

#[derive(Default)]
pub struct ProfileBuilder {
    sectors: Vec<String>,
    geography: Vec<String>,
    materials: Vec<String>,
    keywords: Vec<String>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sectors(mut self, sectors: &[&str]) -> Self {
        self.sectors = sectors.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn geography(mut self, countries: &[&str]) -> Self {
        self.geography = countries.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn materials(mut self, materials: &[&str]) -> Self {
        self.materials = materials.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> CompanyProfile {
        CompanyProfile::default()
            .with_name("Test Co")
            .with_sectors(self.sectors)
            .with_geographical_presence(self.geography)
            .with_materials(self.materials)
            .with_keywords(self.keywords)
    }
}

/// The sealing-regulation walkthrough: geo 0.15, sector 0.20, keyword 0.10, total 0.45.
pub fn walkthrough_pair() -> (Regulation, CompanyProfile) {
    let regulation = RegulationBuilder::new()
        .id("EU2025_892")
        .countries(&["France", "Germany", "Poland", "Spain"])
        .sectors(&["Automotive", "Manufacturing"])
        .keywords(&["sealing", "automotive", "rubber"])
        .build();
    let profile = ProfileBuilder::new()
        .sectors(&["Automotive"])
        .geography(&["France", "Germany"])
        .materials(&["steel"])
        .keywords(&["sealing", "vibration"])
        .build();
    (regulation, profile)
}
