use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// Structured description of the company regulations are scored against.
///
/// Loaded once per scoring run and never mutated by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub sectors: Vec<String>,
    pub geographical_presence: Vec<String>,
    pub materials: Vec<String>,
    pub keywords: Vec<String>,
    /// Regions suppliers operate in. Used for impact details only, not scoring.
    pub supplier_regions: Vec<String>,
    /// Regions customers operate in. Used for impact details only, not scoring.
    pub client_regions: Vec<String>,
}

const COMPANY_INFO: &str = "company_info";

impl CompanyProfile {
    const NAME_KEYS: &'static [&'static str] = &["name", "nom"];
    const SECTOR_KEYS: &'static [&'static str] = &["sectors", "secteurs", "secteur"];
    const GEO_KEYS: &'static [&'static str] = &["geographical_presence", "presence_geographique"];
    const MATERIAL_KEYS: &'static [&'static str] = &["materials", "matieres_premieres"];
    const KEYWORD_KEYS: &'static [&'static str] = &["keywords", "keywords_matching"];
    const SUPPLIER_KEYS: &'static [&'static str] = &["supplier_regions", "fournisseurs_regions"];
    const CLIENT_KEYS: &'static [&'static str] = &["client_regions", "clients_regions"];

    /// Builds a profile from an arbitrary JSON value, coercing malformed fields to empty.
    ///
    /// Fields may sit at the top level or inside a nested `company_info` object.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let list = |keys: &[&str]| {
            lenient::string_list(lenient::pick_nested(object, COMPANY_INFO, keys))
        };

        Self {
            name: lenient::opt_string(lenient::pick_nested(object, COMPANY_INFO, Self::NAME_KEYS)),
            sectors: list(Self::SECTOR_KEYS),
            geographical_presence: list(Self::GEO_KEYS),
            materials: list(Self::MATERIAL_KEYS),
            keywords: list(Self::KEYWORD_KEYS),
            supplier_regions: list(Self::SUPPLIER_KEYS),
            client_regions: list(Self::CLIENT_KEYS),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sectors<I, S>(mut self, sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sectors = sectors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_geographical_presence<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.geographical_presence = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_materials<I, S>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_supplier_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supplier_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_client_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.client_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Name for display.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed company")
    }
}

impl<'de> Deserialize<'de> for CompanyProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
