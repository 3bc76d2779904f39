use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// A regulatory document as supplied by the document store.
///
/// Label fields are kept as the raw strings the store provided; the scorer normalizes
/// them into sets. Decoding never fails on field shape (see [`Regulation::from_value`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Regulation {
    /// Stable key; persisted analyses are keyed by it.
    pub id: String,
    pub title: Option<String>,
    pub text: String,
    pub countries: Vec<String>,
    pub sectors: Vec<String>,
    pub keywords: Vec<String>,
    pub effective_date: Option<String>,
    pub sanctions_text: Option<String>,
    pub url: Option<String>,
}

impl Regulation {
    const ID_KEYS: &'static [&'static str] = &["id", "id_loi", "_id"];
    const TITLE_KEYS: &'static [&'static str] = &["title", "nom_loi", "titre"];
    const TEXT_KEYS: &'static [&'static str] = &["text", "texte"];
    const COUNTRY_KEYS: &'static [&'static str] = &["countries", "pays_concernes"];
    const SECTOR_KEYS: &'static [&'static str] = &["sectors", "secteurs"];
    const KEYWORD_KEYS: &'static [&'static str] = &["keywords", "mots_cles"];
    const DATE_KEYS: &'static [&'static str] = &["effective_date", "date_effet", "date_vigueur"];
    const SANCTION_KEYS: &'static [&'static str] = &["sanctions_text", "sanctions"];
    const URL_KEYS: &'static [&'static str] = &["url", "lien_loi", "law_url"];

    /// Creates an empty regulation with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builds a regulation from an arbitrary JSON value, coercing malformed fields to empty.
    ///
    /// A non-object value yields an empty regulation with an empty id.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            id: lenient::identifier(lenient::pick(object, Self::ID_KEYS)),
            title: lenient::opt_string(lenient::pick(object, Self::TITLE_KEYS)),
            text: lenient::string(lenient::pick(object, Self::TEXT_KEYS)),
            countries: lenient::string_list(lenient::pick(object, Self::COUNTRY_KEYS)),
            sectors: lenient::string_list(lenient::pick(object, Self::SECTOR_KEYS)),
            keywords: lenient::string_list(lenient::pick(object, Self::KEYWORD_KEYS)),
            effective_date: lenient::opt_string(lenient::pick(object, Self::DATE_KEYS)),
            sanctions_text: lenient::opt_string(lenient::pick(object, Self::SANCTION_KEYS)),
            url: lenient::opt_string(lenient::pick(object, Self::URL_KEYS)),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
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

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_effective_date(mut self, date: impl Into<String>) -> Self {
        self.effective_date = Some(date.into());
        self
    }

    pub fn with_sanctions(mut self, sanctions: impl Into<String>) -> Self {
        self.sanctions_text = Some(sanctions.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Title for display, falling back to the id.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

impl<'de> Deserialize<'de> for Regulation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
