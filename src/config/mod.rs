//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `REGRISK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_GEO_WEIGHT, DEFAULT_KEYWORD_WEIGHT, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS,
    DEFAULT_MATERIAL_WEIGHT, DEFAULT_SECTOR_WEIGHT,
};
use crate::scoring::FactorWeights;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `REGRISK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory for persisted analyses. Default: `./.data`.
    pub storage_path: PathBuf,

    /// Regulations loaded at startup and used when a request omits them.
    pub regulations_path: Option<PathBuf>,

    /// Company profile loaded at startup and used when a request omits one.
    pub profile_path: Option<PathBuf>,

    pub geo_weight: f64,
    pub sector_weight: f64,
    pub keyword_weight: f64,
    pub material_weight: f64,

    /// Match company keywords against regulation bodies. Default: `true`.
    pub scan_text: bool,

    /// Base URL of an Ollama-compatible server. Narrative generation is off when unset.
    pub llm_url: Option<String>,

    /// Default: `llama2`.
    pub llm_model: String,

    /// Per-request LLM timeout in seconds. Default: `60`.
    pub llm_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            storage_path: PathBuf::from("./.data"),
            regulations_path: None,
            profile_path: None,
            geo_weight: DEFAULT_GEO_WEIGHT,
            sector_weight: DEFAULT_SECTOR_WEIGHT,
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            material_weight: DEFAULT_MATERIAL_WEIGHT,
            scan_text: true,
            llm_url: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "REGRISK_PORT";
    const ENV_BIND_ADDR: &'static str = "REGRISK_BIND_ADDR";
    const ENV_STORAGE_PATH: &'static str = "REGRISK_STORAGE_PATH";
    const ENV_REGULATIONS_PATH: &'static str = "REGRISK_REGULATIONS_PATH";
    const ENV_PROFILE_PATH: &'static str = "REGRISK_PROFILE_PATH";
    const ENV_WEIGHT_GEO: &'static str = "REGRISK_WEIGHT_GEO";
    const ENV_WEIGHT_SECTOR: &'static str = "REGRISK_WEIGHT_SECTOR";
    const ENV_WEIGHT_KEYWORD: &'static str = "REGRISK_WEIGHT_KEYWORD";
    const ENV_WEIGHT_MATERIAL: &'static str = "REGRISK_WEIGHT_MATERIAL";
    const ENV_SCAN_TEXT: &'static str = "REGRISK_SCAN_TEXT";
    const ENV_LLM_URL: &'static str = "REGRISK_LLM_URL";
    const ENV_LLM_MODEL: &'static str = "REGRISK_LLM_MODEL";
    const ENV_LLM_TIMEOUT_SECS: &'static str = "REGRISK_LLM_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: Self::parse_port_from_env(defaults.port)?,
            bind_addr: Self::parse_bind_addr_from_env(defaults.bind_addr)?,
            storage_path: Self::parse_path_from_env(Self::ENV_STORAGE_PATH, defaults.storage_path),
            regulations_path: Self::parse_optional_from_env(Self::ENV_REGULATIONS_PATH)
                .map(PathBuf::from),
            profile_path: Self::parse_optional_from_env(Self::ENV_PROFILE_PATH).map(PathBuf::from),
            geo_weight: Self::parse_weight_from_env(Self::ENV_WEIGHT_GEO, defaults.geo_weight)?,
            sector_weight: Self::parse_weight_from_env(
                Self::ENV_WEIGHT_SECTOR,
                defaults.sector_weight,
            )?,
            keyword_weight: Self::parse_weight_from_env(
                Self::ENV_WEIGHT_KEYWORD,
                defaults.keyword_weight,
            )?,
            material_weight: Self::parse_weight_from_env(
                Self::ENV_WEIGHT_MATERIAL,
                defaults.material_weight,
            )?,
            scan_text: Self::parse_bool_from_env(Self::ENV_SCAN_TEXT, defaults.scan_text)?,
            llm_url: Self::parse_optional_from_env(Self::ENV_LLM_URL),
            llm_model: Self::parse_optional_from_env(Self::ENV_LLM_MODEL)
                .unwrap_or(defaults.llm_model),
            llm_timeout_secs: Self::parse_u64_from_env(
                Self::ENV_LLM_TIMEOUT_SECS,
                defaults.llm_timeout_secs,
            ),
        })
    }

    /// Validates paths, weights and the LLM settings (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        for path in [&self.regulations_path, &self.profile_path]
            .into_iter()
            .flatten()
        {
            Self::require_file(path)?;
        }

        self.weights().validate()?;

        if let Some(url) = &self.llm_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_LLM_URL,
                value: url.clone(),
            });
        }

        if self.llm_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_LLM_TIMEOUT_SECS,
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    pub fn weights(&self) -> FactorWeights {
        FactorWeights::new(
            self.geo_weight,
            self.sector_weight,
            self.keyword_weight,
            self.material_weight,
        )
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn require_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_weight_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match Self::parse_optional_from_env(name) {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::WeightParseError {
                    name,
                    value,
                    source,
                }),
            None => Ok(default),
        }
    }

    fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
        let Some(value) = Self::parse_optional_from_env(name) else {
            return Ok(default);
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool { name, value }),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    /// Trimmed value, with blank treated as unset.
    fn parse_optional_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
