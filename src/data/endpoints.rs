//! Endpoint table and API settings.
//!
//! Settings come from the environment (optionally a `.env` file); the endpoint
//! table is static and bound once per run.

use std::time::Duration;

use crate::domain::Horizon;
use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://webapps.supen.fi.cr/Estadisticas/API";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Courtesy delay between consecutive API calls.
pub const DEFAULT_CALL_DELAY_SECS: u64 = 10;

const RETURN_FIELD: &str = "rendimiento";

/// Path suffix and return-value field for one horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub path: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    base_url: String,
    short: EndpointConfig,
    medium: EndpointConfig,
    long: EndpointConfig,
}

impl EndpointTable {
    pub fn new(
        base_url: impl Into<String>,
        short: EndpointConfig,
        medium: EndpointConfig,
        long: EndpointConfig,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            short,
            medium,
            long,
        }
    }

    /// Nominal-return endpoints for 12/36/60 months under `base_url`.
    pub fn nominal_returns(base_url: impl Into<String>) -> Self {
        let endpoint = |h: Horizon| EndpointConfig {
            path: format!("/rendimientos/nominal/{}meses", h.months()),
            field: RETURN_FIELD.to_string(),
        };
        Self::new(
            base_url,
            endpoint(Horizon::Short),
            endpoint(Horizon::Medium),
            endpoint(Horizon::Long),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, horizon: Horizon) -> &EndpointConfig {
        match horizon {
            Horizon::Short => &self.short,
            Horizon::Medium => &self.medium,
            Horizon::Long => &self.long,
        }
    }

    pub fn url(&self, horizon: Horizon) -> String {
        let path = &self.endpoint(horizon).path;
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub fn field(&self, horizon: Horizon) -> &str {
        &self.endpoint(horizon).field
    }
}

/// Process-wide API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub call_delay: Duration,
    /// The SUPEN host has served broken certificate chains; verification is off by default.
    pub accept_invalid_certs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            call_delay: Duration::from_secs(DEFAULT_CALL_DELAY_SECS),
            accept_invalid_certs: true,
        }
    }
}

impl ApiConfig {
    /// Load `.env` (if any) and read `SUPEN_*` variables over the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(url) = lookup("SUPEN_BASE_URL") {
            let url = url.trim();
            if url.is_empty() {
                return Err(AppError::config("SUPEN_BASE_URL is set but empty."));
            }
            config.base_url = url.to_string();
        }
        if let Some(raw) = lookup("SUPEN_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_secs("SUPEN_TIMEOUT_SECS", &raw)?);
        }
        if let Some(raw) = lookup("SUPEN_CALL_DELAY_SECS") {
            config.call_delay = Duration::from_secs(parse_secs("SUPEN_CALL_DELAY_SECS", &raw)?);
        }
        if let Some(raw) = lookup("SUPEN_ACCEPT_INVALID_CERTS") {
            config.accept_invalid_certs = parse_bool("SUPEN_ACCEPT_INVALID_CERTS", &raw)?;
        }

        Ok(config)
    }

    pub fn endpoints(&self) -> EndpointTable {
        EndpointTable::nominal_returns(self.base_url.clone())
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::config(format!("{key} must be a whole number of seconds, got '{raw}'.")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!("{key} must be true or false, got '{raw}'."))),
    }
}
