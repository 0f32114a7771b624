//! Runtime configuration.
//!
//! # Responsibility
//! - Hold placement geometry, gallery paging and moderation settings.
//! - Load settings from a JSON file with per-field defaults.
//!
//! # Invariants
//! - A config returned by [`FootprintsConfig::load`] has passed `validate()`.
//! - The admin password is never logged or serialized back out.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `admin_password`.
pub const ADMIN_PASSWORD_ENV: &str = "FOOTPRINTS_ADMIN_PASSWORD";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Geometry and timing for the wandering dots. Distances are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Horizontal keep-out margin at the left and right viewport edges.
    pub margin: f64,
    /// Height of the reserved band under the header.
    pub top_band: f64,
    /// Height of the reserved band above the footer.
    pub bottom_band: f64,
    /// Distance travelled per retarget.
    pub travel_radius: f64,
    /// Soft minimum centre-to-centre distance between dots.
    pub min_separation: f64,
    /// Candidate directions tried before falling back.
    pub max_attempts: u32,
    /// Duration of one leg of travel.
    pub travel_duration_ms: u64,
    pub dot_size: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            top_band: 80.0,
            bottom_band: 64.0,
            travel_radius: 150.0,
            min_separation: 60.0,
            max_attempts: 8,
            travel_duration_ms: 20_000,
            dot_size: 32.0,
        }
    }
}

impl PlacementConfig {
    pub fn travel_duration(&self) -> Duration {
        Duration::from_millis(self.travel_duration_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("margin", self.margin),
            ("top_band", self.top_band),
            ("bottom_band", self.bottom_band),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "placement.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("travel_radius", self.travel_radius),
            ("min_separation", self.min_separation),
            ("dot_size", self.dot_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "placement.{name} must be a finite positive number, got {value}"
                )));
            }
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "placement.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.travel_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "placement.travel_duration_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Paging and caching for gallery and moderation queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub cache_ttl_ms: u64,
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cache_ttl_ms: 5 * 60 * 1000,
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl GalleryConfig {
    /// Clamps a requested page size into `1..=max_limit`, defaulting when absent.
    pub fn normalize_limit(&self, limit: Option<u32>) -> u32 {
        limit
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_limit == 0 {
            return Err(ConfigError::Invalid(
                "gallery.max_limit must be at least 1".to_string(),
            ));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "gallery.default_limit must be within 1..={}, got {}",
                self.max_limit, self.default_limit
            )));
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintsConfig {
    pub placement: PlacementConfig,
    pub gallery: GalleryConfig,
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
}

impl FootprintsConfig {
    /// Parses config JSON. Missing sections and fields take defaults.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads config from `path`, then applies the environment override.
    ///
    /// # Side effects
    /// - Reads [`ADMIN_PASSWORD_ENV`].
    /// - Emits a `config_load` event (never the password).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_json(&text)?;
        config.apply_env_override(std::env::var(ADMIN_PASSWORD_ENV).ok());
        info!(
            "event=config_load module=config status=ok path={} admin_gate={}",
            path.display(),
            config.admin_password.is_some()
        );
        Ok(config)
    }

    /// Defaults plus the environment override; used when no file is given.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_override(std::env::var(ADMIN_PASSWORD_ENV).ok());
        config
    }

    /// Replaces the admin password when `value` is non-blank.
    pub fn apply_env_override(&mut self, value: Option<String>) {
        match value {
            Some(password) if !password.trim().is_empty() => {
                self.admin_password = Some(password);
            }
            Some(_) => {
                warn!("event=config_env module=config status=ignored key={ADMIN_PASSWORD_ENV} reason=blank");
            }
            None => {}
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.placement.validate()?;
        self.gallery.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, FootprintsConfig, GalleryConfig};

    #[test]
    fn empty_object_yields_defaults() {
        let config = FootprintsConfig::from_json("{}").expect("empty config should parse");
        assert_eq!(config, FootprintsConfig::default());
        assert_eq!(config.placement.min_separation, 60.0);
        assert_eq!(config.gallery.cache_ttl_ms, 300_000);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = FootprintsConfig::from_json(r#"{"placement": {"margin": 20}}"#)
            .expect("partial config should parse");
        assert_eq!(config.placement.margin, 20.0);
        assert_eq!(config.placement.top_band, 80.0);
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let err = FootprintsConfig::from_json(r#"{"placement": {"max_attempts": 0}}"#)
            .expect_err("zero attempts must fail");
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("max_attempts")));
    }

    #[test]
    fn env_override_ignores_blank_values() {
        let mut config = FootprintsConfig::default();
        config.apply_env_override(Some("   ".to_string()));
        assert_eq!(config.admin_password, None);
        config.apply_env_override(Some("hunter2".to_string()));
        assert_eq!(config.admin_password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn password_is_not_serialized() {
        let config = FootprintsConfig {
            admin_password: Some("secret".to_string()),
            ..FootprintsConfig::default()
        };
        let json = serde_json::to_string(&config).expect("config should serialize");
        assert!(!json.contains("secret"));
    }

    #[test]
    fn normalize_limit_clamps_to_range() {
        let gallery = GalleryConfig::default();
        assert_eq!(gallery.normalize_limit(None), 10);
        assert_eq!(gallery.normalize_limit(Some(0)), 1);
        assert_eq!(gallery.normalize_limit(Some(500)), 100);
    }
}
