//! Application settings loading from config.toml
//!
//! The settings file carries the benefit policy (annual ceiling) and the
//! category limits used to seed the database on first run.

use crate::{
    core::limits::LimitPolicy,
    errors::{Error, Result},
    models::MedicalCategory,
};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_ENV: &str = "HR_DESK_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Medical benefit policy
    #[serde(default)]
    pub benefits: BenefitsConfig,
    /// Category limits to seed
    #[serde(default)]
    pub category_limits: Vec<CategoryLimitConfig>,
}

/// `[benefits]` table
#[derive(Debug, Clone, Deserialize)]
pub struct BenefitsConfig {
    /// Per-employee yearly ceiling across all categories, in PKR
    #[serde(default = "default_annual_limit")]
    pub annual_limit: i64,
}

impl Default for BenefitsConfig {
    fn default() -> Self {
        Self {
            annual_limit: default_annual_limit(),
        }
    }
}

const fn default_annual_limit() -> i64 {
    LimitPolicy::DEFAULT_ANNUAL_LIMIT
}

/// One `[[category_limits]]` entry
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryLimitConfig {
    /// Medical category name, e.g. `dental_care`
    pub category: String,
    /// Yearly ceiling in PKR
    pub limit: i64,
}

impl Settings {
    /// Builds the limit policy handed to the accounting code.
    ///
    /// # Errors
    /// Returns an error if the configured annual limit is not positive.
    pub fn limit_policy(&self) -> Result<LimitPolicy> {
        LimitPolicy::new(self.benefits.annual_limit)
    }

    /// Parses and validates the seeded category limits.
    ///
    /// # Errors
    /// Returns an error for unknown categories or non-positive limits.
    pub fn seeded_category_limits(&self) -> Result<Vec<(MedicalCategory, i64)>> {
        self.category_limits
            .iter()
            .map(|entry| {
                let category = entry.category.parse::<MedicalCategory>()?;
                if entry.limit <= 0 {
                    return Err(Error::Config {
                        message: format!(
                            "Category limit for {category} must be positive, got {}",
                            entry.limit
                        ),
                    });
                }
                Ok((category, entry.limit))
            })
            .collect()
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    tracing::debug!("Loading settings from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from `$HR_DESK_CONFIG`, or `./config.toml`.
///
/// A missing default file is not an error: the built-in defaults apply.
///
/// # Errors
/// Returns an error if an existing file cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_settings(path),
        Err(_) if Path::new("config.toml").exists() => load_settings("config.toml"),
        Err(_) => {
            tracing::info!("No config.toml found, using default settings");
            Ok(Settings::default())
        }
    }
}
