use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: [&str; 7] = [
    "currency",
    "currency_precision",
    "default_page_size",
    "ui_color_enabled",
    "snapshot_root",
    "last_opened_snapshot",
    "cache_ttl_secs",
];

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub currency_precision: Option<u8>,
    #[serde(default = "Config::default_page_size_value")]
    pub default_page_size: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory holding vendor snapshots. Defaults to `~/Documents/Bookly`.
    pub snapshot_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_snapshot: Option<String>,
    #[serde(default = "Config::default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            currency_precision: None,
            default_page_size: Self::default_page_size_value(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            snapshot_root: None,
            last_opened_snapshot: None,
            cache_ttl_secs: Self::default_cache_ttl_secs(),
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_page_size_value() -> usize {
        10
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_cache_ttl_secs() -> u64 {
        300
    }

    /// Decimal places used when presenting amounts.
    pub fn precision(&self) -> u32 {
        u32::from(self.currency_precision.unwrap_or(2))
    }

    pub fn resolve_snapshot_root(&self) -> PathBuf {
        if let Some(path) = &self.snapshot_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Bookly")
    }

    /// Current value of `key` rendered for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "currency" => self.currency.clone(),
            "currency_precision" => self.precision().to_string(),
            "default_page_size" => self.default_page_size.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "snapshot_root" => self.resolve_snapshot_root().display().to_string(),
            "last_opened_snapshot" => self.last_opened_snapshot.clone().unwrap_or_else(|| "-".into()),
            "cache_ttl_secs" => self.cache_ttl_secs.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses `value` into the field named `key`.
    ///
    /// `none` (or an empty value) clears optional fields.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let clears = value.is_empty() || value.eq_ignore_ascii_case("none");
        match key {
            "currency" => self.currency = required(key, value)?.to_ascii_uppercase(),
            "currency_precision" => {
                self.currency_precision = if clears {
                    None
                } else {
                    let digits: u8 = parse(key, value)?;
                    if digits > 8 {
                        return Err(invalid(key, "must be between 0 and 8"));
                    }
                    Some(digits)
                }
            }
            "default_page_size" => {
                let size: usize = parse(key, value)?;
                if size == 0 {
                    return Err(invalid(key, "must be at least 1"));
                }
                self.default_page_size = size;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid(key, "expected true or false")),
                }
            }
            "snapshot_root" => {
                self.snapshot_root = (!clears).then(|| PathBuf::from(value));
            }
            "last_opened_snapshot" => {
                self.last_opened_snapshot = (!clears).then(|| value.to_string());
            }
            "cache_ttl_secs" => self.cache_ttl_secs = parse(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn required(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, "must not be empty"))
    } else {
        Ok(value.to_string())
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| invalid(key, &format!("`{value}` is not a valid number")))
}
