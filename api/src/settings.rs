//! Dashboard settings: env-derived defaults, validation and JSON
//! import/export.

use std::env;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::holders::DEFAULT_PAGE_SIZE;
use crate::holders::PAGE_SIZES;
use crate::network::Network;

/// Shortest allowed polling/refresh interval.
pub const MIN_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_TOAST_MAX_VISIBLE: usize = 5;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{field} must be at least {min} seconds")]
    IntervalTooShort { field: &'static str, min: u64 },
    #[error("page size {0} is not one of 10, 25, 50, 100")]
    PageSize(usize),
    #[error("at least one toast must be visible")]
    ToastLimit,
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// All user-adjustable settings. Intended for saving to a file, editing in
/// the settings screen, etc.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub network: Network,
    pub auto_refresh: bool,
    pub refresh_interval_secs: u64,
    pub status_poll_secs: u64,
    pub holders_page_size: usize,
    pub toast_max_visible: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            network: Network::default(),
            auto_refresh: true,
            refresh_interval_secs: DEFAULT_INTERVAL_SECS,
            status_poll_secs: DEFAULT_INTERVAL_SECS,
            holders_page_size: DEFAULT_PAGE_SIZE,
            toast_max_visible: DEFAULT_TOAST_MAX_VISIBLE,
        }
    }
}

impl DashboardSettings {
    /// Creates settings from environment variables, falling back to the
    /// in-code defaults for anything unset or invalid.
    ///
    /// # Environment Variables
    /// - `FINOVAULT_NETWORK`: "mainnet", "testnet" or "devnet".
    /// - `FINOVAULT_AUTO_REFRESH`: "true"/"1" or "false"/"0".
    /// - `FINOVAULT_REFRESH_SECS`: dashboard refresh interval, at least 5.
    /// - `FINOVAULT_STATUS_POLL_SECS`: admin status poll interval, at least 5.
    /// - `FINOVAULT_PAGE_SIZE`: holders per page, one of 10/25/50/100.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let network = lookup("FINOVAULT_NETWORK")
            .and_then(|s| Network::from_str(s.trim()).ok())
            .unwrap_or(defaults.network);

        let auto_refresh = match lookup("FINOVAULT_AUTO_REFRESH").as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            _ => defaults.auto_refresh,
        };

        let interval = |key: &str, fallback: u64| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs >= MIN_INTERVAL_SECS)
                .unwrap_or(fallback)
        };

        let holders_page_size = lookup("FINOVAULT_PAGE_SIZE")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|size| PAGE_SIZES.contains(size))
            .unwrap_or(defaults.holders_page_size);

        Self {
            network,
            auto_refresh,
            refresh_interval_secs: interval(
                "FINOVAULT_REFRESH_SECS",
                defaults.refresh_interval_secs,
            ),
            status_poll_secs: interval("FINOVAULT_STATUS_POLL_SECS", defaults.status_poll_secs),
            holders_page_size,
            toast_max_visible: defaults.toast_max_visible,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.refresh_interval_secs < MIN_INTERVAL_SECS {
            return Err(SettingsError::IntervalTooShort {
                field: "refresh interval",
                min: MIN_INTERVAL_SECS,
            });
        }
        if self.status_poll_secs < MIN_INTERVAL_SECS {
            return Err(SettingsError::IntervalTooShort {
                field: "status poll interval",
                min: MIN_INTERVAL_SECS,
            });
        }
        if !PAGE_SIZES.contains(&self.holders_page_size) {
            return Err(SettingsError::PageSize(self.holders_page_size));
        }
        if self.toast_max_visible == 0 {
            return Err(SettingsError::ToastLimit);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates exported settings. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Settings being edited, compared against the last saved copy.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SettingsDraft {
    saved: DashboardSettings,
    pub current: DashboardSettings,
}

impl SettingsDraft {
    pub fn new(saved: DashboardSettings) -> Self {
        Self {
            current: saved.clone(),
            saved,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.saved != self.current
    }

    pub fn saved(&self) -> &DashboardSettings {
        &self.saved
    }

    /// Validates the edits and makes them the saved copy.
    pub fn save(&mut self) -> Result<&DashboardSettings, SettingsError> {
        self.current.validate()?;
        self.saved = self.current.clone();
        Ok(&self.saved)
    }

    pub fn discard(&mut self) {
        self.current = self.saved.clone();
    }

    /// Puts the defaults into the draft. They are not saved until `save`.
    pub fn reset_to_defaults(&mut self) {
        self.current = DashboardSettings::default();
    }
}
