//! Runtime configuration, loaded from TOML. Every field has a default so an
//! empty file (or no file at all) yields a working setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use feedhub_platform::Rgba;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, Result};

pub const DEFAULT_PALETTE: [&str; 6] = [
    "#ff6b6b", "#ffd166", "#06d6a0", "#118ab2", "#5a189a", "#ff8fab",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub api: ApiConfig,
    pub confetti: ConfettiConfig,
    pub celebration: CelebrationConfig,
    pub shell: ShellConfig,
}

impl HubConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/api/feedback/".into(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Physics constants for the confetti burst. Per-frame constants are
/// calibrated against `frame_unit_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub default_count: usize,
    pub palette: Vec<String>,
    pub gravity: f32,
    pub friction: f32,
    pub decay: f32,
    pub frame_unit_ms: f32,
    pub cutoff_secs: f32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            default_count: 120,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            gravity: 0.18,
            friction: 0.998,
            decay: 0.008,
            frame_unit_ms: 16.0,
            cutoff_secs: 6.0,
        }
    }
}

impl ConfettiConfig {
    /// Parsed palette. Unparseable entries are skipped; an empty result falls
    /// back to the built-in palette.
    pub fn palette(&self) -> Vec<Rgba> {
        let parsed: Vec<Rgba> = self
            .palette
            .iter()
            .filter_map(|hex| match parse_color(hex) {
                Ok(color) => Some(color),
                Err(err) => {
                    warn!("ignoring palette entry: {err}");
                    None
                }
            })
            .collect();
        if parsed.is_empty() {
            default_palette()
        } else {
            parsed
        }
    }

    /// Falls back to 16 ms when the configured unit is not a positive time.
    pub fn frame_unit(&self) -> Duration {
        let unit = if self.frame_unit_ms.is_finite() {
            millis(self.frame_unit_ms)
        } else {
            Duration::ZERO
        };
        if unit.is_zero() {
            warn!("frame_unit_ms must be positive, got {}; using 16", self.frame_unit_ms);
            return Duration::from_millis(16);
        }
        unit
    }

    pub fn cutoff(&self) -> Duration {
        millis(self.cutoff_secs * 1000.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub base_count: usize,
    pub per_star: usize,
    pub banner_secs: f32,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            base_count: 60,
            per_star: 25,
            banner_secs: 5.0,
        }
    }
}

impl CelebrationConfig {
    pub fn confetti_count(&self, rating: u8) -> usize {
        self.base_count + rating as usize * self.per_star
    }

    pub fn banner_duration(&self) -> Duration {
        millis(self.banner_secs * 1000.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub toast_secs: f32,
    pub preferences_path: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            toast_secs: 2.5,
            preferences_path: None,
        }
    }
}

impl ShellConfig {
    pub fn toast_duration(&self) -> Duration {
        millis(self.toast_secs * 1000.0)
    }
}

fn millis(ms: f32) -> Duration {
    Duration::from_micros((ms.max(0.0) * 1000.0).round() as u64)
}

pub fn default_palette() -> Vec<Rgba> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|hex| parse_color(hex).ok())
        .collect()
}

/// Parses `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(hex: &str) -> Result<Rgba> {
    let invalid = || CoreError::InvalidColor(hex.to_string());
    let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    let a = if digits.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a,
    })
}
