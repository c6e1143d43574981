//! Profile display host
//!
//! Serves display information captured from a device into a TOML (or JSON)
//! profile, so screens can be inspected away from the device itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::metrics::DisplayMetricsSnapshot;
use crate::screen::{PixelFormat, Rotation};

use super::{DeviceInfo, DisplayConfiguration, DisplayHost, HostCapabilities};

/// On-disk display profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayProfile {
    pub device: ProfileDevice,

    pub metrics: DisplayMetricsSnapshot,

    /// Total pixel size, for platforms that report it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<ProfileRealSize>,

    #[serde(default)]
    pub configuration: DisplayConfiguration,

    #[serde(default)]
    pub display: ProfileDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDevice {
    pub model: String,
    pub os_version: String,
    pub api_level: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProfileRealSize {
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDisplay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_degrees: Option<u32>,

    /// Raw pixel format code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_format: Option<i32>,

    pub refresh_rate: f32,
}

impl Default for ProfileDisplay {
    fn default() -> Self {
        Self {
            rotation_degrees: None,
            pixel_format: None,
            refresh_rate: 60.0,
        }
    }
}

/// Serialization format of a profile file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Toml,
    Json,
}

impl ProfileFormat {
    /// `.json` files are JSON, everything else is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ProfileFormat::Json,
            _ => ProfileFormat::Toml,
        }
    }
}

impl DisplayProfile {
    /// Parse profile content; `origin` only labels errors
    pub fn parse(content: &str, format: ProfileFormat, origin: &Path) -> Result<Self> {
        let profile: DisplayProfile = match format {
            ProfileFormat::Toml => toml::from_str(content)
                .map_err(|e| Error::profile_malformed(origin, e.to_string()))?,
            ProfileFormat::Json => serde_json::from_str(content)
                .map_err(|e| Error::profile_malformed(origin, e.to_string()))?,
        };

        if let Some(degrees) = profile.display.rotation_degrees {
            if Rotation::from_degrees(degrees).is_none() {
                return Err(Error::profile_malformed(
                    origin,
                    format!("rotation_degrees must be a multiple of 90, got {}", degrees),
                ));
            }
        }
        profile.metrics.validate()?;

        Ok(profile)
    }
}

/// Display host backed by a profile file
pub struct ProfileHost {
    path: PathBuf,
    profile: DisplayProfile,
}

impl ProfileHost {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "Loading display profile");

        let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
            path: path.clone(),
            source: e,
        })?;
        let profile = DisplayProfile::parse(&content, ProfileFormat::from_path(&path), &path)?;

        info!(
            path = %path.display(),
            model = %profile.device.model,
            api_level = profile.device.api_level,
            "Display profile loaded"
        );
        Ok(Self { path, profile })
    }

    #[cfg(test)]
    pub fn from_profile(profile: DisplayProfile) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            profile,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplayHost for ProfileHost {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn origin(&self) -> Option<String> {
        Some(self.path().display().to_string())
    }

    /// Platform capabilities, narrowed to what the profile actually recorded
    fn capabilities(&self) -> HostCapabilities {
        let p = &self.profile;
        let mut caps = HostCapabilities::for_api_level(p.device.api_level);
        caps.real_metrics &= p.real.is_some();
        caps.configured_dp &= p.configuration.screen_width_dp.is_some();
        caps.rotation &= p.display.rotation_degrees.is_some();
        caps.pixel_format &= p.display.pixel_format.is_some();
        caps
    }

    fn device(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo {
            model: self.profile.device.model.clone(),
            os_version: self.profile.device.os_version.clone(),
        })
    }

    fn metrics(&self) -> Result<DisplayMetricsSnapshot> {
        Ok(self.profile.metrics)
    }

    fn configuration(&self) -> Result<DisplayConfiguration> {
        Ok(self.profile.configuration.clone())
    }

    fn refresh_rate(&self) -> Result<f32> {
        Ok(self.profile.display.refresh_rate)
    }

    fn real_size(&self) -> Result<(u32, u32)> {
        self.profile
            .real
            .map(|r| (r.width_px, r.height_px))
            .ok_or_else(|| Error::NotSupported("profile has no [real] section".to_string()))
    }

    fn rotation(&self) -> Result<Rotation> {
        self.profile
            .display
            .rotation_degrees
            .and_then(Rotation::from_degrees)
            .ok_or_else(|| Error::NotSupported("profile has no rotation".to_string()))
    }

    fn pixel_format(&self) -> Result<PixelFormat> {
        self.profile
            .display
            .pixel_format
            .map(PixelFormat)
            .ok_or_else(|| Error::NotSupported("profile has no pixel format".to_string()))
    }
}
