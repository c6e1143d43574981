//! Display host trait definitions
//!
//! A host is wherever raw display metrics come from: a captured device
//! profile, the Linux DRM subsystem, or a mock for tests.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::DisplayMetricsSnapshot;
use crate::screen::{LongLayout, Orientation, PixelFormat, Rotation, SizeClass, Touchscreen};

// ─────────────────────────────────────────────────────────────────
// Capabilities
// ─────────────────────────────────────────────────────────────────

/// Optional queries a host can answer.
///
/// Queried once per collection; callers branch on it instead of probing
/// each optional query and catching failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// Platform API level the host reports (0 when not applicable)
    pub api_level: u32,

    /// Total (real) pixel size including system decorations
    pub real_metrics: bool,

    /// Configured width/smallest-width in dp
    pub configured_dp: bool,

    /// Current rotation in quarter turns
    pub rotation: bool,

    /// Pixel format of the display surface
    pub pixel_format: bool,
}

impl HostCapabilities {
    /// API level that introduced real (total) metrics
    pub const REAL_METRICS_API: u32 = 17;
    /// API level that introduced configured dp sizes
    pub const CONFIGURED_DP_API: u32 = 13;
    /// API level that introduced the rotation query
    pub const ROTATION_API: u32 = 8;
    /// API level from which the pixel format is no longer reported
    pub const PIXEL_FORMAT_REMOVED_API: u32 = 17;

    /// Capabilities a platform of the given API level offers
    pub fn for_api_level(api_level: u32) -> Self {
        Self {
            api_level,
            real_metrics: api_level >= Self::REAL_METRICS_API,
            configured_dp: api_level >= Self::CONFIGURED_DP_API,
            rotation: api_level >= Self::ROTATION_API,
            pixel_format: api_level < Self::PIXEL_FORMAT_REMOVED_API,
        }
    }

    /// No optional queries at all
    pub fn minimal() -> Self {
        Self {
            api_level: 0,
            real_metrics: false,
            configured_dp: false,
            rotation: false,
            pixel_format: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Host-provided data
// ─────────────────────────────────────────────────────────────────

/// Identity of the device that owns the display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device (or monitor) model name
    pub model: String,

    /// Operating system version
    pub os_version: String,
}

/// Screen-related configuration of the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfiguration {
    pub size_class: SizeClass,
    pub long_layout: LongLayout,

    /// Natural orientation of the device
    pub orientation: Orientation,

    pub touchscreen: Touchscreen,

    /// Configured screen width in dp (only read with `configured_dp`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_width_dp: Option<u32>,

    /// Configured smallest screen width in dp (only read with `configured_dp`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smallest_width_dp: Option<u32>,

    /// User font scale; scaled density is `density * font_scale`
    pub font_scale: f64,
}

impl Default for DisplayConfiguration {
    fn default() -> Self {
        Self {
            size_class: SizeClass::Undefined,
            long_layout: LongLayout::Undefined,
            orientation: Orientation::Undefined,
            touchscreen: Touchscreen::Undefined,
            screen_width_dp: None,
            smallest_width_dp: None,
            font_scale: 1.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// DisplayHost Trait
// ─────────────────────────────────────────────────────────────────

/// Source of raw display information.
///
/// Optional queries default to `NotSupported`; hosts that implement them
/// must also advertise them in `capabilities()`.
pub trait DisplayHost {
    /// Short host name for logs
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> HostCapabilities;

    /// Where this host reads from (profile path, connector), if meaningful
    fn origin(&self) -> Option<String> {
        None
    }

    fn device(&self) -> Result<DeviceInfo>;

    /// Usable display metrics
    fn metrics(&self) -> Result<DisplayMetricsSnapshot>;

    fn configuration(&self) -> Result<DisplayConfiguration>;

    /// Refresh rate in Hz
    fn refresh_rate(&self) -> Result<f32>;

    /// Total pixel size (width, height)
    fn real_size(&self) -> Result<(u32, u32)> {
        Err(Error::NotSupported(format!("{}: real metrics", self.name())))
    }

    fn rotation(&self) -> Result<Rotation> {
        Err(Error::NotSupported(format!("{}: rotation", self.name())))
    }

    fn pixel_format(&self) -> Result<PixelFormat> {
        Err(Error::NotSupported(format!("{}: pixel format", self.name())))
    }
}
