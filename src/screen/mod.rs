//! Screen model
//!
//! `ScreenInfo` is everything the reports show about one display, collected
//! once from a [`DisplayHost`] and immutable afterward.

mod classify;

pub use classify::*;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::Result;
use crate::host::{DeviceInfo, DisplayHost, HostCapabilities};
use crate::metrics::{DisplayMetricsSnapshot, PhysicalSize};

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelSize {
    pub width_px: u32,
    pub height_px: u32,
}

/// Current orientation as the host can report it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentOrientation {
    /// Rotation from the natural orientation
    Rotation(Rotation),
    /// Host cannot report rotation; the configured orientation stands in
    Configured(Orientation),
}

impl fmt::Display for CurrentOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentOrientation::Rotation(r) => write!(f, "{}", r),
            CurrentOrientation::Configured(o) => write!(f, "{}", o),
        }
    }
}

/// Everything known about one display
#[derive(Debug, Clone, Serialize)]
pub struct ScreenInfo {
    /// Host the information came from
    pub source: &'static str,
    /// Profile path or connector the host read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub device: DeviceInfo,
    pub capabilities: HostCapabilities,

    pub size_class: SizeClass,
    #[serde(serialize_with = "as_display")]
    pub density_class: DensityClass,

    /// Usable metrics as reported
    pub metrics: DisplayMetricsSnapshot,
    /// Total size, when the host reports it
    pub real_size: Option<PixelSize>,

    pub width_dp: u32,
    pub height_dp: u32,
    pub smallest_dp: u32,

    /// Density scaled by the user font scale, at single precision
    pub scaled_density: f32,

    pub physical: PhysicalSize,

    pub long_layout: LongLayout,
    pub natural_orientation: Orientation,
    #[serde(serialize_with = "as_display")]
    pub current_orientation: CurrentOrientation,
    pub touchscreen: Touchscreen,

    /// Pixel format, when the host reports it
    pub pixel_format: Option<PixelFormat>,

    /// Refresh rate in Hz
    pub refresh_rate: f32,

    pub captured_at: DateTime<Utc>,
}

impl ScreenInfo {
    /// Collect display information from a host.
    ///
    /// Capabilities are read exactly once; optional queries are only issued
    /// for capabilities the host advertises.
    pub fn collect(host: &dyn DisplayHost) -> Result<Self> {
        let caps = host.capabilities();
        debug!(host = host.name(), capabilities = ?caps, "Collecting screen info");

        let device = host.device()?;
        let metrics = host.metrics()?;
        metrics.validate()?;
        let config = host.configuration()?;

        let real_size = if caps.real_metrics {
            let (width_px, height_px) = host.real_size()?;
            Some(PixelSize {
                width_px,
                height_px,
            })
        } else {
            None
        };

        // dp sizes prefer the total size when the host reports it
        let (dp_width_px, dp_height_px) = match real_size {
            Some(real) => (real.width_px, real.height_px),
            None => (metrics.width_px, metrics.height_px),
        };
        let height_dp = px_to_dp(dp_height_px, metrics.density);
        let computed_width_dp = px_to_dp(dp_width_px, metrics.density);

        let configured = if caps.configured_dp {
            match (config.screen_width_dp, config.smallest_width_dp) {
                (Some(width), Some(smallest)) => Some((width, smallest)),
                _ => {
                    warn!(host = host.name(), "Configured dp advertised but not reported, computing it");
                    None
                }
            }
        } else {
            None
        };
        let (width_dp, smallest_dp) = configured
            .unwrap_or((computed_width_dp, computed_width_dp.min(height_dp)));

        let current_orientation = if caps.rotation {
            CurrentOrientation::Rotation(host.rotation()?)
        } else {
            CurrentOrientation::Configured(config.orientation)
        };

        let pixel_format = if caps.pixel_format {
            Some(host.pixel_format()?)
        } else {
            None
        };

        let info = Self {
            source: host.name(),
            origin: host.origin(),
            device,
            capabilities: caps,
            size_class: config.size_class,
            density_class: DensityClass::from_density_dpi(metrics.density_dpi),
            metrics,
            real_size,
            width_dp,
            height_dp,
            smallest_dp,
            scaled_density: metrics.density as f32 * config.font_scale as f32,
            physical: PhysicalSize::from_snapshot(&metrics),
            long_layout: config.long_layout,
            natural_orientation: config.orientation,
            current_orientation,
            touchscreen: config.touchscreen,
            pixel_format,
            refresh_rate: host.refresh_rate()?,
            captured_at: Utc::now(),
        };

        debug!(
            model = %info.device.model,
            diagonal_in = info.physical.diagonal_in,
            diagonal_mm = info.physical.diagonal_mm,
            "Screen info collected"
        );
        Ok(info)
    }

    /// Pixel format text: its name, or "Unsupported" when not reported
    pub fn pixel_format_text(&self) -> &'static str {
        match self.pixel_format {
            Some(format) => format.name(),
            None => "Unsupported",
        }
    }
}

/// Convert pixels to dp, rounding half-up: `(int)(px / density + 0.5)`
pub fn px_to_dp(px: u32, density: f64) -> u32 {
    (f64::from(px) / density + 0.5) as u32
}

fn as_display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::{MockConfig, MockHost};

    #[test]
    fn test_px_to_dp() {
        assert_eq!(px_to_dp(1080, 2.65), 408);
        assert_eq!(px_to_dp(2040, 2.65), 770);
        assert_eq!(px_to_dp(480, 1.0), 480);
        // 1.5 rounds up
        assert_eq!(px_to_dp(3, 2.0), 2);
    }

    #[test]
    fn test_collect_modern_host() {
        let host = MockHost::new();
        let info = ScreenInfo::collect(&host).unwrap();

        assert_eq!(info.source, "mock");
        assert_eq!(info.origin, None);
        assert_eq!(info.device.model, "Reference Phone");
        assert_eq!(info.density_class, DensityClass::XXHigh);
        assert_eq!(
            info.real_size,
            Some(PixelSize {
                width_px: 1080,
                height_px: 2040
            })
        );
        assert_eq!(info.width_dp, 408);
        assert_eq!(info.height_dp, 770);
        assert_eq!(info.smallest_dp, 408);
        assert_eq!(info.physical.diagonal_in, 5.2);
        assert_eq!(info.physical.diagonal_mm, 132);
        assert_eq!(info.current_orientation.to_string(), "0");
        // API 28 no longer reports the pixel format
        assert_eq!(info.pixel_format, None);
        assert_eq!(info.pixel_format_text(), "Unsupported");
    }

    #[test]
    fn test_capabilities_queried_once() {
        let host = MockHost::new();
        ScreenInfo::collect(&host).unwrap();

        let calls = host.call_counts();
        assert_eq!(calls.capabilities, 1);
        assert_eq!(calls.metrics, 1);
        assert_eq!(calls.real_size, 1);
        assert_eq!(calls.rotation, 1);
        assert_eq!(calls.pixel_format, 0);
    }

    #[test]
    fn test_collect_legacy_host() {
        let mut config = MockConfig::default();
        config.capabilities = HostCapabilities::for_api_level(4);
        config.metrics = DisplayMetricsSnapshot {
            width_px: 480,
            height_px: 800,
            xdpi: 0.0,
            ydpi: 0.0,
            density: 1.0,
            density_dpi: 160,
        };
        config.configuration.orientation = Orientation::Portrait;
        config.pixel_format = PixelFormat(4);
        let host = MockHost::with_config(config);

        let info = ScreenInfo::collect(&host).unwrap();

        assert_eq!(info.real_size, None);
        // Computed from the usable size, configured dp ignored
        assert_eq!(info.width_dp, 480);
        assert_eq!(info.height_dp, 800);
        assert_eq!(info.smallest_dp, 480);
        assert_eq!(info.current_orientation, CurrentOrientation::Configured(Orientation::Portrait));
        assert_eq!(info.current_orientation.to_string(), "Portrait");
        assert_eq!(info.pixel_format_text(), "RGB_565");
        assert_eq!(info.physical.width_in, 3.0);
        assert_eq!(info.physical.height_in, 5.0);
        assert_eq!(info.physical.diagonal_in, 5.8);
        assert_eq!(info.physical.diagonal_mm, 148);

        let calls = host.call_counts();
        assert_eq!(calls.real_size, 0);
        assert_eq!(calls.rotation, 0);
        assert_eq!(calls.pixel_format, 1);
    }

    #[test]
    fn test_unknown_pixel_format() {
        let mut config = MockConfig::default();
        config.capabilities = HostCapabilities::for_api_level(10);
        config.pixel_format = PixelFormat(999);
        let info = ScreenInfo::collect(&MockHost::with_config(config)).unwrap();
        assert_eq!(info.pixel_format_text(), "Unknown");
    }

    #[test]
    fn test_scaled_density() {
        let mut config = MockConfig::default();
        config.configuration.font_scale = 1.3;
        let info = ScreenInfo::collect(&MockHost::with_config(config)).unwrap();
        assert!((info.scaled_density - 3.445).abs() < 1e-6);
        assert_eq!(info.scaled_density.to_string(), "3.445");
    }

    #[test]
    fn test_invalid_metrics_rejected() {
        let mut config = MockConfig::default();
        config.metrics.density = 0.0;
        let err = ScreenInfo::collect(&MockHost::with_config(config)).unwrap_err();
        assert!(matches!(err, Error::MetricsInvalid { .. }));
    }

    #[test]
    fn test_probe_failure_propagates() {
        let host = MockHost::with_config(MockConfig {
            fail_metrics: true,
            ..Default::default()
        });
        assert!(matches!(
            ScreenInfo::collect(&host),
            Err(Error::ProbeFailed { .. })
        ));
    }

    #[test]
    fn test_json_uses_display_names() {
        let info = ScreenInfo::collect(&MockHost::new()).unwrap();
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["density_class"], "xxhdpi");
        assert_eq!(value["size_class"], "normal");
        assert_eq!(value["current_orientation"], "0");
        assert_eq!(value["physical"]["diagonal_mm"], 132);
    }
}
