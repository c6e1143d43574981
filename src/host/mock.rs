//! Mock display host
//!
//! A deterministic reference phone, used by `--source mock` and tests.

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::metrics::DisplayMetricsSnapshot;
use crate::screen::{LongLayout, Orientation, PixelFormat, Rotation, SizeClass, Touchscreen};

use super::{DeviceInfo, DisplayConfiguration, DisplayHost, HostCapabilities};

/// Configuration for mock host behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub metrics: DisplayMetricsSnapshot,
    pub capabilities: HostCapabilities,
    pub real_size: (u32, u32),
    pub rotation: Rotation,
    pub pixel_format: PixelFormat,
    pub refresh_rate: f32,
    pub configuration: DisplayConfiguration,

    /// Make `metrics()` fail, for error-path tests
    pub fail_metrics: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            metrics: DisplayMetricsSnapshot {
                width_px: 1080,
                height_px: 1920,
                xdpi: 424.07992,
                ydpi: 424.07992,
                density: 2.65,
                density_dpi: 480,
            },
            capabilities: HostCapabilities::for_api_level(28),
            real_size: (1080, 2040),
            rotation: Rotation::Deg0,
            pixel_format: PixelFormat(1),
            refresh_rate: 60.0,
            configuration: DisplayConfiguration {
                size_class: SizeClass::Normal,
                long_layout: LongLayout::Yes,
                orientation: Orientation::Portrait,
                touchscreen: Touchscreen::Finger,
                screen_width_dp: Some(408),
                smallest_width_dp: Some(408),
                font_scale: 1.0,
            },
            fail_metrics: false,
        }
    }
}

/// Track query counts for verification
#[derive(Debug, Default, Clone, Copy)]
pub struct CallCounts {
    pub capabilities: u32,
    pub metrics: u32,
    pub real_size: u32,
    pub rotation: u32,
    pub pixel_format: u32,
}

pub struct MockHost {
    config: MockConfig,
    calls: Mutex<CallCounts>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(CallCounts::default()),
        }
    }

    #[cfg(test)]
    pub fn call_counts(&self) -> CallCounts {
        *self.calls.lock()
    }
}

impl Drop for MockHost {
    fn drop(&mut self) {
        let calls = *self.calls.get_mut();
        debug!(
            capabilities = calls.capabilities,
            metrics = calls.metrics,
            real_size = calls.real_size,
            rotation = calls.rotation,
            pixel_format = calls.pixel_format,
            "Mock host queries"
        );
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayHost for MockHost {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn capabilities(&self) -> HostCapabilities {
        self.calls.lock().capabilities += 1;
        self.config.capabilities
    }

    fn device(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo {
            model: "Reference Phone".to_string(),
            os_version: "9".to_string(),
        })
    }

    fn metrics(&self) -> Result<DisplayMetricsSnapshot> {
        self.calls.lock().metrics += 1;
        if self.config.fail_metrics {
            return Err(Error::probe_failed(self.name(), "simulated metrics failure"));
        }
        Ok(self.config.metrics)
    }

    fn configuration(&self) -> Result<DisplayConfiguration> {
        Ok(self.config.configuration.clone())
    }

    fn refresh_rate(&self) -> Result<f32> {
        Ok(self.config.refresh_rate)
    }

    fn real_size(&self) -> Result<(u32, u32)> {
        self.calls.lock().real_size += 1;
        Ok(self.config.real_size)
    }

    fn rotation(&self) -> Result<Rotation> {
        self.calls.lock().rotation += 1;
        Ok(self.config.rotation)
    }

    fn pixel_format(&self) -> Result<PixelFormat> {
        self.calls.lock().pixel_format += 1;
        Ok(self.config.pixel_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_defaults() {
        let host = MockHost::new();
        let metrics = host.metrics().unwrap();
        assert_eq!(metrics.width_px, 1080);
        assert_eq!(metrics.density_dpi, 480);
        assert!(metrics.validate().is_ok());
        assert_eq!(host.call_counts().metrics, 1);
    }

    #[test]
    fn test_mock_failure() {
        let host = MockHost::with_config(MockConfig {
            fail_metrics: true,
            ..Default::default()
        });
        assert!(host.metrics().is_err());
    }
}
