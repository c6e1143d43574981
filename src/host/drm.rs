//! Linux DRM display host
//!
//! Reads connector state from sysfs (`/sys/class/drm/card*-*`): the
//! preferred mode for pixel size and the EDID blob for physical size and
//! refresh rate. Density values are derived the way a phone would report
//! them, so desktop monitors show up with the same fields.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::metrics::{DisplayMetricsSnapshot, BASELINE_DENSITY_DPI, MILLIMETERS_PER_INCH};
use crate::screen::{px_to_dp, DensityClass, LongLayout, Orientation, SizeClass, Touchscreen};

use super::edid::Edid;
use super::{DeviceInfo, DisplayConfiguration, DisplayHost, HostCapabilities};

/// Default sysfs root for DRM connectors
pub const DEFAULT_DRM_ROOT: &str = "/sys/class/drm";

/// A connected DRM output
pub struct DrmHost {
    connector: String,
    mode: (u32, u32),
    edid: Option<Edid>,
}

impl DrmHost {
    /// Find the first connected output under `root`, optionally restricted
    /// to a connector name such as `HDMI-A-1` or `eDP-1`
    pub fn discover(root: impl AsRef<Path>, connector: Option<&str>) -> Result<Self> {
        let root = root.as_ref();
        let entries = fs::read_dir(root).map_err(|e| {
            Error::host_unavailable(format!("cannot read {}: {}", root.display(), e))
        })?;

        let mut outputs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| connector_name(path).is_some())
            .collect();
        outputs.sort();

        for path in outputs {
            let Some(name) = connector_name(&path) else {
                continue;
            };
            if let Some(wanted) = connector {
                if !name.eq_ignore_ascii_case(wanted) {
                    continue;
                }
            }

            let status = read_trimmed(&path.join("status")).unwrap_or_default();
            debug!(connector = %name, status = %status, "Found DRM connector");
            if status != "connected" {
                continue;
            }

            return Self::open(&path, name);
        }

        Err(Error::host_unavailable(match connector {
            Some(wanted) => format!("connector {} is not connected under {}", wanted, root.display()),
            None => format!("no connected display under {}", root.display()),
        }))
    }

    fn open(path: &Path, connector: String) -> Result<Self> {
        let modes = read_trimmed(&path.join("modes")).map_err(|e| {
            Error::probe_failed("drm", format!("{}: cannot read modes: {}", connector, e))
        })?;
        let mode = modes
            .lines()
            .next()
            .and_then(parse_mode)
            .ok_or_else(|| Error::probe_failed("drm", format!("{}: no usable mode", connector)))?;

        let edid = match fs::read(path.join("edid")) {
            Ok(bytes) if !bytes.is_empty() => Some(Edid::parse(&bytes)?),
            Ok(_) => None,
            Err(e) => {
                warn!(connector = %connector, error = %e, "EDID not readable, physical size unknown");
                None
            }
        };

        info!(
            connector = %connector,
            width = mode.0,
            height = mode.1,
            monitor = ?edid.as_ref().map(Edid::model),
            "Using DRM output"
        );

        Ok(Self {
            connector,
            mode,
            edid,
        })
    }

    pub fn connector(&self) -> &str {
        &self.connector
    }

    /// Measured DPI per axis, 0.0 when the monitor reports no size
    fn measured_dpi(&self) -> (f64, f64) {
        let (width_px, height_px) = self.mode;
        match self.edid.as_ref().and_then(Edid::image_size_mm) {
            Some((width_mm, height_mm)) => (
                f64::from(width_px) / (f64::from(width_mm) / MILLIMETERS_PER_INCH),
                f64::from(height_px) / (f64::from(height_mm) / MILLIMETERS_PER_INCH),
            ),
            None => (0.0, 0.0),
        }
    }

    fn density_dpi(&self) -> u32 {
        let (xdpi, ydpi) = self.measured_dpi();
        if xdpi > 0.0 && ydpi > 0.0 {
            DensityClass::nearest_bucket((xdpi + ydpi) / 2.0)
        } else {
            BASELINE_DENSITY_DPI
        }
    }
}

impl DisplayHost for DrmHost {
    fn name(&self) -> &'static str {
        "drm"
    }

    fn origin(&self) -> Option<String> {
        Some(self.connector().to_string())
    }

    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities {
            real_metrics: true,
            ..HostCapabilities::minimal()
        }
    }

    fn device(&self) -> Result<DeviceInfo> {
        let model = match &self.edid {
            Some(edid) => edid.model(),
            None => self.connector.clone(),
        };
        Ok(DeviceInfo {
            model,
            os_version: os_version(),
        })
    }

    fn metrics(&self) -> Result<DisplayMetricsSnapshot> {
        let (xdpi, ydpi) = self.measured_dpi();
        let density_dpi = self.density_dpi();
        let snapshot = DisplayMetricsSnapshot {
            width_px: self.mode.0,
            height_px: self.mode.1,
            xdpi,
            ydpi,
            density: f64::from(density_dpi) / f64::from(BASELINE_DENSITY_DPI),
            density_dpi,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn configuration(&self) -> Result<DisplayConfiguration> {
        let (width_px, height_px) = self.mode;
        let density = f64::from(self.density_dpi()) / f64::from(BASELINE_DENSITY_DPI);
        let width_dp = px_to_dp(width_px, density);
        let height_dp = px_to_dp(height_px, density);

        Ok(DisplayConfiguration {
            size_class: SizeClass::from_dp(width_dp, height_dp),
            long_layout: LongLayout::from_dp(width_dp, height_dp),
            orientation: Orientation::from_size(width_px, height_px),
            touchscreen: Touchscreen::Undefined,
            ..DisplayConfiguration::default()
        })
    }

    fn refresh_rate(&self) -> Result<f32> {
        Ok(self
            .edid
            .as_ref()
            .and_then(|e| e.preferred_timing)
            .map(|t| t.refresh_rate())
            .unwrap_or(0.0))
    }

    fn real_size(&self) -> Result<(u32, u32)> {
        Ok(self.mode)
    }
}

/// `card0-HDMI-A-1` -> `HDMI-A-1`; plain `card0` has no connector
fn connector_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    if !file_name.starts_with("card") {
        return None;
    }
    file_name.split_once('-').map(|(_, name)| name.to_string())
}

/// Parse a sysfs mode line such as `1920x1080` or `1920x1080i`
fn parse_mode(line: &str) -> Option<(u32, u32)> {
    let (w, h) = line.trim().split_once('x')?;
    let h: String = h.chars().take_while(|c| c.is_ascii_digit()).collect();
    let width = w.parse().ok()?;
    let height = h.parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

fn read_trimmed(path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path).map(|s| s.trim().to_string())
}

/// OS version string from os-release, falling back to the OS name
fn os_version() -> String {
    fs::read_to_string("/etc/os-release")
        .ok()
        .and_then(|content| {
            content
                .lines()
                .find(|l| l.starts_with("PRETTY_NAME="))
                .map(|l| l.trim_start_matches("PRETTY_NAME=").trim_matches('"').to_string())
        })
        .unwrap_or_else(|| std::env::consts::OS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::edid::sample_edid;
    use crate::metrics::PhysicalSize;
    use tempfile::TempDir;

    fn add_connector(root: &Path, name: &str, status: &str, modes: &str, edid: &[u8]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("status"), format!("{}\n", status)).unwrap();
        fs::write(dir.join("modes"), modes).unwrap();
        fs::write(dir.join("edid"), edid).unwrap();
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("1920x1080"), Some((1920, 1080)));
        assert_eq!(parse_mode("1920x1080i\n"), Some((1920, 1080)));
        assert_eq!(parse_mode("garbage"), None);
        assert_eq!(parse_mode("0x0"), None);
    }

    #[test]
    fn test_connector_name() {
        assert_eq!(
            connector_name(Path::new("/sys/class/drm/card0-HDMI-A-1")),
            Some("HDMI-A-1".to_string())
        );
        assert_eq!(connector_name(Path::new("/sys/class/drm/card0")), None);
        assert_eq!(connector_name(Path::new("/sys/class/drm/renderD128")), None);
    }

    #[test]
    fn test_discover_connected_monitor() {
        let root = TempDir::new().unwrap();
        add_connector(root.path(), "card0-DP-1", "disconnected", "", &[]);
        add_connector(root.path(), "card0-HDMI-A-1", "connected", "1920x1080\n1280x720\n", &sample_edid());

        let host = DrmHost::discover(root.path(), None).unwrap();
        assert_eq!(host.connector(), "HDMI-A-1");
        assert_eq!(host.origin().as_deref(), Some("HDMI-A-1"));
        assert_eq!(host.device().unwrap().model, "DELL U2414H");
        assert!((host.refresh_rate().unwrap() - 60.0).abs() < 0.01);

        let metrics = host.metrics().unwrap();
        assert_eq!((metrics.width_px, metrics.height_px), (1920, 1080));
        assert!((metrics.xdpi - 92.54).abs() < 0.01);
        assert_eq!(metrics.density_dpi, 120);
        assert_eq!(metrics.density, 0.75);

        let size = PhysicalSize::from_snapshot(&metrics);
        assert_eq!(size.diagonal_in, 23.8);
        assert_eq!(size.diagonal_mm, 604);

        let config = host.configuration().unwrap();
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.size_class, SizeClass::XLarge);
        assert_eq!(config.long_layout, LongLayout::Yes);
    }

    #[test]
    fn test_missing_edid_uses_density_fallback() {
        let root = TempDir::new().unwrap();
        add_connector(root.path(), "card1-eDP-1", "connected", "1280x800\n", &[]);

        let host = DrmHost::discover(root.path(), Some("edp-1")).unwrap();
        let metrics = host.metrics().unwrap();
        assert_eq!(metrics.xdpi, 0.0);
        assert_eq!(metrics.density_dpi, 160);

        // 1280/160 x 800/160 inches
        let size = PhysicalSize::from_snapshot(&metrics);
        assert_eq!(size.width_in, 8.0);
        assert_eq!(size.height_in, 5.0);
        assert_eq!(host.refresh_rate().unwrap(), 0.0);
        assert_eq!(host.device().unwrap().model, "eDP-1");
    }

    #[test]
    fn test_connector_filter_without_match() {
        let root = TempDir::new().unwrap();
        add_connector(root.path(), "card0-HDMI-A-1", "connected", "1920x1080\n", &sample_edid());

        let err = DrmHost::discover(root.path(), Some("DP-2")).err().unwrap();
        assert!(matches!(err, Error::HostUnavailable { .. }));
    }

    #[test]
    fn test_corrupt_edid_is_an_error() {
        let root = TempDir::new().unwrap();
        add_connector(root.path(), "card0-HDMI-A-1", "connected", "1920x1080\n", &[0x00, 0xFF, 0x12]);

        let err = DrmHost::discover(root.path(), None).err().unwrap();
        assert!(matches!(err, Error::EdidMalformed { .. }));
    }

    #[test]
    fn test_missing_root() {
        let err = DrmHost::discover("/nonexistent/drm", None).err().unwrap();
        assert!(matches!(err, Error::HostUnavailable { .. }));
    }
}
