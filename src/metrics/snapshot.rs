//! Raw display metrics as reported by a host

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Density bucket of a baseline (mdpi) display; density 1.0 corresponds to it
pub const BASELINE_DENSITY_DPI: u32 = 160;

/// One read of the display metrics
///
/// Built once per collection and never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetricsSnapshot {
    /// Width in pixels
    pub width_px: u32,

    /// Height in pixels
    pub height_px: u32,

    /// Nominal horizontal dots per inch, as reported (may be 0.0 on broken devices)
    pub xdpi: f64,

    /// Nominal vertical dots per inch, as reported
    pub ydpi: f64,

    /// Logical density scalar used for px/dp conversion
    pub density: f64,

    /// Density bucket (120, 160, 240, ...)
    pub density_dpi: u32,
}

impl DisplayMetricsSnapshot {
    /// Check the preconditions the calculator relies on.
    ///
    /// DPI values of zero are accepted: the calculator substitutes the
    /// density bucket for them.
    pub fn validate(&self) -> Result<()> {
        if self.width_px == 0 {
            return Err(Error::metrics_invalid("width_px", "must be positive"));
        }
        if self.height_px == 0 {
            return Err(Error::metrics_invalid("height_px", "must be positive"));
        }
        if self.density_dpi == 0 {
            return Err(Error::metrics_invalid("density_dpi", "must be positive"));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(Error::metrics_invalid(
                "density",
                format!("must be a positive number, got {}", self.density),
            ));
        }
        for (field, dpi) in [("xdpi", self.xdpi), ("ydpi", self.ydpi)] {
            if !(dpi.is_finite() && dpi >= 0.0) {
                return Err(Error::metrics_invalid(
                    field,
                    format!("must be a non-negative number, got {}", dpi),
                ));
            }
        }
        Ok(())
    }
}
