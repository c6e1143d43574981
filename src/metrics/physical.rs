//! Derived-metrics calculator
//!
//! Converts per-axis DPI and pixel counts into physical width, height and
//! diagonal size. Pure arithmetic, no state.

use serde::{Deserialize, Serialize};

use super::DisplayMetricsSnapshot;

/// Millimeters in one inch
pub const MILLIMETERS_PER_INCH: f64 = 25.4;

/// Reported DPI values below this are treated as missing
pub const MIN_VALID_DPI: f64 = 1.0;

/// Physical size of a display, derived from a metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    /// Physical width in inches
    pub width_in: f64,

    /// Physical height in inches
    pub height_in: f64,

    /// Diagonal in inches, rounded half-up to one decimal
    pub diagonal_in: f64,

    /// Diagonal in millimeters, rounded half-up to a whole number.
    ///
    /// Wide enough for any pair of `u32` pixel counts at the minimum DPI.
    pub diagonal_mm: u64,
}

impl PhysicalSize {
    /// Compute the physical size of a snapshot
    pub fn from_snapshot(snapshot: &DisplayMetricsSnapshot) -> Self {
        Self::compute(
            snapshot.width_px,
            snapshot.height_px,
            snapshot.xdpi,
            snapshot.ydpi,
            snapshot.density_dpi,
        )
    }

    /// Compute the physical size from raw values.
    ///
    /// `density_dpi` must be positive; it replaces any axis DPI below 1.0.
    pub fn compute(width_px: u32, height_px: u32, xdpi: f64, ydpi: f64, density_dpi: u32) -> Self {
        let xdpi = normalize_dpi(xdpi, density_dpi);
        let ydpi = normalize_dpi(ydpi, density_dpi);

        let width_in = f64::from(width_px) / xdpi;
        let height_in = f64::from(height_px) / ydpi;
        let raw_diagonal_in = (width_in * width_in + height_in * height_in).sqrt();

        Self {
            width_in,
            height_in,
            diagonal_in: round_to_tenths(raw_diagonal_in),
            diagonal_mm: round_to_whole(raw_diagonal_in * MILLIMETERS_PER_INCH) as u64,
        }
    }

    /// Unrounded diagonal in inches
    pub fn raw_diagonal_in(&self) -> f64 {
        (self.width_in * self.width_in + self.height_in * self.height_in).sqrt()
    }
}

/// Substitute the density bucket for a missing or bogus DPI reading.
///
/// Some manufacturers report 0.0 (or other sub-1.0 values) for xdpi/ydpi.
pub fn normalize_dpi(reported: f64, density_dpi: u32) -> f64 {
    if reported.is_nan() || reported < MIN_VALID_DPI {
        f64::from(density_dpi)
    } else {
        reported
    }
}

/// Round half-up to one decimal place: `floor(x * 10 + 0.5) / 10`
pub fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Round half-up to a whole number: `floor(x + 0.5)`
pub fn round_to_whole(value: f64) -> f64 {
    (value + 0.5).floor()
}
