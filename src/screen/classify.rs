//! Screen classifications and their display text
//!
//! Codes follow the Android platform constants, which is what captured
//! device profiles carry.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Size Classification
// ─────────────────────────────────────────────────────────────────

/// Coarse screen size classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Normal,
    Large,
    #[serde(rename = "xlarge")]
    XLarge,
    #[default]
    Undefined,
}

impl SizeClass {
    /// Classify from dp dimensions (either orientation)
    pub fn from_dp(width_dp: u32, height_dp: u32) -> Self {
        let (long, short) = long_short(width_dp, height_dp);
        if long >= 960 && short >= 720 {
            SizeClass::XLarge
        } else if long >= 640 && short >= 480 {
            SizeClass::Large
        } else if long >= 470 && short >= 320 {
            SizeClass::Normal
        } else {
            SizeClass::Small
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Normal => "normal",
            SizeClass::Large => "large",
            SizeClass::XLarge => "xlarge",
            SizeClass::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────────
// Density Classification
// ─────────────────────────────────────────────────────────────────

/// Named density buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DensityClass {
    Low,
    Medium,
    Tv,
    High,
    XHigh,
    XXHigh,
    XXXHigh,
    /// A bucket without a name (e.g. 280, 420)
    Other(u32),
}

impl DensityClass {
    pub const LOW_DPI: u32 = 120;
    pub const MEDIUM_DPI: u32 = 160;
    pub const TV_DPI: u32 = 213;
    pub const HIGH_DPI: u32 = 240;
    pub const XHIGH_DPI: u32 = 320;
    pub const XXHIGH_DPI: u32 = 480;
    pub const XXXHIGH_DPI: u32 = 640;

    /// Named buckets in ascending order
    const BUCKETS: [u32; 7] = [
        Self::LOW_DPI,
        Self::MEDIUM_DPI,
        Self::TV_DPI,
        Self::HIGH_DPI,
        Self::XHIGH_DPI,
        Self::XXHIGH_DPI,
        Self::XXXHIGH_DPI,
    ];

    pub fn from_density_dpi(dpi: u32) -> Self {
        match dpi {
            Self::LOW_DPI => DensityClass::Low,
            Self::MEDIUM_DPI => DensityClass::Medium,
            Self::TV_DPI => DensityClass::Tv,
            Self::HIGH_DPI => DensityClass::High,
            Self::XHIGH_DPI => DensityClass::XHigh,
            Self::XXHIGH_DPI => DensityClass::XXHigh,
            Self::XXXHIGH_DPI => DensityClass::XXXHigh,
            other => DensityClass::Other(other),
        }
    }

    /// Pick the named bucket closest to a measured DPI; ties go to the lower bucket
    pub fn nearest_bucket(dpi: f64) -> u32 {
        if !(dpi.is_finite() && dpi > 0.0) {
            return Self::MEDIUM_DPI;
        }
        Self::BUCKETS
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (f64::from(*a) - dpi).abs();
                let db = (f64::from(*b) - dpi).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(Self::MEDIUM_DPI)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DensityClass::Low => "ldpi",
            DensityClass::Medium => "mdpi",
            DensityClass::Tv => "tvdpi",
            DensityClass::High => "hdpi",
            DensityClass::XHigh => "xhdpi",
            DensityClass::XXHigh => "xxhdpi",
            DensityClass::XXXHigh => "xxxhdpi",
            DensityClass::Other(_) => "unknown",
        }
    }
}

impl fmt::Display for DensityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────────
// Long / Wide Layout
// ─────────────────────────────────────────────────────────────────

/// Whether the screen is significantly taller/wider than a baseline screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LongLayout {
    Yes,
    No,
    #[default]
    Undefined,
}

impl LongLayout {
    /// Long when the long side is at least 5/3 of the short side (in dp)
    pub fn from_dp(width_dp: u32, height_dp: u32) -> Self {
        let (long, short) = long_short(width_dp, height_dp);
        if u64::from(long) * 3 / 5 + 1 >= u64::from(short) {
            LongLayout::Yes
        } else {
            LongLayout::No
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LongLayout::Yes => "Yes",
            LongLayout::No => "No",
            LongLayout::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for LongLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────────
// Orientation and Rotation
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
    #[default]
    Undefined,
}

impl Orientation {
    pub fn from_size(width: u32, height: u32) -> Self {
        use std::cmp::Ordering;
        match width.cmp(&height) {
            Ordering::Less => Orientation::Portrait,
            Ordering::Greater => Orientation::Landscape,
            Ordering::Equal => Orientation::Square,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
            Orientation::Square => "Square",
            Orientation::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Current screen rotation, in quarter turns from the natural orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_quarter_turns(turns: u32) -> Self {
        match turns % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Parse a rotation given in degrees; only multiples of 90 are accepted
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        if degrees % 90 == 0 {
            Some(Self::from_quarter_turns(degrees / 90))
        } else {
            None
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

// ─────────────────────────────────────────────────────────────────
// Touchscreen
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Touchscreen {
    Finger,
    Stylus,
    #[serde(alias = "notouch")]
    None,
    #[default]
    Undefined,
}

impl Touchscreen {
    pub fn name(&self) -> &'static str {
        match self {
            Touchscreen::Finger => "Finger",
            Touchscreen::Stylus => "Stylus",
            Touchscreen::None => "None",
            Touchscreen::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for Touchscreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────────
// Pixel Format
// ─────────────────────────────────────────────────────────────────

/// A raw pixel/image format code with its known name, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelFormat(pub i32);

impl PixelFormat {
    pub fn code(&self) -> i32 {
        self.0
    }

    /// Name of a known format code, `None` for codes we cannot name
    pub fn known_name(&self) -> Option<&'static str> {
        let name = match self.0 {
            -3 => "TRANSLUCENT",
            -2 => "TRANSPARENT",
            -1 => "OPAQUE",
            0 => "UNKNOWN",
            1 => "RGBA_8888",
            2 => "RGBX_8888",
            3 => "RGB_888",
            4 => "RGB_565",
            5 => "BGRA_8888",
            6 => "RGBA_5551",
            7 => "RGBA_4444",
            8 => "A_8",
            9 => "L_8",
            0x0A => "LA_88",
            0x0B => "RGB_332",
            0x10 => "NV16",
            0x11 => "NV21",
            0x14 => "YUY2",
            0x20 => "RAW_SENSOR",
            0x23 => "YUV_420_888",
            0x25 => "RAW10",
            0x100 => "JPEG",
            0x3231_5659 => "YV12",
            _ => return None,
        };
        Some(name)
    }

    pub fn name(&self) -> &'static str {
        self.known_name().unwrap_or("Unknown")
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn long_short(a: u32, b: u32) -> (u32, u32) {
    if a >= b {
        (a, b)
    } else {
        (b, a)
    }
}
