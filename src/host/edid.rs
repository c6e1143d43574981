//! EDID base block parsing
//!
//! Only the fields needed for physical size and refresh rate are decoded.

use crate::error::{Error, Result};

/// Size of the EDID base block
pub const EDID_BLOCK_LEN: usize = 128;

const EDID_HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
const DESCRIPTOR_OFFSETS: [usize; 4] = [54, 72, 90, 108];
const DESCRIPTOR_LEN: usize = 18;
const MONITOR_NAME_TAG: u8 = 0xFC;

/// Preferred (first) detailed timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailedTiming {
    /// Pixel clock in Hz
    pub pixel_clock_hz: u64,
    pub h_active: u32,
    pub h_blank: u32,
    pub v_active: u32,
    pub v_blank: u32,
    /// Image size in millimeters (0 when unknown)
    pub width_mm: u32,
    pub height_mm: u32,
}

impl DetailedTiming {
    /// Vertical refresh rate in Hz
    pub fn refresh_rate(&self) -> f32 {
        let total = u64::from(self.h_active + self.h_blank) * u64::from(self.v_active + self.v_blank);
        if total == 0 {
            return 0.0;
        }
        (self.pixel_clock_hz as f64 / total as f64) as f32
    }
}

/// Decoded EDID base block
#[derive(Debug, Clone, PartialEq)]
pub struct Edid {
    /// Three-letter PNP manufacturer id
    pub manufacturer: String,
    pub product_code: u16,
    /// Monitor name from the 0xFC descriptor
    pub monitor_name: Option<String>,
    /// Coarse image size in centimeters (0 when unknown)
    pub width_cm: u8,
    pub height_cm: u8,
    pub preferred_timing: Option<DetailedTiming>,
}

impl Edid {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < EDID_BLOCK_LEN {
            return Err(Error::edid_malformed(format!(
                "expected at least {} bytes, got {}",
                EDID_BLOCK_LEN,
                bytes.len()
            )));
        }
        let block = &bytes[..EDID_BLOCK_LEN];

        if block[..8] != EDID_HEADER {
            return Err(Error::edid_malformed("bad header"));
        }
        let sum = block.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        if sum != 0 {
            return Err(Error::edid_malformed(format!("checksum off by {}", sum)));
        }

        let mut monitor_name = None;
        let mut preferred_timing = None;
        for offset in DESCRIPTOR_OFFSETS {
            let desc = &block[offset..offset + DESCRIPTOR_LEN];
            if desc[0] != 0 || desc[1] != 0 {
                if preferred_timing.is_none() {
                    preferred_timing = Some(parse_detailed_timing(desc));
                }
            } else if desc[3] == MONITOR_NAME_TAG && monitor_name.is_none() {
                monitor_name = parse_descriptor_text(&desc[5..]);
            }
        }

        Ok(Self {
            manufacturer: decode_manufacturer(u16::from_be_bytes([block[8], block[9]])),
            product_code: u16::from_le_bytes([block[10], block[11]]),
            monitor_name,
            width_cm: block[21],
            height_cm: block[22],
            preferred_timing,
        })
    }

    /// Image size in millimeters, preferring the detailed timing over the
    /// coarse centimeter fields
    pub fn image_size_mm(&self) -> Option<(u32, u32)> {
        if let Some(t) = self.preferred_timing {
            if t.width_mm > 0 && t.height_mm > 0 {
                return Some((t.width_mm, t.height_mm));
            }
        }
        if self.width_cm > 0 && self.height_cm > 0 {
            return Some((u32::from(self.width_cm) * 10, u32::from(self.height_cm) * 10));
        }
        None
    }

    /// Human-readable model: monitor name, or manufacturer and product code
    pub fn model(&self) -> String {
        match &self.monitor_name {
            Some(name) => name.clone(),
            None => format!("{} {:04X}", self.manufacturer, self.product_code),
        }
    }
}

fn parse_detailed_timing(d: &[u8]) -> DetailedTiming {
    let hi = |byte: u8| u32::from(byte >> 4) << 8;
    let lo = |byte: u8| u32::from(byte & 0x0F) << 8;

    DetailedTiming {
        pixel_clock_hz: u64::from(u16::from_le_bytes([d[0], d[1]])) * 10_000,
        h_active: u32::from(d[2]) | hi(d[4]),
        h_blank: u32::from(d[3]) | lo(d[4]),
        v_active: u32::from(d[5]) | hi(d[7]),
        v_blank: u32::from(d[6]) | lo(d[7]),
        width_mm: u32::from(d[12]) | hi(d[14]),
        height_mm: u32::from(d[13]) | lo(d[14]),
    }
}

/// Descriptor text ends at 0x0A and is padded with spaces
fn parse_descriptor_text(bytes: &[u8]) -> Option<String> {
    let end = bytes.iter().position(|b| *b == 0x0A).unwrap_or(bytes.len());
    let text = String::from_utf8_lossy(&bytes[..end]).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Three 5-bit letters, 1 = 'A'
fn decode_manufacturer(raw: u16) -> String {
    [(raw >> 10) & 0x1F, (raw >> 5) & 0x1F, raw & 0x1F]
        .iter()
        .map(|v| match *v as u8 {
            1..=26 => char::from(b'A' + *v as u8 - 1),
            _ => '?',
        })
        .collect()
}

/// A 1920x1080@60 monitor, 527x296 mm, named "DELL U2414H"
#[cfg(test)]
pub(crate) fn sample_edid() -> Vec<u8> {
    let mut edid = vec![0u8; EDID_BLOCK_LEN];
    edid[..8].copy_from_slice(&EDID_HEADER);
    // "DEL": D=4, E=5, L=12
    let id: u16 = (4 << 10) | (5 << 5) | 12;
    edid[8..10].copy_from_slice(&id.to_be_bytes());
    edid[10..12].copy_from_slice(&0xA0C4u16.to_le_bytes());
    edid[21] = 53;
    edid[22] = 30;

    // 148.5 MHz, 1920+280 x 1080+45, 527x296 mm
    edid[54..72].copy_from_slice(&[
        0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40, 0x58, 0x2C, 0x45, 0x00, 0x0F, 0x28,
        0x21, 0x00, 0x00, 0x1E,
    ]);

    edid[72..77].copy_from_slice(&[0x00, 0x00, 0x00, MONITOR_NAME_TAG, 0x00]);
    let name = b"DELL U2414H\n ";
    edid[77..77 + name.len()].copy_from_slice(name);

    let sum = edid[..127].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    edid[127] = 0u8.wrapping_sub(sum);
    edid
}
