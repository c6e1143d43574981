//! Text and JSON reports of a collected screen
//!
//! `summary_text` is the plain `Label: value` list meant for sharing;
//! `render_screen` is the sectioned view printed by `screeninfo show`.

use std::fmt::{self, Display, Write};

use crate::config::ReportSettings;
use crate::error::Result;
use crate::screen::ScreenInfo;

/// Subject line used when sharing a summary
pub fn share_subject(version: &str) -> String {
    format!("Screen Info summary (Version {})", version)
}

/// Line-oriented text builder
#[derive(Debug, Default)]
pub struct SummaryBuilder {
    buf: String,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label value`
    pub fn line(&mut self, label: &str, value: impl Display) -> &mut Self {
        // Writing to a String cannot fail
        let _ = writeln!(self.buf, "{} {}", label, value);
        self
    }

    /// Append text on its own line
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    pub fn build(&self) -> String {
        self.buf.clone()
    }
}

/// A float that always shows a fractional part ("60.0", "59.94").
///
/// Formats the value at its own precision, so an `f32` prints as `59.94`
/// and not as its widened `f64` expansion.
struct Decimal<T>(T);

impl<T: Display> fmt::Display for Decimal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        let integral = text.bytes().all(|b| b.is_ascii_digit() || b == b'-');
        if integral && !text.is_empty() {
            write!(f, "{}.0", text)
        } else {
            f.write_str(&text)
        }
    }
}

fn source_text(info: &ScreenInfo) -> String {
    match &info.origin {
        Some(origin) => format!("{} ({})", info.source, origin),
        None => info.source.to_string(),
    }
}

fn pixel_format_detail(info: &ScreenInfo) -> String {
    match info.pixel_format {
        Some(format) => format!("{} ({})", format.name(), format.code()),
        None => info.pixel_format_text().to_string(),
    }
}

fn real_size_text(info: &ScreenInfo) -> (String, String) {
    match info.real_size {
        Some(real) => (real.width_px.to_string(), real.height_px.to_string()),
        None => ("Unsupported".to_string(), "Unsupported".to_string()),
    }
}

/// Every attribute as `Label: value`, in the fixed report order
fn labeled_values(info: &ScreenInfo) -> Vec<(&'static str, String)> {
    let (real_width, real_height) = real_size_text(info);
    let m = &info.metrics;

    vec![
        ("Device:", info.device.model.clone()),
        ("OS Version:", info.device.os_version.clone()),
        ("Screen Class:", info.size_class.to_string()),
        ("Density Class:", info.density_class.to_string()),
        ("Total Width Pixels:", real_width),
        ("Total Height Pixels:", real_height),
        ("Width Pixels:", m.width_px.to_string()),
        ("Height Pixels:", m.height_px.to_string()),
        ("Width dp:", info.width_dp.to_string()),
        ("Height dp:", info.height_dp.to_string()),
        ("Smallest dp:", info.smallest_dp.to_string()),
        ("Long/Wide:", info.long_layout.to_string()),
        ("Natural Orientation:", info.natural_orientation.to_string()),
        ("Current Orientation:", info.current_orientation.to_string()),
        ("Touchscreen:", info.touchscreen.to_string()),
        ("Screen Dpi:", m.density_dpi.to_string()),
        ("Actual Xdpi:", Decimal(m.xdpi).to_string()),
        ("Actual Ydpi:", Decimal(m.ydpi).to_string()),
        ("Logical Density:", Decimal(m.density).to_string()),
        ("Font Scale Density:", Decimal(info.scaled_density).to_string()),
        ("Diagonal Size Inches:", Decimal(info.physical.diagonal_in).to_string()),
        ("Diagonal Size Millimeters:", info.physical.diagonal_mm.to_string()),
        ("Pixel Format:", info.pixel_format_text().to_string()),
        ("Refresh Rate:", Decimal(info.refresh_rate).to_string()),
    ]
}

/// Plain-text summary for sharing, with an optional footer link
pub fn summary_text(info: &ScreenInfo, settings: &ReportSettings) -> String {
    let mut sb = SummaryBuilder::new();
    for (label, value) in labeled_values(info) {
        sb.line(label, value);
    }
    if settings.footer && !settings.project_url.is_empty() {
        sb.blank().text(&settings.project_url);
    }
    sb.build()
}

/// Sectioned, aligned view for the terminal
pub fn render_screen(info: &ScreenInfo) -> String {
    let (real_width, real_height) = real_size_text(info);
    let m = &info.metrics;
    let p = &info.physical;

    let sections: Vec<(&str, Vec<(&str, String)>)> = vec![
        (
            "Device",
            vec![
                ("Model", info.device.model.clone()),
                ("OS version", info.device.os_version.clone()),
                ("Source", source_text(info)),
            ],
        ),
        (
            "Screen Metrics",
            vec![
                ("Size class", info.size_class.to_string()),
                ("Density class", info.density_class.to_string()),
                ("Usable pixels", format!("{} x {}", m.width_px, m.height_px)),
                ("Total pixels", format!("{} x {}", real_width, real_height)),
                ("Size dp", format!("{} x {}", info.width_dp, info.height_dp)),
                ("Smallest dp", info.smallest_dp.to_string()),
                ("Density dpi", m.density_dpi.to_string()),
                ("Actual dpi", format!("{} x {}", Decimal(m.xdpi), Decimal(m.ydpi))),
                ("Density", Decimal(m.density).to_string()),
                ("Font density", Decimal(info.scaled_density).to_string()),
            ],
        ),
        (
            "Physical Size",
            vec![
                ("Width", format!("{:.2} in", p.width_in)),
                ("Height", format!("{:.2} in", p.height_in)),
                ("Diagonal", format!("{} in ({} mm)", Decimal(p.diagonal_in), p.diagonal_mm)),
            ],
        ),
        (
            "Layout",
            vec![
                ("Long/wide", info.long_layout.to_string()),
                ("Touchscreen", info.touchscreen.to_string()),
            ],
        ),
        (
            "Orientation",
            vec![
                ("Natural", info.natural_orientation.to_string()),
                ("Current", info.current_orientation.to_string()),
            ],
        ),
        (
            "Display",
            vec![
                ("Pixel format", pixel_format_detail(info)),
                ("Refresh rate", format!("{} Hz", Decimal(info.refresh_rate))),
            ],
        ),
    ];

    let width = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(label, _)| label.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, (title, rows)) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", title);
        for (label, value) in rows {
            let _ = writeln!(out, "  {:<width$}  {}", label, value, width = width);
        }
    }
    out
}

/// Pretty-printed JSON export
pub fn to_json(info: &ScreenInfo) -> Result<String> {
    Ok(serde_json::to_string_pretty(info)?)
}
