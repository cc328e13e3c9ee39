//! Colors, themes and continuous color schemes.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::{GeostyleError, Result};

/// Visual theme; named colors resolve differently per theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// RGBA color with 8-bit channels and a unit alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Alpha is clamped to [0, 1]; a non-finite alpha is opaque
    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 };
        Self { r, g, b, a }
    }

    /// Parse a color string: hex, `rgb()`/`rgba()` or a theme palette name
    pub fn parse(value: &str, theme: Theme) -> Result<Self> {
        let s = value.trim();
        let parsed = if s.starts_with('#') {
            parse_hex(s)
        } else if s.starts_with("rgb") {
            parse_rgb_function(s)
        } else {
            named_color(&s.to_lowercase(), theme).and_then(parse_hex)
        };
        parsed.ok_or_else(|| GeostyleError::InvalidColor { value: value.to_string() })
    }

    /// Same color with its alpha multiplied by `opacity`
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, self.a * opacity)
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1]
    pub fn lerp(self, other: Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self::rgba(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
            (self.a as f64 + (other.a as f64 - self.a as f64) * t) as f32,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Continuous color scheme applied to numeric data values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    #[default]
    GreenYellowRed,
    BlueYellowRed,
    Blues,
    Greens,
    Reds,
}

impl ColorScheme {
    fn stops(&self) -> &'static [&'static str] {
        match self {
            ColorScheme::GreenYellowRed => &["green", "yellow", "red"],
            ColorScheme::BlueYellowRed => &["blue", "yellow", "red"],
            ColorScheme::Blues => &["#c6dbef", "blue", "dark-blue"],
            ColorScheme::Greens => &["#c7e9c0", "green", "dark-green"],
            ColorScheme::Reds => &["#fcbba1", "red", "dark-red"],
        }
    }

    /// Color at position `t` in [0, 1] along the scheme
    pub fn color_at(&self, t: f64, theme: Theme) -> Color {
        let stops: Vec<Color> = self
            .stops()
            .iter()
            .filter_map(|name| Color::parse(name, theme).ok())
            .collect();
        let segments = stops.len().saturating_sub(1);
        if segments == 0 {
            return stops.first().copied().unwrap_or(Color::TRANSPARENT);
        }

        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * segments as f64;
        let idx = (scaled.floor() as usize).min(segments - 1);
        stops[idx].lerp(stops[idx + 1], scaled - idx as f64)
    }
}

fn named_color(name: &str, theme: Theme) -> Option<&'static str> {
    let hex = match (name, theme) {
        ("green", Theme::Dark) => "#73bf69",
        ("green", Theme::Light) => "#56a64b",
        ("dark-green", Theme::Dark) => "#37872d",
        ("dark-green", Theme::Light) => "#19730e",
        ("red", Theme::Dark) => "#f2495c",
        ("red", Theme::Light) => "#e02f44",
        ("dark-red", Theme::Dark) => "#c4162a",
        ("dark-red", Theme::Light) => "#ad0317",
        ("blue", Theme::Dark) => "#5794f2",
        ("blue", Theme::Light) => "#3274d9",
        ("dark-blue", Theme::Dark) => "#1f60c4",
        ("dark-blue", Theme::Light) => "#1250b0",
        ("orange", Theme::Dark) => "#ff9830",
        ("orange", Theme::Light) => "#ff780a",
        ("dark-orange", Theme::Dark) => "#fa6400",
        ("dark-orange", Theme::Light) => "#e55400",
        ("yellow", Theme::Dark) => "#fade2a",
        ("yellow", Theme::Light) => "#f2cc0c",
        ("dark-yellow", Theme::Dark) => "#e0b400",
        ("dark-yellow", Theme::Light) => "#cc9d00",
        ("purple", Theme::Dark) => "#b877d9",
        ("purple", Theme::Light) => "#a352cc",
        ("dark-purple", Theme::Dark) => "#8f3bb8",
        ("dark-purple", Theme::Light) => "#7c2ea3",
        ("text", Theme::Dark) => "#ccccdc",
        ("text", Theme::Light) => "#24292e",
        ("black", _) => "#000000",
        ("white", _) => "#ffffff",
        ("gray" | "grey", _) => "#808080",
        ("transparent", _) => "#00000000",
        _ => return None,
    };
    Some(hex)
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Some(Color::rgba(short(0)?, short(1)?, short(2)?, short(3)? as f32 / 255.0)),
        6 => Some(Color::rgb(long(0)?, long(2)?, long(4)?)),
        8 => Some(Color::rgba(long(0)?, long(2)?, long(4)?, long(6)? as f32 / 255.0)),
        _ => None,
    }
}

fn parse_rgb_function(s: &str) -> Option<Color> {
    let inner = s
        .trim_start_matches("rgba(")
        .trim_start_matches("rgb(")
        .trim_end_matches(')');
    let parts: Vec<&str> = inner.split(',').map(|p| p.trim()).collect();
    if parts.len() < 3 {
        return None;
    }

    let channel = |p: &str| p.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let alpha = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok().filter(|a| a.is_finite())?,
        None => 1.0,
    };

    Some(Color::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
}
