use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// An sRGB colour as written in manifests (`"#rrggbb"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Rgb = Rgb(0xFF, 0, 0);

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0, self.1, self.2)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid color: {value}. Expected #rrggbb."));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("Invalid color: {value}. Expected #rrggbb."))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        format!("#{:02x}{:02x}{:02x}", value.0, value.1, value.2)
    }
}

/// The two palettes an exhibit can run with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeKind {
    /// Warm paper tones for bright halls.
    #[default]
    Light,
    /// Deep night blue for darkened rooms and projectors.
    Dark,
}

impl ThemeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Header band, tooltip chips and toasts.
    pub panel_background: Color32,
    /// Tint of the selected language label.
    pub label_active: Color32,
    /// Tint of the other language label.
    pub label_inactive: Color32,
    pub title_size: f32,
    pub body_size: f32,
    pub caption_size: f32,
}

impl Theme {
    pub fn new(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self {
                kind,
                background: Color32::from_rgb(0xF7, 0xF3, 0xEA),
                foreground: Color32::from_rgb(0x2B, 0x2A, 0x33),
                heading_color: Color32::from_rgb(0x12, 0x2C, 0x4A),
                accent: Color32::from_rgb(0xC8, 0x4B, 0x31),
                panel_background: Color32::from_rgb(0xE6, 0xDF, 0xD0),
                label_active: Color32::from_rgb(0x12, 0x2C, 0x4A),
                label_inactive: Color32::from_rgb(0x9A, 0x94, 0x88),
                title_size: 64.0,
                body_size: 36.0,
                caption_size: 26.0,
            },
            ThemeKind::Dark => Self {
                kind,
                background: Color32::from_rgb(0x0B, 0x13, 0x24),
                foreground: Color32::from_rgb(0xD9, 0xE2, 0xEC),
                heading_color: Color32::from_rgb(0xF5, 0xF7, 0xFA),
                accent: Color32::from_rgb(0xF2, 0xA6, 0x3B),
                panel_background: Color32::from_rgb(0x15, 0x22, 0x3B),
                label_active: Color32::from_rgb(0xF2, 0xA6, 0x3B),
                label_inactive: Color32::from_rgb(0x5C, 0x6B, 0x82),
                title_size: 64.0,
                body_size: 36.0,
                caption_size: 26.0,
            },
        }
    }

    pub fn toggled(&self) -> Self {
        Self::new(self.kind.other())
    }

    /// `color` with its alpha scaled by `opacity`, so faded slides and
    /// translucent chrome compose.
    pub fn faded(color: Color32, opacity: f32) -> Color32 {
        let alpha = (f32::from(color.a()) * opacity.clamp(0.0, 1.0)).round() as u8;
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }
}
