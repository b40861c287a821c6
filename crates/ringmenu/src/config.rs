use crate::input::{Action, KeyCode};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rounds `alpha` down to what an 8-bit channel can hold.
pub fn quantize_alpha(alpha: f64) -> f64 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    f64::from(a) / 255.0
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid hex color '{0}'")]
pub struct ParseColorError(String);

/// Opaque sRGB color, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgb<u8>);

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn inverted(&self) -> Self {
        Self::rgb(255 - self.0.red, 255 - self.0.green, 255 - self.0.blue)
    }

    /// Applies `alpha` through an 8-bit channel, like the final framebuffer would.
    pub fn with_alpha(&self, alpha: f64) -> Srgba<f64> {
        Srgba::new(
            f64::from(self.0.red) / 255.0,
            f64::from(self.0.green) / 255.0,
            f64::from(self.0.blue) / 255.0,
            quantize_alpha(alpha),
        )
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|_| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub default_label: Color,
    pub selected_label: Color,
    pub bezel: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            default_label: Color::rgb(0xff, 0xff, 0xff),
            selected_label: Color::rgb(0xff, 0xc8, 0x3c),
            bezel: Color::rgb(0xff, 0xc8, 0x3c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub open: KeyCode,
    pub close: KeyCode,
    pub confirm: KeyCode,
    pub rotate_cw: KeyCode,
    pub rotate_ccw: KeyCode,
}

impl KeyBindings {
    pub fn key(&self, action: Action) -> &KeyCode {
        match action {
            Action::Open => &self.open,
            Action::Close => &self.close,
            Action::Confirm => &self.confirm,
            Action::RotateCw => &self.rotate_cw,
            Action::RotateCcw => &self.rotate_ccw,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            open: KeyCode::new("tab"),
            close: KeyCode::new("escape"),
            confirm: KeyCode::new("return"),
            rotate_cw: KeyCode::new("right"),
            rotate_ccw: KeyCode::new("left"),
        }
    }
}

/// Menu tunables. Replaced as a whole, never patched field by field while drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edge length of an item cell in pixels.
    pub icon_size: f64,
    /// Animation progress units per second.
    pub anim_speed: f64,
    /// Ring radius relative to half the smaller viewport side.
    pub radius_scale: f64,
    /// Multiple of the ring radius items fly in from.
    pub fly_in: f64,
    pub colors: Colors,
    pub keys: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            icon_size: 64.0,
            anim_speed: 4.0,
            radius_scale: 0.5,
            fly_in: 4.0,
            colors: Colors::default(),
            keys: KeyBindings::default(),
        }
    }
}
