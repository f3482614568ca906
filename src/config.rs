use crate::events::{InputDevice, PointerButton};
use crate::pie::animation::Easing;
use crate::pie::radial::{RadialConfig, RadialError};
use crate::pie::style::{Color, PieStyle};
use crate::pie::{DEFAULT_ANIMATION_SECONDS, DEFAULT_RADIUS, FULL_CIRCLE};
use derive_more::{From, Into};
use directories::ProjectDirs;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color must start with '#', got {0:?}")]
    MissingHash(String),
    #[error("Color must be #rgb, #rrggbb or #rrggbbaa, got {0:?}")]
    Format(String),
}

/// A color written as `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(Color);

impl HexColor {
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(palette::Srgba::<u8>::new(red, green, blue, alpha).into_format())
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        let format_error = || ColorParseError::Format(s.to_string());
        if !hex.is_ascii() {
            return Err(format_error());
        }

        let (rgb, alpha) = match hex.len() {
            3 | 6 => (hex, "ff"),
            8 => hex.split_at(6),
            _ => return Err(format_error()),
        };
        let rgb = Srgb::<u8>::from_str(rgb).map_err(|_| format_error())?;
        let alpha = u8::from_str_radix(alpha, 16).map_err(|_| format_error())?;
        Ok(Self::from_rgba8(rgb.red, rgb.green, rgb.blue, alpha))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0.into_format::<u8, u8>();
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            c.red, c.green, c.blue, c.alpha
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RingSettings {
    pub radius: f64,
    pub inner_radius_percent: f64,
    pub start_offset_degrees: f64,
    pub total_degrees_drawn: f64,
}

impl Default for RingSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            inner_radius_percent: 0.0,
            start_offset_degrees: 0.0,
            total_degrees_drawn: FULL_CIRCLE,
        }
    }
}

impl RingSettings {
    pub fn to_radial(&self) -> Result<RadialConfig, RadialError> {
        RadialConfig::new(
            self.radius,
            self.inner_radius_percent,
            self.start_offset_degrees,
            self.total_degrees_drawn,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionSettings {
    pub selection_button: PointerButton,
    pub default_index: Option<usize>,
    pub infinite_range: bool,
    pub middle_cancel: bool,
    pub device: InputDevice,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub enabled: bool,
    pub duration_seconds: f64,
    pub easing: Easing,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_seconds: DEFAULT_ANIMATION_SECONDS,
            easing: Easing::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleSettings {
    pub background: Option<HexColor>,
    pub slice: Option<HexColor>,
    pub alternate_slice: Option<HexColor>,
    pub hovered: Option<HexColor>,
    pub highlighted: Option<HexColor>,
    pub selected: Option<HexColor>,
    pub hovered_and_selected: Option<HexColor>,
    pub separator: Option<HexColor>,
    pub separator_width: f64,
    pub circumference: Option<HexColor>,
    pub circumference_width: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            background: Some(HexColor::from_rgba8(0x26, 0x26, 0x26, 0x80)),
            slice: Some(HexColor::from_rgba8(0x40, 0x40, 0x40, 0xd9)),
            alternate_slice: None,
            hovered: Some(HexColor::from_rgba8(0x66, 0x66, 0xcc, 0xe6)),
            highlighted: Some(HexColor::from_rgba8(0x55, 0x55, 0xaa, 0xe6)),
            selected: Some(HexColor::from_rgba8(0x66, 0x66, 0xcc, 0xff)),
            hovered_and_selected: Some(HexColor::from_rgba8(0x80, 0x80, 0xe6, 0xff)),
            separator: Some(HexColor::from_rgba8(0x00, 0x00, 0x00, 0x80)),
            separator_width: 1.0,
            circumference: None,
            circumference_width: 0.0,
        }
    }
}

impl StyleSettings {
    pub fn to_style(&self) -> PieStyle {
        let color = |c: Option<HexColor>| c.map(Color::from);
        PieStyle {
            background: color(self.background),
            slice: color(self.slice),
            alternate_slice: color(self.alternate_slice),
            hovered: color(self.hovered),
            highlighted: color(self.highlighted),
            selected: color(self.selected),
            hovered_and_selected: color(self.hovered_and_selected),
            separator: color(self.separator),
            separator_width: self.separator_width,
            circumference: color(self.circumference),
            circumference_width: self.circumference_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub ring: RingSettings,
    pub selection: SelectionSettings,
    pub animation: AnimationSettings,
    pub style: StyleSettings,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid ring: {0}")]
    Ring(#[from] RadialError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "halo-pie").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads the settings file, if any, layered under `HALO_PIE_*` variables
/// (`HALO_PIE_RING__RADIUS=200`).
pub fn load_settings() -> Result<Settings, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("HALO_PIE").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_settings(toml: &str) -> Result<Settings, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Settings {
    match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Falling back to default settings: {}", e);
            Settings::default()
        }
    }
}

pub fn write_default_settings() -> Result<std::path::PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_SETTINGS)?;
        log::debug!("Wrote default settings to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_SETTINGS: &str = include_str!("default_config.toml");
