use crate::hotkey::{parse_hotkey, Hotkey};
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sampling intervals offered in the settings editor, in seconds.
pub const INTERVAL_CHOICES: [f32; 5] = [0.5, 1.0, 1.5, 2.0, 5.0];

pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 8..=24;
pub const ALPHA_RANGE: std::ops::RangeInclusive<f32> = 0.1..=1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockFormat {
    H24,
    H12,
}

impl Default for ClockFormat {
    fn default() -> Self {
        ClockFormat::H24
    }
}

impl ClockFormat {
    /// chrono format string for the time line.
    pub fn strftime(&self) -> &'static str {
        match self {
            ClockFormat::H24 => "%H:%M:%S",
            ClockFormat::H12 => "%I:%M:%S %p",
        }
    }
}

/// Foreground/background color pair used by the info surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    DarkGray,
    Light,
    RedOnBlack,
    BlueOnBlack,
    GreenOnBlack,
    BlueOnWhite,
    GreenOnWhite,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::DarkGray
    }
}

pub const THEME_CHOICES: [Theme; 7] = [
    Theme::DarkGray,
    Theme::Light,
    Theme::RedOnBlack,
    Theme::BlueOnBlack,
    Theme::GreenOnBlack,
    Theme::BlueOnWhite,
    Theme::GreenOnWhite,
];

impl Theme {
    pub fn background(&self) -> Color32 {
        match self {
            Theme::DarkGray => Color32::from_rgb(0x22, 0x22, 0x22),
            Theme::Light => Color32::from_rgb(0xe0, 0xe0, 0xe0),
            Theme::RedOnBlack | Theme::BlueOnBlack | Theme::GreenOnBlack => {
                Color32::from_rgb(0x1c, 0x1c, 0x1c)
            }
            Theme::BlueOnWhite | Theme::GreenOnWhite => Color32::from_rgb(0xf0, 0xf0, 0xf0),
        }
    }

    pub fn foreground(&self) -> Color32 {
        match self {
            Theme::DarkGray => Color32::WHITE,
            Theme::Light => Color32::BLACK,
            Theme::RedOnBlack => Color32::from_rgb(0xff, 0x4c, 0x4c),
            Theme::BlueOnBlack => Color32::from_rgb(0x00, 0xa2, 0xff),
            Theme::GreenOnBlack => Color32::from_rgb(0xa8, 0xff, 0x00),
            Theme::BlueOnWhite => Color32::from_rgb(0x00, 0x7a, 0xcc),
            Theme::GreenOnWhite => Color32::from_rgb(0x69, 0xb4, 0x00),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Theme::DarkGray => "Standard (gray)",
            Theme::Light => "Standard (white)",
            Theme::RedOnBlack => "Red + black",
            Theme::BlueOnBlack => "Blue + black",
            Theme::GreenOnBlack => "Green + black",
            Theme::BlueOnWhite => "Blue + white",
            Theme::GreenOnWhite => "Green + white",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Global hotkey cycling the overlay through its display modes.
    /// Changing it only takes effect after a restart.
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    /// Backdrop opacity, 0.0..=1.0.
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub clock_format: ClockFormat,
    #[serde(default = "default_on")]
    pub show_cpu: bool,
    #[serde(default = "default_on")]
    pub show_ram: bool,
    #[serde(default = "default_on")]
    pub show_temp: bool,
    #[serde(default = "default_on")]
    pub show_network: bool,
    #[serde(default = "default_on")]
    pub show_battery: bool,
    #[serde(default)]
    pub show_voltage: bool,
    #[serde(default)]
    pub show_amperage: bool,
    #[serde(default = "default_on")]
    pub show_time: bool,
    #[serde(default)]
    pub theme: Theme,
    /// Seconds between sampler ticks; one of [`INTERVAL_CHOICES`].
    #[serde(default = "default_interval")]
    pub update_interval: f32,
}

fn default_hotkey() -> String {
    "Ctrl+Shift+O".to_string()
}

fn default_alpha() -> f32 {
    0.7
}

fn default_font_size() -> u32 {
    12
}

fn default_on() -> bool {
    true
}

fn default_interval() -> f32 {
    2.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            alpha: default_alpha(),
            font_size: default_font_size(),
            clock_format: ClockFormat::H24,
            show_cpu: true,
            show_ram: true,
            show_temp: true,
            show_network: true,
            show_battery: true,
            show_voltage: false,
            show_amperage: false,
            show_time: true,
            theme: Theme::DarkGray,
            update_interval: default_interval(),
        }
    }
}

/// Per-user location of the settings file.
pub fn config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("stat_overlay")
        .join("config.json")
}

impl Settings {
    /// Load settings from `path`, merging stored values over defaults.
    ///
    /// A missing, unreadable or malformed file yields the defaults; a
    /// well-formed file only overrides the keys it contains. The returned
    /// record is always fully populated.
    pub fn load(path: &std::path::Path) -> Self {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Self::default();
        }
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("settings file {:?} is malformed: {e}; using defaults", path);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Parse the configured hotkey, falling back to the default combination.
    pub fn hotkey(&self) -> Hotkey {
        match parse_hotkey(&self.hotkey) {
            Some(k) => k,
            None => {
                tracing::warn!(
                    "provided hotkey string '{}' is invalid; using default {}",
                    self.hotkey,
                    default_hotkey()
                );
                parse_hotkey(&default_hotkey()).unwrap_or_default()
            }
        }
    }
}
