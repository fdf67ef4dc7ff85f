use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::ValueFormat;

pub const DEFAULT_PAGE_SIZE: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTheme {
    #[default]
    TokyoNight,
    Dracula,
    Nord,
    CatppuccinLatte,
}

impl ColorTheme {
    pub fn next(self) -> Self {
        match self {
            Self::TokyoNight => Self::Dracula,
            Self::Dracula => Self::Nord,
            Self::Nord => Self::CatppuccinLatte,
            Self::CatppuccinLatte => Self::TokyoNight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TokyoNight => "Tokyo Night",
            Self::Dracula => "Dracula",
            Self::Nord => "Nord",
            Self::CatppuccinLatte => "Catppuccin Latte",
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Self::TokyoNight => ThemeColors::TOKYO_NIGHT,
            Self::Dracula => ThemeColors::dracula(),
            Self::Nord => ThemeColors::nord(),
            Self::CatppuccinLatte => ThemeColors::catppuccin_latte(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub header_bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub border_active: Color,
    pub border_dim: Color,
    pub status_ok: Color,
    pub status_warn: Color,
    pub status_error: Color,
    pub overlay_bg: Color,
    pub highlight_bg: Color,
    pub gutter: Color,
    // JSON highlighting
    pub json_key: Color,
    pub json_string: Color,
    pub json_number: Color,
    pub json_bool: Color,
    pub json_null: Color,
    pub json_punct: Color,
}

impl ThemeColors {
    pub const TOKYO_NIGHT: Self = Self {
        header_bg: Color::Rgb(36, 40, 59),
        fg: Color::Rgb(192, 202, 245),
        fg_dim: Color::Rgb(115, 121, 148),
        border_active: Color::Rgb(125, 207, 255), // soft cyan
        border_dim: Color::Rgb(59, 66, 97),
        status_ok: Color::Rgb(158, 206, 106),
        status_warn: Color::Rgb(224, 175, 104),
        status_error: Color::Rgb(247, 118, 142),
        overlay_bg: Color::Rgb(26, 27, 38),
        highlight_bg: Color::Rgb(40, 42, 64),
        gutter: Color::Rgb(86, 95, 137),
        json_key: Color::Rgb(122, 162, 247),    // blue
        json_string: Color::Rgb(158, 206, 106), // green
        json_number: Color::Rgb(255, 158, 100), // orange
        json_bool: Color::Rgb(187, 154, 247),   // purple
        json_null: Color::Rgb(247, 118, 142),
        json_punct: Color::Rgb(137, 221, 255),
    };

    pub fn dracula() -> Self {
        Self {
            header_bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            fg_dim: Color::Rgb(98, 114, 164),
            border_active: Color::Rgb(139, 233, 253),
            border_dim: Color::Rgb(68, 71, 90),
            status_ok: Color::Rgb(80, 250, 123),
            status_warn: Color::Rgb(241, 250, 140),
            status_error: Color::Rgb(255, 85, 85),
            overlay_bg: Color::Rgb(33, 34, 44),
            highlight_bg: Color::Rgb(55, 57, 74),
            gutter: Color::Rgb(98, 114, 164),
            json_key: Color::Rgb(139, 233, 253),
            json_string: Color::Rgb(241, 250, 140),
            json_number: Color::Rgb(189, 147, 249),
            json_bool: Color::Rgb(255, 121, 198),
            json_null: Color::Rgb(255, 121, 198),
            json_punct: Color::Rgb(248, 248, 242),
        }
    }

    pub fn nord() -> Self {
        Self {
            header_bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            fg_dim: Color::Rgb(107, 121, 142),
            border_active: Color::Rgb(136, 192, 208),
            border_dim: Color::Rgb(76, 86, 106),
            status_ok: Color::Rgb(163, 190, 140),
            status_warn: Color::Rgb(235, 203, 139),
            status_error: Color::Rgb(191, 97, 106),
            overlay_bg: Color::Rgb(38, 44, 57),
            highlight_bg: Color::Rgb(59, 66, 82),
            gutter: Color::Rgb(76, 86, 106),
            json_key: Color::Rgb(143, 188, 187),    // nord7
            json_string: Color::Rgb(163, 190, 140), // nord14
            json_number: Color::Rgb(180, 142, 173), // nord15
            json_bool: Color::Rgb(129, 161, 193),   // nord9
            json_null: Color::Rgb(208, 135, 112),   // nord12
            json_punct: Color::Rgb(216, 222, 233),
        }
    }

    pub fn catppuccin_latte() -> Self {
        Self {
            header_bg: Color::Rgb(230, 233, 239),    // mantle
            fg: Color::Rgb(76, 79, 105),             // text
            fg_dim: Color::Rgb(140, 143, 161),       // overlay0
            border_active: Color::Rgb(30, 102, 245), // blue
            border_dim: Color::Rgb(140, 143, 161),
            status_ok: Color::Rgb(64, 160, 43),
            status_warn: Color::Rgb(223, 142, 29),
            status_error: Color::Rgb(210, 15, 57),
            overlay_bg: Color::Rgb(239, 241, 245),   // base
            highlight_bg: Color::Rgb(220, 224, 232), // surface0
            gutter: Color::Rgb(156, 160, 176),
            json_key: Color::Rgb(30, 102, 245),
            json_string: Color::Rgb(64, 160, 43),
            json_number: Color::Rgb(254, 100, 11), // peach
            json_bool: Color::Rgb(136, 57, 239),   // mauve
            json_null: Color::Rgb(210, 15, 57),
            json_punct: Color::Rgb(108, 111, 133),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub color_theme: ColorTheme,
    pub page_size: usize,
    pub default_format: ValueFormat,
    /// `tracing` filter directive used when `KVPEEK_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color_theme: ColorTheme::TokyoNight,
            page_size: DEFAULT_PAGE_SIZE,
            default_format: ValueFormat::Json,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("kvpeek").join("config.toml"))
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Missing or unparsable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save config");
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }

    /// Page size with zero treated as the default.
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}
