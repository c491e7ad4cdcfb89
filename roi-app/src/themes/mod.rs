//! Light/dark appearance for terminal output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable terminals use to advertise their colors as `fg;bg`.
const COLORFGBG: &str = "COLORFGBG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Reads the platform preference, falling back to [`ThemeMode::Light`].
    pub fn detect() -> Self {
        let mode = std::env::var(COLORFGBG)
            .ok()
            .and_then(|value| Self::from_colorfgbg(&value))
            .unwrap_or_default();
        debug!(?mode, "Detected terminal theme");
        mode
    }

    /// Interprets a `COLORFGBG` value such as `"15;0"` or `"0;default;15"`.
    ///
    /// The last field is the background palette index; 0-6 and 8 are dark.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match background {
            0..=6 | 8 => Some(Self::Dark),
            _ => Some(Self::Light),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                bar: "\x1b[34m",
                paid_back: "\x1b[32m",
                warning: "\x1b[1;31m",
                muted: "\x1b[90m",
            },
            Self::Dark => Palette {
                bar: "\x1b[96m",
                paid_back: "\x1b[92m",
                warning: "\x1b[1;93m",
                muted: "\x1b[37m",
            },
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}', expected 'light' or 'dark'")),
        }
    }
}

/// ANSI color escapes used by the chart and advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bar: &'static str,
    pub paid_back: &'static str,
    pub warning: &'static str,
    pub muted: &'static str,
}

impl Palette {
    pub const RESET: &'static str = "\x1b[0m";
}
