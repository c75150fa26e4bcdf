//! Colour configuration - threshold rules read from a TOML file
//!
//! The file is read once at startup. Anything wrong with it (missing,
//! unreadable, malformed, unknown colour) makes the monitor run with the
//! built-in bands instead, reporting a single diagnostic line.
//!
//! ```toml
//! default_foreground = "cyan"
//!
//! [[cpu]]
//! threshold = 90
//! background = "red"
//! foreground = "white"
//!
//! [[memory]]
//! threshold = 50
//! background = "yellow"
//! foreground = "black"
//! ```

mod colour;
mod rules;

pub use colour::str_to_colour;
pub use rules::{ColorPair, ColorRule, Palette, RuleSet};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};

/// Reasons a configuration file was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config file: {0}")]
    Parse(#[from] toml_edit::de::Error),

    #[error("unknown colour '{0}'")]
    UnknownColour(String),

    #[error("threshold {0} is outside 0-100")]
    InvalidThreshold(f64),

    #[error("no config directory available on this system")]
    NoConfigDir,
}

/// One `[[cpu]]` / `[[memory]]` table as written in the file
#[derive(Debug, Clone, Deserialize)]
struct RuleEntry {
    threshold: f64,
    background: String,
    foreground: String,
}

/// The raw file contents; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    default_foreground: Option<String>,
    cpu: Option<Vec<RuleEntry>>,
    memory: Option<Vec<RuleEntry>>,
}

/// Result of resolving the configuration at startup
#[derive(Debug)]
pub struct LoadedConfig {
    pub palette: Palette,
    /// Set when the built-in palette had to be used because of a problem
    pub diagnostic: Option<String>,
}

/// Returns the default config file location, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}

/// Loads the palette from `explicit` or the default location.
///
/// Never fails: on any problem the built-in palette is returned together
/// with a one-line diagnostic.
pub fn load(explicit: Option<&Path>) -> LoadedConfig {
    let path = match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path().ok_or(ConfigError::NoConfigDir),
    };

    match path.and_then(|path| read_palette(&path)) {
        Ok(palette) => {
            log::info!("loaded colour configuration");
            LoadedConfig {
                palette,
                diagnostic: None,
            }
        }
        Err(err) => {
            let diagnostic = format!("{err}; using built-in colours");
            log::warn!("{diagnostic}");
            LoadedConfig {
                palette: Palette::default(),
                diagnostic: Some(diagnostic),
            }
        }
    }
}

fn read_palette(path: &Path) -> Result<Palette, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_palette(&contents)
}

/// Parses file contents into a palette, filling in defaults for missing sections.
pub fn parse_palette(contents: &str) -> Result<Palette, ConfigError> {
    let file: ConfigFile = toml_edit::de::from_str(contents)?;
    let defaults = Palette::default();

    let default_foreground = match file.default_foreground {
        Some(name) => str_to_colour(&name)?,
        None => defaults.default_foreground,
    };
    let cpu = match file.cpu {
        Some(entries) => to_rule_set(&entries)?,
        None => defaults.cpu,
    };
    let memory = match file.memory {
        Some(entries) => to_rule_set(&entries)?,
        None => defaults.memory,
    };

    Ok(Palette {
        cpu,
        memory,
        default_foreground,
    })
}

fn to_rule_set(entries: &[RuleEntry]) -> Result<RuleSet, ConfigError> {
    let rules = entries
        .iter()
        .map(|entry| {
            if !(0.0..=100.0).contains(&entry.threshold) {
                return Err(ConfigError::InvalidThreshold(entry.threshold));
            }
            Ok(ColorRule::new(
                entry.threshold,
                str_to_colour(&entry.background)?,
                str_to_colour(&entry.foreground)?,
            ))
        })
        .collect::<Result<Vec<ColorRule>, ConfigError>>()?;

    Ok(RuleSet::new(rules))
}
