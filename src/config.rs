//! Configuration management for impactkit.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ImpactError, Result};
use crate::palette::find_preset;

/// Command-line arguments for impactkit
#[derive(Parser, Debug)]
#[command(name = "impactkit")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "IMPACTKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "IMPACTKIT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the built-in palettes
    Presets,

    /// Print the color assigned to each value
    Color {
        /// Built-in palette name (defaults to the configured preset)
        #[arg(long, conflicts_with = "file")]
        preset: Option<String>,

        /// Palette file to load instead of a preset
        #[arg(long)]
        file: Option<PathBuf>,

        /// Override the lower bound of the data range
        #[arg(long, allow_negative_numbers = true)]
        vmin: Option<f64>,

        /// Override the upper bound of the data range
        #[arg(long, allow_negative_numbers = true)]
        vmax: Option<f64>,

        /// Data values to look up
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Convert a station workbook to JSON and/or station XML
    Convert {
        /// Workbook to read
        input: PathBuf,

        /// Destination for the JSON feature collection
        #[arg(long)]
        json: Option<PathBuf>,

        /// Destination for the station XML document
        #[arg(long)]
        xml: Option<PathBuf>,
    },
}

/// Output document settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Software name written to the JSON header
    #[serde(default = "default_software_name")]
    pub software_name: String,

    /// Software version written to the JSON header
    #[serde(default = "default_software_version")]
    pub software_version: String,

    /// `code_version` attribute of the XML root
    #[serde(default = "default_code_version")]
    pub code_version: String,

    /// `map_version` attribute of the XML root
    #[serde(default = "default_map_version")]
    pub map_version: String,

    /// Fixed unix timestamp for `process_time`/`created` (None = now)
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Palette settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Preset used when none is given on the command line
    #[serde(default = "default_preset")]
    pub default_preset: String,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Palette settings
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args.command))
    }

    /// Build configuration from already-parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => Config::default(),
        };

        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ImpactError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.export.software_name.trim().is_empty() {
            return Err(ImpactError::Config {
                message: "Software name cannot be empty".to_string(),
            });
        }

        if find_preset(&self.palette.default_preset).is_none() {
            return Err(ImpactError::Config {
                message: format!("Unknown default preset: {}", self.palette.default_preset),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            palette: PaletteConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            software_name: default_software_name(),
            software_version: default_software_version(),
            code_version: default_code_version(),
            map_version: default_map_version(),
            timestamp: None,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
        }
    }
}

impl ExportConfig {
    /// Configured timestamp, or the current time
    pub fn timestamp_or_now(&self) -> i64 {
        self.timestamp
            .unwrap_or_else(|| chrono::Utc::now().timestamp())
    }
}

// Default value functions for serde
fn default_software_name() -> String {
    "impactutils".to_string()
}

fn default_software_version() -> String {
    "1.0.0".to_string()
}

fn default_code_version() -> String {
    "3.5".to_string()
}

fn default_map_version() -> String {
    "3".to_string()
}

fn default_preset() -> String {
    "mmi".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
