//! Configuration management for octadist.
//!
//! Settings are read from INI files with the following precedence:
//!
//! 1. Local configuration (`./octadist_config.cfg`)
//! 2. User configuration (`~/.config/octadist/octadist_config.cfg`)
//! 3. System configuration (`/etc/octadist/octadist_config.cfg`)
//! 4. Built-in defaults
//!
//! # Configuration File Format
//!
//! ```ini
//! [tolerance]
//! vector = 1e-10
//! plane = 1e-10
//!
//! [output]
//! precision = 6
//! pretty_json = true
//!
//! [logging]
//! level = info
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use octadist::settings::{init_logging, SettingsManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsManager::load()?;
//! init_logging(settings.logging());
//! let tolerances = settings.tolerances();
//! # Ok(())
//! # }
//! ```

use crate::linear::{Tolerances, VECTOR_TOLERANCE};
use crate::plane::PLANE_TOLERANCE;
use configparser::ini::Ini;
use log::{debug, info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for in each location.
pub const CONFIG_FILE_NAME: &str = "octadist_config.cfg";

/// Errors that can occur during configuration loading and processing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error when reading configuration files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// INI parsing error
    #[error("INI parsing error: {0}")]
    IniParse(String),
    /// Invalid configuration value
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// All program settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Degeneracy thresholds
    pub tolerance: ToleranceSettings,
    /// Report formatting
    pub output: OutputSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Degeneracy thresholds passed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceSettings {
    /// Minimum vector norm for angle measurements (default: 1e-10)
    pub vector: f64,
    /// Minimum normal magnitude for a face plane (default: 1e-10)
    pub plane: f64,
}

impl Default for ToleranceSettings {
    fn default() -> Self {
        Self {
            vector: VECTOR_TOLERANCE,
            plane: PLANE_TOLERANCE,
        }
    }
}

/// Report formatting settings, consumed by
/// [`DistortionReport::save_with`](crate::report::DistortionReport::save_with) and
/// [`DistortionReport::summary_with`](crate::report::DistortionReport::summary_with).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Decimal places in text summaries (default: 6)
    pub precision: usize,
    /// Indent JSON reports (default: true)
    pub pretty_json: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            precision: 6,
            pretty_json: true,
        }
    }
}

/// Logging configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level: off, error, warn, info, debug, trace (default: "info")
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// The configured level as a `log` filter; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Install `env_logger` on stdout at the configured level.
///
/// `RUST_LOG` still refines the filter. Calling this more than once is harmless.
pub fn init_logging(logging: &LoggingSettings) {
    let result = env_logger::Builder::new()
        .filter_level(logging.level_filter())
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        debug!("Logger already initialised; keeping the existing one");
    }
}

/// Configuration manager that handles loading and accessing settings.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: Settings,
    config_source: String,
}

impl SettingsManager {
    /// Load settings from the first-to-last precedence chain of config files.
    ///
    /// A file that exists but fails to parse is skipped with a warning.
    pub fn load() -> Result<Self, ConfigError> {
        let (settings, source) = Self::load_from_files()?;
        info!("Configuration loaded from: {}", source);
        Ok(Self {
            settings,
            config_source: source,
        })
    }

    /// Load settings from a single file on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid INI,
    /// or holds a value of the wrong type.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        Self::apply_file(&mut settings, path)?;
        Ok(Self {
            settings,
            config_source: path.display().to_string(),
        })
    }

    /// Returns the source of the loaded configuration.
    pub fn config_source(&self) -> &str {
        &self.config_source
    }

    /// Gets a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Engine tolerances built from the `[tolerance]` section.
    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            vector: self.settings.tolerance.vector,
            plane: self.settings.tolerance.plane,
        }
    }

    /// Gets the output settings.
    pub fn output(&self) -> &OutputSettings {
        &self.settings.output
    }

    /// Gets the logging settings.
    pub fn logging(&self) -> &LoggingSettings {
        &self.settings.logging
    }

    fn load_from_files() -> Result<(Settings, String), ConfigError> {
        let mut settings = Settings::default();
        let mut config_source = "built-in defaults".to_string();

        let candidates = [
            ("system", Self::get_system_config_path()),
            ("user", Self::get_user_config_path()),
            ("local", Some(PathBuf::from(CONFIG_FILE_NAME))),
        ];

        // Later files override earlier ones
        for (kind, path) in candidates {
            let Some(path) = path else { continue };
            if !path.exists() {
                continue;
            }
            match Self::apply_file(&mut settings, &path) {
                Ok(()) => {
                    config_source = format!("{} config ({})", kind, path.display());
                    debug!("Loaded {} configuration from: {}", kind, path.display());
                }
                Err(e) => {
                    warn!(
                        "Failed to load {} config from {}: {}",
                        kind,
                        path.display(),
                        e
                    );
                }
            }
        }

        Ok((settings, config_source))
    }

    /// Overlay the keys present in one INI file onto `settings`.
    ///
    /// The file is parsed completely before anything is applied, so a bad
    /// value leaves `settings` untouched.
    fn apply_file(settings: &mut Settings, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut ini = Ini::new();
        let map = ini
            .read(content)
            .map_err(|e| ConfigError::IniParse(format!("Failed to parse INI: {}", e)))?;

        let mut updated = settings.clone();
        if let Some(section) = map.get("tolerance") {
            Self::parse_tolerance(section, &mut updated.tolerance)?;
        }
        if let Some(section) = map.get("output") {
            Self::parse_output(section, &mut updated.output)?;
        }
        if let Some(section) = map.get("logging") {
            Self::parse_logging(section, &mut updated.logging)?;
        }
        *settings = updated;
        Ok(())
    }

    fn parse_tolerance(
        section: &HashMap<String, Option<String>>,
        tolerance: &mut ToleranceSettings,
    ) -> Result<(), ConfigError> {
        if let Some(Some(vector)) = section.get("vector") {
            tolerance.vector = parse_positive(vector, "vector tolerance")?;
        }
        if let Some(Some(plane)) = section.get("plane") {
            tolerance.plane = parse_positive(plane, "plane tolerance")?;
        }
        Ok(())
    }

    fn parse_output(
        section: &HashMap<String, Option<String>>,
        output: &mut OutputSettings,
    ) -> Result<(), ConfigError> {
        if let Some(Some(precision)) = section.get("precision") {
            output.precision = precision.parse().map_err(|_| {
                ConfigError::InvalidValue(format!("Invalid precision: {}", precision))
            })?;
        }
        if let Some(Some(pretty_json)) = section.get("pretty_json") {
            output.pretty_json = pretty_json.parse().map_err(|_| {
                ConfigError::InvalidValue(format!("Invalid pretty_json value: {}", pretty_json))
            })?;
        }
        Ok(())
    }

    fn parse_logging(
        section: &HashMap<String, Option<String>>,
        logging: &mut LoggingSettings,
    ) -> Result<(), ConfigError> {
        if let Some(Some(level)) = section.get("level") {
            if level.parse::<LevelFilter>().is_err() {
                return Err(ConfigError::InvalidValue(format!(
                    "Invalid log level: {}",
                    level
                )));
            }
            logging.level = level.to_lowercase();
        }
        Ok(())
    }

    /// Gets the system configuration file path.
    fn get_system_config_path() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            Some(PathBuf::from("/etc/octadist").join(CONFIG_FILE_NAME))
        }
        #[cfg(windows)]
        {
            std::env::var("PROGRAMDATA")
                .ok()
                .map(|pd| PathBuf::from(pd).join("octadist").join(CONFIG_FILE_NAME))
        }
    }

    /// Gets the user configuration file path.
    fn get_user_config_path() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            std::env::var("HOME").ok().map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("octadist")
                    .join(CONFIG_FILE_NAME)
            })
        }
        #[cfg(windows)]
        {
            std::env::var("APPDATA")
                .ok()
                .map(|appdata| PathBuf::from(appdata).join("octadist").join(CONFIG_FILE_NAME))
        }
    }
}

fn parse_positive(value: &str, what: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(ConfigError::InvalidValue(format!(
            "Invalid {}: {} (expected a positive number)",
            what, value
        ))),
    }
}

impl SettingsManager {
    /// Write a commented configuration template holding the built-in defaults.
    pub fn create_template(path: &Path) -> Result<(), ConfigError> {
        fs::write(path, Self::generate_template_content())?;
        info!("Created settings template at: {}", path.display());
        Ok(())
    }

    fn generate_template_content() -> String {
        let defaults = Settings::default();
        format!(
            r#"# octadist configuration file
#
# Files are loaded in this order, later ones overriding earlier ones:
#
# 1. System config (/etc/octadist/{name} on Unix, %PROGRAMDATA%\octadist\{name} on Windows)
# 2. User config (~/.config/octadist/{name} on Unix, %APPDATA%\octadist\{name} on Windows)
# 3. Current working directory (./{name})
#
# Missing sections or keys keep the built-in defaults shown below.

[tolerance]
# Vectors shorter than this (Angstrom) are treated as zero length,
# e.g. a ligand sitting on the metal
vector = {vector:e}

# Face normals shorter than this mark three collinear ligands
plane = {plane:e}

[output]
# Decimal places in text summaries
precision = {precision}

# Indent JSON reports
pretty_json = {pretty}

[logging]
# Log level: off, error, warn, info, debug, trace
level = {level}
"#,
            name = CONFIG_FILE_NAME,
            vector = defaults.tolerance.vector,
            plane = defaults.tolerance.plane,
            precision = defaults.output.precision,
            pretty = defaults.output.pretty_json,
            level = defaults.logging.level,
        )
    }
}
