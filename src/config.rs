//! Configuration system for screeninfo
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (SCREENINFO_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::host::{HostKind, DEFAULT_DRM_ROOT};

/// Default link printed at the end of shared summaries
pub const DEFAULT_PROJECT_URL: &str =
    "https://play.google.com/store/apps/details?id=com.jotabout.screeninfo";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenInfoConfig {
    /// Where display information comes from
    pub display: DisplaySettings,

    /// Report output settings
    pub report: ReportSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Display source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Source: auto, profile, drm, mock
    pub source: String,

    /// Display profile path (TOML, or JSON by extension)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// DRM sysfs root
    pub drm_root: String,

    /// Restrict DRM discovery to one connector (e.g. "HDMI-A-1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<String>,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Default `show` format: text or json
    pub format: String,

    /// Append the project link to shared summaries
    pub footer: bool,

    /// Project link used by the footer
    pub project_url: String,
}

/// Output format of the `show` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// How often the log file rolls over: daily, hourly or never
    pub rotation: String,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            source: HostKind::Auto.name().to_string(),
            profile: None,
            drm_root: DEFAULT_DRM_ROOT.to_string(),
            connector: None,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            footer: true,
            project_url: DEFAULT_PROJECT_URL.to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            rotation: "daily".to_string(),
            max_files: 5,
            json_format: false,
        }
    }
}

impl ReportSettings {
    pub fn report_format(&self) -> Result<ReportFormat> {
        match self.format.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::config_field_invalid(
                "report.format",
                format!("Invalid report format '{}'. Must be one of: text, json", other),
            )),
        }
    }
}

impl ScreenInfoConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = Self::parse(&content)?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Parse TOML configuration content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config_parse(e.message().to_string(), e))
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = Self::search_paths();
        for path in &search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Standard configuration locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("screeninfo.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("screeninfo").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".screeninfo").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/screeninfo/config.toml"));
        paths
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Display settings
        if let Ok(val) = std::env::var("SCREENINFO_SOURCE") {
            self.display.source = val;
        }
        if let Ok(val) = std::env::var("SCREENINFO_PROFILE") {
            self.display.profile = Some(val);
        }
        if let Ok(val) = std::env::var("SCREENINFO_DRM_ROOT") {
            self.display.drm_root = val;
        }
        if let Ok(val) = std::env::var("SCREENINFO_CONNECTOR") {
            self.display.connector = Some(val);
        }

        // Report settings
        if let Ok(val) = std::env::var("SCREENINFO_REPORT_FORMAT") {
            self.report.format = val;
        }
        if let Ok(val) = std::env::var("SCREENINFO_FOOTER") {
            self.report.footer = parse_bool(&val);
        }
        if let Ok(val) = std::env::var("SCREENINFO_PROJECT_URL") {
            self.report.project_url = val;
        }

        // Logging settings
        if let Ok(val) = std::env::var("SCREENINFO_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("SCREENINFO_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("SCREENINFO_LOG_JSON") {
            self.logging.json_format = parse_bool(&val);
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.display.drm_root = expand_path(&self.display.drm_root);

        if let Some(ref profile) = self.display.profile {
            self.display.profile = Some(expand_path(profile));
        }
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Apply command-line overrides, then re-validate
    pub fn apply_overrides(
        &mut self,
        source: Option<&str>,
        profile: Option<&str>,
        connector: Option<&str>,
    ) -> Result<()> {
        if let Some(source) = source {
            self.display.source = source.to_string();
        }
        if let Some(profile) = profile {
            self.display.profile = Some(expand_path(profile));
            // A profile on the command line implies the profile source
            if source.is_none() {
                self.display.source = HostKind::Profile.name().to_string();
            }
        }
        if let Some(connector) = connector {
            self.display.connector = Some(connector.to_string());
        }
        self.validate()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let kind: HostKind = self.display.source.parse()?;
        if kind == HostKind::Profile && self.display.profile.is_none() {
            return Err(Error::config_field_invalid(
                "display.profile",
                "source 'profile' requires a profile path",
            ));
        }
        if self.display.drm_root.is_empty() {
            return Err(Error::config_field_invalid(
                "display.drm_root",
                "DRM root cannot be empty",
            ));
        }

        self.report.report_format()?;

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.logging.rotation.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.rotation",
                format!(
                    "Invalid rotation '{}'. Must be one of: {}",
                    self.logging.rotation,
                    valid_rotations.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

fn parse_bool(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file, returning where it was written
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".screeninfo")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::config_validation(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
pub fn generate_default_config() -> String {
    format!(
        r#"# screeninfo configuration

[display]
# Where display information comes from: auto, profile, drm, mock
# auto uses the profile when one is set, else the first connected DRM output
source = "auto"

# Captured display profile (TOML, or JSON with a .json extension)
# profile = "~/.screeninfo/profiles/phone.toml"

# DRM sysfs root
drm_root = "{drm_root}"

# Only consider this connector (e.g. "HDMI-A-1", "eDP-1")
# connector = "HDMI-A-1"

[report]
# Default format of 'screeninfo show': text or json
format = "text"

# Append the project link to shared summaries
footer = true

# Link printed by the footer
project_url = "{project_url}"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.screeninfo/logs/screeninfo.log"

# How often the log file rolls over: daily, hourly or never
rotation = "daily"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#,
        drm_root = DEFAULT_DRM_ROOT,
        project_url = DEFAULT_PROJECT_URL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ScreenInfoConfig::default();
        assert_eq!(config.display.source, "auto");
        assert_eq!(config.display.drm_root, "/sys/class/drm");
        assert_eq!(config.report.format, "text");
        assert!(config.report.footer);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_override() {
        env::set_var("SCREENINFO_CONNECTOR", "DP-3");
        env::set_var("SCREENINFO_FOOTER", "0");
        env::set_var("SCREENINFO_LOG_JSON", "true");

        let mut config = ScreenInfoConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.display.connector.as_deref(), Some("DP-3"));
        assert!(!config.report.footer);
        assert!(config.logging.json_format);

        env::remove_var("SCREENINFO_CONNECTOR");
        env::remove_var("SCREENINFO_FOOTER");
        env::remove_var("SCREENINFO_LOG_JSON");
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(ScreenInfoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_source() {
        let mut config = ScreenInfoConfig::default();
        config.display.source = "camera".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_profile_source_without_path() {
        let mut config = ScreenInfoConfig::default();
        config.display.source = "profile".to_string();
        match config.validate() {
            Err(Error::ConfigValidation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("display.profile"))
            }
            other => panic!("Expected ConfigValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_invalid_format() {
        let mut config = ScreenInfoConfig::default();
        config.report.format = "html".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = ScreenInfoConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_report_format() {
        let mut report = ReportSettings::default();
        assert_eq!(report.report_format().unwrap(), ReportFormat::Text);
        report.format = "JSON".to_string();
        assert_eq!(report.report_format().unwrap(), ReportFormat::Json);
    }

    #[test]
    fn test_cli_profile_implies_profile_source() {
        let mut config = ScreenInfoConfig::default();
        config
            .apply_overrides(None, Some("/tmp/phone.toml"), None)
            .unwrap();
        assert_eq!(config.display.source, "profile");
        assert_eq!(config.display.profile.as_deref(), Some("/tmp/phone.toml"));
    }

    #[test]
    fn test_cli_source_wins_over_profile() {
        let mut config = ScreenInfoConfig::default();
        config
            .apply_overrides(Some("mock"), Some("/tmp/phone.toml"), Some("eDP-1"))
            .unwrap();
        assert_eq!(config.display.source, "mock");
        assert_eq!(config.display.connector.as_deref(), Some("eDP-1"));
    }

    #[test]
    fn test_path_expansion() {
        let mut config = ScreenInfoConfig::default();
        config.display.profile = Some("~/profiles/phone.toml".to_string());
        config.expand_paths();

        assert!(!config.display.profile.unwrap().contains('~'));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = ScreenInfoConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = ScreenInfoConfig::parse(&toml_str).unwrap();

        assert_eq!(config.display.source, parsed.display.source);
        assert_eq!(config.report.project_url, parsed.report.project_url);
    }

    #[test]
    fn test_generated_default_parses() {
        let config = ScreenInfoConfig::parse(&generate_default_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.report.project_url, DEFAULT_PROJECT_URL);
    }

    #[test]
    fn test_parse_config_file() {
        let config = ScreenInfoConfig::parse(
            r#"
[display]
source = "drm"
connector = "HDMI-A-1"

[report]
format = "json"
footer = false
"#,
        )
        .unwrap();

        assert_eq!(config.display.source, "drm");
        assert_eq!(config.display.connector.as_deref(), Some("HDMI-A-1"));
        assert_eq!(config.display.drm_root, "/sys/class/drm");
        assert_eq!(config.report.format, "json");
        assert!(!config.report.footer);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse_error() {
        let err = ScreenInfoConfig::parse("[display\nsource = ").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = ScreenInfoConfig::load(Some("/nonexistent/screeninfo.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_str = path.to_string_lossy().to_string();

        assert_eq!(init_config(Some(&path_str), false).unwrap(), path);
        assert!(path.exists());
        assert!(init_config(Some(&path_str), false).is_err());
        assert!(init_config(Some(&path_str), true).is_ok());
    }
}
