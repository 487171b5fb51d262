// InternDesk - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::platform::api::ApiSettings;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for InternDesk data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/interndesk/ or %APPDATA%\InternDesk\config\)
    pub config_dir: PathBuf,

    /// Data directory for the session file.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[api]` section.
    pub api: ApiSection,
    /// `[session]` section.
    pub session: SessionSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[api]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Base URL of the portal API.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Bearer token sent with every request.
    pub token: Option<String>,
}

/// `[session]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Signed-in company user id.
    pub user_id: Option<String>,
    /// Company the user acts for.
    pub company_id: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Whether chart and counter animations run.
    pub animations: Option<bool>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- API --
    pub api: ApiSettings,

    // -- Session --
    pub user_id: Option<String>,
    pub company_id: Option<String>,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Whether chart and counter animations run.
    pub animations: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            user_id: None,
            company_id: None,
            dark_mode: true,
            animations: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Replace the API base URL (the `--api` flag), with the same check the
    /// config file gets.
    pub fn override_base_url(&mut self, url: &str) -> Result<(), ConfigError> {
        self.api.base_url = check_base_url(url)?;
        Ok(())
    }
}

/// Accept only http(s) base URLs. Returns the trimmed URL.
pub fn check_base_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: "api.base_url".to_string(),
            value: url.to_string(),
            expected: "an http:// or https:// URL".to_string(),
        })
    }
}

/// Minimum user-configurable UI font size (points).
const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
const MAX_FONT_SIZE: f32 = 24.0;

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with one
/// warning; the application still starts but the user is informed.
///
/// Runs before logging is initialised (the log level lives in this file), so
/// problems are reported through the returned warnings, not tracing.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    if !config_path.exists() {
        return (AppConfig::default(), Vec::new());
    }

    match load_config_file(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => (AppConfig::default(), vec![format!("{e}. Using defaults.")]),
    }
}

/// Load and validate an explicit config file (`--config`). Unlike
/// `load_config`, a missing or unparseable file is an error.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw = toml::from_str::<RawConfig>(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(validate(raw))
}

fn out_of_range(field: &str, value: impl ToString, expected: String, default: impl ToString) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    format!("{err}. Using default ({}).", default.to_string())
}

/// Validate each field of `raw` against named constants, accumulating all
/// problems instead of stopping at the first.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- API: base_url --
    if let Some(url) = raw.api.base_url {
        match check_base_url(&url) {
            Ok(url) => config.api.base_url = url,
            Err(e) => warnings.push(format!(
                "{e}. Using default ({}).",
                constants::DEFAULT_API_BASE_URL
            )),
        }
    }

    // -- API: timeout_secs --
    if let Some(secs) = raw.api.timeout_secs {
        if (constants::MIN_API_TIMEOUT_SECS..=constants::MAX_API_TIMEOUT_SECS).contains(&secs) {
            config.api.timeout = Duration::from_secs(secs);
        } else {
            warnings.push(out_of_range(
                "api.timeout_secs",
                secs,
                format!(
                    "{}-{}",
                    constants::MIN_API_TIMEOUT_SECS,
                    constants::MAX_API_TIMEOUT_SECS
                ),
                constants::DEFAULT_API_TIMEOUT_SECS,
            ));
        }
    }

    // -- API: token --
    config.api.token = raw.api.token.filter(|t| !t.trim().is_empty());

    // -- Session --
    config.user_id = raw.session.user_id.filter(|s| !s.trim().is_empty());
    config.company_id = raw.session.company_id.filter(|s| !s.trim().is_empty());

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: animations --
    if let Some(enabled) = raw.ui.animations {
        config.animations = enabled;
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(out_of_range(
                "ui.font_size",
                size,
                format!("{MIN_FONT_SIZE}-{MAX_FONT_SIZE}"),
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(toml_text).unwrap())
    }

    #[test]
    fn test_missing_file_gives_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.api.base_url, constants::DEFAULT_API_BASE_URL);
        assert!(config.animations);
    }

    #[test]
    fn test_valid_file_is_applied() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            r#"
[api]
base_url = "https://portal.example.edu/api"
timeout_secs = 30
token = "abc"

[session]
user_id = "u-9"
company_id = "c-3"

[ui]
theme = "light"
animations = false

[logging]
level = "DEBUG"
"#,
        )
        .unwrap();

        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.api.base_url, "https://portal.example.edu/api");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.user_id.as_deref(), Some("u-9"));
        assert_eq!(config.company_id.as_deref(), Some("c-3"));
        assert!(!config.dark_mode);
        assert!(!config.animations);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_keep_defaults() {
        let (config, warnings) = parse(
            r#"
[api]
base_url = "ftp://nope"
timeout_secs = 0

[ui]
theme = "neon"
font_size = 99.0

[logging]
level = "loud"
"#,
        );
        assert_eq!(warnings.len(), 5);
        assert_eq!(config.api.base_url, constants::DEFAULT_API_BASE_URL);
        assert_eq!(
            config.api.timeout,
            Duration::from_secs(constants::DEFAULT_API_TIMEOUT_SECS)
        );
        assert!(config.dark_mode);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_blank_session_ids_are_ignored() {
        let (config, _) = parse("[session]\nuser_id = \"  \"\n");
        assert!(config.user_id.is_none());
    }

    #[test]
    fn test_unparseable_file_warns() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "[api\nbroken").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
        assert!(config.api.token.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_out_of_range_warning_names_field() {
        let (_, warnings) = parse("[api]\ntimeout_secs = 500\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("api.timeout_secs"));
        assert!(warnings[0].contains("1-120"));
    }

    #[test]
    fn test_api_override_is_validated_like_the_file() {
        let mut config = AppConfig::default();
        let err = config.override_base_url("portal.example.edu/api").unwrap_err();
        assert!(err.to_string().contains("api.base_url"), "{err}");
        assert_eq!(config.api.base_url, constants::DEFAULT_API_BASE_URL);

        config
            .override_base_url("  https://portal.example.edu/api ")
            .unwrap();
        assert_eq!(config.api.base_url, "https://portal.example.edu/api");

        let (_, warnings) = parse("[api]\nbase_url = \"ftp://nope\"\n");
        assert!(warnings[0].contains("api.base_url"), "{}", warnings[0]);
    }
}
