//! Configuration loading and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default base URL of the painting backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Top-level Easel configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// Where the painting store lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Title given to a fresh document (default: "Untitled").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_title: Option<String>,

    /// Tool selected at session start: "circle", "square", "triangle" or "none".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tool: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "plain" (default) or "json".
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log level override (trace/debug/info/warn/error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Per-crate log level overrides (e.g. "easel_remote=debug").
    #[serde(default)]
    pub filters: Vec<String>,

    /// Output target: "stderr" (default) or "stdout".
    #[serde(default = "default_log_output")]
    pub output: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: None,
            filters: Vec::new(),
            output: default_log_output(),
        }
    }
}

fn default_log_format() -> String {
    "plain".into()
}

fn default_log_output() -> String {
    "stderr".into()
}

/// Substitute `${ENV_VAR}` patterns in a string with their environment variable values.
fn substitute_env_vars(input: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static regex");
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_default()
    })
    .into_owned()
}

impl Config {
    /// Load config from a JSON5 file, substituting `${ENV_VAR}` references.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(crate::error::EaselError::Io)?;

        let substituted = substitute_env_vars(&raw);

        let config: Config = json5::from_str(&substituted)
            .map_err(|e| crate::error::EaselError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        data_dir().join("config.json")
    }

    /// Painting store base URL, without a trailing slash.
    pub fn base_url(&self) -> String {
        self.remote
            .as_ref()
            .map(|r| r.base_url.trim_end_matches('/').to_string())
            .unwrap_or_else(default_base_url)
    }

    /// Request timeout for the painting store.
    pub fn timeout(&self) -> std::time::Duration {
        let secs = self
            .remote
            .as_ref()
            .map(|r| r.timeout_secs)
            .unwrap_or_else(default_timeout_secs);
        std::time::Duration::from_secs(secs)
    }

    /// Title for a fresh document.
    pub fn default_title(&self) -> String {
        self.canvas
            .as_ref()
            .and_then(|c| c.default_title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Name of the tool selected at session start.
    pub fn default_tool(&self) -> String {
        self.canvas
            .as_ref()
            .and_then(|c| c.default_tool.clone())
            .unwrap_or_else(|| "circle".to_string())
    }

    /// Validate config, returning (warnings, errors).
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if let Some(remote) = &self.remote {
            if !remote.base_url.starts_with("http://") && !remote.base_url.starts_with("https://")
            {
                errors.push(format!(
                    "Remote base_url must be an http(s) URL: {}",
                    remote.base_url
                ));
            } else if remote.base_url.starts_with("http://")
                && !remote.base_url.contains("localhost")
                && !remote.base_url.contains("127.0.0.1")
            {
                warnings.push(format!(
                    "Remote base_url {} sends credentials over plain http",
                    remote.base_url
                ));
            }
            if remote.timeout_secs == 0 {
                errors.push("Remote timeout_secs cannot be 0".to_string());
            }
        }

        if let Some(tool) = self.canvas.as_ref().and_then(|c| c.default_tool.as_ref()) {
            if !matches!(tool.as_str(), "circle" | "square" | "triangle" | "none") {
                errors.push(format!("Unknown default_tool: {tool}"));
            }
        }

        if let Some(logging) = &self.logging {
            if logging.format != "plain" && logging.format != "json" {
                warnings.push(format!(
                    "Unknown log format '{}', falling back to plain",
                    logging.format
                ));
            }
        }

        (warnings, errors)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Base directory for Easel data: `~/.easel/`
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".easel")
}
