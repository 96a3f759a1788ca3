use crate::announcement::DismissPolicy;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Noticeboard data directory - computed from home, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub banner: BannerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// REST base URL, e.g. `https://<project>.supabase.co`
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_table() -> String {
    "announcements".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default)]
    pub dismiss_policy: DismissPolicy,
    /// Whether the user may dismiss the banner at all.
    #[serde(default = "default_true")]
    pub dismissible: bool,
    /// Whether tapping expands the banner to its full body.
    #[serde(default = "default_true")]
    pub tappable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            dismiss_policy: DismissPolicy::default(),
            dismissible: true,
            tappable: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Dismissal store location; `~` is expanded. Defaults to
    /// `<data_dir>/dismissals.json`.
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    pub fn store_path(&self) -> PathBuf {
        match self.storage.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => PathBuf::from(shellexpand::tilde(path).as_ref()),
            _ => self.data_dir.join("dismissals.json"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = self.source.base_url.as_deref()
            && !base_url.trim().is_empty()
        {
            let parsed = url::Url::parse(base_url).map_err(|err| {
                ConfigError::Validation(format!("source.base_url '{base_url}' is invalid: {err}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "source.base_url must use http or https, got '{}'",
                    parsed.scheme()
                )));
            }
        }

        if self.source.table.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source.table must not be empty".into(),
            ));
        }

        for (field, secs) in [
            ("timeout_secs", self.source.timeout_secs),
            ("connect_timeout_secs", self.source.connect_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Validation(format!(
                    "source.{field} must be positive"
                )));
            }
        }

        self.banner
            .dismiss_policy
            .validate()
            .map_err(|err| ConfigError::Validation(format!("banner.dismiss_policy: {err}")))
    }
}
