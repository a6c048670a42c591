use anyhow::Context;
use serde::Deserialize;
use tracing::{
  error,
  info,
  warn
};

use crate::task::Category;
use crate::view::is_valid_pattern;

pub const DEFAULT_STORAGE_KEY: &str =
  "checkmark.tasks";
pub const DEFAULT_CREATED_AT_FORMAT:
  &str = "%b %-d, %Y %H:%M";
pub const DEFAULT_LOG_LEVEL: &str =
  "info";

const LOG_LEVELS: [&str; 5] = [
  "trace", "debug", "info", "warn",
  "error"
];

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct AppConfig {
  #[serde(default = "config_version")]
  pub version: u32,
  #[serde(default)]
  pub storage: StorageConfig,
  #[serde(default)]
  pub form:    FormConfig,
  #[serde(default)]
  pub display: DisplayConfig,
  #[serde(default)]
  pub logging: LoggingConfig
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct StorageConfig {
  #[serde(default = "default_storage_key")]
  pub key: String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct FormConfig {
  #[serde(default)]
  pub default_category:    Category,
  #[serde(default = "config_true")]
  pub confirm_destructive: bool
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct DisplayConfig {
  #[serde(
    default = "default_created_at_format"
  )]
  pub created_at_format: String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct LoggingConfig {
  #[serde(default = "default_log_level")]
  pub level: String
}

fn config_version() -> u32 {
  1
}

fn config_true() -> bool {
  true
}

fn default_storage_key() -> String {
  DEFAULT_STORAGE_KEY.to_string()
}

fn default_created_at_format() -> String
{
  DEFAULT_CREATED_AT_FORMAT.to_string()
}

fn default_log_level() -> String {
  DEFAULT_LOG_LEVEL.to_string()
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      version: config_version(),
      storage: StorageConfig::default(),
      form:    FormConfig::default(),
      display: DisplayConfig::default(),
      logging: LoggingConfig::default()
    }
  }
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      key: default_storage_key()
    }
  }
}

impl Default for FormConfig {
  fn default() -> Self {
    Self {
      default_category:    Category::default(),
      confirm_destructive: config_true()
    }
  }
}

impl Default for DisplayConfig {
  fn default() -> Self {
    Self {
      created_at_format:
        default_created_at_format()
    }
  }
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: default_log_level()
    }
  }
}

impl AppConfig {
  /// Parses and sanitizes a TOML document.
  pub fn parse(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<AppConfig>(text)
        .context(
          "failed to parse checkmark \
           config"
        )?;
    sanitize_config(&mut config);
    Ok(config)
  }

  /// Like [`AppConfig::parse`], but falls back to defaults on any error.
  pub fn load(text: &str) -> Self {
    match Self::parse(text) {
      | Ok(config) => {
        info!(
          version = config.version,
          storage_key = %config.storage.key,
          default_category = %config.form.default_category,
          confirm_destructive = config.form.confirm_destructive,
          "loaded checkmark config"
        );
        config
      }
      | Err(err) => {
        error!(error = %format!("{err:#}"), "failed parsing checkmark config; using defaults");
        AppConfig::default()
      }
    }
  }

  /// `tracing` level named by `logging.level`.
  pub fn log_level(
    &self
  ) -> tracing::Level {
    match self.logging.level.as_str() {
      | "trace" => tracing::Level::TRACE,
      | "debug" => tracing::Level::DEBUG,
      | "warn" => tracing::Level::WARN,
      | "error" => tracing::Level::ERROR,
      | _ => tracing::Level::INFO
    }
  }
}

fn sanitize_config(
  config: &mut AppConfig
) {
  if config.storage.key.trim().is_empty()
  {
    warn!(
      "blank storage key; using \
       default"
    );
    config.storage.key =
      default_storage_key();
  } else {
    config.storage.key =
      config.storage.key.trim().to_string();
  }

  if !is_valid_pattern(
    &config.display.created_at_format
  ) {
    warn!(
      format = %config.display.created_at_format,
      "unusable created_at format; using default"
    );
    config.display.created_at_format =
      default_created_at_format();
  }

  let level = config
    .logging
    .level
    .trim()
    .to_ascii_lowercase();
  config.logging.level =
    if LOG_LEVELS.contains(&level.as_str())
    {
      level
    } else {
      warn!(
        level = %config.logging.level,
        "unknown log level; using info"
      );
      default_log_level()
    };
}
