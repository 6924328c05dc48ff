//! Layered CLI configuration: defaults, then `lattice.toml`, then
//! `LATTICE_*` environment variables, then command-line flags.

use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use lattice_log::Format;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

const DEFAULT_CONFIG_FILE: &str = "lattice.toml";

/// Variables read directly by `lattice-log`; they are not CLI config keys.
const LOG_ENV_KEYS: &[&str] = &["log", "log_format", "log_source", "log_colors", "log_threads"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log: LogSettings,
}

/// Overrides applied on top of `lattice_log::Config::from_env`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: Option<String>,
    pub format: Option<Format>,
}

impl CliConfig {
    /// Load defaults, the config file and `LATTICE_` variables
    /// (`LATTICE_LOG__LEVEL=debug` sets `log.level`).
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let file = match explicit {
            Some(path) if !path.exists() => bail!("config file {} does not exist", path.display()),
            Some(path) => path,
            None => Path::new(DEFAULT_CONFIG_FILE),
        };

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("LATTICE_").ignore(LOG_ENV_KEYS).split("__"))
            .extract()
            .with_context(|| format!("invalid configuration in {}", file.display()))
    }

    /// Apply command-line flags, which take precedence over every other layer
    pub fn with_flags(mut self, cli: &Cli) -> Self {
        if let Some(level) = &cli.log_level {
            self.log.level = Some(level.clone());
        }
        if let Some(format) = cli.log_format {
            self.log.format = Some(format);
        }
        self
    }

    /// Logger configuration for this run
    pub fn log_config(&self) -> lattice_log::Config {
        let mut config = lattice_log::Config::from_env();
        if let Some(level) = &self.log.level {
            config.level.clone_from(level);
        }
        if let Some(format) = self.log.format {
            config.format = format;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use figment::Jail;

    #[test]
    fn test_layers_are_applied_in_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "lattice.toml",
                r#"
                [log]
                level = "info"
                format = "pretty"
                "#,
            )?;
            jail.set_env("LATTICE_LOG__LEVEL", "debug");
            jail.set_env("LATTICE_LOG", "trace");

            let config = CliConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.log.level.as_deref(), Some("debug"));
            assert_eq!(config.log.format, Some(Format::Pretty));

            let cli = Cli::parse_from(["lattice", "--log-format", "json", "matrix"]);
            let config = config.with_flags(&cli);
            assert_eq!(config.log.format, Some(Format::Json));
            assert_eq!(config.log_config().format, Format::Json);
            assert_eq!(config.log_config().level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
