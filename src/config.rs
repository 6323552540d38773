use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use crate::error::ConfigError;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");
const CONFIG_FILE_NAME: &str = "open-dj";
const ENV_PREFIX: &str = "OPEN_DJ";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub general: GeneralConfig,
    pub volume: VolumeConfig,
    pub commands: BTreeMap<String, CommandConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Character(s) a chat message must start with to be read as a command.
    pub command_prefix: String,
    /// Share of the channel roster that must vote before a track is skipped.
    pub skip_ratio: f32,
    pub max_tracks_listed: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VolumeConfig {
    pub default: f32,
    pub lowest: f32,
    pub highest: f32,
}

/// Per-command settings, read once when the registry is built.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommandConfig {
    pub aliases: Vec<String>,
    pub description: String,
    pub admin: bool,
}

impl BotConfig {
    /// Loads `.env`, the built-in defaults, `open-dj.toml` (if present) and
    /// `OPEN_DJ_*` environment variables, in increasing priority.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(None)
    }

    /// Like [`load`](Self::load) with an explicit, required config file.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(CONFIG_FILE_NAME).required(false)),
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults only, ignoring files and the environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Settings for the command registered under `name`.
    pub fn command(&self, name: &str) -> Result<&CommandConfig, ConfigError> {
        self.commands
            .get(name)
            .ok_or_else(|| ConfigError::MissingCommand(name.to_string()))
    }

    /// Validates configuration values for correctness.
    ///
    /// # Validation Rules
    ///
    /// - The command prefix must not be empty
    /// - The skip ratio must be in `(0, 1]`
    /// - Volume bounds must be ordered and contain the default
    /// - Every command needs at least one alias, none of them blank
    /// - An alias (compared case-insensitively) belongs to one command only
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.command_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "command prefix cannot be empty".to_string(),
            ));
        }

        if !(self.general.skip_ratio > 0.0 && self.general.skip_ratio <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "skip ratio must be in (0, 1], got: {}",
                self.general.skip_ratio
            )));
        }

        let volume = &self.volume;
        if volume.lowest < 0.0 || volume.lowest > volume.highest {
            return Err(ConfigError::Validation(format!(
                "volume bounds are invalid: lowest {}, highest {}",
                volume.lowest, volume.highest
            )));
        }
        if volume.default < volume.lowest || volume.default > volume.highest {
            return Err(ConfigError::Validation(format!(
                "default volume {} is outside [{}, {}]",
                volume.default, volume.lowest, volume.highest
            )));
        }

        let mut owners: HashMap<String, &str> = HashMap::new();
        for (name, command) in &self.commands {
            if command.aliases.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "command `{name}` has no aliases"
                )));
            }

            for alias in &command.aliases {
                let normalized = alias.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "command `{name}` has a blank alias"
                    )));
                }

                if let Some(first) = owners.insert(normalized.clone(), name.as_str()) {
                    return Err(ConfigError::DuplicateAlias {
                        alias: normalized,
                        first: first.to_string(),
                        second: name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns a summary of the current configuration for logging.
    pub fn summary(&self) -> String {
        let admin_commands: Vec<&str> = self
            .commands
            .iter()
            .filter(|(_, command)| command.admin)
            .map(|(name, _)| name.as_str())
            .collect();

        format!(
            "Config Summary:\n  \
            Prefix: {}\n  \
            Skip ratio: {:.0}%\n  \
            Volume: {} (range {} - {})\n  \
            Commands: {} ({} admin-only: {})",
            self.general.command_prefix,
            self.general.skip_ratio * 100.0,
            self.volume.default,
            self.volume.lowest,
            self.volume.highest,
            self.commands.len(),
            admin_commands.len(),
            admin_commands.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = BotConfig::defaults().unwrap();

        assert_eq!(config.general.command_prefix, "!");
        assert_eq!(config.commands.len(), 13);
        assert_eq!(
            config.command("shuffle").unwrap(),
            &CommandConfig {
                aliases: vec!["shuffle".into(), "shuf".into(), "sh".into()],
                description: "Shuffles the queue".into(),
                admin: true,
            }
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("open-dj.toml");
        std::fs::write(
            &path,
            r#"
                [general]
                skip_ratio = 0.75

                [commands.shuffle]
                aliases = ["mix"]
                description = "Mix it up"
            "#,
        )
        .unwrap();

        let config = BotConfig::load_from(Some(&path)).unwrap();

        assert_eq!(config.general.skip_ratio, 0.75);
        assert_eq!(config.general.command_prefix, "!");
        let shuffle = config.command("shuffle").unwrap();
        assert_eq!(shuffle.aliases, vec!["mix".to_string()]);
        assert_eq!(shuffle.description, "Mix it up");
        assert!(shuffle.admin);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = BotConfig::load_from(Some(&dir.path().join("nope.toml")));

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_invalid_skip_ratio() {
        let mut config = BotConfig::defaults().unwrap();
        config.general.skip_ratio = 0.0;

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_default_volume_outside_bounds() {
        let mut config = BotConfig::defaults().unwrap();
        config.volume.default = 2.0;

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_duplicate_alias_is_rejected() {
        let mut config = BotConfig::defaults().unwrap();
        config
            .commands
            .get_mut("skip")
            .unwrap()
            .aliases
            .push("SH".to_string());

        match config.validate() {
            Err(ConfigError::DuplicateAlias { alias, .. }) => assert_eq!(alias, "sh"),
            other => panic!("expected duplicate alias error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_alias_is_rejected() {
        let mut config = BotConfig::defaults().unwrap();
        config.commands.get_mut("help").unwrap().aliases = vec!["  ".to_string()];

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_summary_lists_admin_commands() {
        let config = BotConfig::defaults().unwrap();

        let summary = config.summary();

        assert!(summary.contains("Skip ratio: 50%"));
        assert!(summary.contains("shuffle"));
        assert!(!summary.contains("numtracks"));
    }
}
