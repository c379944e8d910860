use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{DEFAULT_FPS, DEFAULT_GRAVITY_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "A minimal terminal falling-block puzzle game")]
pub struct Cli {
    /// TOML file with game settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Milliseconds between gravity steps
    #[arg(long, value_name = "MS")]
    pub gravity_ms: Option<u64>,

    /// Frames drawn per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for the piece generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (logging is off without it)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub gravity_ms: u64,
    pub fps: u32,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity_ms: DEFAULT_GRAVITY_MS,
            fps: DEFAULT_FPS,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults, then the config file, then command-line flags.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(gravity_ms) = cli.gravity_ms {
            config.gravity_ms = gravity_ms;
        }
        if let Some(fps) = cli.fps {
            config.fps = fps;
        }
        if cli.seed.is_some() {
            config.seed = cli.seed;
        }
        if cli.log_file.is_some() {
            config.log_file = cli.log_file.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity_ms == 0 {
            return Err(ConfigError::Invalid("gravity_ms must be greater than 0".into()));
        }
        if self.fps == 0 || self.fps > 1000 {
            return Err(ConfigError::Invalid("fps must be between 1 and 1000".into()));
        }
        Ok(())
    }

    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("blockfall").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults_without_flags() {
        let config = Config::resolve(&cli(&[])).expect("defaults are valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.gravity_interval(), Duration::from_millis(DEFAULT_GRAVITY_MS));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str("gravity_ms = 16\n").expect("parse");
        assert_eq!(config.gravity_ms, 16);
        assert_eq!(config.fps, DEFAULT_FPS);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("speed = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "gravity_ms = 250\nfps = 30\nseed = 11").expect("write config");
        let path = file.path().to_str().expect("utf-8 path");

        let config = Config::resolve(&cli(&["--config", path, "--fps", "120"])).expect("resolve");
        assert_eq!(config.gravity_ms, 250);
        assert_eq!(config.fps, 120);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        let err = Config::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn zero_values_are_invalid() {
        assert!(matches!(
            Config::resolve(&cli(&["--gravity-ms", "0"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::resolve(&cli(&["--fps", "0"])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn frame_interval_follows_fps() {
        let config = Config {
            fps: 50,
            ..Config::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }
}
