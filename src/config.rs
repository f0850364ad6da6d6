use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::files::ServedDirectory;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Command line for the `courier` binary.
#[derive(Debug, Parser)]
#[command(name = "courier", about = "Minimal HTTP/1.1 file and echo server")]
pub struct Cli {
    /// Directory served under /files/
    #[arg(long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "LISTEN", value_name = "ADDR")]
    pub listen: Option<String>,

    /// YAML file with `listen_addr` and `directory`
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("served directory {0} does not exist or is not a directory")]
    NotADirectory(PathBuf),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen_addr: String,
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Builds the configuration from the command line.
    ///
    /// Values from `--config` are read first; flags given on the command
    /// line replace them.
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(listen) = cli.listen {
            cfg.listen_addr = listen;
        }
        if let Some(directory) = cli.directory {
            cfg.directory = Some(directory);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A configured directory must exist; no directory at all is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.directory {
            Some(dir) if !dir.is_dir() => Err(ConfigError::NotADirectory(dir.clone())),
            _ => Ok(()),
        }
    }

    pub fn served_directory(&self) -> Option<ServedDirectory> {
        self.directory.clone().map(ServedDirectory::new)
    }
}
