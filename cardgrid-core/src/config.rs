//! Configuration.
//!
//! Settings come from an optional YAML file, then command-line flags on top.
//! Without `--config` the file at `~/.cardgrid/config.yml` is used when it
//! exists.
//!
//! ```yaml
//! source: ~/decks/cards.csv
//! delimiter: ";"
//! page_size: 50
//! output: text
//! log_level: info
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::loader::{DataSource, ParseOptions};
use crate::render::OutputFormat;

pub const DEFAULT_SOURCE: &str = "cards.csv";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The YAML file as written; every key is optional.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    pub source: Option<String>,
    pub delimiter: Option<String>,
    pub page_size: Option<usize>,
    pub output: Option<OutputFormat>,
    pub log_level: Option<String>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".cardgrid").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Read a config file. A missing file is an empty config when
/// `allow_missing` is set.
pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// A delimiter must be exactly one ASCII character.
pub fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ConfigError::InvalidDelimiter(value.to_owned())),
    }
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub source: DataSource,
    pub parse: ParseOptions,
    pub page_size: usize,
    pub output: OutputFormat,
    pub log_level: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: DataSource::File(PathBuf::from(DEFAULT_SOURCE)),
            parse: ParseOptions::default(),
            page_size: DEFAULT_PAGE_SIZE,
            output: OutputFormat::default(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl CatalogConfig {
    /// Load the config file named by `args` (or the default one) and apply
    /// the flags over it.
    pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => load_config(&expand_tilde(path), false)?,
            None => match default_config_path() {
                Some(path) => load_config(&path, true)?,
                None => ConfigFile::default(),
            },
        };
        Self::layered(file, args)
    }

    /// Defaults, then `file`, then `args`.
    pub fn layered(file: ConfigFile, args: &CliArgs) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let source = match args.source.as_deref().or(file.source.as_deref()) {
            Some(location) => source_from(location),
            None => defaults.source,
        };

        let parse = match args.delimiter.as_deref().or(file.delimiter.as_deref()) {
            Some(value) => defaults.parse.delimiter(parse_delimiter(value)?),
            None => defaults.parse,
        };

        let page_size = args
            .page_size
            .or(file.page_size)
            .unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        Ok(Self {
            source,
            parse,
            page_size,
            output: args.output.or(file.output).unwrap_or(defaults.output),
            log_level: file.log_level.unwrap_or(defaults.log_level),
        })
    }
}

fn source_from(location: &str) -> DataSource {
    match DataSource::parse(location) {
        DataSource::File(_) => DataSource::File(expand_tilde(location)),
        other => other,
    }
}
