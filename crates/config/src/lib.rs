//! Layered configuration.
//!
//! Values are merged, lowest priority first, from built-in defaults, an
//! optional configuration file (TOML, YAML or JSON), and `WARCIT_*`
//! environment variables. The command line applies its own flags on top of
//! the loaded [`Config`].

pub mod error;
mod rules;

pub use crate::rules::{MimeOverride, parse_names, parse_overrides};
use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use warcit_compress::Compression;

/// Prefix for environment variable overrides (`WARCIT_GZIP=false`).
pub const ENV_PREFIX: &str = "WARCIT_";

/// What to do when the output file already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingPolicy {
    /// Refuse to touch the existing file.
    #[default]
    Error,
    /// Append new records after the existing content.
    Append,
    /// Truncate and start over.
    Overwrite,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output file name; derived from the input when absent.
    pub name: Option<String>,
    /// Directory the output file is created in; the working directory when
    /// absent.
    pub output_dir: Option<PathBuf>,
    pub existing: ExistingPolicy,
    /// Compress each record as its own gzip member.
    pub gzip: bool,
    /// Write a leading `warcinfo` record.
    pub warcinfo: bool,
    /// Sniff content to determine mime types.
    pub magic: bool,
    /// Use this timestamp for every record instead of modification times.
    pub fixed_date: Option<String>,
    /// File names that also stand for their parent directory's URL. Empty
    /// disables aliasing.
    pub index_files: Vec<String>,
    /// Ordered mime overrides; the first matching glob wins.
    pub mime_overrides: Vec<MimeOverride>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            name: None,
            output_dir: None,
            existing: ExistingPolicy::default(),
            gzip: true,
            warcinfo: true,
            magic: true,
            fixed_date: None,
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            mime_overrides: Vec::new(),
        }
    }
}
impl Config {
    /// Platform configuration file location (`~/.config/warcit/config.toml`
    /// on Linux), if a home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "warcit").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path` (or the default location, where a
    /// missing file is not an error) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.is_file()),
        };
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "Loading configuration file");
            figment = Self::merge_file(figment, &file)?;
        }
        figment.merge(Env::prefixed(ENV_PREFIX)).extract().or_raise(|| ErrorKind::Load)
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
        Ok(match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        })
    }

    pub fn compression(&self) -> Compression {
        Compression::from(self.gzip)
    }
}
