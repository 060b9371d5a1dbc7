//! The `.guardrailsrc` file in the user's home directory.
//!
//! Every save writes a fresh record with four `key=value` lines in a fixed
//! order. Nothing from a previous file is carried over.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

pub const RC_FILE_NAME: &str = ".guardrailsrc";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the home directory")]
    HomeDirectoryNotFound,
    #[error("failed to read {path}: {source}")]
    FailedToLoadData {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    FailedToWriteData {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("missing value for property {name:?}")]
    MissingRequiredPropertyValue { name: String },
    #[error("invalid value {value:?} for property {name:?}")]
    InvalidPropertyValue { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcConfig {
    pub id: Uuid,
    pub client_id: String,
    pub client_secret: String,
    pub no_metrics: bool,
}

impl RcConfig {
    /// A new record with a freshly generated id.
    pub fn new(client_id: &str, client_secret: &str, no_metrics: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            no_metrics,
        }
    }

    /// The lines written to disk, each carrying its line terminator.
    pub fn lines(&self) -> [String; 4] {
        [
            format!("id={}{}", self.id, LINE_ENDING),
            format!("client_id={}{}", self.client_id, LINE_ENDING),
            format!("client_secret={}{}", self.client_secret, LINE_ENDING),
            format!("no_metrics={}{}", self.no_metrics, LINE_ENDING),
        ]
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        let write_err = |source| ConfigurationError::FailedToWriteData {
            path: path.to_path_buf(),
            source,
        };

        // File::create truncates; the handle is closed when `writer` drops.
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        for line in self.lines() {
            writer.write_all(line.as_bytes()).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        debug!("Wrote configuration to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content =
            fs::read_to_string(path).map_err(|source| ConfigurationError::FailedToLoadData {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content)
    }

    pub fn load_default<H>(home_dir: H) -> Result<Self, ConfigurationError>
    where
        H: FnOnce() -> Option<PathBuf>,
    {
        let path = rc_file_path(home_dir)?;
        debug!("Loading configuration from {}...", path.display());
        Self::load(&path)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigurationError> {
        let mut id = None;
        let mut client_id = None;
        let mut client_secret = None;
        let mut no_metrics = None;

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                "id" => id = Some(value),
                "client_id" => client_id = Some(value),
                "client_secret" => client_secret = Some(value),
                "no_metrics" => no_metrics = Some(value),
                _ => {}
            }
        }

        let required = |name: &str, value: Option<String>| {
            value.ok_or_else(|| ConfigurationError::MissingRequiredPropertyValue {
                name: name.to_string(),
            })
        };

        let id = required("id", id)?;
        let id = Uuid::parse_str(&id).map_err(|_| ConfigurationError::InvalidPropertyValue {
            name: "id".to_string(),
            value: id.clone(),
        })?;

        Ok(Self {
            id,
            client_id: required("client_id", client_id)?,
            client_secret: required("client_secret", client_secret)?,
            no_metrics: no_metrics.is_some_and(|v| v.eq_ignore_ascii_case("true")),
        })
    }
}

/// Joins the home directory reported by `home_dir` with [`RC_FILE_NAME`].
pub fn rc_file_path<H>(home_dir: H) -> Result<PathBuf, ConfigurationError>
where
    H: FnOnce() -> Option<PathBuf>,
{
    let home = home_dir().ok_or(ConfigurationError::HomeDirectoryNotFound)?;
    Ok(home.join(RC_FILE_NAME))
}

pub fn save_configuration_file<H>(
    home_dir: H,
    client_id: &str,
    client_secret: &str,
    no_metrics: bool,
) -> Result<(), ConfigurationError>
where
    H: FnOnce() -> Option<PathBuf>,
{
    let path = rc_file_path(home_dir)?;
    RcConfig::new(client_id, client_secret, no_metrics).save(&path)
}
