// # File Host
//
// This crate provides a file-backed host for the coreopt registry.
//
// ## Purpose
//
// Frontends commonly keep the selected label of every core option in a
// plain `key = "label"` file. `FileHost` reads such a file (it is valid
// TOML) and answers the registry's queries from it:
//
// ```toml
// core_renderer = "Software"
// core_fastmem = "disabled"
// core_max_anisotropy = "4"
// ```
//
// ## Change Detection
//
// `variable_update` compares the file's modification time and length with
// the last load. When they differ the file is re-read, and a change is
// reported only if the selections actually differ. A missing file is an
// empty selection; a malformed file is logged and the previous selection
// kept.
//
// ## Schema Sidecar
//
// When a schema path is configured, the published option list is written
// there as JSON so a settings UI can render the available choices.

use coreopt_core::config::HostConfig;
use coreopt_core::wire::parse_wire_string;
use coreopt_core::{Error, Host, Result, Variable};

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Schema sidecar format version
const SCHEMA_FILE_VERSION: &str = "1.0";

/// File-backed host
#[derive(Debug)]
pub struct FileHost {
    /// Options file
    path: PathBuf,

    /// Where to write the published schema
    schema_path: Option<PathBuf>,

    /// Loaded selections
    state: RwLock<FileHostState>,
}

#[derive(Debug, Default)]
struct FileHostState {
    values: HashMap<String, String>,
    stamp: Option<FileStamp>,
    schema: Vec<Variable>,
}

/// What the last load saw of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

/// Serializable schema sidecar format
#[derive(Debug, Serialize)]
struct SchemaFileFormat<'a> {
    version: &'static str,
    options: Vec<SchemaEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct SchemaEntry<'a> {
    key: &'a str,
    name: &'a str,
    labels: Vec<&'a str>,
}

impl FileHost {
    /// Open an options file
    ///
    /// A missing file yields an empty selection.
    ///
    /// # Returns
    ///
    /// - `Ok(FileHost)`: The file was loaded (or is absent)
    /// - `Err(Error)`: The file exists but cannot be read or parsed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let stamp = stamp_of(&path)?;
        let values = match stamp {
            Some(_) => load_values(&path)?,
            None => HashMap::new(),
        };

        info!(
            "Loaded {} option selection(s) from {}",
            values.len(),
            path.display()
        );

        Ok(Self {
            path,
            schema_path: None,
            state: RwLock::new(FileHostState {
                values,
                stamp,
                schema: Vec::new(),
            }),
        })
    }

    /// Create from a host configuration
    ///
    /// # Returns
    ///
    /// `Err(Error::Config)` unless `config` is a `file` host.
    pub fn from_config(config: &HostConfig) -> Result<Self> {
        config.validate()?;
        match config {
            HostConfig::File { path, schema_path } => {
                let host = Self::open(path)?;
                Ok(match schema_path {
                    Some(schema_path) => host.with_schema_path(schema_path),
                    None => host,
                })
            }
            other => Err(Error::config(format!(
                "Expected a file host configuration, got '{}'",
                other.type_name()
            ))),
        }
    }

    /// Write the published schema to `path` as JSON
    pub fn with_schema_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.schema_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Path of the options file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The schema received by the latest `set_variables`
    pub fn schema(&self) -> Vec<Variable> {
        self.read().schema.clone()
    }

    /// Re-read the options file now
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The selections changed
    /// - `Ok(false)`: The file holds the same selections
    /// - `Err(Error)`: The file cannot be read or parsed; nothing changed
    pub fn reload(&self) -> Result<bool> {
        let stamp = stamp_of(&self.path)?;
        let values = match stamp {
            Some(_) => load_values(&self.path)?,
            None => HashMap::new(),
        };

        let mut state = self.write();
        state.stamp = stamp;
        if state.values == values {
            return Ok(false);
        }

        debug!(
            "Options file {} changed, {} selection(s)",
            self.path.display(),
            values.len()
        );
        state.values = values;
        Ok(true)
    }

    fn write_schema(&self, path: &Path, variables: &[Variable]) -> Result<()> {
        let options = variables
            .iter()
            .filter(|v| !v.is_sentinel())
            .map(|v| {
                let (name, labels) = parse_wire_string(&v.value).unwrap_or((v.value.as_str(), Vec::new()));
                SchemaEntry {
                    key: &v.key,
                    name,
                    labels,
                }
            })
            .collect();

        let schema = SchemaFileFormat {
            version: SCHEMA_FILE_VERSION,
            options,
        };

        fs::write(path, serde_json::to_vec_pretty(&schema)?)?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, FileHostState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FileHostState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Host for FileHost {
    fn set_variables(&self, variables: &[Variable]) -> bool {
        self.write().schema = variables.to_vec();

        if let Some(schema_path) = &self.schema_path {
            match self.write_schema(schema_path, variables) {
                Ok(()) => debug!("Wrote option schema to {}", schema_path.display()),
                Err(e) => warn!(
                    "Failed to write option schema to {}: {}",
                    schema_path.display(),
                    e
                ),
            }
        }

        true
    }

    fn get_variable(&self, key: &str) -> Option<String> {
        self.read().values.get(key).cloned()
    }

    fn variable_update(&self) -> Option<bool> {
        let stamp = match stamp_of(&self.path) {
            Ok(stamp) => stamp,
            Err(e) => {
                warn!("Cannot stat options file {}: {}", self.path.display(), e);
                return Some(false);
            }
        };

        if self.read().stamp == stamp {
            return Some(false);
        }

        match self.reload() {
            Ok(changed) => Some(changed),
            Err(e) => {
                warn!(
                    "Ignoring unreadable options file {}: {}",
                    self.path.display(),
                    e
                );
                // Remember the stamp so the same bad file is reported once
                self.write().stamp = stamp;
                Some(false)
            }
        }
    }
}

/// Modification time and length of `path`, `None` if it does not exist
fn stamp_of(path: &Path) -> Result<Option<FileStamp>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(FileStamp {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Parse an options file into `key -> label`
///
/// String values are taken as-is; numbers and booleans by their text.
fn load_values(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path)?;
    parse_values(&content)
        .map_err(|e| Error::host(format!("Malformed options file {}: {}", path.display(), e)))
}

fn parse_values(content: &str) -> std::result::Result<HashMap<String, String>, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;

    let mut values = HashMap::with_capacity(table.len());
    for (key, value) in table {
        let label = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            other => {
                warn!(option = %key, "Skipping non-scalar option value: {}", other.type_str());
                continue;
            }
        };
        values.insert(key, label);
    }

    Ok(values)
}
