//! Field label tables
//!
//! In the fielded dialect a term like `type:denarius` renders as
//! `coin type "denarius"`: the field name is swapped for a label before
//! rendering. The lookup goes through [`FieldResolver`] so callers can plug in
//! their own source of labels. Unknown fields always render verbatim.
//!
//! Tables are flat YAML maps (JSON works too):
//!
//! ```yaml
//! type: coin type
//! date: date
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const BUILTIN_TABLE: &str = include_str!("fields/builtin.yaml");

// The text before the first colon of a fielded word.
static FIELD_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z_]+(?:-[0-9A-Za-z_]+)*$").unwrap());

/// Maps a field name to the label shown in English output
pub trait FieldResolver {
    /// The label for `field`, or `field` itself when there is none
    fn label<'a>(&'a self, field: &'a str) -> &'a str;
}

/// Shows every field name as typed
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl FieldResolver for Verbatim {
    fn label<'a>(&'a self, field: &'a str) -> &'a str {
        field
    }
}

#[derive(Debug, Error)]
pub enum FieldsError {
    #[error("failed to read field table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid field table: {0}")]
    Syntax(#[from] serde_yaml::Error),
    #[error("field name {0:?} can never appear in a query")]
    InvalidField(String),
    #[error("field {0:?} has an empty label")]
    EmptyLabel(String),
}

/// A static field name to label table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLabels {
    labels: BTreeMap<String, String>,
}

impl FieldLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from in-code pairs. No validation is done.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        FieldLabels {
            labels: pairs
                .into_iter()
                .map(|(field, label)| (field.into(), label.into()))
                .collect(),
        }
    }

    /// The table shipped with boolq (coin catalogue fields)
    pub fn builtin() -> Result<Self, FieldsError> {
        Self::from_yaml(BUILTIN_TABLE)
    }

    /// Load a table from a YAML string
    pub fn from_yaml(yaml_str: &str) -> Result<Self, FieldsError> {
        // An empty document deserializes to null rather than an empty map.
        let labels: Option<BTreeMap<String, String>> = serde_yaml::from_str(yaml_str)?;
        let table = FieldLabels {
            labels: labels.unwrap_or_default(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a YAML or JSON file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, FieldsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| FieldsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_yaml(&content)?;
        debug!(path = %path.display(), fields = table.len(), "loaded field table");
        Ok(table)
    }

    fn validate(&self) -> Result<(), FieldsError> {
        for (field, label) in &self.labels {
            if !FIELD_NAME.is_match(field) {
                return Err(FieldsError::InvalidField(field.clone()));
            }
            if label.trim().is_empty() {
                return Err(FieldsError::EmptyLabel(field.clone()));
            }
        }
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .map(|(field, label)| (field.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FieldResolver for FieldLabels {
    fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.get(field).unwrap_or(field)
    }
}

/// Where a front end gets its field labels from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSource {
    /// No field support: plain dialect
    #[default]
    Disabled,
    /// Fielded dialect, field names shown as typed
    Verbatim,
    /// Fielded dialect with the built-in table
    Builtin,
    /// Fielded dialect with a table loaded from disk
    File(PathBuf),
}

impl FieldSource {
    /// Pick a source from command-line style switches. A file wins over the
    /// built-in table, which wins over verbatim field names.
    pub fn from_flags(file: Option<PathBuf>, builtin: bool, verbatim: bool) -> Self {
        match (file, builtin, verbatim) {
            (Some(path), _, _) => FieldSource::File(path),
            (None, true, _) => FieldSource::Builtin,
            (None, false, true) => FieldSource::Verbatim,
            (None, false, false) => FieldSource::Disabled,
        }
    }

    /// Load the table, `None` meaning the plain dialect
    pub fn load(&self) -> Result<Option<FieldLabels>, FieldsError> {
        match self {
            FieldSource::Disabled => Ok(None),
            FieldSource::Verbatim => Ok(Some(FieldLabels::new())),
            FieldSource::Builtin => FieldLabels::builtin().map(Some),
            FieldSource::File(path) => FieldLabels::from_yaml_file(path).map(Some),
        }
    }
}
