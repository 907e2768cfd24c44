//! Dataset discovery and tolerant JSON access.
//!
//! Dataset files live at <base>/data/*.json; data/index.json is the category index.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use glob::{MatchOptions, Pattern};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{LoadError, ValidateError};

pub const DATA_DIR: &str = "data";
pub const INDEX_FILE_NAME: &str = "index.json";

/// Sorted dataset files under `base/data`, excluding the category index.
pub fn discover_dataset_files(base: &Path) -> Result<Vec<PathBuf>, ValidateError> {
    let data_dir = base.join(DATA_DIR);
    let pattern = format!(
        "{}/*.json",
        Pattern::escape(&data_dir.to_string_lossy())
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let entries = glob::glob_with(&pattern, options).map_err(|source| ValidateError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.file_name().is_some_and(|name| name == INDEX_FILE_NAME) {
                    continue;
                }
                files.push(path);
            }
            Err(err) => warn!("skipping unreadable entry {}: {}", err.path().display(), err),
        }
    }
    files.sort();
    debug!("found {} dataset file(s) in {}", files.len(), data_dir.display());
    Ok(files)
}

pub fn index_path(base: &Path) -> PathBuf {
    base.join(DATA_DIR).join(INDEX_FILE_NAME)
}

/// Basename used in issue locations.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn empty_map() -> &'static Map<String, Value> {
    static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

/// The value as a mapping; anything else (absent, null, scalar, list) reads as empty.
pub fn object_or_empty(value: Option<&Value>) -> &Map<String, Value> {
    value.and_then(Value::as_object).unwrap_or(empty_map())
}

/// Walk `path` through nested mappings. Missing or non-mapping levels behave as empty.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = object_or_empty(Some(value));
    for key in parents {
        current = object_or_empty(current.get(*key));
    }
    current.get(*last)
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
