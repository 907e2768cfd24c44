use std::fmt;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::data::dataset::{
    discover_dataset_files, display_name, index_path, is_truthy, load_json, lookup,
    object_or_empty, INDEX_FILE_NAME,
};
use crate::error::{IndexEntryError, ValidateError};

const REQUIRED_KEYS: &[&str] = &[
    "id",
    "name",
    "media",
    "meta",
    "tags",
    "accessibility",
    "slug",
];

const LOCALES: &[&str] = &["en", "hi", "gu"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub location: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}: {}", self.location, self.message)
    }
}

/// Issues in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn push(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            location: location.into(),
            message: message.into(),
        });
    }

    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// One `- <location>: <message>` line per issue.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for issue in &self.issues {
            out.push_str(&issue.to_string());
            out.push('\n');
        }
        out
    }
}

/// Scan every dataset file under `base/data` in sorted order, then the category index.
pub fn validate_tree(base: &Path) -> Result<ValidationReport, ValidateError> {
    let mut report = ValidationReport::default();
    for path in discover_dataset_files(base)? {
        validate_dataset_file(&mut report, base, &path);
    }
    validate_index_file(&mut report, base, &index_path(base));
    debug!("validation finished with {} issue(s)", report.len());
    Ok(report)
}

pub fn validate_dataset_file(report: &mut ValidationReport, base: &Path, path: &Path) {
    let file_name = display_name(path);
    let payload = match load_json(path) {
        Ok(payload) => payload,
        Err(err) => {
            debug!("failed to load {}: {}", err.path().display(), err);
            report.push(file_name, format!("Parse error: {err}"));
            return;
        }
    };

    let Some(records) = payload.as_array() else {
        report.push(file_name, "Top-level is not a list");
        return;
    };

    debug!("checking {} record(s) in {}", records.len(), file_name);
    for (index, record) in records.iter().enumerate() {
        let label = format!("{file_name}[{index}]");
        validate_record(report, base, &label, index, record);
    }
}

/// Presence, locale, asset and ordering checks for the record at 0-based `index`.
pub fn validate_record(
    report: &mut ValidationReport,
    base: &Path,
    label: &str,
    index: usize,
    record: &Value,
) {
    let object = object_or_empty(Some(record));
    for key in REQUIRED_KEYS {
        if !object.contains_key(*key) {
            report.push(label, format!("Missing key: {key}"));
        }
    }

    let name = object_or_empty(object.get("name"));
    for locale in LOCALES {
        if !name.contains_key(*locale) {
            report.push(label, format!("Missing name.{locale}"));
        }
    }

    let alt_text = object_or_empty(lookup(record, &["accessibility", "altText"]));
    for locale in LOCALES {
        if !alt_text.contains_key(*locale) {
            report.push(label, format!("Missing accessibility.altText.{locale}"));
        }
    }

    match lookup(record, &["media", "image"])
        .filter(|image| is_truthy(image))
        .and_then(Value::as_str)
    {
        Some(image) => {
            if !base.join(image).exists() {
                report.push(label, format!("Image missing: {image}"));
            }
        }
        None => report.push(label, "Missing media.image"),
    }

    let expected = index + 1;
    let order = lookup(record, &["meta", "order"]);
    if !order_matches(order, expected) {
        report.push(
            label,
            format!("meta.order should be {expected}, got {}", render_value(order)),
        );
    }
}

pub fn validate_index_file(report: &mut ValidationReport, base: &Path, path: &Path) {
    let payload = match load_json(path) {
        Ok(payload) => payload,
        Err(err) => {
            report.push(INDEX_FILE_NAME, format!("Parse error: {err}"));
            return;
        }
    };

    let Some(categories) = payload.as_array() else {
        report.push(INDEX_FILE_NAME, "Top-level is not a list");
        return;
    };

    debug!("checking {} index entries in {}", categories.len(), INDEX_FILE_NAME);
    if let Err(err) = check_index_icons(report, base, categories) {
        report.push(INDEX_FILE_NAME, format!("Parse error: {err}"));
    }
}

/// Icon existence per entry. A malformed entry ends the pass; issues already found stay.
fn check_index_icons(
    report: &mut ValidationReport,
    base: &Path,
    categories: &[Value],
) -> Result<(), IndexEntryError> {
    for (index, category) in categories.iter().enumerate() {
        let Some(entry) = category.as_object() else {
            return Err(IndexEntryError::NotAMapping { index });
        };
        let Some(icon) = entry.get("icon").filter(|icon| is_truthy(icon)) else {
            continue;
        };
        let Some(icon) = icon.as_str() else {
            return Err(IndexEntryError::IconNotAPath {
                index,
                icon: icon.clone(),
            });
        };
        if !base.join(icon).exists() {
            report.push(format!("index[{index}]"), format!("Icon missing: {icon}"));
        }
    }
    Ok(())
}

fn order_matches(order: Option<&Value>, expected: usize) -> bool {
    let Some(Value::Number(number)) = order else {
        return false;
    };
    if let Some(value) = number.as_u64() {
        return value == expected as u64;
    }
    number.as_f64().is_some_and(|value| value == expected as f64)
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
