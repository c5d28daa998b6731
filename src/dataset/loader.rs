use std::fs;
use std::path::{Path, PathBuf};
use serde_json::Value;
use tracing::{info, warn};

use crate::model::{normalize, NormalizedModel};
use crate::providers::{normalize_offerings, ProviderOffering};
use super::types::{DatasetError, RawRecord};

/// Model records bundled into the binary
pub const BUNDLED_MODELS: &str = include_str!("../../data/models.json");
/// Provider pricing records bundled into the binary
pub const BUNDLED_PROVIDERS: &str = include_str!("../../data/providers.json");

/// Where a dataset file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The copy compiled into the binary
    Bundled,
    File(PathBuf),
}

impl DataSource {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => DataSource::File(path.to_path_buf()),
            None => DataSource::Bundled,
        }
    }

    fn read(&self, bundled: &'static str) -> Result<String, DatasetError> {
        match self {
            DataSource::Bundled => Ok(bundled.to_string()),
            DataSource::File(path) => {
                info!("Reading dataset file {}", path.display());
                Ok(fs::read_to_string(path)?)
            }
        }
    }
}

/// Parses a dataset document into raw records.
///
/// Accepts a top-level array, or an object wrapping the array under
/// `models` or `data`. Array items that are not objects are skipped.
pub fn parse_records(json: &str) -> Result<Vec<RawRecord>, DatasetError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("models").or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DatasetError::InvalidShape(
                    "expected an array of records, or an object with a 'models' array".to_string(),
                ))
            }
        },
        other => {
            return Err(DatasetError::InvalidShape(format!(
                "expected an array of records, found {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let records: Vec<RawRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let record = RawRecord::from_value(item);
            if record.is_none() {
                warn!("Skipping dataset entry {}: not an object", index);
            }
            record
        })
        .collect();
    info!("Parsed {} of {} dataset entries", records.len(), total);
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The normalized, immutable collection every view reads from.
///
/// Built once at start-up and shared by reference; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    models: Vec<NormalizedModel>,
    offerings: Vec<ProviderOffering>,
}

impl Dataset {
    pub fn new(models: Vec<NormalizedModel>, offerings: Vec<ProviderOffering>) -> Self {
        Self { models, offerings }
    }

    /// Loads and normalizes both dataset files
    pub fn load(models: &DataSource, providers: &DataSource) -> Result<Self, DatasetError> {
        let models_json = models.read(BUNDLED_MODELS)?;
        let providers_json = providers.read(BUNDLED_PROVIDERS)?;
        Self::from_json(&models_json, &providers_json)
    }

    /// The dataset compiled into the binary
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_MODELS, BUNDLED_PROVIDERS)
    }

    pub fn from_json(models_json: &str, providers_json: &str) -> Result<Self, DatasetError> {
        let models = normalize(&parse_records(models_json)?);
        let offerings = normalize_offerings(&parse_records(providers_json)?);
        info!("Dataset ready: {} models, {} provider offerings", models.len(), offerings.len());
        Ok(Self::new(models, offerings))
    }

    pub fn models(&self) -> &[NormalizedModel] {
        &self.models
    }

    pub fn offerings(&self) -> &[ProviderOffering] {
        &self.offerings
    }

    /// Model by id, case-insensitive
    pub fn model(&self, id: &str) -> Option<&NormalizedModel> {
        let id = id.trim().to_lowercase();
        self.models.iter().find(|model| model.id.to_lowercase() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_dataset_loads() {
        let dataset = Dataset::bundled().unwrap();
        assert_eq!(dataset.models().len(), 8);
        assert!(dataset.model("gpt-4o").is_some());
        assert!(dataset.model("CLAUDE-3-5-SONNET").is_some());
        assert!(!dataset.offerings().is_empty());
    }

    #[test]
    fn test_parse_records_shapes() {
        assert_eq!(parse_records(r#"[{"name": "a"}, 3, {"name": "b"}]"#).unwrap().len(), 2);
        assert_eq!(parse_records(r#"{"models": [{"name": "a"}]}"#).unwrap().len(), 1);
        assert!(matches!(parse_records(r#"{"other": 1}"#), Err(DatasetError::InvalidShape(_))));
        assert!(matches!(parse_records("42"), Err(DatasetError::InvalidShape(_))));
        assert!(matches!(parse_records("not json"), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn test_load_from_files() {
        let mut models = tempfile::NamedTempFile::new().unwrap();
        write!(models, r#"[{{"name": "File Model", "developer": "Disk"}}]"#).unwrap();
        let mut providers = tempfile::NamedTempFile::new().unwrap();
        write!(providers, "[]").unwrap();

        let dataset = Dataset::load(
            &DataSource::File(models.path().to_path_buf()),
            &DataSource::File(providers.path().to_path_buf()),
        ).unwrap();
        assert_eq!(dataset.models().len(), 1);
        assert_eq!(dataset.models()[0].id, "file-model");
        assert!(dataset.offerings().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Dataset::load(
            &DataSource::File(PathBuf::from("/definitely/not/here.json")),
            &DataSource::Bundled,
        );
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn test_model_lookup_folds_non_ascii_case() {
        let models = vec![NormalizedModel::new("éclair-7b", "Éclair 7B", "Lab")];
        let dataset = Dataset::new(models, Vec::new());
        assert_eq!(dataset.model("ÉCLAIR-7B").map(|m| m.name.as_str()), Some("Éclair 7B"));
        assert!(dataset.model("eclair-7b").is_none());
    }
}
