use std::fmt;
use std::error::Error;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// Custom error types for dataset loading
#[derive(Debug)]
pub enum DatasetError {
    /// Wraps std::io::Error for file operations
    Io(std::io::Error),
    /// The file is not valid JSON
    Parse(serde_json::Error),
    /// Valid JSON, but not the array-of-objects shape the loader expects
    InvalidShape(String),
}

/// Implements Display trait for DatasetError for error reporting
impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "I/O error: {}", e),
            DatasetError::Parse(e) => write!(f, "Invalid dataset JSON: {}", e),
            DatasetError::InvalidShape(msg) => write!(f, "Unexpected dataset shape: {}", msg),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            DatasetError::Parse(e) => Some(e),
            DatasetError::InvalidShape(_) => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::Parse(err)
    }
}

/// One sparse record exactly as authored in a dataset file.
///
/// Field presence varies from record to record and numeric fields are
/// frequently stored as strings (`"#3"`, `"73.50%"`, `"$2.50"`), so the
/// record keeps the raw JSON object and offers tolerant accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wraps a JSON value, returning None for anything but an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// First non-null value among several alternative key spellings
    pub fn first(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Trimmed, non-empty text. Numbers and booleans are rendered as text.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        let rendered = match self.first(keys)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }

    /// Plain numeric value: a JSON number or a string such as `"1,200"`.
    /// Strings carrying units or symbols are left to the typed parsers.
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        match self.first(keys)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
