mod types;
mod loader;

// Re-export from types
pub use types::{DatasetError, RawRecord};
// Re-export from loader
pub use loader::{parse_records, DataSource, Dataset, BUNDLED_MODELS, BUNDLED_PROVIDERS};
