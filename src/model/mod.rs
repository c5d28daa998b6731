// Declare submodules
pub mod types;
pub mod normalize;

// Re-export types for external use
pub use types::{
    Benchmark, Benchmarks, Modalities, ModalitySet, NormalizedModel, Pricing, SafetyEvaluation,
    SafetyTier, Score, Support,
};
pub use normalize::{derive_percentage, normalize, normalize_record, slugify, UNKNOWN_DEVELOPER};
