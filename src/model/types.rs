use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::query::parse::parse_percent;

/// A benchmark result as it appears after normalization.
///
/// The dataset mixes plain numbers and percentage strings, and many models
/// have no result at all. `NoData` serializes as `null` so that consumers
/// never confuse a missing score with a score of zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// Numeric score as authored (e.g. `90.2`)
    Value(f64),
    /// Percentage string as authored (e.g. `"53.76%"`)
    Percent(String),
    /// No result recorded
    #[default]
    NoData,
}

impl Score {
    /// Numeric value of the score, if there is one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Score::Value(v) => Some(*v),
            Score::Percent(s) => parse_percent(s),
            Score::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.as_f64().is_none()
    }
}

/// External benchmarks tracked for every model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Benchmark {
    #[serde(rename = "globalAverageLiveBench")]
    GlobalAverage,
    #[serde(rename = "reasoningLiveBench")]
    Reasoning,
    #[serde(rename = "codingLiveBench")]
    Coding,
    #[serde(rename = "mathLiveBench")]
    Mathematics,
    #[serde(rename = "dataAnalysisLiveBench")]
    DataAnalysis,
    #[serde(rename = "languageLiveBench")]
    Language,
    #[serde(rename = "ifLiveBench")]
    InstructionFollowing,
    #[serde(rename = "gpqaDiamond")]
    GpqaDiamond,
    #[serde(rename = "mmluPro")]
    MmluPro,
    #[serde(rename = "sweBenchVerified")]
    SweBenchVerified,
    #[serde(rename = "humanEval")]
    HumanEval,
}

impl Benchmark {
    pub const ALL: [Benchmark; 11] = [
        Benchmark::GlobalAverage,
        Benchmark::Reasoning,
        Benchmark::Coding,
        Benchmark::Mathematics,
        Benchmark::DataAnalysis,
        Benchmark::Language,
        Benchmark::InstructionFollowing,
        Benchmark::GpqaDiamond,
        Benchmark::MmluPro,
        Benchmark::SweBenchVerified,
        Benchmark::HumanEval,
    ];

    /// Key used in the dataset files, in sort parameters and in metric ids
    pub fn id(self) -> &'static str {
        match self {
            Benchmark::GlobalAverage => "globalAverageLiveBench",
            Benchmark::Reasoning => "reasoningLiveBench",
            Benchmark::Coding => "codingLiveBench",
            Benchmark::Mathematics => "mathLiveBench",
            Benchmark::DataAnalysis => "dataAnalysisLiveBench",
            Benchmark::Language => "languageLiveBench",
            Benchmark::InstructionFollowing => "ifLiveBench",
            Benchmark::GpqaDiamond => "gpqaDiamond",
            Benchmark::MmluPro => "mmluPro",
            Benchmark::SweBenchVerified => "sweBenchVerified",
            Benchmark::HumanEval => "humanEval",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Benchmark::GlobalAverage => "LiveBench Average",
            Benchmark::Reasoning => "Reasoning",
            Benchmark::Coding => "Coding",
            Benchmark::Mathematics => "Mathematics",
            Benchmark::DataAnalysis => "Data Analysis",
            Benchmark::Language => "Language",
            Benchmark::InstructionFollowing => "Instruction Following",
            Benchmark::GpqaDiamond => "GPQA Diamond",
            Benchmark::MmluPro => "MMLU-Pro",
            Benchmark::SweBenchVerified => "SWE-bench Verified",
            Benchmark::HumanEval => "HumanEval",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id().eq_ignore_ascii_case(id))
    }
}

/// Scores for the fixed benchmark set, keyed by benchmark
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Benchmarks(BTreeMap<Benchmark, Score>);

impl Benchmarks {
    pub fn get(&self, benchmark: Benchmark) -> &Score {
        static NO_DATA: Score = Score::NoData;
        self.0.get(&benchmark).unwrap_or(&NO_DATA)
    }

    pub fn set(&mut self, benchmark: Benchmark, score: Score) {
        self.0.insert(benchmark, score);
    }

    /// Number of benchmarks that carry a value
    pub fn reported(&self) -> usize {
        self.0.values().filter(|s| !s.is_no_data()).count()
    }
}

/// Aggregate classification of a model's safe-response rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyTier {
    High,
    Moderate,
    Low,
    #[default]
    Unrated,
}

impl SafetyTier {
    /// High at 90% and above, Moderate at 70% and above
    pub fn classify(safe_percentage: Option<f64>) -> Self {
        match safe_percentage {
            Some(p) if p >= 90.0 => SafetyTier::High,
            Some(p) if p >= 70.0 => SafetyTier::Moderate,
            Some(_) => SafetyTier::Low,
            None => SafetyTier::Unrated,
        }
    }
}

impl fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SafetyTier::High => write!(f, "High"),
            SafetyTier::Moderate => write!(f, "Moderate"),
            SafetyTier::Low => write!(f, "Low"),
            SafetyTier::Unrated => write!(f, "Unrated"),
        }
    }
}

/// Red-teaming counts and the percentages derived from them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyEvaluation {
    pub total_prompts: Option<u64>,
    pub safe_responses: Option<f64>,
    pub unsafe_responses: Option<f64>,
    pub jailbreak_attempts: Option<u64>,
    pub jailbreak_safe_responses: Option<f64>,
    /// Always within [0, 100] when present
    pub safe_percentage: Option<f64>,
    pub unsafe_percentage: Option<f64>,
    pub jailbreak_resistance: Option<f64>,
    pub tier: SafetyTier,
}

impl SafetyEvaluation {
    /// True when the model went through red-teaming with at least one prompt
    pub fn has_data(&self) -> bool {
        self.total_prompts.is_some_and(|total| total > 0)
    }
}

/// Per-million-token pricing in US dollars
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub input_per_million: Option<f64>,
    pub output_per_million: Option<f64>,
}

/// Which media a model accepts or produces
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalitySet {
    pub text: Option<bool>,
    pub image: Option<bool>,
    pub audio: Option<bool>,
    pub video: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modalities {
    pub input: ModalitySet,
    pub output: ModalitySet,
}

/// Support level for a feature, ordered No < Limited < Yes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Support {
    No,
    Limited,
    Yes,
}

impl Support {
    pub fn ordinal(self) -> f64 {
        match self {
            Support::No => 0.0,
            Support::Limited => 1.0,
            Support::Yes => 2.0,
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Support::No => write!(f, "No"),
            Support::Limited => write!(f, "Limited"),
            Support::Yes => write!(f, "Yes"),
        }
    }
}

/// Uniform projection of one raw dataset record.
///
/// Every model has a non-empty `id` and `name`. Everything else is optional
/// and `None` means the dataset has no value for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedModel {
    /// Slug derived from the display name, unique within a dataset
    pub id: String,
    pub name: String,
    pub developer: String,
    pub developer_logo: String,
    pub release_date: Option<String>,
    pub knowledge_cutoff: Option<String>,
    pub license: Option<String>,
    pub parameters: Option<String>,
    pub context_length: Option<String>,
    pub max_output_tokens: Option<String>,
    pub description: Option<String>,
    /// Typical response latency as authored (`"~0.6s"`, `"~10-20s"`)
    pub latency: Option<String>,
    pub pricing: Pricing,
    pub benchmarks: Benchmarks,
    pub safety: SafetyEvaluation,
    pub safety_rank: Option<u32>,
    pub operational_rank: Option<u32>,
    pub modalities: Option<Modalities>,
    pub features: Option<BTreeMap<String, Support>>,
}

impl NormalizedModel {
    /// Minimal model with only identity fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>, developer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            developer: developer.into(),
            developer_logo: String::new(),
            release_date: None,
            knowledge_cutoff: None,
            license: None,
            parameters: None,
            context_length: None,
            max_output_tokens: None,
            description: None,
            latency: None,
            pricing: Pricing::default(),
            benchmarks: Benchmarks::default(),
            safety: SafetyEvaluation::default(),
            safety_rank: None,
            operational_rank: None,
            modalities: None,
            features: None,
        }
    }

    pub fn score(&self, benchmark: Benchmark) -> &Score {
        self.benchmarks.get(benchmark)
    }

    pub fn feature(&self, name: &str) -> Option<Support> {
        self.features.as_ref()?.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, support)| *support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_values() {
        assert_eq!(Score::Value(90.2).as_f64(), Some(90.2));
        assert_eq!(Score::Percent("53.76%".to_string()).as_f64(), Some(53.76));
        assert_eq!(Score::NoData.as_f64(), None);
        assert!(Score::Percent("N/A".to_string()).is_no_data());
    }

    #[test]
    fn test_no_data_serializes_as_null() {
        let json = serde_json::to_value(Score::NoData).unwrap();
        assert!(json.is_null());
        let json = serde_json::to_value(Score::Value(0.0)).unwrap();
        assert_eq!(json, serde_json::json!(0.0));
    }

    #[test]
    fn test_safety_tier_thresholds() {
        assert_eq!(SafetyTier::classify(Some(90.0)), SafetyTier::High);
        assert_eq!(SafetyTier::classify(Some(89.9)), SafetyTier::Moderate);
        assert_eq!(SafetyTier::classify(Some(70.0)), SafetyTier::Moderate);
        assert_eq!(SafetyTier::classify(Some(12.0)), SafetyTier::Low);
        assert_eq!(SafetyTier::classify(None), SafetyTier::Unrated);
    }

    #[test]
    fn test_benchmark_ids_round_trip() {
        for benchmark in Benchmark::ALL {
            assert_eq!(Benchmark::from_id(benchmark.id()), Some(benchmark));
        }
        assert_eq!(Benchmark::from_id("MATHLIVEBENCH"), Some(Benchmark::Mathematics));
    }

    #[test]
    fn test_feature_lookup_is_case_insensitive() {
        let mut model = NormalizedModel::new("m", "M", "Dev");
        let mut features = BTreeMap::new();
        features.insert("functionCalling".to_string(), Support::Limited);
        model.features = Some(features);
        assert_eq!(model.feature("functioncalling"), Some(Support::Limited));
        assert_eq!(model.feature("webSearch"), None);
    }
}
