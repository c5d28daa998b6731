use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::model::{Benchmark, NormalizedModel};
use crate::query::parse::{parse_context_length, parse_latency};
use crate::query::SortKey;

/// Display text for a metric without a value
pub const NO_DATA: &str = "No data";

/// How a metric's values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Percent,
    Currency,
    Tokens,
    Seconds,
}

impl ValueFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            ValueFormat::Percent => format!("{:.1}%", value),
            ValueFormat::Currency => format!("${:.2}", value),
            ValueFormat::Tokens => format_tokens(value),
            ValueFormat::Seconds => format!("{:.1}s", value),
        }
    }
}

/// `2_000_000` -> `"2M"`, `128_000` -> `"128K"`, `8192` -> `"8.2K"`
pub fn format_tokens(value: f64) -> String {
    let (scaled, suffix) = if value >= 1e6 {
        (value / 1e6, "M")
    } else if value >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    let rendered = format!("{:.1}", scaled);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{}{}", rendered, suffix)
}

/// A metric that charts and comparison grids can show.
///
/// Each metric knows how to pull its value out of a model, how to render
/// it, and which direction is better. Extraction returns `None` for "no
/// data" and never substitutes zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    Benchmark(Benchmark),
    InputCost,
    OutputCost,
    ContextLength,
    MaxOutputTokens,
    Latency,
    SafePercentage,
    JailbreakResistance,
}

impl MetricId {
    pub fn all() -> Vec<MetricId> {
        let mut metrics: Vec<MetricId> = Benchmark::ALL.into_iter().map(MetricId::Benchmark).collect();
        metrics.extend([
            MetricId::InputCost,
            MetricId::OutputCost,
            MetricId::ContextLength,
            MetricId::MaxOutputTokens,
            MetricId::Latency,
            MetricId::SafePercentage,
            MetricId::JailbreakResistance,
        ]);
        metrics
    }

    pub fn id(self) -> &'static str {
        match self {
            MetricId::Benchmark(benchmark) => benchmark.id(),
            MetricId::InputCost => "inputCost",
            MetricId::OutputCost => "outputCost",
            MetricId::ContextLength => "contextLength",
            MetricId::MaxOutputTokens => "maxOutputTokens",
            MetricId::Latency => "latency",
            MetricId::SafePercentage => "safePercentage",
            MetricId::JailbreakResistance => "jailbreakResistance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricId::Benchmark(benchmark) => benchmark.label(),
            MetricId::InputCost => "Input Cost ($/1M tokens)",
            MetricId::OutputCost => "Output Cost ($/1M tokens)",
            MetricId::ContextLength => "Context Length",
            MetricId::MaxOutputTokens => "Max Output Tokens",
            MetricId::Latency => "Latency",
            MetricId::SafePercentage => "Safe Responses",
            MetricId::JailbreakResistance => "Jailbreak Resistance",
        }
    }

    pub fn value_format(self) -> ValueFormat {
        match self {
            MetricId::Benchmark(_) | MetricId::SafePercentage | MetricId::JailbreakResistance => ValueFormat::Percent,
            MetricId::InputCost | MetricId::OutputCost => ValueFormat::Currency,
            MetricId::ContextLength | MetricId::MaxOutputTokens => ValueFormat::Tokens,
            MetricId::Latency => ValueFormat::Seconds,
        }
    }

    /// Cheaper and faster is better; everything else is better when larger
    pub fn higher_is_better(self) -> bool {
        !matches!(self, MetricId::InputCost | MetricId::OutputCost | MetricId::Latency)
    }

    pub fn extract(self, model: &NormalizedModel) -> Option<f64> {
        let value = match self {
            MetricId::Benchmark(benchmark) => model.score(benchmark).as_f64(),
            MetricId::InputCost => model.pricing.input_per_million,
            MetricId::OutputCost => model.pricing.output_per_million,
            MetricId::ContextLength => model.context_length.as_deref().and_then(parse_context_length),
            MetricId::MaxOutputTokens => model.max_output_tokens.as_deref().and_then(parse_context_length),
            MetricId::Latency => model.latency.as_deref().and_then(parse_latency),
            MetricId::SafePercentage => model.safety.safe_percentage,
            MetricId::JailbreakResistance => model.safety.jailbreak_resistance,
        };
        value.filter(|v| v.is_finite())
    }

    /// Rendered value, or [`NO_DATA`]
    pub fn format(self, value: Option<f64>) -> String {
        match value {
            Some(v) => self.value_format().format(v),
            None => NO_DATA.to_string(),
        }
    }

    /// Table column holding the same data, for ordering by this metric
    pub fn sort_key(self) -> SortKey {
        match self {
            MetricId::Benchmark(benchmark) => SortKey::Benchmark(benchmark),
            MetricId::InputCost => SortKey::InputCost,
            MetricId::OutputCost => SortKey::OutputCost,
            MetricId::ContextLength => SortKey::ContextLength,
            MetricId::MaxOutputTokens => SortKey::MaxOutputTokens,
            MetricId::Latency => SortKey::Latency,
            MetricId::SafePercentage => SortKey::SafePercentage,
            MetricId::JailbreakResistance => SortKey::JailbreakResistance,
        }
    }
}

impl FromStr for MetricId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Self::all()
            .into_iter()
            .find(|metric| metric.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| format!("Unknown metric: {}", id))
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Serialize for MetricId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for MetricId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        id.parse().map_err(serde::de::Error::custom)
    }
}

/// Metric description for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricInfo {
    pub id: String,
    pub label: String,
    pub format: ValueFormat,
    pub higher_is_better: bool,
}

impl From<MetricId> for MetricInfo {
    fn from(metric: MetricId) -> Self {
        Self {
            id: metric.id().to_string(),
            label: metric.label().to_string(),
            format: metric.value_format(),
            higher_is_better: metric.higher_is_better(),
        }
    }
}
