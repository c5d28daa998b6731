//! One comparator for every sortable view.
//!
//! A column says what kind of data it holds ([`SortKind`]) and how to pull
//! the raw cell out of a row ([`Cell`]). The kind turns the cell into a
//! [`SortValue`] and [`compare_values`] orders those. Missing values sort
//! after every present value in both directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::model::{Benchmark, NormalizedModel};
use super::parse::{
    is_missing, parse_context_length, parse_cost, parse_date_ordinal, parse_latency, parse_number,
    parse_ordinal, parse_percent, parse_rank, parse_size,
};

/// Sort direction. Ascending puts rank 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Asc),
            "desc" | "descending" => Ok(Direction::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

/// Semantic type of a sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Small positive integer, `"#3"` style strings accepted
    Rank,
    /// `"73.50%"` or a bare number
    Percent,
    /// `"$2.50"`, `"Free"`
    Currency,
    /// Parameter counts with K/M/B/T suffix
    Size,
    /// Token counts with unit suffix and thousands separators
    ContextLength,
    /// Seconds, ranges resolved to their midpoint
    Latency,
    Date,
    /// Yes > Limited > No
    Ordinal,
    /// Any other number embedded in text (`"85 tokens/s"`)
    Number,
    /// Case-insensitive text
    Text,
}

/// Raw cell content handed to a [`SortKind`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Number(Option<f64>),
    Text(Option<&'a str>),
}

/// Comparable form of a cell
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
    Missing,
}

impl SortKind {
    pub fn value(self, cell: Cell<'_>) -> SortValue {
        let raw = match cell {
            Cell::Number(Some(n)) if n.is_finite() => return SortValue::Number(n),
            Cell::Number(_) | Cell::Text(None) => return SortValue::Missing,
            Cell::Text(Some(raw)) if is_missing(raw) => return SortValue::Missing,
            Cell::Text(Some(raw)) => raw,
        };
        let parsed = match self {
            SortKind::Rank => parse_rank(raw).map(f64::from),
            SortKind::Percent => parse_percent(raw),
            SortKind::Currency => parse_cost(raw),
            SortKind::Size => parse_size(raw),
            SortKind::ContextLength => parse_context_length(raw),
            SortKind::Latency => parse_latency(raw),
            // Unparseable dates count as missing so they land last, never first
            SortKind::Date => parse_date_ordinal(raw),
            SortKind::Ordinal => parse_ordinal(raw),
            SortKind::Number => parse_number(raw),
            SortKind::Text => return SortValue::Text(raw.trim().to_lowercase()),
        };
        parsed.map_or(SortValue::Missing, SortValue::Number)
    }
}

/// Orders two values. Present values follow `direction`; missing values
/// go after all present values whichever way the sort runs.
pub fn compare_values(a: &SortValue, b: &SortValue, direction: Direction) -> Ordering {
    let directed = |ordering: Ordering| match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    };
    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        (SortValue::Number(x), SortValue::Number(y)) => directed(x.total_cmp(y)),
        (SortValue::Text(x), SortValue::Text(y)) => directed(x.cmp(y)),
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
    }
}

/// A sortable column over rows of type `T`
pub trait Column<T> {
    fn kind(&self) -> SortKind;

    fn cell<'a>(&self, row: &'a T) -> Cell<'a>;

    fn value(&self, row: &T) -> SortValue {
        self.kind().value(self.cell(row))
    }
}

/// Stable sort of `rows` by `column`, ties broken by `tie_break`.
/// Each row's value is computed once.
pub fn sort_rows<'a, T, C>(
    rows: Vec<&'a T>,
    column: &C,
    direction: Direction,
    tie_break: impl Fn(&T, &T) -> Ordering,
) -> Vec<&'a T>
where
    C: Column<T> + ?Sized,
{
    let mut keyed: Vec<(SortValue, &'a T)> = rows.into_iter().map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(va, a), (vb, b)| {
        compare_values(va, vb, direction).then_with(|| tie_break(*a, *b))
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Sortable columns of the model tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Developer,
    ReleaseDate,
    KnowledgeCutoff,
    License,
    Parameters,
    ContextLength,
    MaxOutputTokens,
    InputCost,
    OutputCost,
    Latency,
    SafetyRank,
    OperationalRank,
    SafePercentage,
    JailbreakResistance,
    Benchmark(Benchmark),
    /// Support level of a named feature (`feature:functionCalling`)
    Feature(String),
}

const FIXED_KEYS: [(SortKey, &str); 15] = [
    (SortKey::Name, "name"),
    (SortKey::Developer, "developer"),
    (SortKey::ReleaseDate, "releaseDate"),
    (SortKey::KnowledgeCutoff, "knowledgeCutoff"),
    (SortKey::License, "license"),
    (SortKey::Parameters, "parameters"),
    (SortKey::ContextLength, "contextLength"),
    (SortKey::MaxOutputTokens, "maxOutputTokens"),
    (SortKey::InputCost, "inputCost"),
    (SortKey::OutputCost, "outputCost"),
    (SortKey::Latency, "latency"),
    (SortKey::SafetyRank, "safetyRank"),
    (SortKey::OperationalRank, "operationalRank"),
    (SortKey::SafePercentage, "safePercentage"),
    (SortKey::JailbreakResistance, "jailbreakResistance"),
];

impl SortKey {
    pub fn id(&self) -> String {
        match self {
            SortKey::Benchmark(benchmark) => benchmark.id().to_string(),
            SortKey::Feature(name) => format!("feature:{}", name),
            fixed => FIXED_KEYS
                .iter()
                .find(|(key, _)| key == fixed)
                .map(|(_, id)| id.to_string())
                .unwrap_or_default(),
        }
    }

    /// Ids of every column except the open-ended feature columns
    pub fn known_ids() -> Vec<String> {
        FIXED_KEYS
            .iter()
            .map(|(_, id)| id.to_string())
            .chain(Benchmark::ALL.iter().map(|b| b.id().to_string()))
            .collect()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(name) = trimmed.strip_prefix("feature:") {
            if name.is_empty() {
                return Err("Feature sort key needs a feature name".to_string());
            }
            return Ok(SortKey::Feature(name.to_string()));
        }
        if let Some((key, _)) = FIXED_KEYS.iter().find(|(_, id)| id.eq_ignore_ascii_case(trimmed)) {
            return Ok(key.clone());
        }
        Benchmark::from_id(trimmed)
            .map(SortKey::Benchmark)
            .ok_or_else(|| format!("Unknown sort key: {}", trimmed))
    }
}

impl Column<NormalizedModel> for SortKey {
    fn kind(&self) -> SortKind {
        match self {
            SortKey::Name | SortKey::Developer | SortKey::License => SortKind::Text,
            SortKey::ReleaseDate | SortKey::KnowledgeCutoff => SortKind::Date,
            SortKey::Parameters => SortKind::Size,
            SortKey::ContextLength | SortKey::MaxOutputTokens => SortKind::ContextLength,
            SortKey::InputCost | SortKey::OutputCost => SortKind::Currency,
            SortKey::Latency => SortKind::Latency,
            SortKey::SafetyRank | SortKey::OperationalRank => SortKind::Rank,
            SortKey::SafePercentage | SortKey::JailbreakResistance | SortKey::Benchmark(_) => SortKind::Percent,
            SortKey::Feature(_) => SortKind::Ordinal,
        }
    }

    fn cell<'a>(&self, model: &'a NormalizedModel) -> Cell<'a> {
        match self {
            SortKey::Name => Cell::Text(Some(&model.name)),
            SortKey::Developer => Cell::Text(Some(&model.developer)),
            SortKey::ReleaseDate => Cell::Text(model.release_date.as_deref()),
            SortKey::KnowledgeCutoff => Cell::Text(model.knowledge_cutoff.as_deref()),
            SortKey::License => Cell::Text(model.license.as_deref()),
            SortKey::Parameters => Cell::Text(model.parameters.as_deref()),
            SortKey::ContextLength => Cell::Text(model.context_length.as_deref()),
            SortKey::MaxOutputTokens => Cell::Text(model.max_output_tokens.as_deref()),
            SortKey::InputCost => Cell::Number(model.pricing.input_per_million),
            SortKey::OutputCost => Cell::Number(model.pricing.output_per_million),
            SortKey::Latency => Cell::Text(model.latency.as_deref()),
            SortKey::SafetyRank => Cell::Number(model.safety_rank.map(f64::from)),
            SortKey::OperationalRank => Cell::Number(model.operational_rank.map(f64::from)),
            SortKey::SafePercentage => Cell::Number(model.safety.safe_percentage),
            SortKey::JailbreakResistance => Cell::Number(model.safety.jailbreak_resistance),
            SortKey::Benchmark(benchmark) => Cell::Number(model.score(*benchmark).as_f64()),
            SortKey::Feature(name) => Cell::Number(model.feature(name).map(|support| support.ordinal())),
        }
    }
}

/// Alphabetical by display name, used to break ties between models
pub fn by_name(a: &NormalizedModel, b: &NormalizedModel) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.id.cmp(&b.id))
}

/// Sorts models by one column, ties broken alphabetically by name
pub fn sort_models<'a>(models: Vec<&'a NormalizedModel>, key: &SortKey, direction: Direction) -> Vec<&'a NormalizedModel> {
    sort_rows(models, key, direction, by_name)
}
