use std::collections::{BTreeMap, HashSet};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::dataset::RawRecord;
use crate::query::parse::{is_missing, parse_cost, parse_ordinal, parse_percent, parse_rank};
use super::types::{
    Benchmark, Benchmarks, Modalities, ModalitySet, NormalizedModel, Pricing, SafetyEvaluation,
    SafetyTier, Score, Support,
};

const NAME_KEYS: [&str; 3] = ["name", "modelName", "model"];
const DEVELOPER_KEYS: [&str; 3] = ["developer", "organization", "creator"];

/// Developer name used when a record names none
pub const UNKNOWN_DEVELOPER: &str = "Unknown";

/// Lowercase slug: runs of anything but letters and digits collapse to one `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Percentage of safe outcomes from a `(count, total)` pair.
///
/// The dataset stores some of these counts as raw counts and others as
/// percentages that were already computed, with nothing in the record to
/// tell them apart. The rules below are a heuristic for that data-quality
/// problem, not a property of the data:
///
/// * no total, or a total of zero, yields `None`
/// * a count equal to the total yields exactly 100
/// * a count of at most 100 is taken to be a percentage already
/// * anything else is `round(count / total * 100)`
///
/// The result is clamped to [0, 100].
pub fn derive_percentage(count: Option<f64>, total: Option<f64>) -> Option<f64> {
    let total = total.filter(|t| t.is_finite() && *t > 0.0)?;
    let count = count.filter(|c| c.is_finite() && *c >= 0.0)?;
    let percentage = if count == total {
        100.0
    } else if count <= 100.0 {
        count
    } else {
        (count / total * 100.0).round()
    };
    Some(percentage.clamp(0.0, 100.0))
}

/// Rank from a JSON number or a prefixed string such as `"#7"`
pub fn rank_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|rank| rank.is_finite() && *rank >= 1.0 && rank.fract() == 0.0 && *rank <= f64::from(u32::MAX))
            .map(|rank| rank as u32),
        Value::String(s) => parse_rank(s),
        _ => None,
    }
}

/// Benchmark score from whatever the dataset stored for it
pub fn score_from_value(value: Option<&Value>) -> Score {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).map_or(Score::NoData, Score::Value),
        Some(Value::String(s)) if is_missing(s) => Score::NoData,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            match parse_percent(trimmed) {
                Some(_) if trimmed.ends_with('%') => Score::Percent(trimmed.to_string()),
                Some(v) => Score::Value(v),
                None => Score::NoData,
            }
        }
        _ => Score::NoData,
    }
}

fn support_from_value(value: &Value) -> Option<Support> {
    match value {
        Value::Bool(true) => Some(Support::Yes),
        Value::Bool(false) => Some(Support::No),
        Value::String(s) => match parse_ordinal(s)? as u8 {
            2 => Some(Support::Yes),
            1 => Some(Support::Limited),
            _ => Some(Support::No),
        },
        _ => None,
    }
}

fn flag(value: Option<&Value>) -> Option<bool> {
    support_from_value(value?).map(|support| support != Support::No)
}

fn modality_set(value: Option<&Value>) -> ModalitySet {
    match value {
        Some(Value::Object(map)) => ModalitySet {
            text: flag(map.get("text")),
            image: flag(map.get("image")),
            audio: flag(map.get("audio")),
            video: flag(map.get("video")),
        },
        // A list names the supported media, everything else is unsupported
        Some(Value::Array(items)) => {
            let has = |name: &str| {
                Some(items.iter().any(|item| item.as_str().is_some_and(|s| s.eq_ignore_ascii_case(name))))
            };
            ModalitySet {
                text: has("text"),
                image: has("image"),
                audio: has("audio"),
                video: has("video"),
            }
        }
        _ => ModalitySet::default(),
    }
}

fn modalities(raw: &RawRecord) -> Option<Modalities> {
    let map = raw.object("modalities")?;
    Some(Modalities {
        input: modality_set(map.get("input")),
        output: modality_set(map.get("output")),
    })
}

fn features(raw: &RawRecord, model: &str) -> Option<BTreeMap<String, Support>> {
    let map: &Map<String, Value> = raw.object("features")?;
    let mut features = BTreeMap::new();
    for (name, value) in map {
        match support_from_value(value) {
            Some(support) => {
                features.insert(name.clone(), support);
            }
            None => debug!("Ignoring unreadable feature '{}' on {}", name, model),
        }
    }
    Some(features)
}

/// Descriptive text with placeholder spellings dropped
pub(crate) fn descriptive(raw: &RawRecord, keys: &[&str]) -> Option<String> {
    raw.text(keys).filter(|text| !is_missing(text))
}

pub(crate) fn cost(raw: &RawRecord, keys: &[&str]) -> Option<f64> {
    match raw.first(keys)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite() && *v >= 0.0),
        Value::String(s) => parse_cost(s).filter(|v| *v >= 0.0),
        _ => None,
    }
}

/// Count that may have been authored as a number, `"1,200"` or `"85%"`
fn count(raw: &RawRecord, key: &str) -> Option<f64> {
    raw.number(&[key])
        .or_else(|| raw.text(&[key]).as_deref().and_then(parse_percent))
        .filter(|v| *v >= 0.0)
}

fn rank(raw: &RawRecord, key: &str) -> Option<u32> {
    raw.get(key).and_then(rank_from_value)
}

fn safety(raw: &RawRecord) -> SafetyEvaluation {
    let total_prompts = count(raw, "totalPrompts");
    let safe_responses = count(raw, "safeResponses");
    let unsafe_responses = count(raw, "unsafeResponses");
    let jailbreak_attempts = count(raw, "jailbreakAttempts");
    let jailbreak_safe_responses = count(raw, "jailbreakSafeResponses");

    let safe_percentage = derive_percentage(safe_responses, total_prompts);
    SafetyEvaluation {
        total_prompts: total_prompts.map(|t| t.round() as u64),
        safe_responses,
        unsafe_responses,
        jailbreak_attempts: jailbreak_attempts.map(|t| t.round() as u64),
        jailbreak_safe_responses,
        safe_percentage,
        unsafe_percentage: derive_percentage(unsafe_responses, total_prompts),
        jailbreak_resistance: derive_percentage(jailbreak_safe_responses, jailbreak_attempts),
        tier: SafetyTier::classify(safe_percentage),
    }
}

/// Normalizes one record. Returns None when the record has no name that
/// slugifies to a usable id. Names are taken as written, so a model called
/// "None" is kept.
pub fn normalize_record(raw: &RawRecord) -> Option<NormalizedModel> {
    let name = raw.text(&NAME_KEYS)?;
    let id = slugify(&name);
    if id.is_empty() {
        return None;
    }

    let developer = descriptive(raw, &DEVELOPER_KEYS).unwrap_or_else(|| UNKNOWN_DEVELOPER.to_string());
    let developer_logo = descriptive(raw, &["developerLogo", "logo"])
        .unwrap_or_else(|| format!("/logos/{}.svg", slugify(&developer)));

    let mut benchmarks = Benchmarks::default();
    for benchmark in Benchmark::ALL {
        benchmarks.set(benchmark, score_from_value(raw.get(benchmark.id())));
    }

    Some(NormalizedModel {
        release_date: descriptive(raw, &["releaseDate", "released"]),
        knowledge_cutoff: descriptive(raw, &["knowledgeCutoff", "trainingCutoff"]),
        license: descriptive(raw, &["license"]),
        parameters: descriptive(raw, &["parameters", "parameterCount"]),
        context_length: descriptive(raw, &["contextLength", "contextWindow"]),
        max_output_tokens: descriptive(raw, &["maxOutputTokens", "maxOutput"]),
        description: descriptive(raw, &["description"]),
        latency: descriptive(raw, &["latency"]),
        pricing: Pricing {
            input_per_million: cost(raw, &["inputCost", "inputPrice"]),
            output_per_million: cost(raw, &["outputCost", "outputPrice"]),
        },
        benchmarks,
        safety: safety(raw),
        safety_rank: rank(raw, "safetyRank"),
        operational_rank: rank(raw, "operationalRank"),
        modalities: modalities(raw),
        features: features(raw, &name),
        id,
        name,
        developer,
        developer_logo,
    })
}

/// Normalizes a whole dataset, preserving input order.
///
/// Records without a display name are skipped. Records whose slug collides
/// with an earlier one get a numeric suffix so every id stays unique.
pub fn normalize(records: &[RawRecord]) -> Vec<NormalizedModel> {
    let mut models = Vec::with_capacity(records.len());
    let mut assigned: HashSet<String> = HashSet::new();

    for (index, raw) in records.iter().enumerate() {
        let Some(mut model) = normalize_record(raw) else {
            warn!("Skipping dataset record {}: no usable model name", index);
            continue;
        };

        if assigned.contains(&model.id) {
            let unique = (2..)
                .map(|n| format!("{}-{}", model.id, n))
                .find(|candidate| !assigned.contains(candidate))
                .unwrap_or_else(|| model.id.clone());
            warn!("Duplicate model id '{}' at record {}, using '{}'", model.id, index, unique);
            model.id = unique;
        }
        assigned.insert(model.id.clone());
        models.push(model);
    }

    info!("Normalized {} of {} model records", models.len(), records.len());
    models
}
