//! Hosting providers that sell API access to a model, with their own
//! price, latency and throughput.

use std::cmp::Ordering;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::dataset::RawRecord;
use crate::model::normalize::{cost, descriptive};
use crate::model::slugify;
use crate::query::{sort_rows, Cell, Column, Direction, SortKind};

/// One provider's offer for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOffering {
    pub provider: String,
    /// Id of the model this offer is for, same slug scheme as model ids
    pub model_id: String,
    pub model_name: String,
    /// US dollars per million input tokens
    pub input_cost: Option<f64>,
    pub output_cost: Option<f64>,
    pub latency: Option<String>,
    pub throughput: Option<String>,
    pub context_length: Option<String>,
}

/// Flattens `{ model, providers: [...] }` records into offerings.
/// Entries without a model or provider name are skipped.
pub fn normalize_offerings(records: &[RawRecord]) -> Vec<ProviderOffering> {
    let mut offerings = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let Some(model_name) = record.text(&["model", "modelName", "name"]) else {
            warn!("Skipping provider record {}: no model name", index);
            continue;
        };
        let Some(entries) = record.array("providers") else {
            warn!("Skipping provider record {} ({}): no providers list", index, model_name);
            continue;
        };
        let model_id = slugify(&model_name);

        for entry in entries {
            let Some(entry) = RawRecord::from_value(entry.clone()) else {
                continue;
            };
            let Some(provider) = descriptive(&entry, &["name", "provider"]) else {
                warn!("Skipping unnamed provider for {}", model_name);
                continue;
            };
            offerings.push(ProviderOffering {
                provider,
                model_id: model_id.clone(),
                model_name: model_name.clone(),
                input_cost: cost(&entry, &["inputCost", "inputPrice"]),
                output_cost: cost(&entry, &["outputCost", "outputPrice"]),
                latency: descriptive(&entry, &["latency"]),
                throughput: descriptive(&entry, &["throughput", "speed"]),
                context_length: descriptive(&entry, &["contextLength", "contextWindow"]),
            });
        }
    }
    info!("Loaded {} provider offerings", offerings.len());
    offerings
}

/// Sortable columns of the providers table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSortKey {
    Provider,
    Model,
    InputCost,
    OutputCost,
    Latency,
    Throughput,
    ContextLength,
}

impl ProviderSortKey {
    pub const ALL: [ProviderSortKey; 7] = [
        ProviderSortKey::Provider,
        ProviderSortKey::Model,
        ProviderSortKey::InputCost,
        ProviderSortKey::OutputCost,
        ProviderSortKey::Latency,
        ProviderSortKey::Throughput,
        ProviderSortKey::ContextLength,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ProviderSortKey::Provider => "provider",
            ProviderSortKey::Model => "model",
            ProviderSortKey::InputCost => "inputCost",
            ProviderSortKey::OutputCost => "outputCost",
            ProviderSortKey::Latency => "latency",
            ProviderSortKey::Throughput => "throughput",
            ProviderSortKey::ContextLength => "contextLength",
        }
    }
}

impl FromStr for ProviderSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown provider sort key: {}", s.trim()))
    }
}

impl Column<ProviderOffering> for ProviderSortKey {
    fn kind(&self) -> SortKind {
        match self {
            ProviderSortKey::Provider | ProviderSortKey::Model => SortKind::Text,
            ProviderSortKey::InputCost | ProviderSortKey::OutputCost => SortKind::Currency,
            ProviderSortKey::Latency => SortKind::Latency,
            ProviderSortKey::Throughput => SortKind::Number,
            ProviderSortKey::ContextLength => SortKind::ContextLength,
        }
    }

    fn cell<'a>(&self, offering: &'a ProviderOffering) -> Cell<'a> {
        match self {
            ProviderSortKey::Provider => Cell::Text(Some(&offering.provider)),
            ProviderSortKey::Model => Cell::Text(Some(&offering.model_name)),
            ProviderSortKey::InputCost => Cell::Number(offering.input_cost),
            ProviderSortKey::OutputCost => Cell::Number(offering.output_cost),
            ProviderSortKey::Latency => Cell::Text(offering.latency.as_deref()),
            ProviderSortKey::Throughput => Cell::Text(offering.throughput.as_deref()),
            ProviderSortKey::ContextLength => Cell::Text(offering.context_length.as_deref()),
        }
    }
}

fn by_provider(a: &ProviderOffering, b: &ProviderOffering) -> Ordering {
    a.provider
        .to_lowercase()
        .cmp(&b.provider.to_lowercase())
        .then_with(|| a.model_name.cmp(&b.model_name))
}

/// Offerings, optionally limited to one model id, in the requested order
pub fn offerings_view<'a>(
    offerings: &'a [ProviderOffering],
    model_id: Option<&str>,
    key: ProviderSortKey,
    direction: Direction,
) -> Vec<&'a ProviderOffering> {
    let selected: Vec<&ProviderOffering> = offerings
        .iter()
        .filter(|offering| model_id.map_or(true, |id| offering.model_id.to_lowercase() == id.trim().to_lowercase()))
        .collect();
    sort_rows(selected, &key, direction, by_provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<RawRecord> {
        vec![
            RawRecord::from_value(json!({
                "model": "Big Model",
                "providers": [
                    { "name": "Slow", "inputCost": "$1.00", "latency": "~10-20s", "throughput": "20 tokens/s" },
                    { "name": "Fast", "inputCost": "$3.00", "latency": "~0.5s", "throughput": "N/A" },
                    { "inputCost": "$9.00" }
                ]
            })).unwrap(),
            RawRecord::from_value(json!({ "providers": [{ "name": "Orphan" }] })).unwrap(),
            RawRecord::from_value(json!({ "model": "Small", "providers": [{ "name": "Solo", "inputCost": "-" }] })).unwrap(),
        ]
    }

    #[test]
    fn test_normalize_offerings_skips_incomplete_entries() {
        let offerings = normalize_offerings(&records());
        let names: Vec<&str> = offerings.iter().map(|o| o.provider.as_str()).collect();
        assert_eq!(names, vec!["Slow", "Fast", "Solo"]);
        assert_eq!(offerings[0].model_id, "big-model");
        assert_eq!(offerings[2].input_cost, None);
    }

    #[test]
    fn test_offerings_view_sorts_by_latency() {
        let offerings = normalize_offerings(&records());
        let sorted = offerings_view(&offerings, None, ProviderSortKey::Latency, Direction::Asc);
        let names: Vec<&str> = sorted.iter().map(|o| o.provider.as_str()).collect();
        assert_eq!(names, vec!["Fast", "Slow", "Solo"]);
    }

    #[test]
    fn test_offerings_view_missing_last_descending() {
        let offerings = normalize_offerings(&records());
        let sorted = offerings_view(&offerings, Some("big-model"), ProviderSortKey::Throughput, Direction::Desc);
        let names: Vec<&str> = sorted.iter().map(|o| o.provider.as_str()).collect();
        assert_eq!(names, vec!["Slow", "Fast"]);
    }

    #[test]
    fn test_provider_sort_key_parse() {
        assert_eq!("INPUTCOST".parse::<ProviderSortKey>(), Ok(ProviderSortKey::InputCost));
        assert!("price".parse::<ProviderSortKey>().is_err());
    }

    #[test]
    fn test_model_names_are_taken_as_written() {
        let records = vec![RawRecord::from_value(json!({ "model": "None", "providers": [{ "name": "Host" }] })).unwrap()];
        let offerings = normalize_offerings(&records);
        assert_eq!(offerings.len(), 1);
        assert_eq!(offerings[0].model_id, "none");
    }
}
