use serde::{Serialize, Deserialize};

use crate::charts::MetricId;
use crate::dataset::Dataset;
use crate::model::NormalizedModel;
use super::ViewError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedModel {
    pub id: String,
    pub name: String,
    pub developer: String,
}

/// One metric across the compared models, in model order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub metric: MetricId,
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub display: Vec<String>,
    /// Index of the best value, `None` when no model has data
    pub best: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub models: Vec<ComparedModel>,
    pub rows: Vec<ComparisonRow>,
}

/// Side-by-side comparison of up to `limit` models.
///
/// Ids resolve case-insensitively and duplicates are dropped, keeping the
/// first occurrence.
pub fn compare<S: AsRef<str>>(dataset: &Dataset, ids: &[S], limit: usize) -> Result<Comparison, ViewError> {
    let mut selected: Vec<&NormalizedModel> = Vec::new();
    for id in ids.iter().map(|id| id.as_ref().trim()).filter(|id| !id.is_empty()) {
        let model = dataset.model(id).ok_or_else(|| ViewError::UnknownModel(id.to_string()))?;
        if !selected.iter().any(|m| m.id == model.id) {
            selected.push(model);
        }
    }

    if selected.is_empty() {
        return Err(ViewError::NoModelsSelected);
    }
    if selected.len() > limit {
        return Err(ViewError::TooManyModels {
            requested: selected.len(),
            limit,
        });
    }

    let rows = MetricId::all()
        .into_iter()
        .map(|metric| comparison_row(metric, &selected))
        .collect();
    let models = selected
        .iter()
        .map(|model| ComparedModel {
            id: model.id.clone(),
            name: model.name.clone(),
            developer: model.developer.clone(),
        })
        .collect();
    Ok(Comparison { models, rows })
}

fn comparison_row(metric: MetricId, models: &[&NormalizedModel]) -> ComparisonRow {
    let values: Vec<Option<f64>> = models.iter().map(|model| metric.extract(model)).collect();
    let display = values.iter().map(|value| metric.format(*value)).collect();

    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.iter().enumerate() {
        let Some(value) = *value else { continue };
        let better = match best {
            None => true,
            Some((_, current)) if metric.higher_is_better() => value > current,
            Some((_, current)) => value < current,
        };
        if better {
            best = Some((index, value));
        }
    }

    ComparisonRow {
        metric,
        label: metric.label().to_string(),
        values,
        display,
        best: best.map(|(index, _)| index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Benchmark;

    fn row(comparison: &Comparison, metric: MetricId) -> &ComparisonRow {
        comparison.rows.iter().find(|row| row.metric == metric).unwrap()
    }

    #[test]
    fn test_best_respects_direction() {
        let dataset = Dataset::bundled().unwrap();
        let comparison = compare(&dataset, &["gpt-4o", "claude-3-5-sonnet", "deepseek-v3"], 4).unwrap();
        assert_eq!(comparison.models.len(), 3);

        // Claude leads the coding benchmark, DeepSeek is cheapest
        assert_eq!(row(&comparison, MetricId::Benchmark(Benchmark::Coding)).best, Some(1));
        assert_eq!(row(&comparison, MetricId::InputCost).best, Some(2));
        assert_eq!(row(&comparison, MetricId::Latency).best, Some(0));
    }

    #[test]
    fn test_no_data_cells() {
        let dataset = Dataset::bundled().unwrap();
        let comparison = compare(&dataset, &["mixtral-8x7b", "llama-3-1-70b"], 4).unwrap();
        let coding = row(&comparison, MetricId::Benchmark(Benchmark::Coding));
        assert_eq!(coding.values, vec![None, None]);
        assert_eq!(coding.best, None);
        assert_eq!(coding.display[0], "No data");
    }

    #[test]
    fn test_selection_errors() {
        let dataset = Dataset::bundled().unwrap();
        let none: [&str; 0] = [];
        assert_eq!(compare(&dataset, &none, 4).unwrap_err(), ViewError::NoModelsSelected);
        assert_eq!(
            compare(&dataset, &["gpt-4o", "nope"], 4).unwrap_err(),
            ViewError::UnknownModel("nope".to_string())
        );
        let err = compare(&dataset, &["gpt-4o", "claude-3-5-sonnet", "deepseek-v3"], 2).unwrap_err();
        assert_eq!(err, ViewError::TooManyModels { requested: 3, limit: 2 });
        // Duplicates count once
        assert_eq!(compare(&dataset, &["gpt-4o", "GPT-4O"], 1).unwrap().models.len(), 1);
    }
}
