//! # Charts Module
//!
//! Metric adapters plus chart-ready series. A bar without data keeps
//! `value: None` and `fraction: None` all the way to the renderer, so a
//! missing score can never be drawn as a short bar.

pub mod metrics;

use serde::{Serialize, Deserialize};

use crate::model::NormalizedModel;
pub use metrics::{format_tokens, MetricId, MetricInfo, ValueFormat, NO_DATA};

/// One bar of a bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBar {
    pub model_id: String,
    pub model_name: String,
    pub developer: String,
    pub value: Option<f64>,
    /// Rendered value, or "No data"
    pub display: String,
    /// Bar length relative to the largest value in the series, in [0, 1]
    pub fraction: Option<f64>,
}

/// Bars for one metric, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub metric: MetricId,
    pub label: String,
    pub higher_is_better: bool,
    pub bars: Vec<ChartBar>,
}

impl ChartSeries {
    /// Bars that carry a value
    pub fn with_data(&self) -> impl Iterator<Item = &ChartBar> {
        self.bars.iter().filter(|bar| bar.value.is_some())
    }
}

/// Builds a series over `models` in the given order
pub fn build_series(metric: MetricId, models: &[&NormalizedModel]) -> ChartSeries {
    let values: Vec<Option<f64>> = models.iter().map(|model| metric.extract(model)).collect();
    let max = values.iter().flatten().fold(0.0_f64, |acc, v| acc.max(v.abs()));

    let bars = models
        .iter()
        .zip(values)
        .map(|(model, value)| ChartBar {
            model_id: model.id.clone(),
            model_name: model.name.clone(),
            developer: model.developer.clone(),
            value,
            display: metric.format(value),
            fraction: value.map(|v| if max > 0.0 { (v.abs() / max).clamp(0.0, 1.0) } else { 0.0 }),
        })
        .collect();

    ChartSeries {
        metric,
        label: metric.label().to_string(),
        higher_is_better: metric.higher_is_better(),
        bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Benchmark, Score};

    #[test]
    fn test_series_keeps_no_data_distinct_from_zero() {
        let mut a = NormalizedModel::new("a", "A", "X");
        a.benchmarks.set(Benchmark::Coding, Score::Value(80.0));
        let mut b = NormalizedModel::new("b", "B", "X");
        b.benchmarks.set(Benchmark::Coding, Score::Value(0.0));
        let c = NormalizedModel::new("c", "C", "X");

        let series = build_series(MetricId::Benchmark(Benchmark::Coding), &[&a, &b, &c]);
        assert_eq!(series.bars[0].fraction, Some(1.0));
        assert_eq!(series.bars[1].value, Some(0.0));
        assert_eq!(series.bars[1].fraction, Some(0.0));
        assert_eq!(series.bars[2].value, None);
        assert_eq!(series.bars[2].fraction, None);
        assert_eq!(series.bars[2].display, NO_DATA);
        assert_eq!(series.with_data().count(), 2);
    }

    #[test]
    fn test_all_zero_series() {
        let mut a = NormalizedModel::new("a", "A", "X");
        a.pricing.input_per_million = Some(0.0);
        let series = build_series(MetricId::InputCost, &[&a]);
        assert_eq!(series.bars[0].fraction, Some(0.0));
    }
}
