use crate::charts::{build_series, ChartSeries, MetricId};
use crate::dataset::Dataset;
use crate::model::NormalizedModel;
use crate::query::{sort_models, Direction};

/// Top `count` models for a metric, best first. Models without a value
/// for the metric are left out.
pub fn recommend(dataset: &Dataset, metric: MetricId, count: usize) -> ChartSeries {
    let with_data: Vec<&NormalizedModel> = dataset
        .models()
        .iter()
        .filter(|model| metric.extract(model).is_some())
        .collect();
    let direction = if metric.higher_is_better() { Direction::Desc } else { Direction::Asc };

    let mut ranked = sort_models(with_data, &metric.sort_key(), direction);
    ranked.truncate(count);
    build_series(metric, &ranked)
}
