//! # Views Module
//!
//! Page-level projections of the dataset. Each view takes the shared,
//! read-only [`Dataset`] plus view-local parameters and returns the rows
//! to render. Nothing here mutates the dataset.

mod compare;
mod detail;
mod developers;
mod recommend;
mod redteam;

use std::error::Error;
use std::fmt;
use tracing::warn;

use crate::charts::{build_series, ChartSeries, MetricId};
use crate::dataset::Dataset;
use crate::model::NormalizedModel;
use crate::query::{Direction, SortKey, ViewQuery};

pub use compare::{compare, ComparedModel, Comparison, ComparisonRow};
pub use detail::{model_detail, ModelDetail};
pub use developers::{developer_models, developers, DeveloperSummary};
pub use recommend::recommend;
pub use redteam::{red_teaming, RedTeamRow};

/// Ids used when the dataset cannot provide any for detail-page generation
pub const FALLBACK_MODEL_IDS: [&str; 4] = ["gpt-4o", "claude-3-5-sonnet", "gemini-1-5-pro", "llama-3-1-405b"];

/// Errors from views that look things up by user-supplied identifiers
#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    UnknownModel(String),
    UnknownDeveloper(String),
    NoModelsSelected,
    TooManyModels { requested: usize, limit: usize },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ViewError::UnknownModel(id) => write!(f, "Model not found: {}", id),
            ViewError::UnknownDeveloper(name) => write!(f, "Developer not found: {}", name),
            ViewError::NoModelsSelected => write!(f, "Select at least one model to compare"),
            ViewError::TooManyModels { requested, limit } => {
                write!(f, "Cannot compare {} models, the limit is {}", requested, limit)
            }
        }
    }
}

impl Error for ViewError {}

/// Defaults that views fall back to when a request leaves them out
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefaults {
    pub query: ViewQuery,
    pub compare_limit: usize,
    pub recommendation_count: usize,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            query: ViewQuery::default(),
            compare_limit: 4,
            recommendation_count: 5,
        }
    }
}

/// Main leaderboard table
pub fn leaderboard<'a>(dataset: &'a Dataset, query: &ViewQuery) -> Vec<&'a NormalizedModel> {
    query.apply(dataset.models())
}

/// One metric charted over the leaderboard rows, in table order
pub fn chart(dataset: &Dataset, metric: MetricId, query: &ViewQuery) -> ChartSeries {
    build_series(metric, &leaderboard(dataset, query))
}

/// Default ordering for the red-teaming leaderboard
pub fn red_teaming_defaults() -> ViewQuery {
    ViewQuery::sorted_by(SortKey::SafetyRank, Direction::Asc)
}

/// Model ids to pre-generate detail pages for. Falls back to a fixed list
/// so page generation never ends up with nothing to build.
pub fn route_ids(dataset: &Dataset) -> Vec<String> {
    let ids: Vec<String> = dataset.models().iter().map(|model| model.id.clone()).collect();
    if ids.is_empty() {
        warn!("Dataset has no models, using fallback route ids");
        return FALLBACK_MODEL_IDS.iter().map(|id| id.to_string()).collect();
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_ids_fallback() {
        let empty = Dataset::default();
        assert_eq!(route_ids(&empty).len(), FALLBACK_MODEL_IDS.len());

        let dataset = Dataset::new(vec![NormalizedModel::new("only", "Only", "X")], Vec::new());
        assert_eq!(route_ids(&dataset), vec!["only".to_string()]);
    }

    #[test]
    fn test_leaderboard_default_order_on_bundled_data() {
        let dataset = Dataset::bundled().unwrap();
        let rows = leaderboard(&dataset, &ViewQuery::default());
        assert_eq!(rows[0].id, "claude-3-5-sonnet");
        assert_eq!(rows[1].id, "gpt-4o");
        // Mixtral has no operational rank
        assert_eq!(rows.last().unwrap().id, "mixtral-8x7b");
    }

    #[test]
    fn test_chart_follows_table_order() {
        let dataset = Dataset::bundled().unwrap();
        let series = chart(&dataset, MetricId::SafePercentage, &ViewQuery::default());
        assert_eq!(series.bars[0].model_id, "claude-3-5-sonnet");
        assert_eq!(series.bars[0].value, Some(100.0));
        // Llama 3.1 405B was never red-teamed
        let llama = series.bars.iter().find(|bar| bar.model_id == "llama-3-1-405b").unwrap();
        assert_eq!(llama.value, None);
        assert_eq!(llama.fraction, None);
    }
}
