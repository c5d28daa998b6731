use serde::{Serialize, Deserialize};

use crate::dataset::Dataset;
use crate::model::{NormalizedModel, SafetyTier};
use crate::query::ViewQuery;

/// One row of the red-teaming leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedTeamRow {
    pub id: String,
    pub name: String,
    pub developer: String,
    pub safety_rank: Option<u32>,
    pub total_prompts: Option<u64>,
    pub safe_percentage: Option<f64>,
    pub unsafe_percentage: Option<f64>,
    pub jailbreak_resistance: Option<f64>,
    pub tier: SafetyTier,
}

impl From<&NormalizedModel> for RedTeamRow {
    fn from(model: &NormalizedModel) -> Self {
        Self {
            id: model.id.clone(),
            name: model.name.clone(),
            developer: model.developer.clone(),
            safety_rank: model.safety_rank,
            total_prompts: model.safety.total_prompts,
            safe_percentage: model.safety.safe_percentage,
            unsafe_percentage: model.safety.unsafe_percentage,
            jailbreak_resistance: model.safety.jailbreak_resistance,
            tier: model.safety.tier,
        }
    }
}

/// Models that were red-teamed or carry a safety rank, in query order
pub fn red_teaming(dataset: &Dataset, query: &ViewQuery) -> Vec<RedTeamRow> {
    let evaluated: Vec<&NormalizedModel> = dataset
        .models()
        .iter()
        .filter(|model| model.safety.has_data() || model.safety_rank.is_some())
        .collect();
    query.apply_to(evaluated).into_iter().map(RedTeamRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Direction, SortKey};
    use crate::views::red_teaming_defaults;

    #[test]
    fn test_red_teaming_excludes_unevaluated_models() {
        let dataset = Dataset::bundled().unwrap();
        let rows = red_teaming(&dataset, &red_teaming_defaults());
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec![
            "claude-3-5-sonnet",
            "gemini-1-5-pro",
            "gpt-4o",
            "deepseek-v3",
            "llama-3-1-70b",
            "mistral-large-2",
        ]);
        assert!(!ids.contains(&"llama-3-1-405b"));
    }

    #[test]
    fn test_red_teaming_by_jailbreak_resistance() {
        let dataset = Dataset::bundled().unwrap();
        let query = ViewQuery::sorted_by(SortKey::JailbreakResistance, Direction::Desc);
        let rows = red_teaming(&dataset, &query);
        assert_eq!(rows[0].id, "llama-3-1-70b");
        assert_eq!(rows[0].jailbreak_resistance, Some(100.0));
        // Models without jailbreak data trail the list
        let tail: Vec<Option<f64>> = rows.iter().rev().take(2).map(|row| row.jailbreak_resistance).collect();
        assert_eq!(tail, vec![None, None]);
    }
}
