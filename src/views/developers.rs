use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::dataset::Dataset;
use crate::model::{slugify, NormalizedModel};
use crate::query::ViewQuery;
use super::ViewError;

/// One developer and the models it publishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperSummary {
    pub name: String,
    pub slug: String,
    pub logo: String,
    pub model_count: usize,
    /// Best operational rank among the developer's models
    pub best_operational_rank: Option<u32>,
    pub model_ids: Vec<String>,
}

/// Developers ordered by their best-ranked model, unranked developers last
pub fn developers(dataset: &Dataset) -> Vec<DeveloperSummary> {
    let mut grouped: BTreeMap<String, DeveloperSummary> = BTreeMap::new();
    for model in dataset.models() {
        let slug = slugify(&model.developer);
        let entry = grouped.entry(slug.clone()).or_insert_with(|| DeveloperSummary {
            name: model.developer.clone(),
            slug,
            logo: model.developer_logo.clone(),
            model_count: 0,
            best_operational_rank: None,
            model_ids: Vec::new(),
        });
        entry.model_count += 1;
        entry.model_ids.push(model.id.clone());
        entry.best_operational_rank = match (entry.best_operational_rank, model.operational_rank) {
            (Some(best), Some(rank)) => Some(best.min(rank)),
            (best, rank) => best.or(rank),
        };
    }

    let mut summaries: Vec<DeveloperSummary> = grouped.into_values().collect();
    summaries.sort_by(|a, b| {
        match (a.best_operational_rank, b.best_operational_rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    summaries
}

/// Models of one developer, looked up by display name or slug
pub fn developer_models<'a>(
    dataset: &'a Dataset,
    developer: &str,
    query: &ViewQuery,
) -> Result<Vec<&'a NormalizedModel>, ViewError> {
    let wanted = developer.trim();
    let lowered = wanted.to_lowercase();
    let slug = slugify(wanted);
    let models: Vec<&NormalizedModel> = dataset
        .models()
        .iter()
        .filter(|model| model.developer.to_lowercase() == lowered || slugify(&model.developer) == slug)
        .collect();
    if models.is_empty() {
        return Err(ViewError::UnknownDeveloper(wanted.to_string()));
    }

    // The developer is already fixed, only search and sort apply
    let query = ViewQuery {
        developer: String::new(),
        ..query.clone()
    };
    Ok(query.apply_to(models))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Direction, SortKey};

    #[test]
    fn test_developers_grouped_and_ranked() {
        let dataset = Dataset::bundled().unwrap();
        let summaries = developers(&dataset);
        let names: Vec<&str> = summaries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Anthropic", "OpenAI", "DeepSeek", "Google", "Meta", "Mistral AI"]);

        let meta = &summaries[4];
        assert_eq!(meta.model_count, 2);
        assert_eq!(meta.best_operational_rank, Some(5));
        assert_eq!(meta.slug, "meta");
    }

    #[test]
    fn test_developer_models_by_slug() {
        let dataset = Dataset::bundled().unwrap();
        let query = ViewQuery::sorted_by(SortKey::Parameters, Direction::Desc);
        let models = developer_models(&dataset, "mistral-ai", &query).unwrap();
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["mistral-large-2", "mixtral-8x7b"]);

        assert!(matches!(
            developer_models(&dataset, "Nobody", &ViewQuery::default()),
            Err(ViewError::UnknownDeveloper(_))
        ));
    }

    #[test]
    fn test_developer_models_fold_non_ascii_case() {
        let models = vec![
            NormalizedModel::new("aurore", "Aurore", "Équipe"),
            NormalizedModel::new("other", "Other", "Lab"),
        ];
        let dataset = Dataset::new(models, Vec::new());
        let found = developer_models(&dataset, "ÉQUIPE", &ViewQuery::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "aurore");
    }
}
