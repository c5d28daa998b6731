use serde::{Serialize, Deserialize};

use crate::dataset::Dataset;
use crate::model::NormalizedModel;
use crate::providers::{offerings_view, ProviderOffering, ProviderSortKey};
use crate::query::Direction;
use super::ViewError;

/// Everything the detail page shows for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDetail {
    pub model: NormalizedModel,
    /// Providers hosting the model, cheapest input first
    pub offerings: Vec<ProviderOffering>,
}

pub fn model_detail(dataset: &Dataset, id: &str) -> Result<ModelDetail, ViewError> {
    let model = dataset
        .model(id)
        .ok_or_else(|| ViewError::UnknownModel(id.trim().to_string()))?;
    let offerings = offerings_view(dataset.offerings(), Some(&model.id), ProviderSortKey::InputCost, Direction::Asc)
        .into_iter()
        .cloned()
        .collect();
    Ok(ModelDetail {
        model: model.clone(),
        offerings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_orders_offerings_by_price() {
        let dataset = Dataset::bundled().unwrap();
        let detail = model_detail(&dataset, "llama-3-1-405b").unwrap();
        let providers: Vec<&str> = detail.offerings.iter().map(|o| o.provider.as_str()).collect();
        assert_eq!(providers, vec!["DeepInfra", "Fireworks", "Together"]);
    }

    #[test]
    fn test_detail_without_offerings() {
        let dataset = Dataset::bundled().unwrap();
        let detail = model_detail(&dataset, "Mixtral-8x7B").unwrap();
        assert_eq!(detail.model.name, "Mixtral 8x7B");
        assert!(detail.offerings.is_empty());
    }

    #[test]
    fn test_unknown_model() {
        let dataset = Dataset::bundled().unwrap();
        assert_eq!(
            model_detail(&dataset, "gpt-9").unwrap_err(),
            ViewError::UnknownModel("gpt-9".to_string())
        );
    }
}
