use crate::model::NormalizedModel;
use super::sort::by_name;

/// How well a model matches a search term. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relevance {
    ExactName,
    ExactDeveloper,
    NamePrefix,
    DeveloperPrefix,
    Contains,
}

/// Relevance of `model` for an already lowercased, trimmed term.
/// Only the display name and developer name are searched.
pub fn relevance(model: &NormalizedModel, term: &str) -> Option<Relevance> {
    let name = model.name.to_lowercase();
    let developer = model.developer.to_lowercase();

    if name == term {
        Some(Relevance::ExactName)
    } else if developer == term {
        Some(Relevance::ExactDeveloper)
    } else if name.starts_with(term) {
        Some(Relevance::NamePrefix)
    } else if developer.starts_with(term) {
        Some(Relevance::DeveloperPrefix)
    } else if name.contains(term) || developer.contains(term) {
        Some(Relevance::Contains)
    } else {
        None
    }
}

/// Models matching `term`, best matches first, then alphabetical by name.
/// An empty term matches everything in the given order.
pub fn search<'a>(models: Vec<&'a NormalizedModel>, term: &str) -> Vec<&'a NormalizedModel> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return models;
    }
    let mut matched: Vec<(Relevance, &'a NormalizedModel)> = models
        .into_iter()
        .filter_map(|model| relevance(model, &term).map(|rel| (rel, model)))
        .collect();
    matched.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| by_name(*a, *b)));
    matched.into_iter().map(|(_, model)| model).collect()
}

/// Exact, case-insensitive developer match. An empty filter keeps everything.
pub fn matches_developer(model: &NormalizedModel, developer: &str) -> bool {
    let developer = developer.trim();
    developer.is_empty() || model.developer.to_lowercase() == developer.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, developer: &str) -> NormalizedModel {
        NormalizedModel::new(name.to_lowercase().replace(' ', "-"), name, developer)
    }

    #[test]
    fn test_relevance_ladder() {
        let models = vec![
            model("Zeta Meta", "Other"),
            model("Metamorph", "Lab"),
            model("Llama", "Meta"),
            model("Meta", "Someone"),
            model("Atlas", "Metaverse Inc"),
            model("Unrelated", "Nobody"),
        ];
        let refs: Vec<&NormalizedModel> = models.iter().collect();
        let names: Vec<&str> = search(refs, "META").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Meta", "Llama", "Metamorph", "Atlas", "Zeta Meta"]);
    }

    #[test]
    fn test_ties_are_alphabetical() {
        let models = vec![model("Gpt Mini", "X"), model("gpt Large", "Y"), model("GPT Base", "Z")];
        let refs: Vec<&NormalizedModel> = models.iter().collect();
        let names: Vec<&str> = search(refs, "gpt").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["GPT Base", "gpt Large", "Gpt Mini"]);
    }

    #[test]
    fn test_developer_filter() {
        let m = model("Llama", "Meta");
        assert!(matches_developer(&m, ""));
        assert!(matches_developer(&m, "meta"));
        assert!(!matches_developer(&m, "Met"));
    }

    #[test]
    fn test_developer_filter_folds_non_ascii_case() {
        let m = model("Aurore", "Équipe Ünion");
        assert!(matches_developer(&m, "équipe ünion"));
        assert!(matches_developer(&m, "ÉQUIPE ÜNION"));
        assert!(!matches_developer(&m, "equipe union"));
    }
}
