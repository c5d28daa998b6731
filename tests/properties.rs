use modelboard::dataset::RawRecord;
use modelboard::model::{normalize, normalize_record, NormalizedModel};
use modelboard::query::{search, sort_models, Direction, SortKey};
use serde_json::{json, Value};

fn model(value: Value) -> NormalizedModel {
    normalize_record(&RawRecord::from_value(value).unwrap()).unwrap()
}

fn ids<'a>(models: &[&'a NormalizedModel]) -> Vec<&'a str> {
    models.iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn zero_or_null_totals_give_no_percentage() {
    let records = [
        json!({ "name": "Zero", "totalPrompts": 0, "safeResponses": 0, "jailbreakAttempts": 0, "jailbreakSafeResponses": 5 }),
        json!({ "name": "Null", "totalPrompts": null, "safeResponses": 40 }),
        json!({ "name": "Absent", "safeResponses": 40, "jailbreakSafeResponses": 3 }),
    ];
    for record in records {
        let model = model(record);
        assert_eq!(model.safety.safe_percentage, None, "{}", model.name);
        assert_eq!(model.safety.unsafe_percentage, None, "{}", model.name);
        assert_eq!(model.safety.jailbreak_resistance, None, "{}", model.name);
        assert!(!model.safety.has_data());
    }
}

#[test]
fn full_safe_count_is_exactly_one_hundred() {
    for total in [1, 50, 100, 101, 1200, 99_999] {
        let model = model(json!({
            "name": "Perfect",
            "totalPrompts": total,
            "safeResponses": total,
            "jailbreakAttempts": total,
            "jailbreakSafeResponses": total,
        }));
        assert_eq!(model.safety.safe_percentage, Some(100.0));
        assert_eq!(model.safety.jailbreak_resistance, Some(100.0));
    }
}

#[test]
fn percentages_stay_in_range_and_finite() {
    let model = model(json!({ "name": "Odd", "totalPrompts": 10, "safeResponses": 5000, "unsafeResponses": "12%" }));
    let safe = model.safety.safe_percentage.unwrap();
    assert!(safe.is_finite() && (0.0..=100.0).contains(&safe));
    assert_eq!(model.safety.unsafe_percentage, Some(12.0));
}

#[test]
fn missing_values_sort_last_in_both_directions() {
    let models = vec![
        model(json!({ "name": "Dash", "latency": "-", "mathLiveBench": "-", "safetyRank": "-", "contextLength": "N/A" })),
        model(json!({ "name": "Fast", "latency": "~0.6s", "mathLiveBench": "40%", "safetyRank": "#2", "contextLength": "128K tokens" })),
        model(json!({ "name": "Nothing" })),
        model(json!({ "name": "Slow", "latency": "~10-20s", "mathLiveBench": 80, "safetyRank": 1, "contextLength": "2M tokens" })),
        model(json!({ "name": "Unknown", "latency": "N/A", "mathLiveBench": "N/A", "safetyRank": null, "contextLength": "-" })),
    ];
    let keys = [
        SortKey::Latency,
        SortKey::Benchmark(modelboard::model::Benchmark::Mathematics),
        SortKey::SafetyRank,
        SortKey::ContextLength,
        SortKey::InputCost,
    ];

    for key in keys {
        for direction in [Direction::Asc, Direction::Desc] {
            let sorted = sort_models(models.iter().collect(), &key, direction);
            assert_eq!(sorted.len(), models.len());
            if key == SortKey::InputCost {
                // Nobody has a price, so the whole column is missing and stays in name order
                assert!(sorted.iter().all(|m| m.pricing.input_per_million.is_none()));
                assert_eq!(ids(&sorted), vec!["dash", "fast", "nothing", "slow", "unknown"]);
                continue;
            }
            let first_missing = sorted.iter().position(|m| !["fast", "slow"].contains(&m.id.as_str()));
            assert_eq!(first_missing, Some(2), "{:?} {:?}: {:?}", key, direction, ids(&sorted));
        }
    }
}

#[test]
fn exact_name_match_ranks_first() {
    let models = vec![
        model(json!({ "name": "Gemini Ultra", "developer": "Google Gemini Labs" })),
        model(json!({ "name": "Gemini", "developer": "Google" })),
        model(json!({ "name": "Nano", "developer": "Gemini Works" })),
    ];
    let found = search(models.iter().collect(), "gemini");
    assert_eq!(found[0].id, "gemini");
    assert_eq!(found.len(), 3);

    let found = search(models.iter().collect(), "GEMINI ULTRA");
    assert_eq!(found[0].id, "gemini-ultra");
}

#[test]
fn parameter_sizes_order_numerically() {
    let models = vec![
        model(json!({ "name": "Huge", "parameters": "700B Parameters" })),
        model(json!({ "name": "Small", "parameters": "7B Parameters" })),
        model(json!({ "name": "Medium", "parameters": "70B Parameters" })),
    ];
    let sorted = sort_models(models.iter().collect(), &SortKey::Parameters, Direction::Asc);
    assert_eq!(ids(&sorted), vec!["small", "medium", "huge"]);
}

#[test]
fn context_lengths_order_numerically() {
    let models = vec![
        model(json!({ "name": "Ten Million", "contextLength": "10M tokens" })),
        model(json!({ "name": "Two Million", "contextLength": "2M tokens" })),
        model(json!({ "name": "Two Hundred K", "contextLength": "200,000 tokens" })),
    ];
    let sorted = sort_models(models.iter().collect(), &SortKey::ContextLength, Direction::Asc);
    assert_eq!(ids(&sorted), vec!["two-hundred-k", "two-million", "ten-million"]);
}

#[test]
fn latency_ranges_use_their_midpoint() {
    let models = vec![
        model(json!({ "name": "Range", "latency": "~10-20s" })),
        model(json!({ "name": "Sixteen", "latency": "16s" })),
        model(json!({ "name": "Quick", "latency": "~0.6s" })),
        model(json!({ "name": "Fourteen", "latency": "14s" })),
    ];
    let sorted = sort_models(models.iter().collect(), &SortKey::Latency, Direction::Asc);
    assert_eq!(ids(&sorted), vec!["quick", "fourteen", "range", "sixteen"]);
}

#[test]
fn safety_rank_and_math_scenario() {
    let models = normalize(&[
        RawRecord::from_value(json!({ "name": "Model A", "safetyRank": 1, "mathLiveBench": "91.2%" })).unwrap(),
        RawRecord::from_value(json!({ "name": "Model B", "safetyRank": null, "mathLiveBench": "95.0%" })).unwrap(),
    ]);

    let by_safety = sort_models(models.iter().collect(), &"safetyRank".parse().unwrap(), Direction::Asc);
    assert_eq!(ids(&by_safety), vec!["model-a", "model-b"]);

    let by_math = sort_models(models.iter().collect(), &"mathLiveBench".parse().unwrap(), Direction::Desc);
    assert_eq!(ids(&by_math), vec!["model-b", "model-a"]);
}
