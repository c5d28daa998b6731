//! Tolerant parsers for the string-typed values found in the dataset.
//!
//! Every parser returns `None` for placeholders and for anything it cannot
//! read; callers treat `None` as "no data" rather than as an error.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// First decimal number in a string
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-?\d+(?:\.\d+)?").unwrap()
});

/// Leading numeral after an optional non-digit prefix (`"#7"`, `"Rank 3"`)
static RANK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\d-]*(\d+)").unwrap()
});

/// Mixture-of-experts sizes such as `"8x7B"`
static EXPERT_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)\s*((?:thousand|million|billion|trillion)s?|[kmbt])\b").unwrap()
});

/// Number with an optional K/M/B/T suffix or unit word (`"1 million"`)
static UNIT_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*((?:thousand|million|billion|trillion)s?\b|[kmbt]\b)?").unwrap()
});

/// Single latency (`"~0.6s"`) or range (`"~10-20s"`), seconds or milliseconds
static LATENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)(?:\s*[-–]\s*(\d+(?:\.\d+)?))?\s*(ms|s)?").unwrap()
});

const MISSING_MARKERS: [&str; 8] = ["", "-", "—", "n/a", "na", "null", "none", "no data"];

/// True for the placeholder spellings the dataset uses for "no value"
pub fn is_missing(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    MISSING_MARKERS.contains(&lowered.as_str())
}

fn first_number(raw: &str) -> Option<f64> {
    NUMBER
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn unit_multiplier(unit: &str) -> f64 {
    match unit.to_ascii_lowercase().trim_end_matches('s') {
        "k" | "thousand" => 1e3,
        "m" | "million" => 1e6,
        "b" | "billion" => 1e9,
        "t" | "trillion" => 1e12,
        _ => 1.0,
    }
}

/// First number in the string, ignoring thousands separators
pub fn parse_number(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    first_number(&raw.replace(',', ""))
}

/// `"73.50%"` -> 73.5. A bare number is accepted as already being a percentage.
pub fn parse_percent(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    raw.trim().trim_end_matches('%').trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `"$2.50"` -> 2.5, `"Free"` -> 0.0
pub fn parse_cost(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    if raw.trim().eq_ignore_ascii_case("free") {
        return Some(0.0);
    }
    first_number(&raw.replace([',', '$'], ""))
}

/// Leading numeral of a possibly prefixed rank. Zero is not a rank.
pub fn parse_rank(raw: &str) -> Option<u32> {
    let caps = RANK.captures(raw.trim())?;
    caps.get(1)?.as_str().parse::<u32>().ok().filter(|rank| *rank > 0)
}

/// Parameter counts: `"70B Parameters"` -> 7e10, `"8x7B"` -> 5.6e10
pub fn parse_size(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    if let Some(caps) = EXPERT_SIZE.captures(raw) {
        let experts = caps[1].parse::<f64>().ok()?;
        let each = caps[2].parse::<f64>().ok()?;
        return Some(experts * each * unit_multiplier(&caps[3]));
    }
    let caps = UNIT_SIZE.captures(raw)?;
    let value = caps[1].parse::<f64>().ok()?;
    let multiplier = caps.get(2).map_or(1.0, |unit| unit_multiplier(unit.as_str()));
    Some(value * multiplier)
}

/// Context windows: `"200,000 tokens"` -> 2e5, `"2M tokens"` -> 2e6
pub fn parse_context_length(raw: &str) -> Option<f64> {
    parse_size(&raw.replace(',', ""))
}

/// Seconds. Ranges resolve to their midpoint: `"~10-20s"` -> 15.0
pub fn parse_latency(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    let caps = LATENCY.captures(raw)?;
    let low = caps[1].parse::<f64>().ok()?;
    let value = match caps.get(2).and_then(|high| high.as_str().parse::<f64>().ok()) {
        Some(high) => (low + high) / 2.0,
        None => low,
    };
    match caps.get(3).map(|unit| unit.as_str().to_ascii_lowercase()) {
        Some(unit) if unit == "ms" => Some(value / 1000.0),
        _ => Some(value),
    }
}

/// Dates as authored: ISO, `"May 14, 2024"`, `"October 2023"`, `"2024-05"`, `"2024"`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if is_missing(raw) {
        return None;
    }
    let trimmed = raw.trim();
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Month precision
    for format in ["%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("01 {}", trimmed), format) {
            return Some(date);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d") {
        return Some(date);
    }
    // Year precision
    trimmed
        .parse::<i32>()
        .ok()
        .filter(|year| (1900..=9999).contains(year))
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

/// Day number of a parsed date, for numeric comparison
pub fn parse_date_ordinal(raw: &str) -> Option<f64> {
    parse_date(raw).map(|date| date.num_days_from_ce() as f64)
}

/// Qualitative capability levels: Yes (2) > Limited (1) > No (0)
pub fn parse_ordinal(raw: &str) -> Option<f64> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "true" | "full" | "supported" => Some(2.0),
        "limited" | "partial" | "beta" => Some(1.0),
        "no" | "false" | "unsupported" => Some(0.0),
        _ => None,
    }
}
