use comfy_table::{Table, Cell, Color, ContentArrangement, Attribute, CellAlignment};
use colored::*;

use crate::charts::{ChartSeries, MetricId, MetricInfo, NO_DATA};
use crate::model::{Benchmark, NormalizedModel, SafetyTier};
use crate::providers::ProviderOffering;
use crate::views::{Comparison, DeveloperSummary, ModelDetail, RedTeamRow};

/// Width of the longest bar in a chart, in characters
pub const BAR_WIDTH: usize = 40;

const FULL_BLOCK: char = '█';
const NO_DATA_FILL: &str = "· · · · ·";

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .set_header(header(titles))
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Metric cell: the formatted value, or a dimmed "No data"
fn metric_cell(metric: MetricId, value: Option<f64>) -> Cell {
    match value {
        Some(_) => Cell::new(metric.format(value)).set_alignment(CellAlignment::Right),
        None => Cell::new(NO_DATA).fg(Color::DarkGrey).set_alignment(CellAlignment::Right),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}

fn rank_cell(rank: Option<u32>) -> Cell {
    match rank {
        Some(rank) => Cell::new(format!("#{}", rank)).set_alignment(CellAlignment::Center),
        None => Cell::new("-").fg(Color::DarkGrey).set_alignment(CellAlignment::Center),
    }
}

fn tier_color(tier: SafetyTier) -> Color {
    match tier {
        SafetyTier::High => Color::Green,
        SafetyTier::Moderate => Color::Yellow,
        SafetyTier::Low => Color::Red,
        SafetyTier::Unrated => Color::DarkGrey,
    }
}

/// Leaderboard table. `extra` adds one metric column, typically the one
/// the table is sorted by.
pub fn models_table(models: &[&NormalizedModel], extra: Option<MetricId>) -> Table {
    let average = MetricId::Benchmark(Benchmark::GlobalAverage);
    let extra = extra.filter(|metric| *metric != average);

    let mut titles = vec!["#", "Model", "Developer", "Rank", "Context", "Input $/1M", "Output $/1M", "Latency", "LiveBench"];
    if let Some(metric) = extra {
        titles.push(metric.label());
    }
    let mut table = new_table(&titles);

    for (index, model) in models.iter().enumerate() {
        let mut row = vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Center),
            Cell::new(&model.name).fg(Color::Green),
            Cell::new(&model.developer).fg(Color::Yellow),
            rank_cell(model.operational_rank),
            text_cell(model.context_length.as_deref()),
            metric_cell(MetricId::InputCost, MetricId::InputCost.extract(model)),
            metric_cell(MetricId::OutputCost, MetricId::OutputCost.extract(model)),
            text_cell(model.latency.as_deref()),
            metric_cell(average, average.extract(model)),
        ];
        if let Some(metric) = extra {
            row.push(metric_cell(metric, metric.extract(model)));
        }
        table.add_row(row);
    }
    table
}

pub fn display_models(models: &[&NormalizedModel], extra: Option<MetricId>) {
    if models.is_empty() {
        println!("{}", "No models match".yellow());
        return;
    }
    println!("\n{}", models_table(models, extra));
    println!("{}", format!("Total models: {}", models.len()).bright_green());
}

/// Key facts, benchmarks and providers of one model
pub fn detail_tables(detail: &ModelDetail) -> Vec<Table> {
    let model = &detail.model;

    let mut facts = new_table(&["Field", "Value"]);
    let rows: [(&str, Option<String>); 11] = [
        ("Developer", Some(model.developer.clone())),
        ("Released", model.release_date.clone()),
        ("Knowledge cutoff", model.knowledge_cutoff.clone()),
        ("License", model.license.clone()),
        ("Parameters", model.parameters.clone()),
        ("Context length", model.context_length.clone()),
        ("Max output", model.max_output_tokens.clone()),
        ("Latency", model.latency.clone()),
        ("Operational rank", model.operational_rank.map(|rank| format!("#{}", rank))),
        ("Safety rank", model.safety_rank.map(|rank| format!("#{}", rank))),
        ("Safety tier", Some(model.safety.tier.to_string())),
    ];
    for (field, value) in rows {
        facts.add_row(vec![Cell::new(field).fg(Color::Cyan), text_cell(value.as_deref())]);
    }

    let mut scores = new_table(&["Metric", "Value"]);
    for metric in MetricId::all() {
        scores.add_row(vec![Cell::new(metric.label()), metric_cell(metric, metric.extract(model))]);
    }

    let mut tables = vec![facts, scores];
    if !detail.offerings.is_empty() {
        tables.push(providers_table(&detail.offerings));
    }
    tables
}

pub fn display_model_detail(detail: &ModelDetail) {
    println!("\n{} {}", detail.model.name.bright_green().bold(), format!("({})", detail.model.id).bright_black());
    if let Some(description) = &detail.model.description {
        println!("{}", description);
    }
    for table in detail_tables(detail) {
        println!("{}", table);
    }
}

/// One row per metric, one column per model; the best value is highlighted
pub fn comparison_table(comparison: &Comparison) -> Table {
    let mut titles = vec!["Metric"];
    titles.extend(comparison.models.iter().map(|model| model.name.as_str()));
    let mut table = new_table(&titles);

    for row in &comparison.rows {
        let mut cells = vec![Cell::new(&row.label).fg(Color::Cyan)];
        for (index, value) in row.values.iter().enumerate() {
            let cell = metric_cell(row.metric, *value);
            cells.push(if row.best == Some(index) {
                cell.fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                cell
            });
        }
        table.add_row(cells);
    }
    table
}

pub fn display_comparison(comparison: &Comparison) {
    println!("\n{}", comparison_table(comparison));
}

pub fn red_team_table(rows: &[RedTeamRow]) -> Table {
    let mut table = new_table(&["Rank", "Model", "Developer", "Prompts", "Safe", "Unsafe", "Jailbreak Resistance", "Tier"]);
    for row in rows {
        table.add_row(vec![
            rank_cell(row.safety_rank),
            Cell::new(&row.name).fg(Color::Green),
            Cell::new(&row.developer).fg(Color::Yellow),
            text_cell(row.total_prompts.map(|total| total.to_string()).as_deref()),
            metric_cell(MetricId::SafePercentage, row.safe_percentage),
            metric_cell(MetricId::SafePercentage, row.unsafe_percentage),
            metric_cell(MetricId::JailbreakResistance, row.jailbreak_resistance),
            Cell::new(row.tier).fg(tier_color(row.tier)),
        ]);
    }
    table
}

pub fn display_red_teaming(rows: &[RedTeamRow]) {
    if rows.is_empty() {
        println!("{}", "No red-teaming results".yellow());
        return;
    }
    println!("\n{}", red_team_table(rows));
}

/// Horizontal bar chart. A model without data gets a dotted placeholder
/// instead of a bar, so it cannot be mistaken for a zero.
pub fn render_chart(series: &ChartSeries, width: usize) -> String {
    let name_width = series.bars.iter().map(|bar| bar.model_name.chars().count()).max().unwrap_or(0);
    let better = if series.higher_is_better { "higher is better" } else { "lower is better" };

    let mut out = format!("{} {}\n", series.label.bold(), format!("({})", better).bright_black());
    for bar in &series.bars {
        let name = format!("{:<width$}", bar.model_name, width = name_width);
        let line = match bar.fraction {
            Some(fraction) => {
                let length = (fraction * width as f64).round() as usize;
                let filled: String = std::iter::repeat(FULL_BLOCK).take(length).collect();
                format!("{} {} {}", name, filled.green(), bar.display)
            }
            None => format!("{} {} {}", name, NO_DATA_FILL.bright_black(), NO_DATA.bright_black().italic()),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn display_chart(series: &ChartSeries) {
    if series.bars.is_empty() {
        println!("{}", "Nothing to chart".yellow());
        return;
    }
    println!("\n{}", render_chart(series, BAR_WIDTH));
}

pub fn providers_table(offerings: &[ProviderOffering]) -> Table {
    let mut table = new_table(&["Provider", "Model", "Input $/1M", "Output $/1M", "Latency", "Throughput", "Context"]);
    for offering in offerings {
        table.add_row(vec![
            Cell::new(&offering.provider).fg(Color::Yellow),
            Cell::new(&offering.model_name).fg(Color::Green),
            metric_cell(MetricId::InputCost, offering.input_cost),
            metric_cell(MetricId::OutputCost, offering.output_cost),
            text_cell(offering.latency.as_deref()),
            text_cell(offering.throughput.as_deref()),
            text_cell(offering.context_length.as_deref()),
        ]);
    }
    table
}

pub fn display_providers(offerings: &[ProviderOffering]) {
    if offerings.is_empty() {
        println!("{}", "No provider offerings found".yellow());
        return;
    }
    println!("\n{}", providers_table(offerings));
}

pub fn developers_table(developers: &[DeveloperSummary]) -> Table {
    let mut table = new_table(&["Developer", "Models", "Best Rank", "Model Ids"]);
    for developer in developers {
        table.add_row(vec![
            Cell::new(&developer.name).fg(Color::Yellow),
            Cell::new(developer.model_count).set_alignment(CellAlignment::Center),
            rank_cell(developer.best_operational_rank),
            Cell::new(developer.model_ids.join(", ")).fg(Color::DarkGrey),
        ]);
    }
    table
}

pub fn display_developers(developers: &[DeveloperSummary]) {
    println!("\n{}", developers_table(developers));
}

pub fn display_metrics(metrics: &[MetricInfo]) {
    let mut table = new_table(&["Id", "Label", "Better"]);
    for metric in metrics {
        table.add_row(vec![
            Cell::new(&metric.id).fg(Color::Green),
            Cell::new(&metric.label),
            Cell::new(if metric.higher_is_better { "higher" } else { "lower" }),
        ]);
    }
    println!("\n{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_series;
    use crate::dataset::Dataset;
    use crate::views;

    #[test]
    fn test_chart_marks_no_data_distinctly() {
        colored::control::set_override(false);
        let mut zero = NormalizedModel::new("zero", "Zero", "X");
        zero.benchmarks.set(Benchmark::Coding, crate::model::Score::Value(0.0));
        let mut full = NormalizedModel::new("full", "Full", "X");
        full.benchmarks.set(Benchmark::Coding, crate::model::Score::Value(50.0));
        let empty = NormalizedModel::new("empty", "Empty", "X");

        let series = build_series(MetricId::Benchmark(Benchmark::Coding), &[&full, &zero, &empty]);
        let chart = render_chart(&series, 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert!(lines[1].contains(&"█".repeat(10)));
        assert!(lines[2].ends_with("0.0%"));
        assert!(!lines[2].contains('█'));
        assert!(lines[3].contains(NO_DATA));
        assert!(lines[3].contains(NO_DATA_FILL));
    }

    #[test]
    fn test_tables_render_bundled_views() {
        let dataset = Dataset::bundled().unwrap();
        let models = views::leaderboard(&dataset, &Default::default());
        let rendered = models_table(&models, Some(MetricId::Benchmark(Benchmark::Mathematics))).to_string();
        assert!(rendered.contains("Claude 3.5 Sonnet"));
        assert!(rendered.contains(NO_DATA));

        let comparison = views::compare(&dataset, &["gpt-4o", "mixtral-8x7b"], 4).unwrap();
        let rendered = comparison_table(&comparison).to_string();
        assert!(rendered.contains("Mixtral 8x7B"));

        let detail = views::model_detail(&dataset, "claude-3-5-sonnet").unwrap();
        assert_eq!(detail_tables(&detail).len(), 3);
    }
}
