use anyhow::{anyhow, bail, Context, Result};

use modelboard::charts::MetricId;
use modelboard::charts::MetricInfo;
use modelboard::console::display;
use modelboard::dataset::Dataset;
use modelboard::providers::{offerings_view, ProviderSortKey};
use modelboard::query::{Direction, ViewQuery};
use modelboard::views::{self, ViewDefaults};

use crate::cli::TableArgs;

fn table_query(args: &TableArgs, defaults: &ViewQuery) -> Result<ViewQuery> {
    ViewQuery::from_params(
        args.search.as_deref(),
        args.developer.as_deref(),
        args.sort.as_deref(),
        args.direction.as_deref(),
        defaults,
    )
    .context("Invalid table options")
}

pub fn table(dataset: &Dataset, defaults: &ViewDefaults, args: &TableArgs) -> Result<()> {
    let query = table_query(args, &defaults.query)?;
    let models = views::leaderboard(dataset, &query);
    display::display_models(&models, query.sort.id().parse::<MetricId>().ok());
    Ok(())
}

pub fn show(dataset: &Dataset, id: &str) -> Result<()> {
    let detail = views::model_detail(dataset, id)?;
    display::display_model_detail(&detail);
    Ok(())
}

pub fn compare(dataset: &Dataset, defaults: &ViewDefaults, ids: &[String]) -> Result<()> {
    let comparison = views::compare(dataset, ids, defaults.compare_limit)?;
    display::display_comparison(&comparison);
    Ok(())
}

pub fn red_teaming(dataset: &Dataset, args: &TableArgs) -> Result<()> {
    let query = table_query(args, &views::red_teaming_defaults())?;
    display::display_red_teaming(&views::red_teaming(dataset, &query));
    Ok(())
}

pub fn chart(dataset: &Dataset, defaults: &ViewDefaults, metric: &str, top: Option<usize>, args: &TableArgs) -> Result<()> {
    let metric: MetricId = metric.parse().map_err(|e: String| anyhow!(e))?;
    let series = match top {
        Some(0) => bail!("--top must be greater than 0"),
        Some(count) => views::recommend(dataset, metric, count),
        None => views::chart(dataset, metric, &table_query(args, &defaults.query)?),
    };
    display::display_chart(&series);
    Ok(())
}

pub fn providers(dataset: &Dataset, model: Option<&str>, sort: Option<&str>, direction: Option<&str>) -> Result<()> {
    let key = match sort {
        Some(id) => id.parse::<ProviderSortKey>().map_err(|e| anyhow!(e))?,
        None => ProviderSortKey::Provider,
    };
    let direction = match direction {
        Some(dir) => dir.parse::<Direction>().map_err(|e| anyhow!(e))?,
        None => Direction::Asc,
    };
    let offerings: Vec<_> = offerings_view(dataset.offerings(), model, key, direction)
        .into_iter()
        .cloned()
        .collect();
    display::display_providers(&offerings);
    Ok(())
}

pub fn developers(dataset: &Dataset, defaults: &ViewDefaults, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let models = views::developer_models(dataset, name, &defaults.query)?;
            display::display_models(&models, None);
        }
        None => display::display_developers(&views::developers(dataset)),
    }
    Ok(())
}

pub fn metrics() {
    let metrics: Vec<MetricInfo> = MetricId::all().into_iter().map(MetricInfo::from).collect();
    display::display_metrics(&metrics);
}

pub fn ids(dataset: &Dataset) {
    for id in views::route_ids(dataset) {
        println!("{}", id);
    }
}
