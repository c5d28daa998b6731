use colored::*;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::charts::{ChartSeries, MetricInfo};
use crate::model::NormalizedModel;
use crate::providers::ProviderOffering;
use crate::server::ApiResponse;
use crate::views::{Comparison, DeveloperSummary, ModelDetail, RedTeamRow};
use super::browse::TableState;
use super::display::{
    display_chart, display_comparison, display_developers, display_metrics, display_model_detail,
    display_models, display_providers, display_red_teaming,
};

/// Shared resources for the browser's command handlers
pub(super) struct BrowseContext<'a> {
    pub client: &'a Client,
    pub server_url: &'a str,
}

impl BrowseContext<'_> {
    /// GETs `path` and unwraps the response envelope
    async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, String> {
        let response = self
            .client
            .get(format!("{}{}", self.server_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| format!("Error sending request: {}", e))?;
        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| format!("Error reading response: {}", e))?;
        match body.data {
            Some(data) if body.is_success() => Ok(data),
            _ => Err(body.message.unwrap_or_else(|| "Request failed".to_string())),
        }
    }
}

fn report_error(message: String) {
    println!("{} {}", "Error:".red().bold(), message);
}

fn table_query(state: &TableState) -> Vec<(&'static str, String)> {
    let mut query = vec![("sort", state.sort.clone()), ("direction", state.direction.to_string())];
    if !state.search.is_empty() {
        query.push(("search", state.search.clone()));
    }
    if !state.developer.is_empty() {
        query.push(("developer", state.developer.clone()));
    }
    query
}

pub(super) async fn handle_list_models(context: &BrowseContext<'_>, state: &TableState) {
    match context.fetch::<Vec<NormalizedModel>>("/api/v1/models", &table_query(state)).await {
        Ok(models) => {
            let rows: Vec<&NormalizedModel> = models.iter().collect();
            display_models(&rows, state.sort.parse().ok());
        }
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_show_model(context: &BrowseContext<'_>, id: &str) {
    match context.fetch::<ModelDetail>(&format!("/api/v1/models/{}", id), &[]).await {
        Ok(detail) => display_model_detail(&detail),
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_compare(context: &BrowseContext<'_>, ids: &[String]) {
    match context.fetch::<Comparison>("/api/v1/compare", &[("ids", ids.join(","))]).await {
        Ok(comparison) => display_comparison(&comparison),
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_red_teaming(context: &BrowseContext<'_>) {
    match context.fetch::<Vec<RedTeamRow>>("/api/v1/red-teaming", &[]).await {
        Ok(rows) => display_red_teaming(&rows),
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_chart(context: &BrowseContext<'_>, state: &TableState, metric: &str) {
    match context.fetch::<ChartSeries>(&format!("/api/v1/charts/{}", metric), &table_query(state)).await {
        Ok(series) => display_chart(&series),
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_recommend(context: &BrowseContext<'_>, metric: &str, count: Option<usize>) {
    let query: Vec<(&str, String)> = count.map(|count| ("count", count.to_string())).into_iter().collect();
    match context.fetch::<ChartSeries>(&format!("/api/v1/recommendations/{}", metric), &query).await {
        Ok(series) => display_chart(&series),
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_providers(context: &BrowseContext<'_>, model: Option<&str>) {
    let query: Vec<(&str, String)> = model.map(|id| ("model", id.to_string())).into_iter().collect();
    match context.fetch::<Vec<ProviderOffering>>("/api/v1/providers", &query).await {
        Ok(offerings) => display_providers(&offerings),
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_developers(context: &BrowseContext<'_>) {
    match context.fetch::<Vec<DeveloperSummary>>("/api/v1/developers", &[]).await {
        Ok(developers) => display_developers(&developers),
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_developer(context: &BrowseContext<'_>, state: &TableState, name: &str) {
    let mut query = table_query(state);
    query.retain(|(key, _)| *key != "developer");
    match context.fetch::<Vec<NormalizedModel>>(&format!("/api/v1/developers/{}", name), &query).await {
        Ok(models) => {
            let rows: Vec<&NormalizedModel> = models.iter().collect();
            display_models(&rows, None);
        }
        Err(e) => report_error(e),
    }
}

pub(super) async fn handle_metrics(context: &BrowseContext<'_>) {
    match context.fetch::<Vec<MetricInfo>>("/api/v1/metrics", &[]).await {
        Ok(metrics) => display_metrics(&metrics),
        Err(e) => report_error(e),
    }
}
