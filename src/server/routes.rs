use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, error};

use crate::charts::{ChartSeries, MetricId, MetricInfo};
use crate::model::NormalizedModel;
use crate::providers::{offerings_view, ProviderOffering, ProviderSortKey};
use crate::query::{Direction, QueryError, ViewQuery};
use crate::views::{self, Comparison, DeveloperSummary, ModelDetail, RedTeamRow, ViewError};
use super::server::AppState;
use super::types::{ApiResponse, CompareParams, ProviderParams, RecommendParams, TableParams};

/// Status code and envelope returned by every JSON endpoint
pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(data: T) -> ApiResult<T> {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

fn fail<T>(status: StatusCode, message: String) -> ApiResult<T> {
    error!("{}", message);
    (status, Json(ApiResponse::error(message)))
}

fn view_error_status(err: &ViewError) -> StatusCode {
    match err {
        ViewError::UnknownModel(_) | ViewError::UnknownDeveloper(_) => StatusCode::NOT_FOUND,
        ViewError::NoModelsSelected | ViewError::TooManyModels { .. } => StatusCode::BAD_REQUEST,
    }
}

fn table_query(params: &TableParams, defaults: &ViewQuery) -> Result<ViewQuery, QueryError> {
    ViewQuery::from_params(
        params.search.as_deref(),
        params.developer.as_deref(),
        params.sort.as_deref(),
        params.direction.as_deref(),
        defaults,
    )
}

/// Returns a health check response
pub async fn health_check() -> &'static str {
    info!("Health check endpoint called");
    "Modelboard is running!"
}

/// Leaderboard rows after search, developer filter and sort
pub async fn list_models(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TableParams>,
) -> ApiResult<Vec<NormalizedModel>> {
    info!("List models endpoint called: {:?}", params);

    match table_query(&params, &state.defaults.query) {
        Ok(query) => {
            let models: Vec<NormalizedModel> = views::leaderboard(&state.dataset, &query).into_iter().cloned().collect();
            info!("Returning {} models", models.len());
            ok(models)
        }
        Err(e) => fail(StatusCode::BAD_REQUEST, format!("Invalid table query: {}", e)),
    }
}

/// Ids to pre-generate detail pages for
pub async fn list_model_ids(State(state): State<Arc<AppState>>) -> ApiResult<Vec<String>> {
    info!("List model ids endpoint called");
    ok(views::route_ids(&state.dataset))
}

pub async fn get_model(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ModelDetail> {
    info!("Model detail endpoint called for '{}'", id);

    match views::model_detail(&state.dataset, &id) {
        Ok(detail) => ok(detail),
        Err(e) => fail(view_error_status(&e), e.to_string()),
    }
}

pub async fn list_developers(State(state): State<Arc<AppState>>) -> ApiResult<Vec<DeveloperSummary>> {
    info!("List developers endpoint called");
    ok(views::developers(&state.dataset))
}

/// Models of one developer; `name` may be the display name or its slug
pub async fn get_developer(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<TableParams>,
) -> ApiResult<Vec<NormalizedModel>> {
    info!("Developer endpoint called for '{}': {:?}", name, params);

    let query = match table_query(&params, &state.defaults.query) {
        Ok(query) => query,
        Err(e) => return fail(StatusCode::BAD_REQUEST, format!("Invalid table query: {}", e)),
    };
    match views::developer_models(&state.dataset, &name, &query) {
        Ok(models) => ok(models.into_iter().cloned().collect()),
        Err(e) => fail(view_error_status(&e), e.to_string()),
    }
}

pub async fn compare_models(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> ApiResult<Comparison> {
    let ids = params.id_list();
    info!("Compare endpoint called for {:?}", ids);

    match views::compare(&state.dataset, &ids, state.defaults.compare_limit) {
        Ok(comparison) => ok(comparison),
        Err(e) => fail(view_error_status(&e), e.to_string()),
    }
}

/// Red-teaming leaderboard, safety rank ascending unless asked otherwise
pub async fn red_teaming_table(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TableParams>,
) -> ApiResult<Vec<RedTeamRow>> {
    info!("Red-teaming endpoint called: {:?}", params);

    match table_query(&params, &views::red_teaming_defaults()) {
        Ok(query) => ok(views::red_teaming(&state.dataset, &query)),
        Err(e) => fail(StatusCode::BAD_REQUEST, format!("Invalid table query: {}", e)),
    }
}

pub async fn list_metrics() -> ApiResult<Vec<MetricInfo>> {
    info!("List metrics endpoint called");
    ok(MetricId::all().into_iter().map(MetricInfo::from).collect())
}

pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(metric): Path<String>,
    Query(params): Query<RecommendParams>,
) -> ApiResult<ChartSeries> {
    info!("Recommendations endpoint called for '{}'", metric);

    let metric = match metric.parse::<MetricId>() {
        Ok(metric) => metric,
        Err(e) => return fail(StatusCode::NOT_FOUND, e),
    };
    let count = params.count.unwrap_or(state.defaults.recommendation_count);
    if count == 0 {
        return fail(StatusCode::BAD_REQUEST, "count must be greater than 0".to_string());
    }
    ok(views::recommend(&state.dataset, metric, count))
}

/// One metric as bars over the leaderboard rows
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(metric): Path<String>,
    Query(params): Query<TableParams>,
) -> ApiResult<ChartSeries> {
    info!("Chart endpoint called for '{}': {:?}", metric, params);

    let metric = match metric.parse::<MetricId>() {
        Ok(metric) => metric,
        Err(e) => return fail(StatusCode::NOT_FOUND, e),
    };
    match table_query(&params, &state.defaults.query) {
        Ok(query) => ok(views::chart(&state.dataset, metric, &query)),
        Err(e) => fail(StatusCode::BAD_REQUEST, format!("Invalid table query: {}", e)),
    }
}

pub async fn list_providers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProviderParams>,
) -> ApiResult<Vec<ProviderOffering>> {
    info!("List providers endpoint called: {:?}", params);

    let key = match params.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => match id.parse::<ProviderSortKey>() {
            Ok(key) => key,
            Err(e) => return fail(StatusCode::BAD_REQUEST, e),
        },
        None => ProviderSortKey::Provider,
    };
    let direction = match params.direction.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(dir) => match dir.parse::<Direction>() {
            Ok(direction) => direction,
            Err(e) => return fail(StatusCode::BAD_REQUEST, e),
        },
        None => Direction::Asc,
    };

    let offerings = offerings_view(state.dataset.offerings(), params.model.as_deref(), key, direction)
        .into_iter()
        .cloned()
        .collect();
    ok(offerings)
}
