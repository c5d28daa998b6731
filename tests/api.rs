use std::sync::Arc;
use tokio::net::TcpListener;

use modelboard::charts::ChartSeries;
use modelboard::dataset::Dataset;
use modelboard::model::NormalizedModel;
use modelboard::server::{router, ApiResponse, AppState};
use modelboard::views::{Comparison, ModelDetail, ViewDefaults};

/// Serves the bundled dataset on an ephemeral port and returns its base URL
async fn spawn_server() -> String {
    let dataset = Arc::new(Dataset::bundled().unwrap());
    let state = Arc::new(AppState::new(dataset, ViewDefaults::default()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn health_check_responds() {
    let base = spawn_server().await;
    let body = reqwest::get(&base).await.unwrap().text().await.unwrap();
    assert_eq!(body, "Modelboard is running!");
}

#[tokio::test]
async fn models_endpoint_applies_query() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{}/api/v1/models?sort=contextLength&direction=desc", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: ApiResponse<Vec<NormalizedModel>> = response.json().await.unwrap();
    let models = body.data.unwrap();
    assert_eq!(models[0].id, "gemini-1-5-pro");
    assert_eq!(models.last().unwrap().id, "mixtral-8x7b");
}

#[tokio::test]
async fn detail_and_compare_endpoints() {
    let base = spawn_server().await;

    let response = reqwest::get(format!("{}/api/v1/models/gpt-4o", base)).await.unwrap();
    let body: ApiResponse<ModelDetail> = response.json().await.unwrap();
    let detail = body.data.unwrap();
    assert_eq!(detail.model.name, "GPT-4o");
    assert_eq!(detail.offerings.len(), 2);

    let response = reqwest::get(format!("{}/api/v1/compare?ids=gpt-4o,deepseek-v3", base)).await.unwrap();
    let body: ApiResponse<Comparison> = response.json().await.unwrap();
    assert_eq!(body.data.unwrap().models.len(), 2);
}

#[tokio::test]
async fn errors_use_the_envelope() {
    let base = spawn_server().await;

    let response = reqwest::get(format!("{}/api/v1/models/not-a-model", base)).await.unwrap();
    assert_eq!(response.status(), 404);
    let body: ApiResponse<ModelDetail> = response.json().await.unwrap();
    assert_eq!(body.status, "error");
    assert!(body.message.unwrap().contains("not-a-model"));

    let response = reqwest::get(format!("{}/api/v1/models?direction=sideways", base)).await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn recommendations_serialize_no_data_as_null() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{}/api/v1/charts/sweBenchVerified", base)).await.unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    let bars = body["data"]["bars"].as_array().unwrap();
    let mixtral = bars.iter().find(|bar| bar["modelId"] == "mixtral-8x7b").unwrap();
    assert!(mixtral["value"].is_null());
    assert!(mixtral["fraction"].is_null());
    assert_eq!(mixtral["display"], "No data");

    let response = reqwest::get(format!("{}/api/v1/recommendations/sweBenchVerified?count=1", base)).await.unwrap();
    let body: ApiResponse<ChartSeries> = response.json().await.unwrap();
    let series = body.data.unwrap();
    assert_eq!(series.bars.len(), 1);
    assert_eq!(series.bars[0].model_id, "claude-3-5-sonnet");
}
