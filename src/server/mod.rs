//! JSON HTTP API over the dashboard views.
//!
//! Every endpoint answers with an [`ApiResponse`] envelope. Unknown ids
//! and metrics are `404`, malformed query parameters are `400`.

mod routes;
mod server;
mod types;

pub use server::{router, ApiServer, AppState};
pub use types::{ApiResponse, CompareParams, ProviderParams, RecommendParams, TableParams};
