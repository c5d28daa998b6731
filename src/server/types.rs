use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Query parameters shared by the table endpoints
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TableParams {
    pub search: Option<String>,
    pub developer: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// `?ids=gpt-4o,claude-3-5-sonnet`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CompareParams {
    pub ids: Option<String>,
}

impl CompareParams {
    pub fn id_list(&self) -> Vec<String> {
        self.ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RecommendParams {
    pub count: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProviderParams {
    /// Model id to restrict the list to
    pub model: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}
