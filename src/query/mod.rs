//! # Query Module
//!
//! Filtering and ordering shared by every table view: free-text search,
//! developer filter, and the data-type-driven comparator in [`sort`].

pub mod parse;
pub mod search;
pub mod sort;

use std::error::Error;
use std::fmt;

use crate::model::NormalizedModel;
pub use search::{matches_developer, relevance, search, Relevance};
pub use sort::{compare_values, sort_models, sort_rows, Cell, Column, Direction, SortKey, SortKind, SortValue};

/// Invalid user-supplied query parameters
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    InvalidSortKey(String),
    InvalidDirection(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryError::InvalidSortKey(msg) => write!(f, "{}", msg),
            QueryError::InvalidDirection(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for QueryError {}

/// Search term, developer filter and sort order for one table render
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    pub search: String,
    /// Exact developer name, empty for no filter
    pub developer: String,
    pub sort: SortKey,
    pub direction: Direction,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            developer: String::new(),
            sort: SortKey::OperationalRank,
            direction: Direction::Asc,
        }
    }
}

impl ViewQuery {
    pub fn sorted_by(sort: SortKey, direction: Direction) -> Self {
        Self {
            sort,
            direction,
            ..Self::default()
        }
    }

    /// Builds a query from optional string parameters, falling back to
    /// `defaults` for the sort order when a parameter is absent
    pub fn from_params(
        search: Option<&str>,
        developer: Option<&str>,
        sort: Option<&str>,
        direction: Option<&str>,
        defaults: &ViewQuery,
    ) -> Result<Self, QueryError> {
        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => id.parse::<SortKey>().map_err(QueryError::InvalidSortKey)?,
            None => defaults.sort.clone(),
        };
        let direction = match direction.map(str::trim).filter(|s| !s.is_empty()) {
            Some(dir) => dir.parse::<Direction>().map_err(QueryError::InvalidDirection)?,
            None => defaults.direction,
        };
        Ok(Self {
            search: search.unwrap_or_default().trim().to_string(),
            developer: developer.unwrap_or_default().trim().to_string(),
            sort,
            direction,
        })
    }

    /// The ordered subset of `models` to render.
    ///
    /// With a search term the relevance ladder decides the order; without
    /// one the sort column does.
    pub fn apply<'a>(&self, models: &'a [NormalizedModel]) -> Vec<&'a NormalizedModel> {
        self.apply_to(models.iter().collect())
    }

    /// Same as [`ViewQuery::apply`] over an already selected set of rows
    pub fn apply_to<'a>(&self, models: Vec<&'a NormalizedModel>) -> Vec<&'a NormalizedModel> {
        let filtered: Vec<&NormalizedModel> = models
            .into_iter()
            .filter(|model| matches_developer(model, &self.developer))
            .collect();
        if self.search.trim().is_empty() {
            sort_models(filtered, &self.sort, self.direction)
        } else {
            search(filtered, &self.search)
        }
    }
}
