//! Modelboard: a leaderboard over a static dataset of AI models.
//!
//! Raw, inconsistently typed records are normalized once into
//! [`model::NormalizedModel`] values held by an immutable
//! [`dataset::Dataset`]. Views filter and order them with the shared
//! comparator in [`query`], charts read them through the adapters in
//! [`charts`], and the results are served as JSON by [`server`] or
//! rendered in the terminal by [`console`].

pub mod charts;
pub mod config;
pub mod console;
pub mod dataset;
pub mod model;
pub mod providers;
pub mod query;
pub mod server;
pub mod views;
