//! # surfsup
//!
//! A small, read-only JSON API over a pre-populated climate observation
//! dataset (Hawaii weather stations: daily precipitation and temperature).
//!
//! ## Architecture
//!
//! - **Storage**: [`database`] opens the SQLite file read-only and checks it
//!   against the table layout declared in [`schema`]
//! - **Queries**: [`queries`] holds the fixed filter and aggregate queries
//! - **API Layer**: [`handlers`] maps each route to one query and serializes
//!   the rows as JSON
//!
//! Every request borrows its own pooled connection from the shared
//! [`AppState`] and returns it before the response is sent.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod queries;
pub mod schema;
pub mod state;

pub use config::Config;
pub use database::{load_dataset, DatasetSummary};
pub use error::{Result, SurfsUpError};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_request_error, log_timed_operation,
};
pub use queries::{DatedValue, TemperatureSummary};
pub use schema::{Observation, Station};
pub use state::AppState;
