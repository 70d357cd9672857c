//! Debounced, cancelable search and recommendation pipeline for an OMDb-backed
//! movie search UI.
//!
//! A view layer creates sessions from [`api::AppState`], forwards user input
//! to them and renders their snapshots.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod preferences;
pub mod services;
pub mod telemetry;

pub use api::AppState;
pub use config::{Config, PipelineSettings};
pub use error::{AppError, AppResult, ErrorKind};
