//! # Walk-in API Library
//!
//! HTTP front end for the walk-in queue manager.
//!
//! ## Modules
//!
//! - [`config`] - Layered configuration (defaults, `config.toml`, environment)
//! - [`error`] - Application errors and their HTTP mapping
//! - [`logger`] - Logging setup
//! - [`routes`] - Axum handlers for the queue endpoints
//! - [`startup`] - Store selection and server lifecycle
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod startup;

pub use error::{AppError, AppResult};
