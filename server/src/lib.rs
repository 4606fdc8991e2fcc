//! # Walk-in Server Library
//!
//! Core library for the walk-in counter queue: customers join and receive a
//! token, staff serve, skip and resume tokens, and all state lives in an
//! external key-value store.
//!
//! ## Modules
//!
//! - [`model`] - Queue entries and their lifecycle status
//! - [`queue_manager`] - Queue operations behind a command/response interface
//! - [`store`] - State store abstraction with in-memory and Redis backends

pub mod model;
pub mod queue_manager;
pub mod store;
