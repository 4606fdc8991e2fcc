//! # Queue Manager Module
//!
//! Domain logic of the walk-in queue: an ordered waiting list with
//! token-based identity, a set of skipped tokens, and an append-only log of
//! served entries.
//!
//! ## Core Components
//!
//! - [`QueueManager`] - Main interface for queue operations
//! - [`QueueCommand`] / [`QueueResponse`] - Command/response pattern for operations
//! - [`QueueError`] - Error handling for store failures and unknown tokens
//!
//! ## State Transitions
//!
//! - waiting -> skipped (skip), skipped -> waiting (resume)
//! - waiting | skipped -> served (serve, terminal, logged)
//! - waiting | skipped -> removed (leave, terminal, not logged)
//!
//! ## Usage
//!
//! ```no_run
//! use server::queue_manager::{QueueManager, QueueSettings};
//! use server::store::MemoryStateStore;
//! use std::sync::Arc;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = QueueManager::new(Arc::new(MemoryStateStore::new()), QueueSettings::default());
//!
//!     let receipt = manager.join("Alice", "555", "haircut").await?;
//!     let outcome = manager.serve(&receipt.token).await?;
//!     assert!(outcome.success);
//!
//!     Ok(())
//! }
//! ```

pub use self::commands::QueueCommand;
pub use self::errors::{QueueError, QueueResult};
pub use self::manager::QueueManager;
pub use self::responses::QueueResponse;
pub use self::types::*;

/// Command handlers for processing queue operations
pub mod command_handlers;
/// Command definitions for queue operations
pub mod commands;
/// Error types for queue operations
pub mod errors;
/// Main queue manager implementation
pub mod manager;
/// Response types for queue operations
pub mod responses;
/// Core types and data structures
pub mod types;
