use crate::model::{Entry, EntryStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Error text returned by serve and skip when the token is not waiting.
pub const TOKEN_NOT_FOUND: &str = "Token not found";
/// Error text returned by resume when the token is absent or not skipped.
pub const TOKEN_NOT_SKIPPED: &str = "Token not found or not skipped";

/// Default minutes of waiting attributed to each queue slot.
pub const DEFAULT_MINUTES_PER_POSITION: u32 = 2;

/// Tunables for the queue manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueSettings {
    /// Linear ETA model: eta = position * minutes_per_position
    #[serde(default = "default_minutes_per_position")]
    pub minutes_per_position: u32,
}

fn default_minutes_per_position() -> u32 {
    DEFAULT_MINUTES_PER_POSITION
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            minutes_per_position: DEFAULT_MINUTES_PER_POSITION,
        }
    }
}

impl QueueSettings {
    pub fn eta_for(&self, position: usize) -> u64 {
        position as u64 * u64::from(self.minutes_per_position)
    }
}

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReceipt {
    pub token: String,
    pub position: usize,
    pub eta: u64,
}

/// Current standing of a waiting entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub token: String,
    pub position: usize,
    pub eta: u64,
    pub status: EntryStatus,
}

/// Typed success/failure of a staff action.
///
/// A failed action is a normal result, not an error: callers branch on
/// `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Staff actions that move an entry between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffAction {
    Serve,
    Skip,
    Resume,
}

impl StaffAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffAction::Serve => "serve",
            StaffAction::Skip => "skip",
            StaffAction::Resume => "resume",
        }
    }
}

/// Point-in-time copy of everything the store holds for the queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueSnapshot {
    pub waiting: Vec<Entry>,
    pub skipped: HashSet<String>,
    pub served: Vec<Entry>,
}

impl QueueSnapshot {
    /// Waiting entries first, in queue order, with skipped tokens shown as
    /// skipped; then the served log in completion order.
    pub fn annotated(&self) -> Vec<Entry> {
        self.waiting
            .iter()
            .map(|entry| {
                if self.skipped.contains(&entry.token) {
                    entry.with_status(EntryStatus::Skipped)
                } else {
                    entry.clone()
                }
            })
            .chain(self.served.iter().cloned())
            .collect()
    }
}
