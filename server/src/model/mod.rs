use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a queue entry.
///
/// Entries start as [`EntryStatus::Waiting`], may toggle between waiting and
/// [`EntryStatus::Skipped`], and end as [`EntryStatus::Served`] once they are
/// moved into the served log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Waiting,
    Skipped,
    Served,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Waiting => "waiting",
            EntryStatus::Skipped => "skipped",
            EntryStatus::Served => "served",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single customer in the walk-in queue.
///
/// The token is issued at join time and identifies the entry for every later
/// operation. `status` defaults to waiting when absent from stored data, which
/// keeps entries written without a status readable.
///
/// # Examples
///
/// ```no_run
/// use server::model::{Entry, EntryStatus};
///
/// let entry = Entry::new(
///     "T1".to_string(),
///     "Alice".to_string(),
///     "555".to_string(),
///     "haircut".to_string(),
/// );
/// assert_eq!(entry.status, EntryStatus::Waiting);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub token: String,
    pub name: String,
    pub phone: String,
    pub service_type: String,
    #[serde(default)]
    pub status: EntryStatus,
}

impl Entry {
    pub fn new(token: String, name: String, phone: String, service_type: String) -> Self {
        Self {
            token,
            name,
            phone,
            service_type,
            status: EntryStatus::Waiting,
        }
    }

    /// Returns a copy carrying `status` instead of the stored one.
    pub fn with_status(&self, status: EntryStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
