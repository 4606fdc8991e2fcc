use super::errors::QueueError;
use super::types::{ActionOutcome, JoinReceipt, QueueSnapshot, QueueStatus, StaffAction};
use crate::model::Entry;

/// Responses produced by executing a [`QueueCommand`](super::QueueCommand).
///
/// # Examples
///
/// ```no_run
/// use server::queue_manager::{QueueCommand, QueueResponse};
///
/// match manager.execute_command(QueueCommand::ListAll).await {
///     QueueResponse::Listed { entries } => println!("{} entries", entries.len()),
///     QueueResponse::Error { error } => eprintln!("List failed: {error}"),
///     _ => {}
/// }
/// ```
#[derive(Debug)]
pub enum QueueResponse {
    /// Customer was appended to the queue.
    Joined { receipt: JoinReceipt },

    /// Standing of a waiting token.
    Status { status: QueueStatus },

    /// Waiting entries (annotated) followed by served entries.
    Listed { entries: Vec<Entry> },

    /// Leave completed, whether or not the token was present.
    Left { token: String, removed: bool },

    /// Outcome of serve, skip or resume.
    ActionCompleted {
        action: StaffAction,
        token: String,
        outcome: ActionOutcome,
    },

    /// Raw stored state.
    Snapshot { snapshot: QueueSnapshot },

    /// The command failed.
    Error { error: QueueError },
}
