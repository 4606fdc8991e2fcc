/// Commands accepted by the [`QueueManager`](super::QueueManager).
///
/// Each variant carries exactly the input of one queue operation, keeping the
/// definition of an operation apart from its execution.
///
/// # Command Categories
///
/// - **Customer** - join, check status, leave
/// - **Staff** - serve, skip, resume
/// - **Listing** - list every entry, take a raw snapshot
///
/// # Examples
///
/// ```no_run
/// use server::queue_manager::QueueCommand;
///
/// let command = QueueCommand::Join {
///     name: "Alice".to_string(),
///     phone: "555".to_string(),
///     service_type: "haircut".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueCommand {
    /// Add a customer to the back of the queue.
    Join {
        name: String,
        phone: String,
        service_type: String,
    },

    /// Look up position, ETA and status of a waiting token.
    GetStatus { token: String },

    /// Every waiting entry followed by the served log.
    ListAll,

    /// Remove a token from the queue. Unknown tokens are ignored.
    Leave { token: String },

    /// Move a token to the served log.
    Serve { token: String },

    /// Mark a token skipped without moving it.
    Skip { token: String },

    /// Return a skipped token to waiting.
    Resume { token: String },

    /// Raw copy of the stored state.
    Snapshot,
}
