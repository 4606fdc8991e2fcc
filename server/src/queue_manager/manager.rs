use super::command_handlers::*;
use super::commands::QueueCommand;
use super::errors::{QueueError, QueueResult};
use super::responses::QueueResponse;
use super::types::{ActionOutcome, JoinReceipt, QueueSettings, QueueSnapshot, QueueStatus};
use crate::model::Entry;
use crate::store::StateStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The walk-in queue manager.
///
/// QueueManager applies join/status/list/leave/serve/skip/resume to the state
/// held by a [`StateStore`]. It keeps no queue state of its own: every
/// operation re-reads what it needs and writes its changes back as one
/// atomic batch.
///
/// # Architecture
///
/// Commands are dispatched to specialized handlers:
/// - [`CustomerCommandHandler`] - join, status and leave
/// - [`StaffCommandHandler`] - serve, skip and resume
/// - [`ListingCommandHandler`] - list and snapshot
///
/// # Thread Safety
///
/// Mutating handlers share one async writer lock, so read-modify-write cycles
/// issued through the same manager never interleave. Reads take no lock.
///
/// # Examples
///
/// ```no_run
/// use server::queue_manager::{QueueCommand, QueueManager, QueueSettings};
/// use server::store::MemoryStateStore;
/// use std::sync::Arc;
///
/// let manager = QueueManager::new(Arc::new(MemoryStateStore::new()), QueueSettings::default());
///
/// let response = manager.execute_command(
///     QueueCommand::Join {
///         name: "Alice".to_string(),
///         phone: "555".to_string(),
///         service_type: "haircut".to_string(),
///     }
/// ).await;
/// ```
pub struct QueueManager {
    customer_handler: CustomerCommandHandler,
    staff_handler: StaffCommandHandler,
    listing_handler: ListingCommandHandler,

    store: Arc<dyn StateStore>,

    // Error tracking
    last_error: Arc<Mutex<Option<String>>>,
}

impl QueueManager {
    /// Creates a manager over `store`.
    ///
    /// The store handle is created once at process start and kept for the
    /// manager's lifetime.
    pub fn new(store: Arc<dyn StateStore>, settings: QueueSettings) -> Self {
        let write_lock: WriteLock = Arc::new(Mutex::new(()));

        Self {
            customer_handler: CustomerCommandHandler::new(
                store.clone(),
                write_lock.clone(),
                settings,
            ),
            staff_handler: StaffCommandHandler::new(store.clone(), write_lock),
            listing_handler: ListingCommandHandler::new(store.clone()),
            store,
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Executes a queue command and returns the response.
    ///
    /// This is the main entry point for all queue operations. Errors are
    /// caught and converted to [`QueueResponse::Error`].
    pub async fn execute_command(&self, command: QueueCommand) -> QueueResponse {
        log::debug!("Executing command: {command:?}");

        match self.handle_command(command).await {
            Ok(response) => {
                let mut last_error = self.last_error.lock().await;
                *last_error = None;
                response
            }
            Err(error) => {
                if !error.is_not_found() {
                    let mut last_error = self.last_error.lock().await;
                    *last_error = Some(error.to_string());
                    log::error!("Command execution failed: {error}");
                }
                QueueResponse::Error { error }
            }
        }
    }

    async fn handle_command(&self, command: QueueCommand) -> QueueResult<QueueResponse> {
        match command {
            // Customer commands
            QueueCommand::Join {
                name,
                phone,
                service_type,
            } => {
                self.customer_handler
                    .handle_join(name, phone, service_type)
                    .await
            }
            QueueCommand::GetStatus { token } => {
                self.customer_handler.handle_get_status(token).await
            }
            QueueCommand::Leave { token } => self.customer_handler.handle_leave(token).await,

            // Staff commands
            QueueCommand::Serve { token } => self.staff_handler.handle_serve(token).await,
            QueueCommand::Skip { token } => self.staff_handler.handle_skip(token).await,
            QueueCommand::Resume { token } => self.staff_handler.handle_resume(token).await,

            // Listing commands
            QueueCommand::ListAll => self.listing_handler.handle_list_all().await,
            QueueCommand::Snapshot => self.listing_handler.handle_snapshot().await,
        }
    }

    // Typed wrappers around execute_command

    pub async fn join(
        &self,
        name: impl Into<String>,
        phone: impl Into<String>,
        service_type: impl Into<String>,
    ) -> QueueResult<JoinReceipt> {
        let command = QueueCommand::Join {
            name: name.into(),
            phone: phone.into(),
            service_type: service_type.into(),
        };
        match self.execute_command(command).await {
            QueueResponse::Joined { receipt } => Ok(receipt),
            other => Err(Self::unexpected("join", other)),
        }
    }

    pub async fn status(&self, token: impl Into<String>) -> QueueResult<QueueStatus> {
        let command = QueueCommand::GetStatus {
            token: token.into(),
        };
        match self.execute_command(command).await {
            QueueResponse::Status { status } => Ok(status),
            other => Err(Self::unexpected("status", other)),
        }
    }

    pub async fn list_all(&self) -> QueueResult<Vec<Entry>> {
        match self.execute_command(QueueCommand::ListAll).await {
            QueueResponse::Listed { entries } => Ok(entries),
            other => Err(Self::unexpected("list", other)),
        }
    }

    /// Returns whether an entry was actually removed.
    pub async fn leave(&self, token: impl Into<String>) -> QueueResult<bool> {
        let command = QueueCommand::Leave {
            token: token.into(),
        };
        match self.execute_command(command).await {
            QueueResponse::Left { removed, .. } => Ok(removed),
            other => Err(Self::unexpected("leave", other)),
        }
    }

    pub async fn serve(&self, token: impl Into<String>) -> QueueResult<ActionOutcome> {
        self.staff_action(QueueCommand::Serve {
            token: token.into(),
        })
        .await
    }

    pub async fn skip(&self, token: impl Into<String>) -> QueueResult<ActionOutcome> {
        self.staff_action(QueueCommand::Skip {
            token: token.into(),
        })
        .await
    }

    pub async fn resume(&self, token: impl Into<String>) -> QueueResult<ActionOutcome> {
        self.staff_action(QueueCommand::Resume {
            token: token.into(),
        })
        .await
    }

    pub async fn snapshot(&self) -> QueueResult<QueueSnapshot> {
        match self.execute_command(QueueCommand::Snapshot).await {
            QueueResponse::Snapshot { snapshot } => Ok(snapshot),
            other => Err(Self::unexpected("snapshot", other)),
        }
    }

    async fn staff_action(&self, command: QueueCommand) -> QueueResult<ActionOutcome> {
        match self.execute_command(command).await {
            QueueResponse::ActionCompleted { outcome, .. } => Ok(outcome),
            other => Err(Self::unexpected("staff action", other)),
        }
    }

    fn unexpected(operation: &str, response: QueueResponse) -> QueueError {
        match response {
            QueueResponse::Error { error } => error,
            other => QueueError::UnexpectedResponse(format!("{operation} returned {other:?}")),
        }
    }

    // Helper methods

    pub fn store_backend(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Round trip to the store; used by health reporting.
    pub async fn is_store_available(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("State store ping failed: {e}");
                false
            }
        }
    }

    /// Message of the last failed command, cleared by the next success.
    pub async fn get_last_error(&self) -> Option<String> {
        let last_error = self.last_error.lock().await;
        last_error.clone()
    }
}
