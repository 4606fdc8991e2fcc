use super::errors::{QueueError, QueueResult};
use super::responses::QueueResponse;
use super::types::{
    ActionOutcome, JoinReceipt, QueueSettings, QueueStatus, StaffAction, TOKEN_NOT_FOUND,
    TOKEN_NOT_SKIPPED,
};
use crate::model::{Entry, EntryStatus};
use crate::store::{StateStore, WriteBatch};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serialises read-modify-write cycles inside one process.
pub type WriteLock = Arc<Mutex<()>>;

/// Handles customer-facing commands: join, status and leave
pub struct CustomerCommandHandler {
    store: Arc<dyn StateStore>,
    write_lock: WriteLock,
    settings: QueueSettings,
}

impl CustomerCommandHandler {
    pub fn new(store: Arc<dyn StateStore>, write_lock: WriteLock, settings: QueueSettings) -> Self {
        Self {
            store,
            write_lock,
            settings,
        }
    }

    pub async fn handle_join(
        &self,
        name: String,
        phone: String,
        service_type: String,
    ) -> QueueResult<QueueResponse> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.store.load_snapshot().await?;

        // Counter is independent of list length so tokens are never reissued.
        // Stores written before the counter existed hold tokens it has not
        // counted past yet; those numbers are skipped.
        let token = loop {
            let number = self.store.next_token_number().await?;
            let token = format!("T{number}");
            let taken = snapshot
                .waiting
                .iter()
                .chain(snapshot.served.iter())
                .any(|entry| entry.token == token);
            if !taken {
                break token;
            }
            log::debug!("Token {token} already in use, advancing counter");
        };

        let mut waiting = snapshot.waiting;
        waiting.push(Entry::new(token.clone(), name, phone, service_type));
        let position = waiting.len();

        self.store
            .apply(WriteBatch::new().replace_waiting(waiting))
            .await?;

        log::info!("Token {token} joined the queue at position {position}");
        Ok(QueueResponse::Joined {
            receipt: JoinReceipt {
                token,
                position,
                eta: self.settings.eta_for(position),
            },
        })
    }

    pub async fn handle_get_status(&self, token: String) -> QueueResult<QueueResponse> {
        let waiting = self.store.load_waiting().await?;

        let (index, entry) = waiting
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.token == token)
            .ok_or_else(|| QueueError::TokenNotFound(token.clone()))?;

        let position = index + 1;
        Ok(QueueResponse::Status {
            status: QueueStatus {
                token: entry.token.clone(),
                position,
                eta: self.settings.eta_for(position),
                status: entry.status,
            },
        })
    }

    pub async fn handle_leave(&self, token: String) -> QueueResult<QueueResponse> {
        let _guard = self.write_lock.lock().await;

        let mut waiting = self.store.load_waiting().await?;
        let before = waiting.len();
        waiting.retain(|entry| entry.token != token);
        let removed = waiting.len() != before;

        self.store
            .apply(
                WriteBatch::new()
                    .replace_waiting(waiting)
                    .remove_skipped(token.clone()),
            )
            .await?;

        if removed {
            log::info!("Token {token} left the queue");
        } else {
            log::debug!("Leave for unknown token {token} ignored");
        }
        Ok(QueueResponse::Left { token, removed })
    }
}

/// Handles staff commands that change an entry's state: serve, skip and resume
pub struct StaffCommandHandler {
    store: Arc<dyn StateStore>,
    write_lock: WriteLock,
}

impl StaffCommandHandler {
    pub fn new(store: Arc<dyn StateStore>, write_lock: WriteLock) -> Self {
        Self { store, write_lock }
    }

    fn completed(action: StaffAction, token: String, outcome: ActionOutcome) -> QueueResponse {
        if !outcome.success {
            log::debug!("{} for token {token} rejected", action.as_str());
        }
        QueueResponse::ActionCompleted {
            action,
            token,
            outcome,
        }
    }

    pub async fn handle_serve(&self, token: String) -> QueueResult<QueueResponse> {
        let _guard = self.write_lock.lock().await;
        let mut waiting = self.store.load_waiting().await?;

        let Some(index) = waiting.iter().position(|entry| entry.token == token) else {
            return Ok(Self::completed(
                StaffAction::Serve,
                token,
                ActionOutcome::failed(TOKEN_NOT_FOUND),
            ));
        };

        let mut entry = waiting.remove(index);
        entry.status = EntryStatus::Served;

        self.store
            .apply(
                WriteBatch::new()
                    .replace_waiting(waiting)
                    .append_served(entry)
                    .remove_skipped(token.clone()),
            )
            .await?;

        log::info!("Token {token} served");
        Ok(Self::completed(
            StaffAction::Serve,
            token,
            ActionOutcome::succeeded(),
        ))
    }

    pub async fn handle_skip(&self, token: String) -> QueueResult<QueueResponse> {
        let _guard = self.write_lock.lock().await;
        let mut waiting = self.store.load_waiting().await?;

        let Some(entry) = waiting.iter_mut().find(|entry| entry.token == token) else {
            return Ok(Self::completed(
                StaffAction::Skip,
                token,
                ActionOutcome::failed(TOKEN_NOT_FOUND),
            ));
        };
        entry.status = EntryStatus::Skipped;

        // Stored status and skipped set are written together
        self.store
            .apply(
                WriteBatch::new()
                    .replace_waiting(waiting)
                    .add_skipped(token.clone()),
            )
            .await?;

        log::info!("Token {token} skipped");
        Ok(Self::completed(
            StaffAction::Skip,
            token,
            ActionOutcome::succeeded(),
        ))
    }

    pub async fn handle_resume(&self, token: String) -> QueueResult<QueueResponse> {
        let _guard = self.write_lock.lock().await;
        let mut waiting = self.store.load_waiting().await?;

        let Some(entry) = waiting
            .iter_mut()
            .find(|entry| entry.token == token && entry.status == EntryStatus::Skipped)
        else {
            return Ok(Self::completed(
                StaffAction::Resume,
                token,
                ActionOutcome::failed(TOKEN_NOT_SKIPPED),
            ));
        };
        entry.status = EntryStatus::Waiting;

        self.store
            .apply(
                WriteBatch::new()
                    .replace_waiting(waiting)
                    .remove_skipped(token.clone()),
            )
            .await?;

        log::info!("Token {token} resumed");
        Ok(Self::completed(
            StaffAction::Resume,
            token,
            ActionOutcome::succeeded(),
        ))
    }
}

/// Handles read-only listing commands
pub struct ListingCommandHandler {
    store: Arc<dyn StateStore>,
}

impl ListingCommandHandler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn handle_list_all(&self) -> QueueResult<QueueResponse> {
        let snapshot = self.store.load_snapshot().await?;
        Ok(QueueResponse::Listed {
            entries: snapshot.annotated(),
        })
    }

    pub async fn handle_snapshot(&self) -> QueueResult<QueueResponse> {
        let snapshot = self.store.load_snapshot().await?;
        Ok(QueueResponse::Snapshot { snapshot })
    }
}
