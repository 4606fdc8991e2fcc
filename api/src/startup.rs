use crate::config::{AppConfig, StoreBackend};
use crate::error::{AppError, AppResult};
use crate::routes::create_routes;
use server::queue_manager::{QueueError, QueueManager};
use server::store::{MemoryStateStore, RedisStateStore, StateStore};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Open the configured state store. Called once per process.
pub async fn connect_store(config: &AppConfig) -> AppResult<Arc<dyn StateStore>> {
    match config.store().backend() {
        Some(StoreBackend::Memory) => {
            log::warn!("Using in-memory state store; queue state is lost on restart");
            Ok(Arc::new(MemoryStateStore::new()))
        }
        Some(StoreBackend::Redis) => {
            let store = RedisStateStore::connect(config.store().redis())
                .await
                .map_err(|e| AppError::Queue(QueueError::from(e)))?;
            Ok(Arc::new(store))
        }
        None => Err(AppError::Config(format!(
            "Unknown store backend: {}",
            config.store().backend_name()
        ))),
    }
}

/// Serve the queue API on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    manager: Arc<QueueManager>,
    cors_permissive: bool,
    shutdown: F,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_routes(manager, cors_permissive);

    if let Ok(addr) = listener.local_addr() {
        log::info!("Walk-in queue API listening on http://{addr}");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(AppError::from)
}
