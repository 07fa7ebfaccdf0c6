//! Application state shared across all handlers.

use std::sync::Arc;

use guestbook_infra::{JwtCodec, MediaStorage, connect};

use crate::config::AppConfig;
use crate::service::{TodoService, WeddingService};

/// Shared application state. Failure to build it is fatal at startup.
#[derive(Clone)]
pub struct AppState {
    pub todo: TodoService,
    pub wedding: WeddingService,
    pub codec: Arc<JwtCodec>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = connect(&config.database).await?;
        let storage = MediaStorage::new(&config.storage)?;
        let codec = Arc::new(JwtCodec::new(config.secrets.clone()));

        tracing::info!("application state initialized");

        Ok(Self {
            todo: TodoService::new(db.clone(), config.max_page_size),
            wedding: WeddingService::new(db, storage, config.max_page_size),
            codec,
        })
    }
}
