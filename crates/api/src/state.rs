use std::sync::Arc;

use orderdesk_core::upload::{UploadPolicy, UploadStore};

use crate::config::ServerConfig;

/// Public path prefix uploaded files are served under.
pub const UPLOADS_URL_PREFIX: &str = "/api/uploads";

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: orderdesk_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Local-disk store for uploaded attachments.
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Assemble the state from its injected dependencies.
    pub fn new(pool: orderdesk_db::DbPool, config: ServerConfig) -> Self {
        let uploads = UploadStore::new(
            config.upload.dir.clone(),
            UploadPolicy::with_max_bytes(config.upload.max_bytes),
            UPLOADS_URL_PREFIX,
        );
        Self {
            pool,
            config: Arc::new(config),
            uploads: Arc::new(uploads),
        }
    }
}
