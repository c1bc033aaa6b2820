/// Shared application state
use crate::services::{AuthService, MediaStorage};
use cadence_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub media_storage: Arc<MediaStorage>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        auth_service: Arc<AuthService>,
        media_storage: Arc<MediaStorage>,
    ) -> Self {
        Self {
            db,
            auth_service,
            media_storage,
        }
    }
}
