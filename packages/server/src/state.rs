use std::sync::Arc;

use common::storage::DocumentStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub documents: Arc<dyn DocumentStore>,
    pub config: AppConfig,
}
