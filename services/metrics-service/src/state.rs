use std::sync::Arc;

use crate::config::DbConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbConfig>,
}
