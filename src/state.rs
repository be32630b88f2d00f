use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::Catalog;
use crate::services::session::BookingSession;
use crate::services::store::BookingStore;

pub struct AppState {
    pub sessions: Mutex<HashMap<Uuid, BookingSession>>,
    pub catalog: Catalog,
    pub config: AppConfig,
    pub store: Arc<dyn BookingStore>,
}
