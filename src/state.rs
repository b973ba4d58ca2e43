use crate::board::Board;
use crate::lifecycle::Dashboard;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<Dashboard<Board>>>,
}

impl AppState {
    pub fn new(dashboard: Dashboard<Board>) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }
}
