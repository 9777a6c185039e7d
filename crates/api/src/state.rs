use std::sync::Arc;

use crate::simulator::Simulator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Outcome generator for `POST /`.
    pub simulator: Arc<Simulator>,
}

impl AppState {
    pub fn new(simulator: Simulator) -> Self {
        Self {
            simulator: Arc::new(simulator),
        }
    }
}
