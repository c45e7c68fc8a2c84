//! Shared handler state

use crate::anonymization::Orchestrator;

/// State shared by every request handler
///
/// Immutable after startup; handlers only read from it.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}
