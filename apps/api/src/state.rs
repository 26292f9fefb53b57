use std::sync::Arc;

use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Store client built once at startup; closed after the server stops.
    pub store: Arc<dyn Store>,
}
