//! Application state for the web layer.

use std::sync::Arc;

use crate::routing::RouteService;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route service holding the current city graph
    pub routes: Arc<RouteService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routes: Arc<RouteService>) -> Self {
        Self { routes }
    }
}
