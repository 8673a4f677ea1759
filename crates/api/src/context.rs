use std::sync::Arc;

use tenanthr_auth::{
    CapabilityTable, MarkerStore, PrincipalDirectory, RouteGuard, SessionSnapshot, SessionStore,
};

/// Shared state of the shell.
///
/// One shell process serves one browser context, so it owns exactly one
/// session store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    pub fn new(
        marker: Arc<dyn MarkerStore>,
        directory: Arc<dyn PrincipalDirectory>,
        table: CapabilityTable,
    ) -> Self {
        Self {
            session: Arc::new(SessionStore::new(marker, directory)),
            guard: Arc::new(RouteGuard::new(Arc::new(table))),
        }
    }

    pub fn with_guard(mut self, guard: RouteGuard) -> Self {
        self.guard = Arc::new(guard);
        self
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }
}
