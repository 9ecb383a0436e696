//! State

use std::{sync::Arc, time::Duration};

use inventory_app::{
    cancellation::Cancellation, context::AppContext, database::DatabaseHealth,
    domain::sneakers::SneakersService,
};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) sneakers: Arc<dyn SneakersService>,
    pub(crate) health: Arc<dyn DatabaseHealth>,
    request_timeout: Duration,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        sneakers: Arc<dyn SneakersService>,
        health: Arc<dyn DatabaseHealth>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            sneakers,
            health,
            request_timeout,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: &AppContext, request_timeout: Duration) -> Arc<Self> {
        Arc::new(Self::new(
            app.sneakers.clone(),
            app.health.clone(),
            request_timeout,
        ))
    }

    /// Cancellation handle that expires after the configured request timeout.
    pub(crate) fn cancellation(&self) -> Cancellation {
        Cancellation::with_timeout(self.request_timeout)
    }
}
