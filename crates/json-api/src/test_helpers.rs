//! Test helpers.

use std::{sync::Arc, time::Duration};

use salvo::{affix_state::inject, prelude::*};

use inventory_app::{database::MockDatabaseHealth, domain::sneakers::MockSneakersService};

use crate::state::State;

pub(crate) const TEST_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn healthy_database() -> MockDatabaseHealth {
    let mut health = MockDatabaseHealth::new();

    health.expect_ping().returning(|| Ok(()));

    health
}

fn state(sneakers: MockSneakersService, health: MockDatabaseHealth) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(sneakers),
        Arc::new(health),
        TEST_REQUEST_TIMEOUT,
    ))
}

pub(crate) fn state_with_sneakers(sneakers: MockSneakersService) -> Arc<State> {
    state(sneakers, healthy_database())
}

pub(crate) fn sneakers_service(sneakers: MockSneakersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_sneakers(sneakers)))
            .push(route),
    )
}

pub(crate) fn health_service(health: MockDatabaseHealth, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(strict_sneakers_mock(), health)))
            .push(route),
    )
}

/// Mock that fails the test if any operation is called.
pub(crate) fn strict_sneakers_mock() -> MockSneakersService {
    let mut sneakers = MockSneakersService::new();

    sneakers.expect_list_sneakers().never();
    sneakers.expect_create_sneakers().never();
    sneakers.expect_update_sneakers().never();
    sneakers.expect_delete_sneakers().never();

    sneakers
}
