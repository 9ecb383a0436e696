//! Sneaker Inventory JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tokio::sync::oneshot;
use tracing::{error, info};

use inventory_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

mod config;
mod extensions;
mod healthcheck;
mod observability;
mod shutdown;
mod sneakers;
mod state;
#[cfg(test)]
mod test_helpers;

fn router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("sneakers")
                .get(sneakers::index::handler)
                .post(sneakers::create::handler)
                .put(sneakers::update::handler)
                .delete(sneakers::delete::handler),
        );

    let doc = OpenApi::new("Sneaker Inventory API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}

/// Inventory JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "subscriber failed to install, stderr is the only sink left"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_config(&config.database).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let state = State::from_app_context(&app, config.server.request_timeout());
    let server = Server::new(listener);
    let handle = server.handle();
    let grace = config.server.shutdown_timeout();
    let (stopped_tx, stopped_rx) = oneshot::channel();

    // Listen for shutdown signal, then release the pool
    let shutdown = tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");

            return;
        }

        shutdown::close_pool(&app.db, stopped_rx, grace).await;
    });

    // Start serving requests
    server.serve(router(state)).await;

    _ = stopped_tx.send(());

    if let Err(error) = shutdown.await {
        error!("shutdown task failed: {error}");
    }

    info!("server stopped");
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{state_with_sneakers, strict_sneakers_mock};

    use super::*;

    #[tokio::test]
    async fn openapi_document_lists_sneakers_routes() -> TestResult {
        let service = Service::new(router(state_with_sneakers(strict_sneakers_mock())));

        let doc: serde_json::Value = TestClient::get("http://example.com/api-doc/openapi.json")
            .send(&service)
            .await
            .take_json()
            .await?;

        let paths = doc.get("paths").and_then(serde_json::Value::as_object);

        assert!(
            paths.is_some_and(|paths| paths.contains_key("/sneakers")),
            "missing /sneakers in {doc}"
        );

        Ok(())
    }
}
