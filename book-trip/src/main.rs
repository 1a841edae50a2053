//! Book Trip Lambda - Code hook for the BookHotel and BookCar intents.
//!
//! Invoked by the bot engine on every dialog turn to validate slots, and once
//! more at fulfillment to close the intent.

use std::sync::Arc;

use anyhow::Context as _;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::{Config, LexEvent, LexResponse, TurnRouter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    config: Config,
    router: TurnRouter,
}

impl AppState {
    fn new(config: Config) -> Self {
        let router = TurnRouter::new(&config);
        Self { config, router }
    }
}

async fn handler(state: Arc<AppState>, event: LambdaEvent<LexEvent>) -> Result<LexResponse, Error> {
    let (payload, context) = event.into_parts();
    let today = state.config.today();

    match state.router.handle(payload, today) {
        Ok(response) => Ok(response),
        Err(e) => {
            warn!(request_id = %context.request_id, error = %e, "Rejecting code hook event");
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(locale = %config.locale, utc_offset = %config.utc_offset, "Book Trip code hook starting");

    let state = Arc::new(AppState::new(config));

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
