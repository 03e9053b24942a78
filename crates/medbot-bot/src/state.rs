use std::sync::Arc;

use medbot_instruments::Catalog;

use crate::config::BotConfig;
use crate::dispatch::{Dispatcher, Shortcut};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Wire the dispatcher to a loaded catalog. The test behind the shortcut
    /// command must be present, otherwise the bot refuses to start.
    pub fn new(config: &BotConfig, catalog: Catalog) -> eyre::Result<Self> {
        if catalog.find(&config.default_test).is_none() {
            return Err(eyre::eyre!(
                "no loaded test name contains '{}' (MEDBOT_DEFAULT_TEST)",
                config.default_test
            ));
        }
        let shortcut = Shortcut {
            command: config.default_command.clone(),
            test: config.default_test.clone(),
        };
        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new(Arc::new(catalog), shortcut)),
        })
    }
}
