//! Config command.

use tracing::debug;

use crate::state::{AppConfig, AppState};

/// Returns the effective configuration.
pub fn get_config(state: &AppState) -> AppConfig {
    debug!("get_config command");
    state.config.clone()
}
