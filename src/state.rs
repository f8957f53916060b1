// src/state.rs
use std::sync::Arc;

use crate::config::ChatConfig;
use crate::services::provider::GeminiClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: ChatConfig,
    pub provider: GeminiClient,
}

impl AppState {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            provider: GeminiClient::new(),
        }
    }
}
