use std::sync::Arc;

use crate::analysis::retry::RetryPolicy;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; handlers only ever read it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Model backend. `GeminiClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub retry: RetryPolicy,
}

#[cfg(test)]
pub(crate) fn test_state(llm: Arc<dyn TextGenerator>) -> AppState {
    AppState {
        config: Arc::new(Config {
            gemini_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            llm_timeout: std::time::Duration::from_secs(5),
        }),
        llm,
        retry: RetryPolicy::default(),
    }
}
