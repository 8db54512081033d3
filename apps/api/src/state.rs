use std::sync::Arc;

use crate::advisor::session::ConversationStore;
use crate::advisor::Advisor;
use crate::config::Config;
use crate::profiles::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup.
    pub profiles: Arc<ProfileStore>,
    /// Pluggable advisor backend. `LlmAdvisor` when a key is configured, otherwise `OfflineAdvisor`.
    pub advisor: Arc<dyn Advisor>,
    pub conversations: Arc<ConversationStore>,
}
