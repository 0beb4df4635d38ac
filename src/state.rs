use std::{sync::Arc, time::Duration};

use crate::{ai::TextGenerator, config::AuthConfig, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub provider: Arc<dyn TextGenerator>,
    pub auth: Arc<AuthConfig>,
    /// Upper bound for one provider call; past it the reply degrades.
    pub provider_timeout: Duration,
}
