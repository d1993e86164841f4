use std::sync::Arc;

use crate::auth::{AuthError, AuthGate, UserRegistry};
use crate::config::AppConfig;
use crate::database::MessageStore;
use crate::services::MessageService;

/// Shared dependencies handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthGate>,
    pub messages: MessageService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        registry: UserRegistry,
        store: Arc<dyn MessageStore>,
    ) -> Result<Self, AuthError> {
        let auth = AuthGate::new(registry, &config.security.jwt_secret)?;
        let messages =
            MessageService::new(store).with_audit_logging(config.security.enable_audit_logging);

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            messages,
        })
    }
}
