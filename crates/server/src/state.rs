use cardex_core::{
    Authenticator, CardMatcher, CatalogManager, Config, OperatorPolicy, SanitizedConfig,
    SyncOrchestrator,
};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    operator: OperatorPolicy,
    catalog: Arc<CatalogManager>,
    orchestrator: Arc<SyncOrchestrator>,
    matcher: CardMatcher,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        catalog: Arc<CatalogManager>,
        orchestrator: Arc<SyncOrchestrator>,
    ) -> Self {
        let operator = OperatorPolicy::new(config.auth.operator_id.clone());
        let matcher = CardMatcher::new(config.matcher.threshold);
        Self {
            config,
            authenticator,
            operator,
            catalog,
            orchestrator,
            matcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn operator(&self) -> &OperatorPolicy {
        &self.operator
    }

    pub fn catalog(&self) -> &Arc<CatalogManager> {
        &self.catalog
    }

    pub fn orchestrator(&self) -> &Arc<SyncOrchestrator> {
        &self.orchestrator
    }

    pub fn matcher(&self) -> &CardMatcher {
        &self.matcher
    }
}
