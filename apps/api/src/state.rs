use crate::content::pipeline::Pipeline;
use crate::instructions::InstructionResolver;
use crate::llm_client::{ProviderClient, ProviderCredentialSet};

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup: nothing here changes between requests.
#[derive(Clone)]
pub struct AppState {
    pub provider: ProviderClient,
    pub resolver: InstructionResolver,
    pub credentials: ProviderCredentialSet,
}

impl AppState {
    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline {
            provider: &self.provider,
            resolver: &self.resolver,
            credentials: &self.credentials,
        }
    }
}
