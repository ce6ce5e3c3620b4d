use crate::model::ModelProvider;
use std::sync::Arc;

pub struct ServerState<P: ModelProvider> {
    provider: Arc<P>,
}

impl<P: ModelProvider> ServerState<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
