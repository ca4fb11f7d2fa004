use crate::clock::Clock;
use crate::config::Config;
use crate::models::RenderState;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    /// Latest default-range render state published by the scheduler.
    pub live: watch::Receiver<RenderState>,
}

impl AppState {
    pub fn new(config: Config, clock: Arc<dyn Clock>, live: watch::Receiver<RenderState>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
            live,
        }
    }
}
