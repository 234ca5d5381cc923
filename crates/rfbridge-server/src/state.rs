use std::sync::Arc;

use rfbridge_core::link::BoxedLink;
use rfbridge_core::Transceiver;

/// Shared application state passed to all route handlers. The transceiver is
/// the single serialization point for the half-duplex link; handlers clone
/// the Arc and queue behind its lock.
#[derive(Clone)]
pub struct AppState {
    pub radio: Arc<Transceiver<BoxedLink>>,
}

impl AppState {
    pub fn new(radio: Arc<Transceiver<BoxedLink>>) -> Self {
        Self { radio }
    }
}
