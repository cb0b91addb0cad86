//! EventDispatcher: synchronous event dispatch, zero overhead when empty.

use std::sync::Arc;

use super::handler::ValenceEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ValenceEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn ValenceEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not stop the ones after it.
    fn emit<F: Fn(&dyn ValenceEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Analysis Lifecycle ----
    pub fn emit_analysis_started(&self, event: &AnalysisStartedEvent) {
        self.emit(|h| h.on_analysis_started(event));
    }

    pub fn emit_graph_ingested(&self, event: &GraphIngestedEvent) {
        self.emit(|h| h.on_graph_ingested(event));
    }

    pub fn emit_bonds_classified(&self, event: &BondsClassifiedEvent) {
        self.emit(|h| h.on_bonds_classified(event));
    }

    pub fn emit_analysis_complete(&self, event: &AnalysisCompleteEvent) {
        self.emit(|h| h.on_analysis_complete(event));
    }

    // ---- Results ----
    pub fn emit_finding_detected(&self, event: &FindingDetectedEvent) {
        self.emit(|h| h.on_finding_detected(event));
    }

    pub fn emit_trace_rejected(&self, event: &TraceRejectedEvent) {
        self.emit(|h| h.on_trace_rejected(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
