//! ValenceEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling Valence analysis events.
///
/// Handlers only override the events they care about. `Send + Sync` so a
/// handler can be shared with the rayon-backed stages.
pub trait ValenceEventHandler: Send + Sync {
    // ---- Analysis Lifecycle ----
    fn on_analysis_started(&self, _event: &AnalysisStartedEvent) {}
    fn on_graph_ingested(&self, _event: &GraphIngestedEvent) {}
    fn on_bonds_classified(&self, _event: &BondsClassifiedEvent) {}
    fn on_analysis_complete(&self, _event: &AnalysisCompleteEvent) {}

    // ---- Results ----
    fn on_finding_detected(&self, _event: &FindingDetectedEvent) {}
    fn on_trace_rejected(&self, _event: &TraceRejectedEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
