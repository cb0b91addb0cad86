//! Event payload types.

/// Payload for `on_analysis_started`.
#[derive(Debug, Clone)]
pub struct AnalysisStartedEvent {
    pub component_count: usize,
    pub edge_count: usize,
    pub trace_count: usize,
}

/// Payload for `on_graph_ingested`.
#[derive(Debug, Clone)]
pub struct GraphIngestedEvent {
    pub component_count: usize,
    pub edge_count: usize,
}

/// Payload for `on_bonds_classified`. Counts per bond type.
#[derive(Debug, Clone)]
pub struct BondsClassifiedEvent {
    pub covalent: usize,
    pub ionic: usize,
    pub hydrogen: usize,
    pub weak_association: usize,
}

/// Payload for `on_finding_detected`.
#[derive(Debug, Clone)]
pub struct FindingDetectedEvent {
    pub kind: String,
    pub components: Vec<String>,
    pub toxicity: f64,
    pub severity: String,
}

/// Payload for `on_trace_rejected`.
#[derive(Debug, Clone)]
pub struct TraceRejectedEvent {
    pub trace_id: String,
    pub reason: String,
    pub position: usize,
}

/// Payload for `on_analysis_complete`.
#[derive(Debug, Clone)]
pub struct AnalysisCompleteEvent {
    pub finding_count: usize,
    pub rejected_traces: usize,
    pub overall_toxicity: f64,
    pub overall_stability: f64,
    pub duration_ms: u64,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
