//! Serialized model bundles handed over by an extractor.

use serde::{Deserialize, Serialize};
use valence_core::errors::ValidationError;

use super::graph::Graph;
use super::trace::TraceInput;
use super::types::{Component, Edge, EdgeSignals, SignalTable};

/// Everything one analysis run consumes, in serializable form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSnapshot {
    pub components: Vec<Component>,
    pub edges: Vec<Edge>,
    pub signals: Vec<EdgeSignals>,
    pub traces: Vec<TraceInput>,
}

impl ModelSnapshot {
    /// Parse a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::MalformedSnapshot {
            message: e.to_string(),
        })
    }

    /// Ingest the components and edges, and index the signals.
    /// Traces stay in the snapshot.
    pub fn into_parts(self) -> Result<(Graph, SignalTable, Vec<TraceInput>), ValidationError> {
        let graph = Graph::ingest(self.components, self.edges)?;
        let signals = self.signals.into_iter().collect();
        Ok((graph, signals, self.traces))
    }
}
