//! Recorded interaction traces.

use serde::{Deserialize, Serialize};

use super::types::Role;

/// One step of an interaction: a component acting in a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub component: String,
    pub role: Role,
    /// Bonds the step consumes and produces, when the extractor records them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valency: Option<Valency>,
}

impl Step {
    pub fn new(component: impl Into<String>, role: Role) -> Self {
        Self {
            component: component.into(),
            role,
            valency: None,
        }
    }

    pub fn with_valency(mut self, input: u32, output: u32) -> Self {
        self.valency = Some(Valency { input, output });
        self
    }
}

/// Input and output valency of one step. Serialized as `[input, output]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Valency {
    pub input: u32,
    pub output: u32,
}

impl From<(u32, u32)> for Valency {
    fn from((input, output): (u32, u32)) -> Self {
        Self { input, output }
    }
}

impl From<Valency> for (u32, u32) {
    fn from(v: Valency) -> Self {
        (v.input, v.output)
    }
}

/// How a recorded interaction ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStatus {
    #[default]
    Completed,
    Failed,
    /// Undoes the effects of an earlier failed sub-trace.
    Compensated,
}

impl TraceStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Compensated => "compensated",
        }
    }
}

impl std::fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered record of one interaction sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionTrace {
    pub id: String,
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub status: TraceStatus,
}

impl InteractionTrace {
    pub fn new(id: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: id.into(),
            steps,
            correlation_id: None,
            status: TraceStatus::Completed,
        }
    }

    pub fn correlated_with(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn with_status(mut self, status: TraceStatus) -> Self {
        self.status = status;
        self
    }

    /// The role sequence, e.g. `CAGG`.
    pub fn signature(&self) -> String {
        self.steps.iter().map(|s| s.role.symbol()).collect()
    }
}

/// A multi-step interaction made of correlated sub-traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choreography {
    pub id: String,
    pub sub_traces: Vec<InteractionTrace>,
}

impl Choreography {
    pub fn new(id: impl Into<String>, sub_traces: Vec<InteractionTrace>) -> Self {
        Self {
            id: id.into(),
            sub_traces,
        }
    }
}

/// Validator input: a standalone trace or a choreography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceInput {
    Single(InteractionTrace),
    Choreography(Choreography),
}

impl TraceInput {
    pub fn id(&self) -> &str {
        match self {
            Self::Single(trace) => &trace.id,
            Self::Choreography(choreography) => &choreography.id,
        }
    }
}

impl From<InteractionTrace> for TraceInput {
    fn from(trace: InteractionTrace) -> Self {
        Self::Single(trace)
    }
}

impl From<Choreography> for TraceInput {
    fn from(choreography: Choreography) -> Self {
        Self::Choreography(choreography)
    }
}
