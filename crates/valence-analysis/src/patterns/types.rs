//! Pattern, violation, and outcome types.

use serde::{Deserialize, Serialize};

use crate::model::types::Role;

/// A permitted interaction pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// `C A+ G+`
    CommandHandling,
    /// `C T+ C`
    PureQuery,
    /// `G C A+ G+`, correlated to a prior command or choreography.
    EventReaction,
    /// `G C A+ C`, correlated to any prior trace.
    CorrectiveReaction,
    /// Correlated sub-traces, each matching one of the above.
    Choreography,
}

impl Pattern {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CommandHandling => "command_handling",
            Self::PureQuery => "pure_query",
            Self::EventReaction => "event_reaction",
            Self::CorrectiveReaction => "corrective_reaction",
            Self::Choreography => "choreography",
        }
    }

    /// Whether the pattern changes state through an aggregate.
    pub fn is_command_side(&self) -> bool {
        matches!(
            self,
            Self::CommandHandling | Self::EventReaction | Self::CorrectiveReaction
        )
    }

    /// Whether a trace of this pattern must carry a correlation id.
    pub fn requires_correlation(&self) -> bool {
        matches!(self, Self::EventReaction | Self::CorrectiveReaction)
    }

    /// Whether a trace of this pattern may be the target of `source`'s correlation.
    pub fn accepts_correlation_from(&self, source: Pattern) -> bool {
        match source {
            Self::EventReaction => matches!(self, Self::CommandHandling | Self::Choreography),
            _ => true,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn roles(roles: &[Role]) -> String {
    if roles.is_empty() {
        return "end of trace".to_string();
    }
    roles
        .iter()
        .map(|r| r.name())
        .collect::<Vec<_>>()
        .join(" or ")
}

fn pattern_or_none(pattern: &Option<Pattern>) -> &'static str {
    pattern.map_or("no pattern", |p| p.name())
}

/// Why a trace was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationReason {
    #[error("trace has no steps")]
    EmptyTrace,

    #[error("expected {}, found {found}", roles(.expected))]
    UnexpectedStep { expected: Vec<Role>, found: Role },

    #[error("transformation step inside {pattern}")]
    TransformationInCommand { pattern: Pattern },

    #[error("{found} step breaks query purity")]
    QueryPurity { found: Role },

    #[error("trace ends before {pattern} completes; expected {}", roles(.expected))]
    Incomplete { pattern: Pattern, expected: Vec<Role> },

    #[error("{pattern} requires a correlation id")]
    MissingCorrelation { pattern: Pattern },

    #[error("correlation id {correlation_id} does not reference a prior trace")]
    UnknownCorrelation { correlation_id: String },

    #[error("{pattern} cannot correlate to {correlation_id}, a {target}")]
    CorrelationTarget {
        correlation_id: String,
        pattern: Pattern,
        target: Pattern,
    },

    #[error("sub-trace must correlate to an earlier sub-trace of its choreography")]
    MissingChoreographyLink,

    #[error("correlation id {correlation_id} is not an earlier sub-trace of this choreography")]
    BrokenChoreographyLink { correlation_id: String },

    #[error("unknown component {component}")]
    UnknownComponent { component: String },

    #[error("component {component} cannot act as {role}")]
    RoleMismatch { component: String, role: Role },

    #[error("compensated trace without a preceding failure")]
    CompensationWithoutFailure,

    #[error("sub-trace after a failure must be compensated")]
    UncompensatedAfterFailure,

    #[error("compensation must be a corrective reaction, found {}", pattern_or_none(.found))]
    CompensationShape { found: Option<Pattern> },

    #[error("failed sub-trace is never compensated")]
    MissingCompensation,

    #[error("choreography has no sub-traces")]
    EmptyChoreography,

    #[error("trace id {trace_id} already used")]
    DuplicateTraceId { trace_id: String },
}

/// A rejected trace: which one, why, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("trace {trace_id} rejected at step {position}: {reason}")]
pub struct PatternViolation {
    pub trace_id: String,
    pub reason: ViolationReason,
    /// Step index of the offending step. Trace length for incomplete traces.
    pub position: usize,
    /// Offending sub-trace index when `trace_id` is a choreography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_trace: Option<usize>,
}

impl PatternViolation {
    pub fn new(trace_id: impl Into<String>, reason: ViolationReason, position: usize) -> Self {
        Self {
            trace_id: trace_id.into(),
            reason,
            position,
            sub_trace: None,
        }
    }

    pub fn in_sub_trace(mut self, index: usize) -> Self {
        self.sub_trace = Some(index);
        self
    }
}

/// Result of validating one input trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Matched { trace_id: String, pattern: Pattern },
    Violation(PatternViolation),
}

impl ValidationOutcome {
    pub fn trace_id(&self) -> &str {
        match self {
            Self::Matched { trace_id, .. } => trace_id,
            Self::Violation(v) => &v.trace_id,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn pattern(&self) -> Option<Pattern> {
        match self {
            Self::Matched { pattern, .. } => Some(*pattern),
            Self::Violation(_) => None,
        }
    }

    pub fn violation(&self) -> Option<&PatternViolation> {
        match self {
            Self::Matched { .. } => None,
            Self::Violation(v) => Some(v),
        }
    }
}

impl From<(String, Result<Pattern, PatternViolation>)> for ValidationOutcome {
    fn from((trace_id, result): (String, Result<Pattern, PatternViolation>)) -> Self {
        match result {
            Ok(pattern) => Self::Matched { trace_id, pattern },
            Err(violation) => Self::Violation(violation),
        }
    }
}
