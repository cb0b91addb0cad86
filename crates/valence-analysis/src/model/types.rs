//! Component, edge, and coupling-signal types.

use serde::{Deserialize, Serialize};
use valence_core::types::collections::{FxHashMap, SmallVec4};

use crate::bonds::types::Bond;

/// The role a component plays in one interaction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Inbound or outbound boundary (HTTP handler, queue consumer, client).
    Connector,
    /// Owns state and enforces invariants.
    Aggregate,
    /// Pure computation over data, no state change.
    Transformation,
    /// Emits a domain event recording that something happened.
    GenesisEvent,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connector => "connector",
            Self::Aggregate => "aggregate",
            Self::Transformation => "transformation",
            Self::GenesisEvent => "genesis_event",
        }
    }

    /// One-letter grammar symbol (C, A, T, G).
    pub fn symbol(&self) -> char {
        match self {
            Self::Connector => 'C',
            Self::Aggregate => 'A',
            Self::Transformation => 'T',
            Self::GenesisEvent => 'G',
        }
    }

    pub fn all() -> &'static [Role] {
        &[
            Self::Connector,
            Self::Aggregate,
            Self::Transformation,
            Self::GenesisEvent,
        ]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a component is. A hybrid plays several roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Aggregate,
    Transformation,
    Connector,
    GenesisEvent,
    Hybrid(SmallVec4<Role>),
}

impl ComponentKind {
    /// Whether a step with `role` may be performed by a component of this kind.
    pub fn admits(&self, role: Role) -> bool {
        match self {
            Self::Aggregate => role == Role::Aggregate,
            Self::Transformation => role == Role::Transformation,
            Self::Connector => role == Role::Connector,
            Self::GenesisEvent => role == Role::GenesisEvent,
            Self::Hybrid(roles) => roles.contains(&role),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::Transformation => "transformation",
            Self::Connector => "connector",
            Self::GenesisEvent => "genesis_event",
            Self::Hybrid(_) => "hybrid",
        }
    }
}

impl From<Role> for ComponentKind {
    fn from(role: Role) -> Self {
        match role {
            Role::Connector => Self::Connector,
            Role::Aggregate => Self::Aggregate,
            Role::Transformation => Self::Transformation,
            Role::GenesisEvent => Self::GenesisEvent,
        }
    }
}

/// A node in the component graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Stable identifier, unique within one ingestion.
    pub id: String,
    pub kind: ComponentKind,
    /// Declared responsibilities. May name other components.
    #[serde(default)]
    pub responsibilities: Vec<String>,
    /// Observed or estimated message rate. Used as mass for attraction.
    #[serde(default)]
    pub throughput: f64,
    /// Incoming edge count. Recomputed at ingestion; input values are ignored.
    #[serde(default)]
    pub fan_in: u32,
    /// Outgoing edge count. Recomputed at ingestion; input values are ignored.
    #[serde(default)]
    pub fan_out: u32,
}

impl Component {
    pub fn new(id: impl Into<String>, kind: impl Into<ComponentKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            responsibilities: Vec::new(),
            throughput: 0.0,
            fan_in: 0,
            fan_out: 0,
        }
    }

    pub fn with_responsibilities<I, S>(mut self, responsibilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responsibilities = responsibilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_throughput(mut self, throughput: f64) -> Self {
        self.throughput = throughput;
        self
    }

    /// `fan_in + fan_out`.
    pub fn connectivity(&self) -> u32 {
        self.fan_in + self.fan_out
    }

    /// Whether this component declares `other_id` as one of its responsibilities.
    pub fn is_responsible_for(&self, other_id: &str) -> bool {
        self.responsibilities.iter().any(|r| r == other_id)
    }
}

/// A directed edge between two components, annotated once classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bond: Option<Bond>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            bond: None,
        }
    }
}

/// Raw coupling counts observed between two components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingSignals {
    pub method_calls: u32,
    pub field_access: u32,
    pub inheritance: bool,
    pub composition: u32,
    pub aggregation: u32,
    pub event_subscriptions: u32,
    pub config_coupling: u32,
}

impl CouplingSignals {
    /// Number of coupling channels.
    pub const CHANNELS: usize = 7;

    /// Counts per channel, in weight-table order.
    pub fn channel_counts(&self) -> [f64; Self::CHANNELS] {
        [
            self.method_calls as f64,
            self.field_access as f64,
            if self.inheritance { 1.0 } else { 0.0 },
            self.composition as f64,
            self.aggregation as f64,
            self.event_subscriptions as f64,
            self.config_coupling as f64,
        ]
    }
}

/// Coupling signals for one directed edge, as supplied by an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSignals {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub signals: CouplingSignals,
}

/// Coupling signals keyed by `(source, target)`.
#[derive(Debug, Clone, Default)]
pub struct SignalTable {
    by_source: FxHashMap<String, FxHashMap<String, CouplingSignals>>,
    len: usize,
}

impl SignalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the signals for `source -> target`.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        signals: CouplingSignals,
    ) {
        let previous = self
            .by_source
            .entry(source.into())
            .or_default()
            .insert(target.into(), signals);
        if previous.is_none() {
            self.len += 1;
        }
    }

    pub fn get(&self, source: &str, target: &str) -> Option<&CouplingSignals> {
        self.by_source.get(source)?.get(target)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All `(source, target)` pairs with signals, in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_source.iter().flat_map(|(source, targets)| {
            targets
                .keys()
                .map(move |target| (source.as_str(), target.as_str()))
        })
    }
}

impl FromIterator<EdgeSignals> for SignalTable {
    fn from_iter<I: IntoIterator<Item = EdgeSignals>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry.source, entry.target, entry.signals);
        }
        table
    }
}
