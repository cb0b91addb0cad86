//! Deterministic architecture generators for benchmarks.
//! Same size and seed → same output across runs.

use std::path::Path;

use valence_analysis::model::{
    Choreography, Component, CouplingSignals, Edge, EdgeSignals, Graph, InteractionTrace,
    ModelSnapshot, Role, SignalTable, Step, TraceInput, TraceStatus,
};
use valence_core::errors::ValidationError;
use valence_core::types::collections::FxHashSet;

/// Architecture size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchitectureSize {
    /// 20 components, unit test scale
    Micro,
    /// 200 components, a single service
    Small,
    /// 2K components, a product
    Medium,
    /// 20K components, a whole organization
    Large,
}

impl ArchitectureSize {
    pub fn component_count(&self) -> usize {
        match self {
            Self::Micro => 20,
            Self::Small => 200,
            Self::Medium => 2_000,
            Self::Large => 20_000,
        }
    }

    /// Outgoing edges attempted per component.
    pub fn out_degree(&self) -> usize {
        match self {
            Self::Micro => 2,
            Self::Small => 3,
            Self::Medium | Self::Large => 4,
        }
    }

    pub fn trace_count(&self) -> usize {
        match self {
            Self::Micro => 10,
            Self::Small => 100,
            Self::Medium => 1_000,
            Self::Large => 5_000,
        }
    }
}

/// A generated model: everything one analysis run consumes.
#[derive(Debug, Clone)]
pub struct Architecture {
    pub components: Vec<Component>,
    pub edges: Vec<Edge>,
    pub signals: Vec<EdgeSignals>,
    pub traces: Vec<TraceInput>,
}

impl Architecture {
    pub fn graph(&self) -> Result<Graph, ValidationError> {
        Graph::ingest(self.components.clone(), self.edges.clone())
    }

    pub fn signal_table(&self) -> SignalTable {
        self.signals.iter().cloned().collect()
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            components: self.components.clone(),
            edges: self.edges.clone(),
            signals: self.signals.clone(),
            traces: self.traces.clone(),
        }
    }

    /// Write the snapshot as JSON, the form an extractor would hand over.
    pub fn write_snapshot(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_vec_pretty(&self.snapshot()).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Share of components per role, out of ten.
fn role_for(index: usize) -> Role {
    match index % 10 {
        0 => Role::Connector,
        1..=4 => Role::Aggregate,
        5 | 6 => Role::Transformation,
        _ => Role::GenesisEvent,
    }
}

/// Generate a deterministic architecture.
///
/// Edges mostly point forward in index order; about one in twenty points
/// back, so larger architectures contain cycles. Every 50th component is an
/// overloaded aggregate. Roughly one trace in ten is malformed.
pub fn generate_architecture(size: ArchitectureSize, seed: u64) -> Architecture {
    let n = size.component_count();
    let mut rng = SimpleRng::new(seed);

    let components: Vec<Component> = (0..n)
        .map(|i| {
            let component = Component::new(component_id(i), role_for(i))
                .with_throughput((rng.next_u64() % 1_000) as f64);
            if i % 50 == 49 {
                component.with_responsibilities((0..12).map(|r| format!("duty-{i}-{r}")))
            } else {
                component
            }
        })
        .collect();

    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    let mut edges = Vec::with_capacity(n * size.out_degree());
    let mut signals = Vec::with_capacity(n * size.out_degree());
    for i in 0..n {
        for _ in 0..size.out_degree() {
            let back = i > 0 && rng.next_u64() % 20 == 0;
            let target = if back {
                i - 1 - (rng.next_u64() as usize) % i.min(8)
            } else {
                i + 1 + (rng.next_u64() as usize) % 16
            };
            if target >= n || !seen.insert((i, target)) {
                continue;
            }
            edges.push(Edge::new(component_id(i), component_id(target)));
            signals.push(EdgeSignals {
                source: component_id(i),
                target: component_id(target),
                signals: random_signals(&mut rng),
            });
        }
    }

    let traces = generate_traces(size.trace_count(), n, &mut rng);

    Architecture {
        components,
        edges,
        signals,
        traces,
    }
}

fn component_id(index: usize) -> String {
    format!("component_{index}")
}

fn random_signals(rng: &mut SimpleRng) -> CouplingSignals {
    CouplingSignals {
        method_calls: (rng.next_u64() % 12) as u32,
        field_access: (rng.next_u64() % 6) as u32,
        inheritance: rng.next_u64() % 10 == 0,
        composition: (rng.next_u64() % 3) as u32,
        aggregation: (rng.next_u64() % 3) as u32,
        event_subscriptions: (rng.next_u64() % 4) as u32,
        config_coupling: (rng.next_u64() % 3) as u32,
    }
}

/// Component ids grouped by the role their kind admits.
struct Roster {
    connectors: Vec<usize>,
    aggregates: Vec<usize>,
    transformations: Vec<usize>,
    events: Vec<usize>,
}

impl Roster {
    fn new(n: usize) -> Self {
        let mut roster = Self {
            connectors: Vec::new(),
            aggregates: Vec::new(),
            transformations: Vec::new(),
            events: Vec::new(),
        };
        for i in 0..n {
            match role_for(i) {
                Role::Connector => roster.connectors.push(i),
                Role::Aggregate => roster.aggregates.push(i),
                Role::Transformation => roster.transformations.push(i),
                Role::GenesisEvent => roster.events.push(i),
            }
        }
        roster
    }

    fn step(&self, role: Role, rng: &mut SimpleRng) -> Step {
        let pool = match role {
            Role::Connector => &self.connectors,
            Role::Aggregate => &self.aggregates,
            Role::Transformation => &self.transformations,
            Role::GenesisEvent => &self.events,
        };
        let index = pool[(rng.next_u64() as usize) % pool.len()];
        Step::new(component_id(index), role)
    }

    fn steps(&self, roles: &[Role], rng: &mut SimpleRng) -> Vec<Step> {
        roles.iter().map(|r| self.step(*r, rng)).collect()
    }
}

fn generate_traces(count: usize, n: usize, rng: &mut SimpleRng) -> Vec<TraceInput> {
    use Role::{Aggregate as A, Connector as C, GenesisEvent as G, Transformation as T};

    let roster = Roster::new(n);
    let mut commands: Vec<String> = Vec::new();
    let mut traces = Vec::with_capacity(count);

    for t in 0..count {
        let id = format!("trace-{t}");
        if t % 25 == 24 {
            let place = format!("{id}-place");
            let reserve = format!("{id}-reserve");
            traces.push(TraceInput::from(Choreography::new(
                id.clone(),
                vec![
                    InteractionTrace::new(place.clone(), roster.steps(&[C, A, G], rng)),
                    InteractionTrace::new(reserve.clone(), roster.steps(&[G, C, A, G], rng))
                        .correlated_with(place)
                        .with_status(TraceStatus::Failed),
                    InteractionTrace::new(format!("{id}-release"), roster.steps(&[G, C, A, C], rng))
                        .correlated_with(reserve)
                        .with_status(TraceStatus::Compensated),
                ],
            )));
            commands.push(id);
            continue;
        }

        let trace = match rng.next_u64() % 10 {
            0..=4 => {
                commands.push(id.clone());
                InteractionTrace::new(id, roster.steps(&[C, A, A, G], rng))
            }
            5 | 6 => InteractionTrace::new(id, roster.steps(&[C, T, T, C], rng)),
            7 | 8 if !commands.is_empty() => {
                let target = commands[(rng.next_u64() as usize) % commands.len()].clone();
                InteractionTrace::new(id, roster.steps(&[G, C, A, G], rng)).correlated_with(target)
            }
            _ => InteractionTrace::new(id, roster.steps(&[C, A, G, T], rng)),
        };
        traces.push(trace.into());
    }
    traces
}

/// xorshift64 PRNG. Not for anything but reproducible fixtures.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}
