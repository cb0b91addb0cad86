//! Model & graph store: components, edges, coupling signals, traces.

pub mod graph;
pub mod snapshot;
pub mod trace;
pub mod types;

pub use graph::{EdgeView, Graph};
pub use petgraph::Direction;
pub use snapshot::ModelSnapshot;
pub use trace::{Choreography, InteractionTrace, Step, TraceInput, TraceStatus, Valency};
pub use types::{
    Component, ComponentKind, CouplingSignals, Edge, EdgeSignals, Role, SignalTable,
};
