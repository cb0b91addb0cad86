//! Gravitational attraction between components.
//!
//! F = G · m₁ · m₂ / r², with throughput as mass and architectural distance
//! (hop count) as r. Predicts which pairs are drawn toward tighter coupling.

use valence_core::errors::ValidationError;

use super::classifier::BondClassifier;
use crate::model::graph::Graph;

/// Attraction between `a` and `b` with gravitational constant `g`.
///
/// Distance is the shorter of the two directed hop counts. Unreachable pairs
/// attract with 0.0.
pub fn attraction(graph: &Graph, a: &str, b: &str, g: f64) -> Result<f64, ValidationError> {
    if a == b {
        return Err(ValidationError::SameComponent { id: a.to_string() });
    }
    let (ca, cb) = match (graph.component(a), graph.component(b)) {
        (Some(ca), Some(cb)) => (ca, cb),
        (None, _) => return Err(ValidationError::UnknownComponent { id: a.to_string() }),
        (_, None) => return Err(ValidationError::UnknownComponent { id: b.to_string() }),
    };

    let distance = match (graph.hops(a, b)?, graph.hops(b, a)?) {
        (Some(x), Some(y)) => x.min(y),
        (Some(x), None) | (None, Some(x)) => x,
        (None, None) => return Ok(0.0),
    };

    let r = distance as f64;
    Ok(g * ca.throughput * cb.throughput / (r * r))
}

impl BondClassifier {
    /// Attraction using the configured gravitational constant.
    pub fn attraction(&self, graph: &Graph, a: &str, b: &str) -> Result<f64, ValidationError> {
        attraction(graph, a, b, self.attraction_constant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Component, Edge, Role};

    fn graph() -> Graph {
        Graph::ingest(
            vec![
                Component::new("api", Role::Connector).with_throughput(100.0),
                Component::new("orders", Role::Aggregate).with_throughput(50.0),
                Component::new("events", Role::GenesisEvent).with_throughput(20.0),
                Component::new("island", Role::Transformation).with_throughput(10.0),
            ],
            vec![Edge::new("api", "orders"), Edge::new("orders", "events")],
        )
        .unwrap()
    }

    #[test]
    fn adjacent_pair() {
        let f = attraction(&graph(), "api", "orders", 0.01).unwrap();
        assert!((f - 50.0).abs() < 1e-9);
    }

    #[test]
    fn distance_squared_falloff() {
        // r = 2 → 0.01 × 100 × 20 / 4
        let f = attraction(&graph(), "api", "events", 0.01).unwrap();
        assert!((f - 5.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric_over_direction() {
        let g = graph();
        let ab = attraction(&g, "api", "events", 0.01).unwrap();
        let ba = attraction(&g, "events", "api", 0.01).unwrap();
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn unreachable_is_zero() {
        assert_eq!(attraction(&graph(), "api", "island", 0.01).unwrap(), 0.0);
    }

    #[test]
    fn same_component_rejected() {
        assert!(matches!(
            attraction(&graph(), "api", "api", 0.01),
            Err(ValidationError::SameComponent { .. })
        ));
    }
}
