//! Tests for the structural health detector.

use valence_analysis::bonds::BondClassifier;
use valence_analysis::health::{FindingKind, HealthDetector, Severity};
use valence_analysis::model::{Component, CouplingSignals, Edge, Graph, Role, SignalTable};
use valence_core::config::{BondConfig, HealthConfig};

fn detector() -> HealthDetector {
    HealthDetector::new(&HealthConfig::default()).unwrap()
}

fn graph(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
    Graph::ingest(
        ids.iter().map(|id| Component::new(*id, Role::Aggregate)).collect(),
        edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect(),
    )
    .unwrap()
}

/// One finding per SCC, naming exactly its members.
#[test]
fn one_finding_per_scc() {
    let g = graph(
        &["a", "b", "c", "d", "e", "f"],
        &[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("c", "d"),
            ("d", "e"),
            ("e", "d"),
            ("e", "f"),
        ],
    );
    let findings = detector().detect(&g);
    let cycles: Vec<_> = findings
        .iter()
        .filter(|f| f.kind == FindingKind::CircularDependency)
        .collect();
    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[0].components, vec!["a", "b", "c"]);
    assert_eq!(cycles[1].components, vec!["d", "e"]);

    // 0.3 + 0.1×3
    assert!((cycles[0].toxicity - 0.6).abs() < 1e-9);
    assert_eq!(cycles[0].severity, Severity::High);
    assert!((cycles[1].toxicity - 0.5).abs() < 1e-9);
    assert_eq!(cycles[1].severity, Severity::Medium);
}

/// Large cycles saturate at toxicity 1.0.
#[test]
fn cycle_toxicity_saturates() {
    let ids: Vec<String> = (0..10).map(|i| format!("n{i}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let edges: Vec<(&str, &str)> = (0..10).map(|i| (refs[i], refs[(i + 1) % 10])).collect();
    let findings = detector().detect(&graph(&refs, &edges));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].toxicity, 1.0);
    assert_eq!(findings[0].severity, Severity::Critical);
}

/// Splitting by weak component before Tarjan changes nothing.
#[test]
fn parallel_cycle_detection_agrees() {
    let g = graph(
        &["a", "b", "c", "x", "y", "lone"],
        &[("a", "b"), ("b", "a"), ("b", "c"), ("x", "y"), ("y", "x")],
    );
    let sequential = detector().detect(&g);
    let parallel = HealthDetector::new(&HealthConfig {
        parallel_node_threshold: Some(1),
        ..Default::default()
    })
    .unwrap()
    .detect(&g);
    assert_eq!(sequential, parallel);
    assert_eq!(sequential.len(), 2);
}

#[test]
fn dag_has_no_cycles() {
    let g = graph(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
    );
    assert!(detector().detect(&g).is_empty());
}

fn star(hub_edges: usize, responsibilities: usize) -> Graph {
    let mut components = vec![Component::new("hub", Role::Aggregate)
        .with_responsibilities((0..responsibilities).map(|i| format!("duty-{i}")))];
    let mut edges = Vec::new();
    for i in 0..hub_edges {
        components.push(Component::new(format!("leaf{i}"), Role::Aggregate));
        edges.push(Edge::new("hub", format!("leaf{i}")));
    }
    Graph::ingest(components, edges).unwrap()
}

/// Both connectivity and responsibilities must exceed their limits.
#[test]
fn god_node_needs_both_axes() {
    assert!(detector().detect(&star(20, 11)).is_empty());
    assert!(detector().detect(&star(21, 10)).is_empty());

    let findings = detector().detect(&star(21, 11));
    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.kind, FindingKind::OverConcentration);
    assert_eq!(finding.components, vec!["hub"]);
    // 0.3 + 0.35×(1/20) + 0.35×(1/10) + 0.1 outlier bonus
    assert!((finding.toxicity - 0.4525).abs() < 1e-9);
    assert_eq!(finding.severity, Severity::Medium);
}

/// Toxicity grows with the excess and caps each axis at 1.
#[test]
fn god_node_toxicity_scales() {
    let mild = detector().detect(&star(21, 11));
    let severe = detector().detect(&star(60, 40));
    assert!(severe[0].toxicity > mild[0].toxicity);
    // 0.3 + 0.35 + 0.35 + 0.1, clamped
    assert_eq!(severe[0].toxicity, 1.0);
}

#[test]
fn concentration_limits_configurable() {
    let detector = HealthDetector::new(&HealthConfig {
        max_connectivity: Some(2),
        max_responsibilities: Some(1),
        ..Default::default()
    })
    .unwrap();
    let findings = detector.detect(&star(3, 2));
    assert_eq!(findings.len(), 1);
}

fn tight_pair(a_owns_b: bool) -> Graph {
    let mut a = Component::new("a", Role::Aggregate);
    if a_owns_b {
        a = a.with_responsibilities(["b"]);
    }
    let graph = Graph::ingest(
        vec![a, Component::new("b", Role::Aggregate)],
        vec![Edge::new("a", "b"), Edge::new("b", "a")],
    )
    .unwrap();
    let mut signals = SignalTable::new();
    let strong = CouplingSignals {
        method_calls: 20,
        ..Default::default()
    };
    signals.insert("a", "b", strong);
    signals.insert(
        "b",
        "a",
        CouplingSignals {
            method_calls: 2,
            ..Default::default()
        },
    );
    BondClassifier::new(&BondConfig::default())
        .unwrap()
        .classify(&graph, &signals)
}

/// Bidirectional coupling with a covalent direction is intimacy.
#[test]
fn intimacy_between_non_owners() {
    let findings = detector().detect(&tight_pair(false));
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].kind, FindingKind::CircularDependency);
    assert_eq!(findings[1].kind, FindingKind::InappropriateIntimacy);
    assert_eq!(findings[1].components, vec!["a", "b"]);
    assert_eq!(findings[1].toxicity, 1.0);
    assert_eq!(findings[1].severity, Severity::Critical);
}

/// Ownership excuses the coupling.
#[test]
fn owned_pair_is_not_intimate() {
    let findings = detector().detect(&tight_pair(true));
    assert!(findings
        .iter()
        .all(|f| f.kind != FindingKind::InappropriateIntimacy));
}

/// Without classification there are no bonds to judge.
#[test]
fn unclassified_edges_never_intimate() {
    let g = graph(&["a", "b"], &[("a", "b"), ("b", "a")]);
    let findings = detector().detect(&g);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::CircularDependency);
}

/// Detection is read-only and repeatable.
#[test]
fn detection_is_repeatable() {
    let g = tight_pair(false);
    assert_eq!(detector().detect(&g), detector().detect(&g));
}
