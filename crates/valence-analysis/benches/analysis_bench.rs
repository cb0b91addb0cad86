use criterion::{criterion_group, criterion_main, Criterion};

use valence_analysis::bonds::BondClassifier;
use valence_analysis::health::HealthDetector;
use valence_analysis::model::{
    Component, CouplingSignals, Edge, Graph, InteractionTrace, Role, SignalTable, Step,
    TraceInput,
};
use valence_analysis::patterns::{PatternValidator, TraceLedger};
use valence_core::config::{BondConfig, HealthConfig, PatternConfig};

/// 500 aggregates, 5 forward edges each, plus a back edge every 50 nodes.
fn build_graph() -> (Graph, SignalTable) {
    let n = 500;
    let components = (0..n)
        .map(|i| Component::new(format!("n{i}"), Role::Aggregate))
        .collect();
    let mut edges = Vec::new();
    let mut signals = SignalTable::new();
    for i in 0..n {
        for j in 1..=5 {
            if i + j < n {
                edges.push(Edge::new(format!("n{i}"), format!("n{}", i + j)));
                signals.insert(
                    format!("n{i}"),
                    format!("n{}", i + j),
                    CouplingSignals {
                        method_calls: (i % 7) as u32,
                        field_access: (j % 3) as u32,
                        event_subscriptions: 1,
                        ..Default::default()
                    },
                );
            }
        }
        if i % 50 == 49 {
            edges.push(Edge::new(format!("n{i}"), format!("n{}", i - 10)));
        }
    }
    (Graph::ingest(components, edges).unwrap(), signals)
}

fn trace(id: usize, roles: &[Role]) -> InteractionTrace {
    InteractionTrace::new(
        format!("t{id}"),
        roles.iter().map(|r| Step::new("x", *r)).collect(),
    )
}

fn bench_classify(c: &mut Criterion) {
    let (graph, signals) = build_graph();
    let classifier = BondClassifier::new(&BondConfig::default()).unwrap();

    c.bench_function("classify_2.5k_edges", |b| {
        b.iter(|| classifier.classify(&graph, &signals));
    });
}

fn bench_detect(c: &mut Criterion) {
    let (graph, signals) = build_graph();
    let graph = BondClassifier::new(&BondConfig::default())
        .unwrap()
        .classify(&graph, &signals);
    let detector = HealthDetector::new(&HealthConfig::default()).unwrap();

    c.bench_function("detect_500_nodes", |b| {
        b.iter(|| detector.detect(&graph));
    });
}

fn bench_validate_trace(c: &mut Criterion) {
    use Role::{Aggregate as A, Connector as C, GenesisEvent as G};
    let validator = PatternValidator::new(&PatternConfig::default());
    let long = trace(0, &[&[C][..], &[A; 32][..], &[G; 32][..]].concat());

    c.bench_function("validate_single_65_steps", |b| {
        b.iter(|| validator.validate(&long, &mut TraceLedger::new()));
    });
}

fn bench_validate_all(c: &mut Criterion) {
    use Role::{Aggregate as A, Connector as C, GenesisEvent as G, Transformation as T};
    let inputs: Vec<TraceInput> = (0..1_000)
        .map(|i| match i % 3 {
            0 => trace(i, &[C, A, G]),
            1 => trace(i, &[C, T, T, C]),
            _ => trace(i, &[C, A, G, T]),
        })
        .map(TraceInput::from)
        .collect();
    let validator = PatternValidator::new(&PatternConfig::default());

    c.bench_function("validate_all_1k_traces", |b| {
        b.iter(|| validator.validate_all(&inputs));
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_detect,
    bench_validate_trace,
    bench_validate_all
);
criterion_main!(benches);
