//! Pipeline benchmarks over generated architectures.
//!
//! Each stage is measured separately, then the whole `Analyzer` run.
//! With `VALENCE_BENCH_BASELINE` set, full runs are also timed per size and
//! checked against that baseline file, which is written on first use.

use std::hint::black_box;
use std::path::PathBuf;

use criterion::{criterion_group, BenchmarkId, Criterion};
use valence_analysis::bonds::BondClassifier;
use valence_analysis::health::HealthDetector;
use valence_analysis::model::Graph;
use valence_analysis::patterns::PatternValidator;
use valence_analysis::Analyzer;
use valence_bench::fixtures::{generate_architecture, ArchitectureSize};
use valence_bench::{Baseline, BenchLevel, BenchResult};
use valence_core::config::{BondConfig, HealthConfig, PatternConfig, ValenceConfig};

const SIZES: [ArchitectureSize; 3] = [
    ArchitectureSize::Micro,
    ArchitectureSize::Small,
    ArchitectureSize::Medium,
];

fn label(size: ArchitectureSize) -> usize {
    size.component_count()
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    for size in SIZES {
        let arch = generate_architecture(size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(label(size)), &arch, |b, arch| {
            b.iter(|| Graph::ingest(arch.components.clone(), arch.edges.clone()).unwrap());
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let classifier = BondClassifier::new(&BondConfig::default()).unwrap();
    let mut group = c.benchmark_group("classify");
    for size in SIZES {
        let arch = generate_architecture(size, 42);
        let graph = arch.graph().unwrap();
        let signals = arch.signal_table();
        group.bench_function(BenchmarkId::from_parameter(label(size)), |b| {
            b.iter(|| classifier.classify(&graph, &signals));
        });
    }
    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let classifier = BondClassifier::new(&BondConfig::default()).unwrap();
    let detector = HealthDetector::new(&HealthConfig::default()).unwrap();
    let mut group = c.benchmark_group("detect");
    for size in SIZES {
        let arch = generate_architecture(size, 42);
        let graph = classifier.classify(&arch.graph().unwrap(), &arch.signal_table());
        group.bench_function(BenchmarkId::from_parameter(label(size)), |b| {
            b.iter(|| detector.detect(&graph));
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let validator = PatternValidator::new(&PatternConfig::default());
    let mut group = c.benchmark_group("validate");
    for size in SIZES {
        let arch = generate_architecture(size, 42);
        group.bench_function(BenchmarkId::from_parameter(arch.traces.len()), |b| {
            b.iter(|| validator.validate_all(&arch.traces));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let analyzer = Analyzer::new(ValenceConfig::default()).unwrap();
    let mut group = c.benchmark_group("analyze");
    group.sample_size(20);
    for size in SIZES {
        let arch = generate_architecture(size, 42);
        let graph = arch.graph().unwrap();
        let signals = arch.signal_table();
        group.bench_function(BenchmarkId::from_parameter(label(size)), |b| {
            b.iter(|| analyzer.analyze_graph(&graph, &signals, &arch.traces));
        });
    }
    group.finish();
}

const BASELINE_ENV: &str = "VALENCE_BENCH_BASELINE";

fn system_results() -> Vec<BenchResult> {
    let analyzer = Analyzer::new(ValenceConfig::default()).unwrap();
    SIZES
        .iter()
        .map(|&size| {
            let arch = generate_architecture(size, 42);
            let graph = arch.graph().unwrap();
            let signals = arch.signal_table();
            BenchResult::measure(
                format!("analyze/{}", label(size)),
                BenchLevel::System,
                10,
                size.component_count(),
                || {
                    black_box(analyzer.analyze_graph(&graph, &signals, &arch.traces));
                },
            )
        })
        .collect()
}

fn check_baseline() {
    let Some(path) = std::env::var_os(BASELINE_ENV).map(PathBuf::from) else {
        return;
    };
    let current = system_results();
    for result in &current {
        eprintln!(
            "{:<16} {:>10.3} ms  {:>12.0} components/s",
            result.name,
            result.mean_ms,
            result.throughput.unwrap_or(0.0)
        );
    }

    match Baseline::load(&path) {
        Ok(baseline) => {
            let regressions = baseline.regressions(&current);
            for regression in &regressions {
                eprintln!("regression: {regression}");
            }
            if regressions.is_empty() {
                eprintln!("no regressions against {}", path.display());
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Baseline::new(current).save(&path).unwrap();
            eprintln!("baseline written to {}", path.display());
        }
        Err(e) => panic!("unreadable baseline {}: {e}", path.display()),
    }
}

criterion_group!(
    benches,
    bench_ingest,
    bench_classify,
    bench_detect,
    bench_validate,
    bench_analyze
);

fn main() {
    benches();
    check_baseline();
    Criterion::default().configure_from_args().final_summary();
}
