//! End-to-end analysis: ingest, classify, detect, score, validate, assemble.
//! Valency balances are attached to the report after assembly.

use std::time::Instant;

use valence_core::config::{PatternConfig, ValenceConfig};
use valence_core::errors::{ConfigError, PipelineError, ValenceErrorCode, ValidationError};
use valence_core::events::types::{
    AnalysisCompleteEvent, AnalysisStartedEvent, BondsClassifiedEvent, ErrorEvent,
    FindingDetectedEvent, GraphIngestedEvent, TraceRejectedEvent,
};
use valence_core::events::EventDispatcher;

use crate::bonds::BondClassifier;
use crate::health::HealthDetector;
use crate::model::graph::Graph;
use crate::model::snapshot::ModelSnapshot;
use crate::model::trace::TraceInput;
use crate::model::types::{Component, Edge, SignalTable};
use crate::patterns::{check_valency_all, PatternValidator};
use crate::report::{assemble, AnalysisReport};
use crate::scoring::Scorer;

/// Runs every analysis stage with one validated configuration.
#[derive(Debug, Clone)]
pub struct Analyzer {
    classifier: BondClassifier,
    detector: HealthDetector,
    scorer: Scorer,
    patterns: PatternConfig,
    events: EventDispatcher,
}

impl Analyzer {
    /// Build every stage, failing on the first invalid setting.
    pub fn new(config: ValenceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: BondClassifier::new(&config.bonds)?,
            detector: HealthDetector::new(&config.health)?,
            scorer: Scorer::new(&config.scoring)?,
            patterns: config.patterns,
            events: EventDispatcher::new(),
        })
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn classifier(&self) -> &BondClassifier {
        &self.classifier
    }

    /// Ingest and analyze. Ingestion errors abort the run; rejected traces
    /// are reported in the result.
    pub fn analyze(
        &self,
        components: Vec<Component>,
        edges: Vec<Edge>,
        signals: &SignalTable,
        traces: &[TraceInput],
    ) -> Result<AnalysisReport, PipelineError> {
        self.events.emit_analysis_started(&AnalysisStartedEvent {
            component_count: components.len(),
            edge_count: edges.len(),
            trace_count: traces.len(),
        });

        let graph = {
            let _span = tracing::info_span!("valence.ingest", components = components.len())
                .entered();
            Graph::ingest(components, edges).map_err(|e| self.fail(e))?
        };
        self.events.emit_graph_ingested(&GraphIngestedEvent {
            component_count: graph.component_count(),
            edge_count: graph.edge_count(),
        });

        Ok(self.analyze_graph(&graph, signals, traces))
    }

    /// Analyze a snapshot produced by a model-extraction collaborator.
    pub fn analyze_snapshot(
        &self,
        snapshot: ModelSnapshot,
    ) -> Result<AnalysisReport, PipelineError> {
        let ModelSnapshot {
            components,
            edges,
            signals,
            traces,
        } = snapshot;
        let signals: SignalTable = signals.into_iter().collect();
        self.analyze(components, edges, &signals, &traces)
    }

    /// Analyze an already-ingested graph. Edge annotations already on `graph`
    /// are replaced by fresh classifications.
    pub fn analyze_graph(
        &self,
        graph: &Graph,
        signals: &SignalTable,
        traces: &[TraceInput],
    ) -> AnalysisReport {
        let started = Instant::now();

        let classified = {
            let _span = tracing::info_span!("valence.classify", edges = graph.edge_count())
                .entered();
            self.classifier.classify(graph, signals)
        };

        let findings = {
            let _span = tracing::info_span!("valence.detect").entered();
            self.detector.detect(&classified)
        };
        for finding in &findings {
            self.events.emit_finding_detected(&FindingDetectedEvent {
                kind: finding.kind.name().to_string(),
                components: finding.components.clone(),
                toxicity: finding.toxicity,
                severity: finding.severity.name().to_string(),
            });
        }

        let score = {
            let _span = tracing::info_span!("valence.score").entered();
            self.scorer.score(&classified, &findings)
        };
        let distribution = score.bond_distribution;
        self.events.emit_bonds_classified(&BondsClassifiedEvent {
            covalent: distribution.covalent,
            ionic: distribution.ionic,
            hydrogen: distribution.hydrogen,
            weak_association: distribution.weak_association,
        });

        let validations = {
            let _span = tracing::info_span!("valence.validate", traces = traces.len()).entered();
            let validator = PatternValidator::new(&self.patterns);
            let validator = if self.patterns.effective_enforce_component_roles() {
                validator.with_catalog(&classified)
            } else {
                validator
            };
            validator.validate_all(traces)
        };
        for violation in validations.iter().filter_map(|v| v.violation()) {
            self.events.emit_trace_rejected(&TraceRejectedEvent {
                trace_id: violation.trace_id.clone(),
                reason: violation.reason.to_string(),
                position: violation.position,
            });
        }

        let valency = check_valency_all(traces);

        let report = assemble(&classified, findings, score, validations).with_valency(valency);

        let duration_ms = started.elapsed().as_millis() as u64;
        self.events.emit_analysis_complete(&AnalysisCompleteEvent {
            finding_count: report.summary.finding_count,
            rejected_traces: report.summary.traces_rejected,
            overall_toxicity: report.score.overall_toxicity,
            overall_stability: report.score.overall_stability,
            duration_ms,
        });
        tracing::info!(
            components = report.summary.component_count,
            edges = report.summary.edge_count,
            findings = report.summary.finding_count,
            traces_rejected = report.summary.traces_rejected,
            valency_unbalanced = report.summary.valency_unbalanced,
            overall_toxicity = report.score.overall_toxicity,
            duration_ms,
            "analysis complete"
        );

        report
    }

    fn fail(&self, error: ValidationError) -> PipelineError {
        tracing::warn!(error = %error, "ingestion rejected");
        self.events.emit_error(&ErrorEvent {
            message: error.to_string(),
            error_code: error.error_code().to_string(),
        });
        PipelineError::from(error)
    }
}
