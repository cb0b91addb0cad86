//! Trace validation: shape scan, then correlation and status rules.

use rayon::prelude::*;
use valence_core::config::PatternConfig;

use super::automaton::{scan, Shape, ShapeError};
use super::ledger::TraceLedger;
use super::types::{Pattern, PatternViolation, ValidationOutcome, ViolationReason};
use crate::model::graph::Graph;
use crate::model::trace::{Choreography, InteractionTrace, TraceInput, TraceStatus};

/// Result of scanning one trace's steps.
pub(crate) type ScanResult = Result<Shape, ShapeError>;

/// Validates traces against the permitted interaction patterns.
///
/// Shape matching depends only on the trace (and the optional component
/// catalog). Correlation checks depend on which traces were accepted
/// earlier, which the caller's [`TraceLedger`] records.
#[derive(Debug, Clone)]
pub struct PatternValidator<'g> {
    catalog: Option<&'g Graph>,
    parallel_trace_threshold: usize,
}

/// One input with the scan of its trace or sub-traces.
enum Scanned<'a> {
    Single(&'a InteractionTrace, ScanResult),
    Choreography(&'a Choreography, Vec<ScanResult>),
}

impl<'g> PatternValidator<'g> {
    pub fn new(config: &PatternConfig) -> Self {
        Self {
            catalog: None,
            parallel_trace_threshold: config.effective_parallel_trace_threshold(),
        }
    }

    /// Check step components exist in `graph` and admit their roles.
    pub fn with_catalog(mut self, graph: &'g Graph) -> Self {
        self.catalog = Some(graph);
        self
    }

    /// Validate one standalone trace. Accepted traces are recorded in `ledger`.
    pub fn validate(
        &self,
        trace: &InteractionTrace,
        ledger: &mut TraceLedger,
    ) -> Result<Pattern, PatternViolation> {
        let shape = self.scan(trace);
        self.resolve(trace, shape, ledger)
    }

    /// Validate every input in order against a fresh ledger.
    pub fn validate_all<'a>(&self, inputs: &'a [TraceInput]) -> Vec<ValidationOutcome> {
        let scan_input = |input: &'a TraceInput| match input {
            TraceInput::Single(trace) => Scanned::Single(trace, self.scan(trace)),
            TraceInput::Choreography(ch) => Scanned::Choreography(
                ch,
                ch.sub_traces.iter().map(|t| self.scan(t)).collect(),
            ),
        };
        let parallel = inputs.len() >= self.parallel_trace_threshold;
        let scanned: Vec<Scanned<'_>> = if parallel {
            inputs.par_iter().map(scan_input).collect()
        } else {
            inputs.iter().map(scan_input).collect()
        };

        let mut ledger = TraceLedger::new();
        let outcomes: Vec<ValidationOutcome> = scanned
            .into_iter()
            .map(|scanned| match scanned {
                Scanned::Single(trace, shape) => ValidationOutcome::from((
                    trace.id.clone(),
                    self.resolve(trace, shape, &mut ledger),
                )),
                Scanned::Choreography(ch, shapes) => ValidationOutcome::from((
                    ch.id.clone(),
                    self.resolve_choreography(ch, shapes, &mut ledger),
                )),
            })
            .collect();

        let rejected = outcomes.iter().filter(|o| !o.is_match()).count();
        tracing::debug!(
            traces = inputs.len(),
            rejected,
            parallel,
            "traces validated"
        );
        outcomes
    }

    pub(crate) fn scan(&self, trace: &InteractionTrace) -> ScanResult {
        scan(&trace.steps, self.catalog)
    }

    fn resolve(
        &self,
        trace: &InteractionTrace,
        shape: ScanResult,
        ledger: &mut TraceLedger,
    ) -> Result<Pattern, PatternViolation> {
        let reject = |reason, position| PatternViolation::new(&trace.id, reason, position);

        if !ledger.claim(&trace.id) {
            return Err(reject(
                ViolationReason::DuplicateTraceId {
                    trace_id: trace.id.clone(),
                },
                0,
            ));
        }

        let pattern = match shape {
            Ok(Shape::Matched(pattern)) => pattern,
            Ok(Shape::Prefix { pattern, expected }) => {
                return Err(reject(
                    ViolationReason::Incomplete { pattern, expected },
                    trace.steps.len(),
                ))
            }
            Err((reason, position)) => return Err(reject(reason, position)),
        };

        if trace.status == TraceStatus::Compensated {
            return Err(reject(ViolationReason::CompensationWithoutFailure, 0));
        }

        check_correlation(pattern, trace.correlation_id.as_deref(), ledger)
            .map_err(|reason| reject(reason, 0))?;

        ledger.record(&trace.id, pattern);
        Ok(pattern)
    }
}

/// Correlation rules for a trace outside any choreography.
pub(crate) fn check_correlation(
    pattern: Pattern,
    correlation_id: Option<&str>,
    ledger: &TraceLedger,
) -> Result<(), ViolationReason> {
    let Some(id) = correlation_id else {
        return if pattern.requires_correlation() {
            Err(ViolationReason::MissingCorrelation { pattern })
        } else {
            Ok(())
        };
    };

    let target = ledger
        .pattern_of(id)
        .ok_or_else(|| ViolationReason::UnknownCorrelation {
            correlation_id: id.to_string(),
        })?;
    if !target.accepts_correlation_from(pattern) {
        return Err(ViolationReason::CorrelationTarget {
            correlation_id: id.to_string(),
            pattern,
            target,
        });
    }
    Ok(())
}
