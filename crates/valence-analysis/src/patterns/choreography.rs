//! Choreographies: correlated sub-traces with compensation on failure.

use valence_core::types::collections::FxHashMap;

use super::automaton::Shape;
use super::ledger::TraceLedger;
use super::types::{Pattern, PatternViolation, ViolationReason};
use super::validator::{check_correlation, PatternValidator, ScanResult};
use crate::model::trace::{Choreography, TraceStatus};

impl PatternValidator<'_> {
    /// Validate a choreography. On success the choreography and each of its
    /// matched sub-traces are recorded in `ledger`.
    ///
    /// The first sub-trace correlates like a standalone trace. Every later
    /// sub-trace must correlate to an earlier sub-trace of the same
    /// choreography, so the links form a DAG, and that sibling must be a
    /// valid correlation target for the sub-trace's pattern. After a failed
    /// sub-trace every later one must be a compensated corrective reaction.
    pub fn validate_choreography(
        &self,
        choreography: &Choreography,
        ledger: &mut TraceLedger,
    ) -> Result<Pattern, PatternViolation> {
        let shapes = choreography
            .sub_traces
            .iter()
            .map(|t| self.scan(t))
            .collect();
        self.resolve_choreography(choreography, shapes, ledger)
    }

    pub(crate) fn resolve_choreography(
        &self,
        choreography: &Choreography,
        shapes: Vec<ScanResult>,
        ledger: &mut TraceLedger,
    ) -> Result<Pattern, PatternViolation> {
        let reject = |reason, position, index: Option<usize>| {
            let violation = PatternViolation::new(&choreography.id, reason, position);
            match index {
                Some(i) => violation.in_sub_trace(i),
                None => violation,
            }
        };

        if !ledger.claim(&choreography.id) {
            return Err(reject(
                ViolationReason::DuplicateTraceId {
                    trace_id: choreography.id.clone(),
                },
                0,
                None,
            ));
        }
        if choreography.sub_traces.is_empty() {
            return Err(reject(ViolationReason::EmptyChoreography, 0, None));
        }

        // sub-trace id -> matched pattern, or the intended one if it failed
        let mut local: FxHashMap<&str, Pattern> = FxHashMap::default();
        let mut accepted: Vec<(&str, Pattern)> = Vec::new();
        let mut failed_at: Option<usize> = None;
        let mut compensated = false;

        for (i, (sub, shape)) in choreography.sub_traces.iter().zip(shapes).enumerate() {
            let at = |reason, position| reject(reason, position, Some(i));

            if local.contains_key(sub.id.as_str()) || ledger.is_claimed(&sub.id) {
                return Err(at(
                    ViolationReason::DuplicateTraceId {
                        trace_id: sub.id.clone(),
                    },
                    0,
                ));
            }

            let shape = shape.map_err(|(reason, position)| at(reason, position))?;
            let len = sub.steps.len();

            let pattern = if failed_at.is_some() {
                if sub.status != TraceStatus::Compensated {
                    return Err(at(ViolationReason::UncompensatedAfterFailure, 0));
                }
                match shape {
                    Shape::Matched(Pattern::CorrectiveReaction) => {}
                    Shape::Matched(found) => {
                        return Err(at(
                            ViolationReason::CompensationShape { found: Some(found) },
                            len,
                        ))
                    }
                    Shape::Prefix { .. } => {
                        return Err(at(ViolationReason::CompensationShape { found: None }, len))
                    }
                }
                compensated = true;
                Pattern::CorrectiveReaction
            } else {
                match (sub.status, shape) {
                    (TraceStatus::Compensated, _) => {
                        return Err(at(ViolationReason::CompensationWithoutFailure, 0))
                    }
                    // a failed sub-trace stops partway; it only has to be heading somewhere
                    (TraceStatus::Failed, shape) => {
                        failed_at = Some(i);
                        shape.intended()
                    }
                    (TraceStatus::Completed, Shape::Matched(pattern)) => pattern,
                    (TraceStatus::Completed, Shape::Prefix { pattern, expected }) => {
                        return Err(at(ViolationReason::Incomplete { pattern, expected }, len))
                    }
                }
            };

            if i == 0 {
                check_correlation(pattern, sub.correlation_id.as_deref(), ledger)
                    .map_err(|reason| at(reason, 0))?;
            } else {
                match sub.correlation_id.as_deref() {
                    None => return Err(at(ViolationReason::MissingChoreographyLink, 0)),
                    Some(id) => match local.get(id) {
                        None => {
                            return Err(at(
                                ViolationReason::BrokenChoreographyLink {
                                    correlation_id: id.to_string(),
                                },
                                0,
                            ))
                        }
                        Some(&target) if !target.accepts_correlation_from(pattern) => {
                            return Err(at(
                                ViolationReason::CorrelationTarget {
                                    correlation_id: id.to_string(),
                                    pattern,
                                    target,
                                },
                                0,
                            ))
                        }
                        Some(_) => {}
                    },
                }
            }

            local.insert(sub.id.as_str(), pattern);
            if sub.status != TraceStatus::Failed {
                accepted.push((sub.id.as_str(), pattern));
            }
        }

        if let Some(i) = failed_at {
            if i > 0 && !compensated {
                return Err(reject(ViolationReason::MissingCompensation, i, Some(i)));
            }
        }

        for id in local.keys() {
            ledger.claim(id);
        }
        for (id, pattern) in accepted {
            ledger.record(id, pattern);
        }
        ledger.record(&choreography.id, Pattern::Choreography);

        tracing::debug!(
            choreography = %choreography.id,
            sub_traces = choreography.sub_traces.len(),
            failed = failed_at.is_some(),
            "choreography accepted"
        );
        Ok(Pattern::Choreography)
    }
}
