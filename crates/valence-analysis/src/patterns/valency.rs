//! Valency conservation: a trace consumes as many bonds as it produces.
//!
//! Steps without a recorded valency count as `[0, 0]`. Traces where no step
//! records one are not checked.

use serde::{Deserialize, Serialize};

use crate::model::trace::{InteractionTrace, Step, TraceInput};

/// Summed valency of one trace or choreography.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValencyBalance {
    pub conserved: bool,
    pub total_in: u64,
    pub total_out: u64,
}

impl ValencyBalance {
    fn of_steps<'a>(steps: impl Iterator<Item = &'a Step>) -> Self {
        let (total_in, total_out) = steps
            .filter_map(|s| s.valency)
            .fold((0u64, 0u64), |(i, o), v| {
                (i + u64::from(v.input), o + u64::from(v.output))
            });
        Self {
            conserved: total_in == total_out,
            total_in,
            total_out,
        }
    }

    /// Output minus input. Positive when the trace produces more than it consumes.
    pub fn imbalance(&self) -> i64 {
        self.total_out as i64 - self.total_in as i64
    }
}

/// Valency balance of one input, tagged with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceValency {
    pub trace_id: String,
    #[serde(flatten)]
    pub balance: ValencyBalance,
}

/// Sum the valency of every step in `trace`.
pub fn check_valency(trace: &InteractionTrace) -> ValencyBalance {
    ValencyBalance::of_steps(trace.steps.iter())
}

/// Balance per input that records valency on at least one step. A
/// choreography is summed over all its sub-traces.
pub fn check_valency_all(inputs: &[TraceInput]) -> Vec<TraceValency> {
    inputs
        .iter()
        .filter_map(|input| {
            let balance = match input {
                TraceInput::Single(trace) => {
                    if !declares_valency(trace) {
                        return None;
                    }
                    check_valency(trace)
                }
                TraceInput::Choreography(ch) => {
                    if !ch.sub_traces.iter().any(declares_valency) {
                        return None;
                    }
                    ValencyBalance::of_steps(ch.sub_traces.iter().flat_map(|t| t.steps.iter()))
                }
            };
            if !balance.conserved {
                tracing::debug!(
                    trace = input.id(),
                    total_in = balance.total_in,
                    total_out = balance.total_out,
                    "valency not conserved"
                );
            }
            Some(TraceValency {
                trace_id: input.id().to_string(),
                balance,
            })
        })
        .collect()
}

fn declares_valency(trace: &InteractionTrace) -> bool {
    trace.steps.iter().any(|s| s.valency.is_some())
}
