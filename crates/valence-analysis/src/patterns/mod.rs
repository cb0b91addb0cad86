//! Interaction-pattern validation.
//!
//! Four single-trace grammars run as automata over step roles; choreographies
//! chain sub-traces by correlation id and require compensation after failure.
//! Valency conservation is checked separately and never rejects a trace.

mod automaton;
pub mod choreography;
pub mod ledger;
pub mod types;
pub mod valency;
pub mod validator;

pub use ledger::TraceLedger;
pub use types::{Pattern, PatternViolation, ValidationOutcome, ViolationReason};
pub use valency::{check_valency, check_valency_all, TraceValency, ValencyBalance};
pub use validator::PatternValidator;
