//! Record of traces seen so far in a validation run.

use valence_core::types::collections::{FxHashMap, FxHashSet};

use super::types::Pattern;

/// Trace ids seen in a run and the pattern of each accepted one.
///
/// Correlation ids resolve against accepted traces only. Every id, accepted
/// or not, is claimed so a later trace cannot reuse it.
#[derive(Debug, Clone, Default)]
pub struct TraceLedger {
    claimed: FxHashSet<String>,
    accepted: FxHashMap<String, Pattern>,
}

impl TraceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`. Returns `false` if it was already claimed.
    pub fn claim(&mut self, id: &str) -> bool {
        if self.claimed.contains(id) {
            return false;
        }
        self.claimed.insert(id.to_string())
    }

    pub fn is_claimed(&self, id: &str) -> bool {
        self.claimed.contains(id)
    }

    /// Record an accepted trace. Also claims its id.
    pub fn record(&mut self, id: &str, pattern: Pattern) {
        self.claim(id);
        self.accepted.insert(id.to_string(), pattern);
    }

    /// Pattern of the accepted trace `id`.
    pub fn pattern_of(&self, id: &str) -> Option<Pattern> {
        self.accepted.get(id).copied()
    }

    /// Number of accepted traces.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}
