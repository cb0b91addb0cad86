//! The four trace grammars as deterministic automata, advanced together in
//! one left-to-right scan.
//!
//! Each grammar is a run of role segments (`C A+ G+`). Adjacent segments never
//! share a role, so a cursor on the last matched segment is a complete DFA
//! state: a step either repeats the current segment, opens the next one, or
//! kills the automaton.

use super::types::{Pattern, ViolationReason};
use crate::model::graph::Graph;
use crate::model::trace::Step;
use crate::model::types::Role;

use Role::{Aggregate as A, Connector as C, GenesisEvent as G, Transformation as T};

#[derive(Debug, Clone, Copy)]
struct Segment {
    role: Role,
    repeats: bool,
}

const fn one(role: Role) -> Segment {
    Segment {
        role,
        repeats: false,
    }
}

const fn many(role: Role) -> Segment {
    Segment {
        role,
        repeats: true,
    }
}

/// A single-trace grammar.
#[derive(Debug)]
pub(crate) struct Grammar {
    pattern: Pattern,
    segments: &'static [Segment],
}

/// Grammars in tie-break order: when several are still alive, the first
/// one is taken as the trace's intended pattern.
pub(crate) const GRAMMARS: [Grammar; 4] = [
    Grammar {
        pattern: Pattern::CommandHandling,
        segments: &[one(C), many(A), many(G)],
    },
    Grammar {
        pattern: Pattern::PureQuery,
        segments: &[one(C), many(T), one(C)],
    },
    Grammar {
        pattern: Pattern::EventReaction,
        segments: &[one(G), one(C), many(A), many(G)],
    },
    Grammar {
        pattern: Pattern::CorrectiveReaction,
        segments: &[one(G), one(C), many(A), one(C)],
    },
];

/// DFA state: nothing consumed yet, or positioned on a matched segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Start,
    At(usize),
}

impl Grammar {
    fn advance(&self, cursor: Cursor, role: Role) -> Option<Cursor> {
        match cursor {
            Cursor::Start => (self.segments[0].role == role).then_some(Cursor::At(0)),
            Cursor::At(i) => {
                let current = self.segments[i];
                if current.repeats && current.role == role {
                    Some(Cursor::At(i))
                } else {
                    match self.segments.get(i + 1) {
                        Some(next) if next.role == role => Some(Cursor::At(i + 1)),
                        _ => None,
                    }
                }
            }
        }
    }

    fn accepts(&self, cursor: Cursor) -> bool {
        cursor == Cursor::At(self.segments.len() - 1)
    }

    /// Roles that keep this automaton alive from `cursor`.
    fn expected(&self, cursor: Cursor) -> Vec<Role> {
        match cursor {
            Cursor::Start => vec![self.segments[0].role],
            Cursor::At(i) => {
                let mut roles = Vec::with_capacity(2);
                if self.segments[i].repeats {
                    roles.push(self.segments[i].role);
                }
                if let Some(next) = self.segments.get(i + 1) {
                    roles.push(next.role);
                }
                roles
            }
        }
    }
}

/// How a scan that consumed every step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shape {
    /// Exactly one grammar accepts.
    Matched(Pattern),
    /// At least one grammar is still alive but none accepts.
    Prefix { pattern: Pattern, expected: Vec<Role> },
}

impl Shape {
    /// The matched pattern, or the one a prefix was heading for.
    pub(crate) fn intended(&self) -> Pattern {
        match self {
            Self::Matched(p) | Self::Prefix { pattern: p, .. } => *p,
        }
    }
}

/// A scan that stopped early: the reason and the offending step index.
pub(crate) type ShapeError = (ViolationReason, usize);

/// Scan `steps` once, advancing all four automata together.
///
/// With a catalog, each step's component must exist and its kind must admit
/// the step's role; the first such failure wins over grammar failures at
/// later positions.
pub(crate) fn scan(steps: &[Step], catalog: Option<&Graph>) -> Result<Shape, ShapeError> {
    if steps.is_empty() {
        return Err((ViolationReason::EmptyTrace, 0));
    }

    let mut cursors: [Option<Cursor>; 4] = [Some(Cursor::Start); 4];

    for (position, step) in steps.iter().enumerate() {
        if let Some(graph) = catalog {
            check_component(graph, step).map_err(|reason| (reason, position))?;
        }

        let mut next: [Option<Cursor>; 4] = [None; 4];
        for (slot, (grammar, cursor)) in next.iter_mut().zip(GRAMMARS.iter().zip(cursors)) {
            *slot = cursor.and_then(|c| grammar.advance(c, step.role));
        }

        if next.iter().all(Option::is_none) {
            return Err((rejection(&cursors, step.role), position));
        }
        cursors = next;
    }

    let mut intended: Option<(Pattern, Vec<Role>)> = None;
    for (grammar, cursor) in GRAMMARS.iter().zip(cursors) {
        let Some(cursor) = cursor else { continue };
        if grammar.accepts(cursor) {
            return Ok(Shape::Matched(grammar.pattern));
        }
        if intended.is_none() {
            intended = Some((grammar.pattern, grammar.expected(cursor)));
        }
    }

    match intended {
        Some((pattern, expected)) => Ok(Shape::Prefix { pattern, expected }),
        // unreachable: the loop returns as soon as every automaton is dead
        None => Err((ViolationReason::EmptyTrace, steps.len())),
    }
}

fn check_component(graph: &Graph, step: &Step) -> Result<(), ViolationReason> {
    match graph.component(&step.component) {
        None => Err(ViolationReason::UnknownComponent {
            component: step.component.clone(),
        }),
        Some(component) if !component.kind.admits(step.role) => Err(ViolationReason::RoleMismatch {
            component: step.component.clone(),
            role: step.role,
        }),
        Some(_) => Ok(()),
    }
}

/// Explain why `found` killed every automaton still alive in `cursors`.
fn rejection(cursors: &[Option<Cursor>; 4], found: Role) -> ViolationReason {
    let alive: Vec<(&Grammar, Cursor)> = GRAMMARS
        .iter()
        .zip(cursors.iter())
        .filter_map(|(g, c)| c.map(|c| (g, c)))
        .collect();
    let at_start = alive.iter().all(|(_, c)| *c == Cursor::Start);

    if !at_start {
        if let Some((intended, _)) = alive.first() {
            let pattern = intended.pattern;
            if pattern.is_command_side() && found == T {
                return ViolationReason::TransformationInCommand { pattern };
            }
            if pattern == Pattern::PureQuery && matches!(found, A | G) {
                return ViolationReason::QueryPurity { found };
            }
        }
    }

    let mut expected: Vec<Role> = alive
        .iter()
        .flat_map(|(g, c)| g.expected(*c))
        .collect();
    expected.sort_unstable();
    expected.dedup();
    ViolationReason::UnexpectedStep { expected, found }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(signature: &str) -> Vec<Step> {
        signature
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let role = match ch {
                    'C' => C,
                    'A' => A,
                    'T' => T,
                    'G' => G,
                    other => panic!("bad role symbol {other}"),
                };
                Step::new(format!("s{i}"), role)
            })
            .collect()
    }

    fn matched(signature: &str) -> Option<Pattern> {
        match scan(&steps(signature), None) {
            Ok(Shape::Matched(p)) => Some(p),
            _ => None,
        }
    }

    #[test]
    fn grammars_accept_their_shapes() {
        assert_eq!(matched("CAG"), Some(Pattern::CommandHandling));
        assert_eq!(matched("CAAAGG"), Some(Pattern::CommandHandling));
        assert_eq!(matched("CTC"), Some(Pattern::PureQuery));
        assert_eq!(matched("CTTTC"), Some(Pattern::PureQuery));
        assert_eq!(matched("GCAG"), Some(Pattern::EventReaction));
        assert_eq!(matched("GCAAGG"), Some(Pattern::EventReaction));
        assert_eq!(matched("GCAC"), Some(Pattern::CorrectiveReaction));
        assert_eq!(matched("GCAAC"), Some(Pattern::CorrectiveReaction));
    }

    #[test]
    fn grammars_are_disjoint() {
        // every short signature matches at most one grammar
        let symbols = ['C', 'A', 'T', 'G'];
        let mut signatures = vec![String::new()];
        for _ in 0..5 {
            signatures = signatures
                .iter()
                .flat_map(|s| symbols.iter().map(move |c| format!("{s}{c}")))
                .collect();
            for sig in &signatures {
                let roles: Vec<Role> = steps(sig).iter().map(|s| s.role).collect();
                let accepting = GRAMMARS
                    .iter()
                    .filter(|g| {
                        let mut cursor = Some(Cursor::Start);
                        for role in &roles {
                            cursor = cursor.and_then(|c| g.advance(c, *role));
                        }
                        cursor.is_some_and(|c| g.accepts(c))
                    })
                    .count();
                assert!(accepting <= 1, "{sig} matches {accepting} grammars");
            }
        }
    }

    #[test]
    fn trailing_transformation_in_command() {
        let err = scan(&steps("CAGT"), None).unwrap_err();
        assert_eq!(
            err,
            (
                ViolationReason::TransformationInCommand {
                    pattern: Pattern::CommandHandling
                },
                3
            )
        );
    }

    #[test]
    fn aggregate_in_query() {
        let err = scan(&steps("CTA"), None).unwrap_err();
        assert_eq!(err, (ViolationReason::QueryPurity { found: A }, 2));
    }

    #[test]
    fn bad_first_step() {
        let err = scan(&steps("AG"), None).unwrap_err();
        assert_eq!(
            err,
            (
                ViolationReason::UnexpectedStep {
                    expected: vec![C, G],
                    found: A
                },
                0
            )
        );
    }

    #[test]
    fn prefix_reports_intended_pattern() {
        assert_eq!(
            scan(&steps("CA"), None).unwrap(),
            Shape::Prefix {
                pattern: Pattern::CommandHandling,
                expected: vec![A, G],
            }
        );
        assert_eq!(
            scan(&steps("GCA"), None).unwrap(),
            Shape::Prefix {
                pattern: Pattern::EventReaction,
                expected: vec![A, G],
            }
        );
    }

    #[test]
    fn step_after_complete_pattern() {
        let err = scan(&steps("CTCC"), None).unwrap_err();
        assert_eq!(
            err,
            (
                ViolationReason::UnexpectedStep {
                    expected: vec![],
                    found: C
                },
                3
            )
        );
    }

    #[test]
    fn empty_trace() {
        assert_eq!(
            scan(&[], None).unwrap_err(),
            (ViolationReason::EmptyTrace, 0)
        );
    }
}
