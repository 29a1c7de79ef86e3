//! Fixed-point rewrite engine over firing sequences.
//!
//! The engine holds a small ordered set of rewrite rules, each describing one
//! balanced cycle of transitions. A rule is a sequence of pattern atoms:
//! anchors (literal transitions), gaps (zero or more transitions, shortest
//! extension first), and ordered alternations. Rewriting a match deletes the
//! anchors and keeps the gap contents in order, so invariant instances nested
//! inside a gap surface on a later pass without any explicit recursion.
//!
//! Reduction runs one global left-to-right substitution pass at a time until
//! the trace stops changing. An empty result means every fired transition was
//! accounted for by some invariant instance; anything left over is reported
//! as the violating residue.

use crate::trace::Trace;
use crate::transition::Transition;

/// One element of a rule pattern.
#[derive(Debug, Clone)]
pub enum Atom {
    /// A literal transition. Deleted when the rule rewrites.
    Anchor(Transition),
    /// Zero or more transitions, matched lazily. Kept when the rule rewrites.
    Gap,
    /// Ordered alternation: branches are tried first-to-last, and a later
    /// branch is only attempted once every continuation of an earlier one
    /// has failed.
    Alt(Vec<Vec<Atom>>),
}

impl Atom {
    /// Convenience constructor for an alternation.
    pub fn alt<I: IntoIterator<Item = Vec<Atom>>>(branches: I) -> Atom {
        Atom::Alt(branches.into_iter().collect())
    }
}

/// A single rewrite rule. The replacement is implicit: every matched gap
/// fragment survives, in order, and everything else in the match is dropped.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    atoms: Vec<Atom>,
}

impl Rule {
    pub fn new(name: &'static str, atoms: Vec<Atom>) -> Self {
        Self { name, atoms }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Final classification of a reduced trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The trace reduced to the empty sequence: all invariants hold.
    Satisfied,
    /// A fixed point was reached with transitions left over.
    Violated {
        /// The unreducible remainder, in firing order.
        residue: Trace,
    },
}

/// Outcome of a full reduction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub verdict: Verdict,
    /// The trace after each substitution pass, in order. Empty when the
    /// input was already empty or no pass changed anything.
    pub passes: Vec<Trace>,
}

impl Reduction {
    pub fn is_satisfied(&self) -> bool {
        matches!(self.verdict, Verdict::Satisfied)
    }
}

/// Backtracking continuation: the atom sequences still to match after the
/// current one, innermost first.
enum Cont<'a> {
    Done,
    Seq(&'a [Atom], &'a Cont<'a>),
}

/// The rewrite engine proper. Holds only the static rule set; reduction is a
/// pure function of the input trace, so one engine may serve any number of
/// traces.
#[derive(Debug, Default)]
pub struct RewriteEngine {
    rules: Vec<Rule>,
}

impl RewriteEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Order matters: earlier rules win ties at a position.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// An engine loaded with the two invariant cycles of the monitored net:
    ///
    /// ```text
    /// T1 .. (T2 .. T4 .. T6 | T3 .. T5 .. T7) .. T8
    /// T9 .. T10 .. T11 .. T12
    /// ```
    pub fn with_invariant_rules() -> Self {
        use Atom::{Anchor, Gap};
        use Transition::*;

        let mut engine = Self::new();
        engine.add_rule(Rule::new(
            "T1-T8 cycle",
            vec![
                Anchor(T1),
                Gap,
                Atom::alt([
                    vec![Anchor(T2), Gap, Anchor(T4), Gap, Anchor(T6)],
                    vec![Anchor(T3), Gap, Anchor(T5), Gap, Anchor(T7)],
                ]),
                Gap,
                Anchor(T8),
            ],
        ));
        engine.add_rule(Rule::new(
            "T9-T12 cycle",
            vec![
                Anchor(T9),
                Gap,
                Anchor(T10),
                Gap,
                Anchor(T11),
                Gap,
                Anchor(T12),
            ],
        ));
        engine
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// One global substitution pass: scans left to right, replaces every
    /// non-overlapping match found in this pass, copies everything else
    /// through unchanged.
    pub fn reduce_pass(&self, input: &[Transition]) -> Vec<Transition> {
        let mut out = Vec::with_capacity(input.len());
        let mut pos = 0;
        while pos < input.len() {
            match self.match_at(input, pos) {
                Some((end, gaps)) => {
                    for range in gaps {
                        out.extend_from_slice(&input[range]);
                    }
                    pos = end;
                }
                None => {
                    out.push(input[pos]);
                    pos += 1;
                }
            }
        }
        out
    }

    /// Reduces a trace to its fixed point and classifies the result.
    ///
    /// Terminates unconditionally: a pass that changes the trace strictly
    /// shortens it (anchors are deleted, gap content kept), and a pass that
    /// changes nothing is the fixed point.
    pub fn reduce(&self, trace: Trace) -> Reduction {
        let mut current = trace;
        let mut passes = Vec::new();
        loop {
            if current.is_empty() {
                return Reduction {
                    verdict: Verdict::Satisfied,
                    passes,
                };
            }
            let next: Trace = self.reduce_pass(current.as_slice()).into();
            if next == current {
                return Reduction {
                    verdict: Verdict::Violated { residue: current },
                    passes,
                };
            }
            passes.push(next.clone());
            current = next;
        }
    }

    /// Tries every rule, in order, anchored at `pos`. On a match returns the
    /// end position and the surviving gap ranges in pattern order.
    fn match_at(
        &self,
        input: &[Transition],
        pos: usize,
    ) -> Option<(usize, Vec<std::ops::Range<usize>>)> {
        for rule in &self.rules {
            let mut gaps = Vec::new();
            if let Some(end) = match_atoms(input, pos, &rule.atoms, &Cont::Done, &mut gaps) {
                return Some((end, gaps));
            }
        }
        None
    }
}

/// Matches `atoms` at `pos`, continuing into `cont` when the sequence is
/// exhausted. Gap extents grow shortest-first; alternation branches are tried
/// in order with full backtracking into the continuation. Returns the end
/// position of the overall match and pushes each matched gap range onto
/// `gaps` (truncated again on backtrack).
fn match_atoms(
    input: &[Transition],
    pos: usize,
    atoms: &[Atom],
    cont: &Cont<'_>,
    gaps: &mut Vec<std::ops::Range<usize>>,
) -> Option<usize> {
    let Some((first, rest)) = atoms.split_first() else {
        return match cont {
            Cont::Done => Some(pos),
            Cont::Seq(next, outer) => match_atoms(input, pos, next, outer, gaps),
        };
    };
    match first {
        Atom::Anchor(t) => {
            if input.get(pos) == Some(t) {
                match_atoms(input, pos + 1, rest, cont, gaps)
            } else {
                None
            }
        }
        Atom::Gap => {
            for end in pos..=input.len() {
                let mark = gaps.len();
                gaps.push(pos..end);
                if let Some(stop) = match_atoms(input, end, rest, cont, gaps) {
                    return Some(stop);
                }
                gaps.truncate(mark);
            }
            None
        }
        Atom::Alt(branches) => {
            let after = Cont::Seq(rest, cont);
            for branch in branches {
                let mark = gaps.len();
                if let Some(stop) = match_atoms(input, pos, branch, &after, gaps) {
                    return Some(stop);
                }
                gaps.truncate(mark);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Transition::*;

    fn reduce(encoded: &str) -> Reduction {
        let trace = Trace::from_encoded(encoded).unwrap();
        RewriteEngine::with_invariant_rules().reduce(trace)
    }

    fn residue(reduction: &Reduction) -> String {
        match &reduction.verdict {
            Verdict::Satisfied => String::new(),
            Verdict::Violated { residue } => residue.to_string(),
        }
    }

    /// Test 1: both branches of the first cycle, anchors only.
    #[test]
    fn plain_cycles_reduce_to_empty() {
        assert!(reduce("12468").is_satisfied());
        assert!(reduce("13578").is_satisfied());
        assert!(reduce("9ABC").is_satisfied());
    }

    #[test]
    fn empty_trace_is_satisfied() {
        let reduction = reduce("");
        assert!(reduction.is_satisfied());
        assert!(reduction.passes.is_empty());
    }

    /// Test 2: a nested instance hidden in a gap surfaces on the next pass.
    #[test]
    fn nested_instances_reduce_across_passes() {
        // T9..T12 cycle inside the first gap of a T1..T8 cycle.
        let reduction = reduce("19ABC2468");
        assert!(reduction.is_satisfied());
        assert_eq!(reduction.passes.len(), 2);
        assert_eq!(reduction.passes[0].encoded(), "9ABC");

        // T1..T8 cycle nested in its own first gap.
        assert!(reduce("1124682468").is_satisfied());
        // T1..T8 cycle inside a T9..T12 gap.
        assert!(reduce("9124AB68C").is_satisfied());
    }

    #[test]
    fn concatenated_instances_reduce_in_one_pass() {
        let reduction = reduce("124689ABC");
        assert!(reduction.is_satisfied());
        assert_eq!(reduction.passes.len(), 1);
    }

    /// A single unmatched anchor is its own residue.
    #[test]
    fn lone_anchor_is_violated() {
        let reduction = reduce("1");
        assert_eq!(residue(&reduction), "T1");
        assert!(reduction.passes.is_empty());
    }

    /// Test 3: incomplete cycle, fixed point on the unmodified trace.
    #[test]
    fn incomplete_cycle_is_violated() {
        let reduction = reduce("124");
        assert_eq!(residue(&reduction), "T1T2T4");
        assert!(reduction.passes.is_empty());
    }

    /// The alternation is ordered choice nested inside the rule, not two
    /// flattened rule variants: with the second branch's anchors first, the
    /// lazy leading gap stays empty, the second branch matches, and the
    /// first branch's anchors survive in the trailing gap.
    #[test]
    fn alternation_backtracks_inside_the_enclosing_match() {
        let reduction = reduce("13572468");
        assert_eq!(residue(&reduction), "T2T4T6");
    }

    /// Leftmost match wins: the T9 cycle anchored at position 0 matches
    /// first and the complete T1 cycle inside its gap survives as content
    /// for the next pass.
    #[test]
    fn leftmost_match_is_preferred() {
        let reduction = reduce("9AB12468C");
        assert!(reduction.is_satisfied());
        assert_eq!(reduction.passes[0].encoded(), "12468");
    }

    #[test]
    fn gaps_are_lazy() {
        // Two T9..T12 cycles in sequence: the first match must close at the
        // first T12, not swallow both cycles in one match.
        let reduction = reduce("9ABC9ABC");
        assert!(reduction.is_satisfied());
        assert_eq!(reduction.passes.len(), 1);
    }

    #[test]
    fn reduction_is_deterministic() {
        let a = reduce("19ABC2468124");
        let b = reduce("19ABC2468124");
        assert_eq!(a.passes, b.passes);
        assert_eq!(a.verdict, b.verdict);
    }

    #[test]
    fn rules_can_be_extended() {
        use Atom::{Anchor, Gap};
        let mut engine = RewriteEngine::with_invariant_rules();
        engine.add_rule(Rule::new("T2-T6 pair", vec![Anchor(T2), Gap, Anchor(T6)]));
        let trace = Trace::from_encoded("246").unwrap();
        let reduction = engine.reduce(trace);
        match reduction.verdict {
            Verdict::Violated { ref residue } => assert_eq!(residue.to_string(), "T4"),
            Verdict::Satisfied => panic!("T4 should remain"),
        }
    }
}
