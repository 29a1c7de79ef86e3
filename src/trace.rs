//! The recorded firing sequence.

use std::fmt;

use crate::transition::Transition;

/// An ordered record of fired transitions, read once from a log and
/// immutable afterwards. The reducer works on slices of it and produces
/// fresh `Trace`s for each rewritten form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace(Vec<Transition>);

impl Trace {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Transition] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Transition> + '_ {
        self.0.iter().copied()
    }

    /// The compact string form: one encoded symbol per transition.
    pub fn encoded(&self) -> String {
        self.0.iter().map(|t| t.symbol()).collect()
    }

    /// Inverse of [`Trace::encoded`]. `None` if any character is outside
    /// the encoded alphabet.
    pub fn from_encoded(s: &str) -> Option<Trace> {
        s.chars().map(Transition::from_symbol).collect()
    }
}

impl From<Vec<Transition>> for Trace {
    fn from(transitions: Vec<Transition>) -> Self {
        Self(transitions)
    }
}

impl FromIterator<Transition> for Trace {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Displays the trace in decoded label form (`T1T2T10`), the shape used
/// when reporting a residue back to the user.
impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.0 {
            f.write_str(t.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Transition::*;

    #[test]
    fn encode_then_decode_is_identity() {
        let trace: Trace = Transition::ALL.into_iter().collect();
        assert_eq!(Trace::from_encoded(&trace.encoded()), Some(trace));
    }

    #[test]
    fn decoding_rejects_unknown_symbols() {
        assert_eq!(Trace::from_encoded("12D"), None);
    }

    #[test]
    fn display_uses_decoded_labels() {
        let trace = Trace::from(vec![T1, T10, T2]);
        assert_eq!(trace.to_string(), "T1T10T2");
        assert_eq!(trace.encoded(), "1A2");
    }

    #[test]
    fn empty_trace_round_trips() {
        assert_eq!(Trace::from_encoded(""), Some(Trace::new()));
        assert_eq!(Trace::new().encoded(), "");
    }
}
