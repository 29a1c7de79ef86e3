//! Transition alphabet for the monitored net.
//!
//! Log lines reference transitions by their multi-digit labels (`T1`..`T12`);
//! internally each transition also has a single-character symbol so a trace
//! can be rendered as one unambiguous string (`T10` would otherwise collide
//! with `T1` followed by a stray `0` under naive text matching).

use serde::{Deserialize, Serialize};

/// One fireable transition of the monitored Petri net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
    T9,
    T10,
    T11,
    T12,
}

impl Transition {
    /// All 12 transitions, in label order.
    pub const ALL: [Transition; 12] = [
        Transition::T1,
        Transition::T2,
        Transition::T3,
        Transition::T4,
        Transition::T5,
        Transition::T6,
        Transition::T7,
        Transition::T8,
        Transition::T9,
        Transition::T10,
        Transition::T11,
        Transition::T12,
    ];

    /// Parses a log token (`"T1"`..`"T12"`, case-insensitive).
    pub fn from_token(token: &str) -> Option<Transition> {
        let digits = match token.as_bytes() {
            [b't' | b'T', rest @ ..] => rest,
            _ => return None,
        };
        let n: u8 = std::str::from_utf8(digits).ok()?.parse().ok()?;
        match n {
            1..=12 => Some(Transition::ALL[usize::from(n) - 1]),
            _ => None,
        }
    }

    /// The single-character encoded symbol. `T10`, `T11`, `T12` map to
    /// `A`, `B`, `C` so every transition occupies exactly one character.
    pub fn symbol(self) -> char {
        match self {
            Transition::T1 => '1',
            Transition::T2 => '2',
            Transition::T3 => '3',
            Transition::T4 => '4',
            Transition::T5 => '5',
            Transition::T6 => '6',
            Transition::T7 => '7',
            Transition::T8 => '8',
            Transition::T9 => '9',
            Transition::T10 => 'A',
            Transition::T11 => 'B',
            Transition::T12 => 'C',
        }
    }

    /// Inverse of [`Transition::symbol`].
    pub fn from_symbol(c: char) -> Option<Transition> {
        let t = match c {
            '1' => Transition::T1,
            '2' => Transition::T2,
            '3' => Transition::T3,
            '4' => Transition::T4,
            '5' => Transition::T5,
            '6' => Transition::T6,
            '7' => Transition::T7,
            '8' => Transition::T8,
            '9' => Transition::T9,
            'A' => Transition::T10,
            'B' => Transition::T11,
            'C' => Transition::T12,
            _ => return None,
        };
        Some(t)
    }

    /// The canonical multi-digit label, as it appears in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Transition::T1 => "T1",
            Transition::T2 => "T2",
            Transition::T3 => "T3",
            Transition::T4 => "T4",
            Transition::T5 => "T5",
            Transition::T6 => "T6",
            Transition::T7 => "T7",
            Transition::T8 => "T8",
            Transition::T9 => "T9",
            Transition::T10 => "T10",
            Transition::T11 => "T11",
            Transition::T12 => "T12",
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
