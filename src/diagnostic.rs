//! Report formatting for verification verdicts.

use crate::engine::{Reduction, Verdict};
use crate::trace::Trace;

const BANNER: &str = "* --------------------------------------------------------- *";

/// Formats the FAIL body: the unreducible residue in decoded label form.
pub fn format_violation(residue: &Trace, passes: usize) -> String {
    format!(
        "Petri net invariants failed after {} pass{}: {}",
        passes,
        if passes == 1 { "" } else { "es" },
        residue
    )
}

/// Formats the full two-line-banner report for a reduction outcome.
pub fn format_report(reduction: &Reduction) -> String {
    let body = match &reduction.verdict {
        Verdict::Satisfied => "-- Petri net invariants satisfied --".to_string(),
        Verdict::Violated { residue } => format_violation(residue, reduction.passes.len()),
    };
    format!("{BANNER}\n\n{body}\n\n{BANNER}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RewriteEngine;

    #[test]
    fn satisfied_report_carries_the_banner() {
        let reduction = RewriteEngine::with_invariant_rules().reduce(Trace::new());
        let report = format_report(&reduction);
        assert!(report.starts_with(BANNER));
        assert!(report.ends_with(&format!("{BANNER}\n")));
        assert!(report.contains("invariants satisfied"));
    }

    #[test]
    fn violation_report_shows_the_decoded_residue() {
        let trace = Trace::from_encoded("19A").unwrap();
        let reduction = RewriteEngine::with_invariant_rules().reduce(trace);
        let report = format_report(&reduction);
        assert!(report.contains("T1T9T10"));
        assert!(!report.contains("T1T9TA"));
    }
}
