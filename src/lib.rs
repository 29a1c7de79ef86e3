//! Post-hoc Petri net trace validation.
//!
//! This crate checks a recorded firing sequence against the place invariants
//! encoded in the net's structure: the trace is loaded from a transitions
//! log, and a fixed-point rewrite engine repeatedly deletes balanced
//! invariant cycles while keeping whatever fired in between. The trace is
//! valid iff it reduces to the empty sequence; anything left over is
//! reported as the violating residue.

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod loader;
pub mod runtime;
pub mod trace;
pub mod transition;

pub use self::config::CheckConfig;
pub use self::diagnostic::{format_report, format_violation};
pub use self::engine::{Atom, Reduction, RewriteEngine, Rule, Verdict};
pub use self::loader::{load_trace, TraceError};
pub use self::runtime::CheckRuntime;
pub use self::trace::Trace;
pub use self::transition::Transition;
