//! Configuration for a verification run.

use std::path::PathBuf;

/// Configuration for one trace verification.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Path to the transitions log to verify.
    pub log_path: PathBuf,
    /// Optional path for a reduction log (NDJSON, one record per pass).
    pub pass_log_path: Option<PathBuf>,
    /// If true, print the encoded trace after each pass (for debugging).
    pub print_pass_trace: bool,
}

impl CheckConfig {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            pass_log_path: None,
            print_pass_trace: false,
        }
    }

    pub fn with_pass_log_path(mut self, path: PathBuf) -> Self {
        self.pass_log_path = Some(path);
        self
    }

    pub fn with_print_pass_trace(mut self, v: bool) -> Self {
        self.print_pass_trace = v;
        self
    }
}
