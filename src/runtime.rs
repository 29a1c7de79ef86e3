//! Verification runtime: loads the trace, runs the reducer, logs passes.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::config::CheckConfig;
use crate::engine::{Reduction, RewriteEngine};
use crate::loader::{self, TraceError};
use crate::trace::Trace;

/// One verification run: a loaded trace plus the engine that reduces it.
#[derive(Debug)]
pub struct CheckRuntime {
    engine: RewriteEngine,
    config: CheckConfig,
    trace: Trace,
    pass_log: Option<BufWriter<File>>,
}

impl CheckRuntime {
    /// Loads the transitions log named by the config. Any loader error
    /// aborts here, before reduction is attempted.
    pub fn load(config: CheckConfig) -> Result<Self, TraceError> {
        let trace = loader::load_trace(&config.log_path)?;

        let pass_log = config
            .pass_log_path
            .as_ref()
            .and_then(|p| File::create(p).ok().map(BufWriter::new));

        Ok(Self {
            engine: RewriteEngine::with_invariant_rules(),
            config,
            trace,
            pass_log,
        })
    }

    /// Reduces the loaded trace to a verdict, emitting the per-pass logs.
    pub fn run(&mut self) -> Reduction {
        let reduction = self.engine.reduce(self.trace.clone());

        for (i, trace) in reduction.passes.iter().enumerate() {
            let pass = i + 1;
            tracing::debug!(pass, length = trace.len(), "reduction pass");
            if self.config.print_pass_trace {
                eprintln!("[tracecheck] after pass {pass}: {:?}", trace.encoded());
            }
            if let Some(ref mut w) = self.pass_log {
                let _ = writeln!(
                    w,
                    "{}",
                    serde_json::json!({
                        "pass": pass,
                        "length": trace.len(),
                        "trace": trace.encoded(),
                    })
                );
                let _ = w.flush();
            }
        }

        reduction
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::path::PathBuf;

    fn write_log(dir: &tempfile::TempDir, lines: &[&str]) -> PathBuf {
        let path = dir.path().join("transitions.log");
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn load_then_run_reaches_a_verdict() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(&dir, &["T9", "T10", "T11", "T12"]);

        let mut runtime = CheckRuntime::load(CheckConfig::new(path)).unwrap();
        assert_eq!(runtime.trace().encoded(), "9ABC");
        assert!(runtime.run().is_satisfied());
    }

    #[test]
    fn pass_log_records_every_pass() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(&dir, &["T1", "T9", "T10", "T11", "T12", "T2", "T4", "T6", "T8"]);
        let pass_log = dir.path().join("passes.ndjson");

        let config = CheckConfig::new(path).with_pass_log_path(pass_log.clone());
        let mut runtime = CheckRuntime::load(config).unwrap();
        let reduction = runtime.run();
        assert!(reduction.is_satisfied());
        drop(runtime);

        let logged = std::fs::read_to_string(&pass_log).unwrap();
        let records: Vec<serde_json::Value> = logged
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), reduction.passes.len());
        assert_eq!(records[0]["pass"], 1);
        assert_eq!(records[0]["trace"], "9ABC");
    }

    #[test]
    fn loader_errors_surface_before_reduction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(&dir, &["T1", "garbage"]);

        let err = CheckRuntime::load(CheckConfig::new(path)).unwrap_err();
        assert!(matches!(err, TraceError::MalformedLine { line: 2, .. }));
    }
}
