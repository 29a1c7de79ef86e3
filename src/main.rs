//! Command-line entry point.
//!
//! Usage: `tracecheck [LOG_PATH] [--pass-log PATH] [--print-passes]`
//!
//! Exit codes: 0 when the invariants are satisfied, 1 when the trace
//! violates them, 2 on a malformed or unreadable log.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use tracecheck::{CheckConfig, CheckRuntime, Verdict, format_report};

/// Where the monitored system writes its firing log.
const DEFAULT_LOG_PATH: &str = "data/log/transitions.log";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args() -> Result<CheckConfig> {
    let mut log_path = None;
    let mut pass_log_path = None;
    let mut print_pass_trace = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--pass-log" => {
                let path = args.next().context("--pass-log requires a path")?;
                pass_log_path = Some(PathBuf::from(path));
            }
            "--print-passes" => print_pass_trace = true,
            _ if arg.starts_with("--") => bail!("unknown option {arg}"),
            _ if log_path.is_none() => log_path = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument {arg}"),
        }
    }

    let mut config =
        CheckConfig::new(log_path.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)))
            .with_print_pass_trace(print_pass_trace);
    if let Some(path) = pass_log_path {
        config = config.with_pass_log_path(path);
    }
    Ok(config)
}

fn run() -> Result<Verdict> {
    let config = parse_args()?;
    let mut runtime = CheckRuntime::load(config).context("loading transitions log")?;
    let reduction = runtime.run();
    print!("{}", format_report(&reduction));
    Ok(reduction.verdict)
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(Verdict::Satisfied) => ExitCode::SUCCESS,
        Ok(Verdict::Violated { .. }) => ExitCode::from(1),
        Err(err) => {
            eprintln!("tracecheck: {err:#}");
            ExitCode::from(2)
        }
    }
}
