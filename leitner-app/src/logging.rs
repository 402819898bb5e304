//! `tracing` subscriber setup.
//!
//! `--log-level` wins. Otherwise `LEITNER_LOG` is read as an `EnvFilter`
//! directive list, so `LEITNER_LOG=leitner_core=debug` narrows output to the
//! scheduler. Anything missing or unparsable falls back to `warn`. Logs go to
//! stderr; stdout carries command output only.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::opts::LogLevel;

const ENV_VAR: &str = "LEITNER_LOG";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(ENV_VAR).ok();
    fmt()
        .with_env_filter(filter_for(cli_level, env.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}

fn filter_for(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(lvl) = cli_level {
        return EnvFilter::new(directive(lvl));
    }
    env.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
