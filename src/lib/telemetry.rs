//! Tracing initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` for developer logs on stderr.
///
/// The launched child owns the terminal, so only warnings surface unless
/// `RUST_LOG` asks for more.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span covering one child process from spawn to exit.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
}

impl LaunchSpan {
    pub fn start(command: &str, arg_count: usize) -> Self {
        let span = info_span!(target: "ccswitch::launcher", "launch", command, arg_count);
        Self {
            span,
            started_at: Instant::now(),
        }
    }

    /// Close the span, recording how the child ended.
    pub fn finish(self, status: &'static str, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "ccswitch::launcher",
            status = status,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Child process finished"
        );
    }
}
