use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::config::PulseConfig;
use crate::protocol::{Request, Response};
use crate::session::Session;

/// Counts for the end-of-session log line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub requests: usize,
    pub failures: usize,
}

/// Serve newline-delimited JSON requests from `input` until EOF, writing
/// one response line per request.
pub fn run<R: BufRead, W: Write>(config: PulseConfig, input: R, mut output: W) -> Result<SessionSummary> {
    let mut session = Session::new(config);
    let span = tracing::info_span!("session", id = %session.id());
    let _entered = span.enter();
    tracing::info!("session started");

    let mut summary = SessionSummary::default();

    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => session
                .handle(request)
                .context("Failed to serialize response")?,
            Err(err) => {
                tracing::warn!(error = %err, "malformed request");
                Response::failure("invalid_request", err.to_string())
            }
        };

        summary.requests += 1;
        if !response.is_ok() {
            summary.failures += 1;
        }

        let encoded = serde_json::to_string(&response).context("Failed to serialize response")?;
        writeln!(output, "{encoded}").context("Failed to write response")?;
        output.flush().context("Failed to flush output")?;
    }

    tracing::info!(
        requests = summary.requests,
        failures = summary.failures,
        comments = session.comments().len(),
        "session ended"
    );
    Ok(summary)
}
