//! Extract the per-flow metrics of the flow monitor reports of the
//! simulation runs and write one LaTeX table per report.

mod batch;
mod defaults;

use anyhow::Result;
use std::io;

/// Start the tracing/logging system
///
/// Logs go to stderr, stdout only carries the tables.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let jobs = batch::Job::defaults_in(".");
    batch::run(&jobs, &mut io::stdout().lock())
}
