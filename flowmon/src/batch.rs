use anyhow::{Context as _, Result};
use flowmon_core::{
    FlowReport,
    table::{Console, Latex, TableFormat as _},
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

/// One report to extract and the file its LaTeX table is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// the jobs of [`JOBS`](crate::defaults::JOBS), all relative to `dir`
    pub fn defaults_in(dir: impl AsRef<Path>) -> Vec<Self> {
        let dir = dir.as_ref();
        crate::defaults::JOBS
            .iter()
            .map(|(input, output)| Self::new(dir.join(input), dir.join(output)))
            .collect()
    }

    /// extract the report, print its table to `console` and write its
    /// LaTeX table
    ///
    /// Nothing is written to the output file if the report cannot be
    /// extracted.
    pub fn run(&self, console: &mut impl Write) -> Result<()> {
        info!(input = %self.input.display(), "extracting flow monitor report");

        let report = FlowReport::from_path(&self.input)
            .with_context(|| format!("Failed to extract {}", self.input.display()))?;
        let table = report.to_table();

        writeln!(console, "{}", Console::default().render(&table))
            .context("Failed to print the table")?;

        let latex = Latex::default().render(&table);
        fs::write(&self.output, latex)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        info!(
            output = %self.output.display(),
            flows = report.len(),
            unmatched = report.unmatched().count(),
            "table written"
        );

        Ok(())
    }
}

/// run the jobs in order, stopping at the first failure
pub fn run(jobs: &[Job], console: &mut impl Write) -> Result<()> {
    for job in jobs {
        job.run(console)?;
    }
    Ok(())
}
