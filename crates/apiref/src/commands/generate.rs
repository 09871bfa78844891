//! `apiref generate` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use apiref_model::ApiModel;
use apiref_pages::{PageGenerator, PageSink, SinkError, TracingDiagnostics};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Site stylesheet, written next to the generated pages.
const STYLESHEET: &str = include_str!("../../assets/apiref.css");

/// Site logo, written next to the generated pages.
const LOGO: &str = include_str!("../../assets/apiref-logo.svg");

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to the API model JSON file.
    #[arg(short, long)]
    model: PathBuf,

    /// Output directory for the generated pages.
    #[arg(short, long)]
    out: PathBuf,

    /// Enable verbose output (log each generated page).
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if the model fails to load or page generation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let model = ApiModel::load(&self.model)?;
        fs::create_dir_all(&self.out)?;

        output.info(&format!("Model: {}", self.model.display()));
        output.info(&format!("Output directory: {}", self.out.display()));

        let mut sink = FsSink::new(&self.out);
        let diagnostics = TracingDiagnostics;
        PageGenerator::new(&model, &mut sink, &diagnostics).run()?;

        fs::write(self.out.join("apiref.css"), STYLESHEET)?;
        fs::write(self.out.join("apiref-logo.svg"), LOGO)?;

        output.success(&format!("Generated {} pages", sink.written));
        Ok(())
    }
}

/// Page sink writing each page as one file in the output directory.
struct FsSink {
    dir: PathBuf,
    written: usize,
}

impl FsSink {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            written: 0,
        }
    }
}

impl PageSink for FsSink {
    fn write_page(&mut self, filename: &str, html: &str) -> Result<(), SinkError> {
        fs::write(self.dir.join(filename), html).map_err(|source| SinkError {
            filename: filename.to_owned(),
            source,
        })?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fs_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSink::new(dir.path());
        sink.write_page("index.html", "<p>root</p>").unwrap();
        sink.write_page("pkg.html", "<p>pkg</p>").unwrap();
        assert_eq!(sink.written, 2);
        let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(html, "<p>root</p>");
    }

    #[test]
    fn test_fs_sink_reports_filename_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        let mut sink = FsSink::new(&missing);
        let err = sink.write_page("index.html", "<p></p>").unwrap_err();
        assert_eq!(err.filename, "index.html");
    }
}
