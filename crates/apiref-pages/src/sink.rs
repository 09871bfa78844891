//! Page output boundary.

/// Failed to hand a page to the external writer.
#[derive(Debug, thiserror::Error)]
#[error("failed to write page {filename}: {source}")]
pub struct SinkError {
    /// Relative filename of the page.
    pub filename: String,
    /// Underlying I/O failure.
    #[source]
    pub source: std::io::Error,
}

/// Receives finished pages. One call per page unit, full overwrite; a
/// write failure aborts the run.
pub trait PageSink {
    /// Write one page under its relative filename.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] on write failure.
    fn write_page(&mut self, filename: &str, html: &str) -> Result<(), SinkError>;
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: Vec<(String, String)>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All pages in write order as `(filename, html)` pairs.
    pub fn pages(&self) -> &[(String, String)] {
        &self.pages
    }

    /// The HTML of the page with the given filename, if written.
    pub fn page(&self, filename: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, html)| html.as_str())
    }
}

impl PageSink for MemorySink {
    fn write_page(&mut self, filename: &str, html: &str) -> Result<(), SinkError> {
        // Full overwrite semantics, matching the filesystem sink.
        if let Some(existing) = self.pages.iter_mut().find(|(name, _)| name == filename) {
            existing.1 = html.to_owned();
        } else {
            self.pages.push((filename.to_owned(), html.to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_overwrites() {
        let mut sink = MemorySink::new();
        sink.write_page("a.html", "<p>one</p>").unwrap();
        sink.write_page("a.html", "<p>two</p>").unwrap();
        assert_eq!(sink.pages().len(), 1);
        assert_eq!(sink.page("a.html"), Some("<p>two</p>"));
    }
}
