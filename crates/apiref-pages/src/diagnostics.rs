//! Injected diagnostics sink.
//!
//! Progress and unresolved-reference warnings are side channels: they never
//! alter page content beyond the omission of an unresolved link. Injecting
//! the sink keeps the traversal independently testable.

use std::sync::Mutex;

/// Receives page generation diagnostics.
pub trait Diagnostics {
    /// One page was serialized and handed to the sink.
    fn page_generated(&self, filename: &str);

    /// A symbolic reference could not be resolved; the link was omitted.
    fn unresolved_reference(&self, message: &str);
}

/// Default sink forwarding to `tracing`.
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn page_generated(&self, filename: &str) {
        tracing::info!(filename = %filename, "Generated page");
    }

    fn unresolved_reference(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// In-memory sink collecting diagnostics for assertions in tests.
#[derive(Default)]
pub struct CollectingDiagnostics {
    pages: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filenames reported so far, in generation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn pages(&self) -> Vec<String> {
        self.pages.lock().unwrap().clone()
    }

    /// Warning messages reported so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn page_generated(&self, filename: &str) {
        self.pages.lock().unwrap().push(filename.to_owned());
    }

    fn unresolved_reference(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_owned());
    }
}
