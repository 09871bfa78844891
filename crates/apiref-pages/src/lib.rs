//! Page-graph generation for the apiref documentation engine.
//!
//! Walks a read-only [`ApiModel`](apiref_model::ApiModel) depth-first and
//! produces one cross-linked HTML page per page unit (an entity, or a
//! same-named interface/namespace pair merged onto one page):
//!
//! - [`routes`]: deterministic, collision-free filenames, same-directory
//!   links, and breadcrumb trails derived from hierarchy paths
//! - [`DocTranslator`]: doc comment trees to markup, including raw embedded
//!   HTML interleaved through the builder stack and symbolic reference
//!   resolution
//! - [`PageGenerator`]: per-page assembly (heading, stability banner,
//!   summary, signature, remarks, kind-specific member tables) and
//!   recursive scheduling of member pages
//!
//! Pages leave through the [`PageSink`] boundary; progress and unresolved
//! reference warnings flow through an injected [`Diagnostics`] sink so the
//! traversal stays independently testable.

mod diagnostics;
mod error;
mod generate;
pub mod routes;
mod sink;
mod translate;

pub use diagnostics::{CollectingDiagnostics, Diagnostics, TracingDiagnostics};
pub use error::GenerateError;
pub use generate::PageGenerator;
pub use sink::{MemorySink, PageSink, SinkError};
pub use translate::DocTranslator;
