//! Page generation error types.

use apiref_markup::StructureError;
use apiref_model::EntityKind;

use crate::sink::SinkError;

/// Fatal page generation failure.
///
/// Every variant aborts the whole run; the only recoverable condition during
/// generation is an unresolved symbolic reference, which is logged and
/// omitted rather than surfaced here.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Malformed markup nesting, usually from raw HTML in a doc comment.
    #[error(transparent)]
    Structure(#[from] StructureError),
    /// A doc node kind the translator does not support.
    #[error("unsupported doc node kind: {kind}")]
    UnsupportedDocNode {
        /// Parser-reported kind name.
        kind: String,
    },
    /// An entity kind outside the closed set expected at a dispatch point.
    /// Signals the entity-model contract was violated.
    #[error("unexpected {kind} entity in {context}")]
    UnexpectedKind {
        /// The offending kind.
        kind: EntityKind,
        /// Where it was encountered.
        context: String,
    },
    /// The external page writer failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
