//! Stack-disciplined HTML markup tree builder and serializer.
//!
//! This crate provides the document assembly primitives for the apiref
//! page generator:
//!
//! - [`MarkupNode`]: a typed markup tree node with attributes and either
//!   child nodes, text, or no content
//! - [`MarkupBuilder`]: a stack-based builder that guarantees well-formed
//!   nesting, surfacing mismatched open/close pairs as [`StructureError`]
//!   instead of silently corrupting the tree
//! - [`emit`](MarkupBuilder::emit): serialization of a finished tree plus
//!   its stylesheet links into a self-contained HTML document
//!
//! The explicit open/close discipline exists because page content is
//! assembled from two interleaved sources: section wrappers driven by the
//! generator's own call structure, and raw embedded HTML tags whose nesting
//! is defined by hand-authored doc comments. The builder stack is what makes
//! both produce one well-formed tree.

mod builder;
mod node;
mod serialize;

pub use builder::{MarkupBuilder, StructureError};
pub use node::{MarkupContent, MarkupNode};
pub use serialize::escape_html;
