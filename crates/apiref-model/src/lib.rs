//! Normalized API entity model for the apiref page generator.
//!
//! The model arrives as a serialized entity tree (one JSON document per API
//! surface) and is normalized once at the deserialization boundary: entity
//! kinds form a closed enum, and capabilities such as "has a doc comment" or
//! "has a parameter list" are explicit optional fields rather than run-time
//! type tests.
//!
//! The page generator treats everything in this crate as read-only input.

mod doc;
mod entity;
mod model;

pub use doc::{DocBlock, DocComment, DocNode, LinkTarget};
pub use entity::{
    ApiEntity, EntityKind, EntityPath, ExcerptToken, ExcerptTokenKind, Parameter, PathSegment,
    ReleaseTag,
};
pub use model::{ApiModel, EntityHit, ModelError};
