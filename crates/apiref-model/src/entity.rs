//! API entities and hierarchy paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::doc::{DocComment, DocNode};

/// Kind of a documented program entity. Closed set: an unrecognized kind in
/// the input fails deserialization rather than falling through at a
/// dispatch site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// The model root spanning all packages.
    Model,
    /// One package.
    Package,
    /// A package entry point; a grouping level that never gets its own page.
    EntryPoint,
    /// A namespace.
    Namespace,
    /// A class.
    Class,
    /// An interface.
    Interface,
    /// An enum.
    Enum,
    /// One member of an enum.
    EnumMember,
    /// A free function.
    Function,
    /// A class method.
    Method,
    /// An interface method signature.
    MethodSignature,
    /// A class constructor.
    Constructor,
    /// An interface construct signature.
    ConstructSignature,
    /// A class property.
    Property,
    /// An interface property signature.
    PropertySignature,
    /// A type alias.
    TypeAlias,
    /// A module-level variable.
    Variable,
}

impl EntityKind {
    /// Whether this kind is a callable with parameters and a return type.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Method
                | Self::MethodSignature
                | Self::Constructor
                | Self::ConstructSignature
        )
    }

    /// Whether this kind groups members onto sub-pages (package-like).
    pub fn is_container(self) -> bool {
        matches!(self, Self::Model | Self::Package | Self::Namespace)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Release/stability tag of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseTag {
    /// Stable public API.
    #[default]
    Public,
    /// Released for early feedback; may change.
    Beta,
    /// Experimental; may change or be removed.
    Alpha,
    /// Not part of the public surface.
    Internal,
}

impl ReleaseTag {
    /// Whether pages for this entity carry a stability warning.
    pub fn is_prerelease(self) -> bool {
        matches!(self, Self::Beta | Self::Alpha)
    }
}

/// Kind of one token in a rendered excerpt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExcerptTokenKind {
    /// Plain source text.
    Content,
    /// A reference to another type.
    Reference,
}

/// One token of a rendered declaration excerpt, e.g. an extends clause.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptToken {
    /// Token kind.
    pub kind: ExcerptTokenKind,
    /// Exact token text.
    pub text: String,
}

/// One parameter of a callable entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Rendered type text.
    #[serde(default)]
    pub type_text: String,
    /// Doc block for this parameter, if authored.
    #[serde(default)]
    pub doc: Option<Vec<DocNode>>,
}

/// One documented program entity, normalized from the external model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEntity {
    /// Entity kind.
    pub kind: EntityKind,
    /// Display name.
    pub name: String,
    /// Name scoped within the containing package, e.g. `Widget.render`.
    #[serde(default)]
    pub scoped_name: String,
    /// Ordered member entities.
    #[serde(default)]
    pub members: Vec<ApiEntity>,
    /// Release/stability tag.
    #[serde(default)]
    pub release: ReleaseTag,
    /// Whether the member is static rather than instance-bound.
    #[serde(default)]
    pub is_static: bool,
    /// Whether a property is event-like.
    #[serde(default)]
    pub is_event: bool,
    /// Rendered declaration excerpt; empty when the entity has none.
    #[serde(default)]
    pub declaration: String,
    /// Parameter list, present only for parameter-bearing entities.
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,
    /// Rendered type excerpt: the property type for properties, the return
    /// type for callables.
    #[serde(default)]
    pub type_text: Option<String>,
    /// Extends-clause token stream, used for exception-class detection.
    #[serde(default)]
    pub extends_tokens: Vec<ExcerptToken>,
    /// Literal initializer text for enum members.
    #[serde(default)]
    pub initializer: Option<String>,
    /// One-based ordinal distinguishing same-named callables. Values of 0
    /// and 1 both mean "first overload".
    #[serde(default)]
    pub overload_index: u32,
    /// Parsed doc comment, if the entity is documented.
    #[serde(default)]
    pub doc: Option<DocComment>,
}

impl ApiEntity {
    /// Create an entity with the given kind and name and no other data.
    ///
    /// The scoped name defaults to the display name; callers override it for
    /// nested members.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            scoped_name: name.clone(),
            name,
            members: Vec::new(),
            release: ReleaseTag::default(),
            is_static: false,
            is_event: false,
            declaration: String::new(),
            parameters: None,
            type_text: None,
            extends_tokens: Vec::new(),
            initializer: None,
            overload_index: 0,
            doc: None,
        }
    }

    /// A class is exception-like iff its extends clause contains a reference
    /// token whose text is exactly `Error`.
    pub fn is_exception_class(&self) -> bool {
        self.extends_tokens
            .iter()
            .any(|t| t.kind == ExcerptTokenKind::Reference && t.text == "Error")
    }
}

/// One segment of an entity's hierarchy path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegment {
    /// Kind of the entity at this level.
    pub kind: EntityKind,
    /// Display name at this level.
    pub name: String,
    /// Overload index at this level.
    pub overload_index: u32,
}

/// Ordered hierarchy chain from the model root to one entity, excluding the
/// root itself. Filenames and breadcrumbs derive from this alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityPath {
    segments: Vec<PathSegment>,
}

impl EntityPath {
    /// The model root path (no segments).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend this path with one entity, yielding the member's path.
    #[must_use]
    pub fn join(&self, entity: &ApiEntity) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment {
            kind: entity.kind,
            name: entity.name.clone(),
            overload_index: entity.overload_index,
        });
        Self { segments }
    }

    /// Segments from the root outward.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the model root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path made of the first `len` segments.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the segment count.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len].to_vec(),
        }
    }

    /// The path of the enclosing scope, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "(model)");
        }
        let names: Vec<&str> = self.segments.iter().map(|s| s.name.as_str()).collect();
        write!(f, "{}", names.join("."))
    }
}
