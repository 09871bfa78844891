//! Markup tree nodes.

/// Content of a [`MarkupNode`].
///
/// The discriminant is fixed at construction: a child-bearing node never
/// later holds text, and a text node never later holds children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupContent {
    /// Ordered child nodes.
    Children(Vec<MarkupNode>),
    /// Literal text, escaped at serialization time.
    Text(String),
    /// No content (void element, e.g. `<link>`, `<img>`).
    Empty,
}

/// One node of the markup tree: a tag name, attributes, and content.
///
/// Attributes have unique names and render in first-insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupNode {
    kind: String,
    attributes: Vec<(String, String)>,
    content: MarkupContent,
}

impl MarkupNode {
    /// Create a child-bearing element (e.g. `div`, `table`).
    pub fn element(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
            content: MarkupContent::Children(Vec::new()),
        }
    }

    /// Create an element holding literal text (e.g. a `span` or `code`).
    pub fn text_element(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
            content: MarkupContent::Text(text.into()),
        }
    }

    /// Create a void element with no content (e.g. `link`, `img`).
    pub fn void_element(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
            content: MarkupContent::Empty,
        }
    }

    /// Set an attribute, replacing an existing one of the same name while
    /// keeping its original position.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attributes.push((name, value));
        }
        self
    }

    /// Tag name of this node.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Attributes in render order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Content of this node.
    pub fn content(&self) -> &MarkupContent {
        &self.content
    }

    /// Whether this node can hold child nodes.
    pub fn is_container(&self) -> bool {
        matches!(self.content, MarkupContent::Children(_))
    }

    /// Consume the node and return its children.
    ///
    /// Text and void nodes yield an empty list.
    pub fn into_children(self) -> Vec<MarkupNode> {
        match self.content {
            MarkupContent::Children(children) => children,
            MarkupContent::Text(_) | MarkupContent::Empty => Vec::new(),
        }
    }

    /// Append a child to a child-bearing node. No-op for text and void
    /// nodes; the builder only calls this on containers.
    pub(crate) fn push_child(&mut self, child: MarkupNode) {
        if let MarkupContent::Children(children) = &mut self.content {
            children.push(child);
        }
    }
}
