//! Stack-based markup tree builder.

use crate::node::{MarkupContent, MarkupNode};
use crate::serialize;

/// Tag name of the synthetic root container.
const ROOT_KIND: &str = "#document";

/// Malformed nesting detected during tree assembly.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// A close call named a tag other than the currently open one.
    #[error("mismatched close tag: tried to close <{expected}> but <{found}> is open")]
    MismatchedClose {
        /// Tag the caller tried to close.
        expected: String,
        /// Tag actually on top of the stack.
        found: String,
    },
    /// A close call with no explicitly opened node left on the stack.
    #[error("unbalanced close tag </{expected}> with no matching open tag")]
    UnbalancedClose {
        /// Tag the caller tried to close.
        expected: String,
    },
    /// The document was finalized while a node was still open.
    #[error("unclosed element <{kind}> at end of document")]
    Unclosed {
        /// Tag of the innermost unclosed node.
        kind: String,
    },
}

/// Stack-based builder for one markup document.
///
/// A synthetic root is always present; the top of the stack is the current
/// insertion point. Every explicitly opened node must be closed with its own
/// tag name before [`emit`](Self::emit) — mismatches and underflows fail
/// with [`StructureError`] and leave the stack untouched.
pub struct MarkupBuilder {
    /// Open containers, root first. Never empty.
    stack: Vec<MarkupNode>,
    /// Stylesheet hrefs for the head section, in insertion order.
    styles: Vec<String>,
}

impl MarkupBuilder {
    /// Create a builder holding only the synthetic root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![MarkupNode::element(ROOT_KIND)],
            styles: Vec::new(),
        }
    }

    /// Push `node` as the new insertion point. It attaches to its parent
    /// when closed.
    ///
    /// # Panics
    ///
    /// Panics if `node` cannot hold children; a text or void node as the
    /// insertion point would silently swallow everything appended under it.
    pub fn open(&mut self, node: MarkupNode) {
        assert!(node.is_container(), "opened node must be child-bearing");
        self.stack.push(node);
    }

    /// Open `node`, run `f`, then close the node with its own tag name.
    ///
    /// # Errors
    ///
    /// Propagates errors from `f`, and a [`StructureError`] if `f` left the
    /// stack unbalanced.
    pub fn open_with<E, F>(&mut self, node: MarkupNode, f: F) -> Result<(), E>
    where
        E: From<StructureError>,
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        let kind = node.kind().to_owned();
        self.open(node);
        f(self)?;
        self.close(&kind).map_err(E::from)
    }

    /// Append a fully built node to the current insertion point without
    /// changing the insertion point.
    pub fn append(&mut self, node: MarkupNode) {
        if let Some(top) = self.stack.last_mut() {
            top.push_child(node);
        }
    }

    /// Pop the insertion point, attaching it to its parent.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::MismatchedClose`] if `expected_kind` does
    /// not match the open node's tag, or [`StructureError::UnbalancedClose`]
    /// if only the synthetic root remains. The stack is not mutated on error.
    pub fn close(&mut self, expected_kind: &str) -> Result<(), StructureError> {
        if self.stack.len() < 2 {
            return Err(StructureError::UnbalancedClose {
                expected: expected_kind.to_owned(),
            });
        }
        let found = self.stack[self.stack.len() - 1].kind();
        if found != expected_kind {
            return Err(StructureError::MismatchedClose {
                expected: expected_kind.to_owned(),
                found: found.to_owned(),
            });
        }
        if let Some(node) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.push_child(node);
            }
        }
        Ok(())
    }

    /// The synthetic root node.
    ///
    /// Nodes still open are not attached until closed.
    pub fn root(&self) -> &MarkupNode {
        &self.stack[0]
    }

    /// Consume the builder and return the assembled root node.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Unclosed`] if any explicitly opened node
    /// was never closed.
    pub fn into_root(mut self) -> Result<MarkupNode, StructureError> {
        if self.stack.len() > 1 {
            let kind = self.stack[self.stack.len() - 1].kind().to_owned();
            return Err(StructureError::Unclosed { kind });
        }
        Ok(self.stack.remove(0))
    }

    /// Record a stylesheet reference for the head section.
    ///
    /// Order-preserving; duplicates are kept.
    pub fn add_style(&mut self, href: impl Into<String>) {
        self.styles.push(href.into());
    }

    /// Serialize the head section (style links) followed by the root's
    /// content into a self-contained HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Unclosed`] if any explicitly opened node
    /// was never closed.
    pub fn emit(&self) -> Result<String, StructureError> {
        if self.stack.len() > 1 {
            let kind = self.stack[self.stack.len() - 1].kind().to_owned();
            return Err(StructureError::Unclosed { kind });
        }
        Ok(serialize::document(&self.styles, self.root()))
    }
}

impl Default for MarkupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_nesting_mirrors_call_sequence() {
        let mut builder = MarkupBuilder::new();
        builder.open(MarkupNode::element("main"));
        builder.open(MarkupNode::element("section"));
        builder.append(MarkupNode::text_element("span", "hello"));
        builder.close("section").unwrap();
        builder.append(MarkupNode::text_element("p", "tail"));
        builder.close("main").unwrap();

        let html = builder.emit().unwrap();
        assert_eq!(
            html,
            "<!DOCTYPE html><html><head></head><body>\
             <main><section><span>hello</span></section><p>tail</p></main>\
             </body></html>"
        );
    }

    #[test]
    fn test_close_mismatch_does_not_mutate() {
        let mut builder = MarkupBuilder::new();
        builder.open(MarkupNode::element("div"));
        let err = builder.close("span").unwrap_err();
        assert_eq!(
            err,
            StructureError::MismatchedClose {
                expected: "span".to_owned(),
                found: "div".to_owned(),
            }
        );
        // The open node is still on the stack and can be closed properly.
        builder.close("div").unwrap();
        builder.emit().unwrap();
    }

    #[test]
    #[should_panic(expected = "child-bearing")]
    fn test_open_rejects_non_container_node() {
        let mut builder = MarkupBuilder::new();
        builder.open(MarkupNode::text_element("span", "text"));
    }

    #[test]
    fn test_close_underflow() {
        let mut builder = MarkupBuilder::new();
        let err = builder.close("div").unwrap_err();
        assert_eq!(
            err,
            StructureError::UnbalancedClose {
                expected: "div".to_owned(),
            }
        );
    }

    #[test]
    fn test_emit_with_unclosed_node_fails() {
        let mut builder = MarkupBuilder::new();
        builder.open(MarkupNode::element("div"));
        let err = builder.emit().unwrap_err();
        assert_eq!(
            err,
            StructureError::Unclosed {
                kind: "div".to_owned(),
            }
        );
    }

    #[test]
    fn test_open_with_auto_close() {
        let mut builder = MarkupBuilder::new();
        builder
            .open_with::<StructureError, _>(MarkupNode::element("nav"), |b| {
                b.append(MarkupNode::text_element("a", "Home"));
                Ok(())
            })
            .unwrap();
        let html = builder.emit().unwrap();
        assert!(html.contains("<nav><a>Home</a></nav>"));
    }

    #[test]
    fn test_add_style_order_and_duplicates() {
        let mut builder = MarkupBuilder::new();
        builder.add_style("./a.css");
        builder.add_style("./b.css");
        builder.add_style("./a.css");
        let html = builder.emit().unwrap();
        let first = html.find("a.css").unwrap();
        let second = html.find("b.css").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("a.css").count(), 2);
    }

    #[test]
    fn test_into_root_collects_tree() {
        let mut builder = MarkupBuilder::new();
        builder.open(MarkupNode::element("p"));
        builder.append(MarkupNode::text_element("span", "x"));
        builder.close("p").unwrap();
        let root = builder.into_root().unwrap();
        let children = root.into_children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind(), "p");
    }

    #[test]
    fn test_into_root_unclosed_fails() {
        let mut builder = MarkupBuilder::new();
        builder.open(MarkupNode::element("p"));
        assert!(matches!(
            builder.into_root(),
            Err(StructureError::Unclosed { .. })
        ));
    }
}
