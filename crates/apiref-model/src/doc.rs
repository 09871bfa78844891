//! Parsed doc comment trees.
//!
//! Doc comments arrive pre-parsed from the external doc-comment parser.
//! [`DocNode`] enumerates the node kinds the page generator translates;
//! anything else surfaces as [`DocNode::Unsupported`], which translation
//! treats as fatal rather than silently dropping content.

use serde::{Deserialize, Serialize};

/// Destination of a doc comment link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum LinkTarget {
    /// A literal URL.
    Url(String),
    /// A symbolic reference to another entity, resolved against the model
    /// scoped by the entity whose doc comment contains it.
    Symbol(String),
}

/// One node of a parsed doc comment's content tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum DocNode {
    /// A paragraph of inline content.
    Paragraph(Vec<DocNode>),
    /// A generic block grouping other nodes.
    Section(Vec<DocNode>),
    /// An inline tag such as `@label`. Tag parameters are not carried.
    InlineTag {
        /// Tag name including the `@` prefix.
        tag: String,
    },
    /// A soft line break; not semantically meaningful in HTML flow.
    SoftBreak,
    /// An inline code span.
    CodeSpan(String),
    /// A fenced code block.
    FencedCode(String),
    /// Text that was escaped in the source comment.
    EscapedText(String),
    /// Plain text.
    PlainText(String),
    /// A link with either a literal URL or a symbolic destination.
    Link {
        /// Explicit link text, if the author supplied one.
        text: Option<String>,
        /// Where the link points.
        target: LinkTarget,
    },
    /// Start tag of raw HTML embedded in the comment. Attributes of the raw
    /// tag are not carried.
    HtmlStartTag {
        /// Tag name.
        name: String,
    },
    /// End tag of raw HTML embedded in the comment.
    HtmlEndTag {
        /// Tag name.
        name: String,
    },
    /// A doc-parser node kind this engine does not translate.
    Unsupported {
        /// Parser-reported kind name, for the error message.
        kind: String,
    },
}

/// A tagged block within a doc comment, e.g. `@throws`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    /// Block tag including the `@` prefix.
    pub tag: String,
    /// Block content.
    pub content: Vec<DocNode>,
}

/// A parsed doc comment attached to one entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocComment {
    /// Summary section content.
    pub summary: Vec<DocNode>,
    /// `@remarks` block content, if present.
    pub remarks: Option<Vec<DocNode>>,
    /// `@returns` block content, if present.
    pub returns: Option<Vec<DocNode>>,
    /// Custom tagged blocks in authoring order.
    pub custom_blocks: Vec<DocBlock>,
}

impl DocComment {
    /// Custom blocks carrying the given tag, in authoring order.
    pub fn blocks_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DocBlock> {
        self.custom_blocks.iter().filter(move |b| b.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_tagged_filters_by_exact_tag() {
        let doc = DocComment {
            custom_blocks: vec![
                DocBlock {
                    tag: "@throws".to_owned(),
                    content: vec![DocNode::PlainText("bad input".to_owned())],
                },
                DocBlock {
                    tag: "@example".to_owned(),
                    content: vec![],
                },
                DocBlock {
                    tag: "@throws".to_owned(),
                    content: vec![DocNode::PlainText("io failure".to_owned())],
                },
            ],
            ..DocComment::default()
        };
        let throws: Vec<_> = doc.blocks_tagged("@throws").collect();
        assert_eq!(throws.len(), 2);
    }

    #[test]
    fn test_doc_node_json_round_trip() {
        let node = DocNode::Link {
            text: Some("docs".to_owned()),
            target: LinkTarget::Url("https://example.com".to_owned()),
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: DocNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn test_doc_node_tagged_representation() {
        let json = r#"{"kind":"plainText","data":"hello"}"#;
        let node: DocNode = serde_json::from_str(json).unwrap();
        assert_eq!(node, DocNode::PlainText("hello".to_owned()));
    }
}
