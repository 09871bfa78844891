//! Doc comment to markup translation.

use apiref_markup::{MarkupBuilder, MarkupNode};
use apiref_model::{ApiModel, DocNode, EntityPath, LinkTarget};

use crate::diagnostics::Diagnostics;
use crate::error::GenerateError;
use crate::routes;

/// Translates doc comment nodes into markup, recursively.
///
/// Translation writes into a [`MarkupBuilder`] rather than returning nodes,
/// because raw HTML start/end tags embedded in doc comments drive the
/// builder stack directly: their nesting is defined by the comment text,
/// not by this translator's call structure. A mismatched raw end tag
/// surfaces as a [`StructureError`](apiref_markup::StructureError) — a
/// malformed doc comment is a content-authoring fault, not swallowed.
pub struct DocTranslator<'a> {
    model: &'a ApiModel,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> DocTranslator<'a> {
    /// Create a translator over the given model.
    pub fn new(model: &'a ApiModel, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { model, diagnostics }
    }

    /// Translate a node list in order into the builder.
    ///
    /// `context` is the hierarchy path of the entity whose doc comment is
    /// being translated; symbolic references resolve relative to it.
    ///
    /// # Errors
    ///
    /// Fatal on malformed raw HTML nesting and on unsupported doc node
    /// kinds. Unresolved symbolic references are not errors: the link is
    /// omitted and a diagnostic is reported.
    pub fn translate_nodes(
        &self,
        builder: &mut MarkupBuilder,
        nodes: &[DocNode],
        context: &EntityPath,
    ) -> Result<(), GenerateError> {
        for node in nodes {
            self.translate_node(builder, node, context)?;
        }
        Ok(())
    }

    /// Translate a node list into a detached node sequence, for table cells
    /// and other pre-assembled fragments.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`translate_nodes`](Self::translate_nodes);
    /// additionally, raw HTML left open at the end of the list is an error
    /// here since the fragment must be self-contained.
    pub fn translate_to_nodes(
        &self,
        nodes: &[DocNode],
        context: &EntityPath,
    ) -> Result<Vec<MarkupNode>, GenerateError> {
        let mut scratch = MarkupBuilder::new();
        self.translate_nodes(&mut scratch, nodes, context)?;
        let root = scratch.into_root().map_err(GenerateError::from)?;
        Ok(root.into_children())
    }

    fn translate_node(
        &self,
        builder: &mut MarkupBuilder,
        node: &DocNode,
        context: &EntityPath,
    ) -> Result<(), GenerateError> {
        match node {
            DocNode::Paragraph(children) => {
                builder.open_with(MarkupNode::element("p"), |b| {
                    self.translate_nodes(b, children, context)
                })?;
            }
            DocNode::Section(children) => {
                builder.open_with(MarkupNode::element("div"), |b| {
                    self.translate_nodes(b, children, context)
                })?;
            }
            // Tag parameters are not rendered; the span carries the tag
            // name only.
            DocNode::InlineTag { tag } => {
                builder.append(MarkupNode::text_element("span", tag));
            }
            // Not semantically meaningful in HTML flow.
            DocNode::SoftBreak => {}
            DocNode::CodeSpan(code) => {
                builder.append(MarkupNode::text_element("code", code));
            }
            DocNode::FencedCode(code) => {
                builder.append(MarkupNode::text_element("pre", code));
            }
            DocNode::EscapedText(text) | DocNode::PlainText(text) => {
                builder.append(MarkupNode::text_element("span", text));
            }
            DocNode::Link { text, target } => {
                self.translate_link(builder, text.as_deref(), target, context);
            }
            // Attributes of raw tags are not propagated.
            DocNode::HtmlStartTag { name } => {
                builder.open(MarkupNode::element(name));
            }
            DocNode::HtmlEndTag { name } => {
                builder.close(name)?;
            }
            DocNode::Unsupported { kind } => {
                return Err(GenerateError::UnsupportedDocNode { kind: kind.clone() });
            }
        }
        Ok(())
    }

    fn translate_link(
        &self,
        builder: &mut MarkupBuilder,
        text: Option<&str>,
        target: &LinkTarget,
        context: &EntityPath,
    ) {
        match target {
            LinkTarget::Url(url) => {
                let label = text.unwrap_or(url);
                builder.append(MarkupNode::text_element("a", label).attr("href", url.clone()));
            }
            LinkTarget::Symbol(reference) => match self.model.resolve_reference(reference, context)
            {
                Ok(hit) => {
                    let label = text.unwrap_or(&hit.entity.scoped_name);
                    builder.append(
                        MarkupNode::text_element("a", label)
                            .attr("href", routes::link_for(&hit.path)),
                    );
                }
                Err(message) => {
                    // Recoverable: the link is omitted, not replaced by a
                    // placeholder.
                    self.diagnostics.unresolved_reference(&message);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use apiref_model::{ApiEntity, EntityKind};
    use pretty_assertions::assert_eq;

    use crate::diagnostics::CollectingDiagnostics;

    use super::*;

    fn empty_model() -> ApiModel {
        let mut entry = ApiEntity::new(EntityKind::EntryPoint, "");
        entry.members = vec![ApiEntity::new(EntityKind::Function, "helper")];
        let mut pkg = ApiEntity::new(EntityKind::Package, "pkg");
        pkg.members = vec![entry];
        let mut root = ApiEntity::new(EntityKind::Model, "model");
        root.members = vec![pkg];
        ApiModel::new(root).unwrap()
    }

    fn render(nodes: &[DocNode]) -> (String, Vec<String>) {
        let model = empty_model();
        let diagnostics = CollectingDiagnostics::new();
        let translator = DocTranslator::new(&model, &diagnostics);
        let mut builder = MarkupBuilder::new();
        translator
            .translate_nodes(&mut builder, nodes, &EntityPath::root())
            .unwrap();
        (builder.emit().unwrap(), diagnostics.warnings())
    }

    #[test]
    fn test_paragraph_wraps_children() {
        let (html, _) = render(&[DocNode::Paragraph(vec![DocNode::PlainText(
            "hello".to_owned(),
        )])]);
        assert!(html.contains("<p><span>hello</span></p>"));
    }

    #[test]
    fn test_soft_break_produces_nothing() {
        let (html, _) = render(&[
            DocNode::PlainText("a".to_owned()),
            DocNode::SoftBreak,
            DocNode::PlainText("b".to_owned()),
        ]);
        assert!(html.contains("<span>a</span><span>b</span>"));
    }

    #[test]
    fn test_inline_tag_renders_name_only() {
        let (html, _) = render(&[DocNode::InlineTag {
            tag: "@label".to_owned(),
        }]);
        assert!(html.contains("<span>@label</span>"));
    }

    #[test]
    fn test_code_span_and_fenced_code() {
        let (html, _) = render(&[
            DocNode::CodeSpan("x + y".to_owned()),
            DocNode::FencedCode("let a = 1;".to_owned()),
        ]);
        assert!(html.contains("<code>x + y</code>"));
        assert!(html.contains("<pre>let a = 1;</pre>"));
    }

    #[test]
    fn test_url_link_uses_explicit_text_or_url() {
        let (html, _) = render(&[DocNode::Link {
            text: Some("docs".to_owned()),
            target: LinkTarget::Url("https://example.com".to_owned()),
        }]);
        assert!(html.contains(r#"<a href="https://example.com">docs</a>"#));

        let (html, _) = render(&[DocNode::Link {
            text: None,
            target: LinkTarget::Url("https://example.com".to_owned()),
        }]);
        assert!(html.contains(r#"<a href="https://example.com">https://example.com</a>"#));
    }

    #[test]
    fn test_symbol_link_resolves_to_page() {
        let (html, warnings) = render(&[DocNode::Link {
            text: None,
            target: LinkTarget::Symbol("pkg.helper".to_owned()),
        }]);
        assert!(html.contains(r#"<a href="./pkg.helper.html">helper</a>"#));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unresolved_symbol_omitted_with_one_diagnostic() {
        let (html, warnings) = render(&[DocNode::Link {
            text: Some("gone".to_owned()),
            target: LinkTarget::Symbol("pkg.missing".to_owned()),
        }]);
        assert!(!html.contains("<a"));
        assert!(!html.contains("gone"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("pkg.missing"));
    }

    #[test]
    fn test_raw_html_tags_drive_builder_stack() {
        let (html, _) = render(&[
            DocNode::HtmlStartTag {
                name: "b".to_owned(),
            },
            DocNode::PlainText("bold".to_owned()),
            DocNode::HtmlEndTag {
                name: "b".to_owned(),
            },
        ]);
        assert!(html.contains("<b><span>bold</span></b>"));
    }

    #[test]
    fn test_mismatched_raw_end_tag_is_structure_error() {
        let model = empty_model();
        let diagnostics = CollectingDiagnostics::new();
        let translator = DocTranslator::new(&model, &diagnostics);
        let mut builder = MarkupBuilder::new();
        let err = translator
            .translate_nodes(
                &mut builder,
                &[
                    DocNode::HtmlStartTag {
                        name: "b".to_owned(),
                    },
                    DocNode::PlainText("text".to_owned()),
                    DocNode::HtmlEndTag {
                        name: "i".to_owned(),
                    },
                ],
                &EntityPath::root(),
            )
            .unwrap_err();
        assert!(matches!(err, GenerateError::Structure(_)));
    }

    #[test]
    fn test_unsupported_kind_is_fatal() {
        let model = empty_model();
        let diagnostics = CollectingDiagnostics::new();
        let translator = DocTranslator::new(&model, &diagnostics);
        let mut builder = MarkupBuilder::new();
        let err = translator
            .translate_nodes(
                &mut builder,
                &[DocNode::Unsupported {
                    kind: "TableOfContents".to_owned(),
                }],
                &EntityPath::root(),
            )
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedDocNode { .. }));
    }

    #[test]
    fn test_translate_to_nodes_detached_fragment() {
        let model = empty_model();
        let diagnostics = CollectingDiagnostics::new();
        let translator = DocTranslator::new(&model, &diagnostics);
        let nodes = translator
            .translate_to_nodes(
                &[DocNode::Paragraph(vec![DocNode::PlainText(
                    "cell".to_owned(),
                )])],
                &EntityPath::root(),
            )
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), "p");
    }

    #[test]
    fn test_translate_to_nodes_unclosed_raw_html_fails() {
        let model = empty_model();
        let diagnostics = CollectingDiagnostics::new();
        let translator = DocTranslator::new(&model, &diagnostics);
        let err = translator
            .translate_to_nodes(
                &[DocNode::HtmlStartTag {
                    name: "b".to_owned(),
                }],
                &EntityPath::root(),
            )
            .unwrap_err();
        assert!(matches!(err, GenerateError::Structure(_)));
    }
}
