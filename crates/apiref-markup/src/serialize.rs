//! Flat HTML serialization of markup trees.

use std::fmt::Write;

use crate::node::{MarkupContent, MarkupNode};

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render a head section with the given stylesheet links followed by the
/// root's content as a self-contained HTML document.
pub(crate) fn document(styles: &[String], root: &MarkupNode) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html><html><head>");
    for href in styles {
        write!(
            out,
            r#"<link rel="stylesheet" href="{}">"#,
            escape_html(href)
        )
        .expect("writing to a String cannot fail");
    }
    out.push_str("</head><body>");
    if let MarkupContent::Children(children) = root.content() {
        for child in children {
            write_node(child, &mut out);
        }
    }
    out.push_str("</body></html>");
    out
}

fn write_node(node: &MarkupNode, out: &mut String) {
    out.push('<');
    out.push_str(node.kind());
    for (name, value) in node.attributes() {
        write!(out, r#" {name}="{}""#, escape_html(value))
            .expect("writing to a String cannot fail");
    }
    out.push('>');

    match node.content() {
        MarkupContent::Empty => {
            // Void elements have no closing tag; anything else renders as
            // an empty pair.
            if !VOID_ELEMENTS.contains(&node.kind()) {
                write!(out, "</{}>", node.kind()).expect("writing to a String cannot fail");
            }
        }
        MarkupContent::Text(text) => {
            out.push_str(&escape_html(text));
            write!(out, "</{}>", node.kind()).expect("writing to a String cannot fail");
        }
        MarkupContent::Children(children) => {
            for child in children {
                write_node(child, out);
            }
            write!(out, "</{}>", node.kind()).expect("writing to a String cannot fail");
        }
    }
}
