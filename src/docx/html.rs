//! Minimal XHTML rendering of the document body.
//!
//! The extractor only consumes this markup for table discovery, so the
//! output is deliberately sparse: `<p>` per paragraph and
//! `<table>/<tr>/<td>` per table, plus a `<caption>` when the paragraph
//! immediately before a table carries Word's `Caption` style. The result
//! is well-formed XML (single `<html>` root, escaped text) so it can be
//! re-parsed without an HTML-soup parser.

use super::{is_wml, text::paragraph_text, with_body, wml};
use crate::error::ConvertError;
use tracing::debug;

/// Render the document as minimal XHTML markup.
pub fn convert_to_html(bytes: &[u8]) -> Result<String, ConvertError> {
    let html = with_body(bytes, body_html)?;
    debug!("Converted document to {} chars of markup", html.len());
    Ok(html)
}

fn body_html(body: roxmltree::Node) -> String {
    let mut out = String::from("<html><body>");
    push_blocks(body, &mut out);
    out.push_str("</body></html>");
    out
}

fn push_blocks(parent: roxmltree::Node, out: &mut String) {
    // A paragraph styled "Caption" directly before a table becomes that
    // table's <caption> instead of a free-standing <p>.
    let mut pending_caption: Option<String> = None;

    for node in parent.children() {
        if is_wml(node, "p") {
            if let Some(caption) = pending_caption.take() {
                push_paragraph(&caption, out);
            }
            let text = paragraph_text(node);
            if paragraph_style(node) == Some("Caption") {
                pending_caption = Some(text);
            } else {
                push_paragraph(&text, out);
            }
        } else if is_wml(node, "tbl") {
            push_table(node, pending_caption.take(), out);
        } else if is_wml(node, "sdt") {
            if let Some(content) = wml(node, "sdtContent") {
                push_blocks(content, out);
            }
        }
    }

    if let Some(caption) = pending_caption {
        push_paragraph(&caption, out);
    }
}

fn paragraph_style<'a>(para: roxmltree::Node<'a, 'a>) -> Option<&'a str> {
    let ppr = wml(para, "pPr")?;
    let style = wml(ppr, "pStyle")?;
    style.attribute((super::WML_NS, "val"))
}

fn push_paragraph(text: &str, out: &mut String) {
    out.push_str("<p>");
    out.push_str(&escape(text));
    out.push_str("</p>");
}

fn push_table(table: roxmltree::Node, caption: Option<String>, out: &mut String) {
    out.push_str("<table>");
    if let Some(caption) = caption {
        out.push_str("<caption>");
        out.push_str(&escape(&caption));
        out.push_str("</caption>");
    }
    for row in table.children().filter(|n| is_wml(*n, "tr")) {
        out.push_str("<tr>");
        for cell in row.children().filter(|n| is_wml(*n, "tc")) {
            out.push_str("<td>");
            let mut cell_out = String::new();
            push_cell(cell, &mut cell_out);
            out.push_str(&cell_out);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
}

fn push_cell(cell: roxmltree::Node, out: &mut String) {
    let mut parts = Vec::new();
    for node in cell.children() {
        if is_wml(node, "p") {
            parts.push(escape(&paragraph_text(node)));
        } else if is_wml(node, "tbl") {
            // Nested tables flatten to text; the extractor reads cells as
            // plain strings anyway.
            let mut inner = String::new();
            push_table(node, None, &mut inner);
            parts.push(strip_tags(&inner));
        }
    }
    out.push_str(parts.join(" ").trim());
}

/// Escape the three characters XML forbids in text content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
