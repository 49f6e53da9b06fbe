//! Raw-text rendering of the document body.
//!
//! One output line per paragraph, in document order. Table rows become
//! tab-separated lines so their text still reaches the line heuristics.
//! Formatting is discarded; tabs and explicit breaks inside runs survive
//! as `\t` / `\n`.

use super::{is_wml, with_body, wml};
use crate::error::ConvertError;
use tracing::debug;

/// Render the document as plain text, one paragraph per line.
pub fn extract_raw_text(bytes: &[u8]) -> Result<String, ConvertError> {
    let text = with_body(bytes, body_text)?;
    debug!("Extracted {} chars of raw text", text.len());
    Ok(text)
}

fn body_text(body: roxmltree::Node) -> String {
    let mut out = String::new();
    push_blocks(body, &mut out);
    out
}

fn push_blocks(parent: roxmltree::Node, out: &mut String) {
    for node in parent.children() {
        if is_wml(node, "p") {
            let para = paragraph_text(node);
            out.push_str(&para);
            out.push('\n');
        } else if is_wml(node, "tbl") {
            push_table(node, out);
        } else if is_wml(node, "sdt") {
            // Structured document tags wrap ordinary block content.
            if let Some(content) = wml(node, "sdtContent") {
                push_blocks(content, out);
            }
        }
    }
}

fn push_table(table: roxmltree::Node, out: &mut String) {
    for row in table.children().filter(|n| is_wml(*n, "tr")) {
        let cells: Vec<String> = row
            .children()
            .filter(|n| is_wml(*n, "tc"))
            .map(cell_text)
            .collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
}

fn cell_text(cell: roxmltree::Node) -> String {
    let mut parts = Vec::new();
    for node in cell.children() {
        if is_wml(node, "p") {
            parts.push(paragraph_text(node));
        } else if is_wml(node, "tbl") {
            // Nested table: flatten its rows into the cell.
            let mut inner = String::new();
            push_table(node, &mut inner);
            parts.push(inner.trim_end().replace('\n', " "));
        }
    }
    parts.join(" ").trim().to_string()
}

/// Concatenate run text in document order. `w:t` carries the characters;
/// `w:tab` and `w:br`/`w:cr` are the only break elements Word emits inside
/// a run.
pub(crate) fn paragraph_text(para: roxmltree::Node) -> String {
    let mut text = String::new();
    for node in para.descendants() {
        match node.tag_name().name() {
            "t" if node.tag_name().namespace() == Some(super::WML_NS) => {
                if let Some(t) = node.text() {
                    text.push_str(t);
                }
            }
            "tab" if node.tag_name().namespace() == Some(super::WML_NS) => text.push('\t'),
            "br" | "cr" if node.tag_name().namespace() == Some(super::WML_NS) => {
                text.push('\n')
            }
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::super::testutil::docx_with_body;
    use super::*;

    fn text_of(body: &str) -> String {
        extract_raw_text(&docx_with_body(body)).unwrap()
    }

    #[test]
    fn paragraphs_become_lines() {
        let text = text_of(
            "<w:p><w:r><w:t>First</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Second</w:t></w:r></w:p>",
        );
        assert_eq!(text, "First\nSecond\n");
    }

    #[test]
    fn split_runs_concatenate() {
        let text = text_of(
            "<w:p><w:r><w:t>Hel</w:t></w:r><w:r><w:t>lo</w:t></w:r></w:p>",
        );
        assert_eq!(text, "Hello\n");
    }

    #[test]
    fn tabs_and_breaks_survive() {
        let text = text_of(
            "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>",
        );
        assert_eq!(text, "a\tb\nc\n");
    }

    #[test]
    fn table_rows_are_tab_joined_lines() {
        let text = text_of(
            "<w:tbl>\
               <w:tr><w:tc><w:p><w:r><w:t>Year</w:t></w:r></w:p></w:tc>\
                     <w:tc><w:p><w:r><w:t>Count</w:t></w:r></w:p></w:tc></w:tr>\
               <w:tr><w:tc><w:p><w:r><w:t>2020</w:t></w:r></w:p></w:tc>\
                     <w:tc><w:p><w:r><w:t>14</w:t></w:r></w:p></w:tc></w:tr>\
             </w:tbl>",
        );
        assert_eq!(text, "Year\tCount\n2020\t14\n");
    }

    #[test]
    fn empty_body_yields_empty_text() {
        assert_eq!(text_of(""), "");
    }
}
