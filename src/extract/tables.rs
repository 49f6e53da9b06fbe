//! Table discovery over the document's HTML rendering.
//!
//! Tables are the one structure the plain-text lines cannot carry (cell
//! boundaries dissolve into tabs), so they are lifted from the markup
//! instead. The markup comes from [`crate::docx::convert_to_html`] and is
//! well-formed XML; if it somehow fails to parse, the result is an empty
//! list, never an error.

use crate::manuscript::TableBlock;
use tracing::warn;

/// Collect every `<table>` in document order.
///
/// The first row becomes the header band; zero-row tables are skipped.
pub fn tables(html: &str) -> Vec<TableBlock> {
    let doc = match roxmltree::Document::parse(html) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Markup failed to parse, treating as table-free: {e}");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for table in doc
        .descendants()
        .filter(|n| n.tag_name().name() == "table")
    {
        let caption = table
            .children()
            .find(|n| n.tag_name().name() == "caption")
            .map(|n| node_text(n))
            .unwrap_or_default();

        let mut rows: Vec<Vec<String>> = table
            .children()
            .filter(|n| n.tag_name().name() == "tr")
            .map(|tr| {
                tr.children()
                    .filter(|n| matches!(n.tag_name().name(), "td" | "th"))
                    .map(node_text)
                    .collect()
            })
            .collect();

        if rows.is_empty() {
            continue;
        }
        let head = rows.remove(0);
        out.push(TableBlock {
            caption,
            head,
            body: rows,
        });
    }
    out
}

/// All text beneath a node, concatenated and trimmed.
fn node_text(node: roxmltree::Node) -> String {
    node.descendants()
        .filter_map(|n| if n.is_text() { n.text() } else { None })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_is_promoted_to_head() {
        let html = "<html><body><table>\
                    <tr><td>Year</td><td>Count</td></tr>\
                    <tr><td>2020</td><td>14</td></tr>\
                    <tr><td>2021</td><td>9</td></tr>\
                    </table></body></html>";
        let got = tables(html);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].head, vec!["Year", "Count"]);
        assert_eq!(got[0].body.len(), 2);
        assert_eq!(got[0].body[1], vec!["2021", "9"]);
    }

    #[test]
    fn document_without_tables_yields_empty_list() {
        assert!(tables("<html><body><p>no tables</p></body></html>").is_empty());
    }

    #[test]
    fn zero_row_tables_are_skipped() {
        let html = "<html><body><table></table>\
                    <table><tr><td>x</td></tr></table></body></html>";
        let got = tables(html);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].head, vec!["x"]);
    }

    #[test]
    fn tables_keep_document_order() {
        let html = "<html><body>\
                    <table><tr><td>first</td></tr></table>\
                    <p>between</p>\
                    <table><tr><td>second</td></tr></table>\
                    </body></html>";
        let got = tables(html);
        assert_eq!(got[0].head, vec!["first"]);
        assert_eq!(got[1].head, vec!["second"]);
    }

    #[test]
    fn caption_and_cell_text_are_trimmed() {
        let html = "<html><body><table><caption>  Table 1  </caption>\
                    <tr><td>  padded  </td><th> header </th></tr>\
                    </table></body></html>";
        let got = tables(html);
        assert_eq!(got[0].caption, "Table 1");
        assert_eq!(got[0].head, vec!["padded", "header"]);
    }

    #[test]
    fn unparseable_markup_degrades_to_no_tables() {
        assert!(tables("<html><body><table>").is_empty());
        assert!(tables("").is_empty());
    }
}
