//! Word-document decoding: the two calls the extractor consumes.
//!
//! A `.docx` file is a ZIP archive whose main part, `word/document.xml`,
//! holds the WordprocessingML body. This module exposes exactly two pure
//! functions over the raw bytes:
//!
//! * [`extract_raw_text`] — paragraph-per-line plain text (heuristics input)
//! * [`convert_to_html`] — minimal XHTML markup (table discovery only)
//!
//! Both open the archive independently; neither keeps state between calls.
//! Nothing here interprets styling beyond what the extractor needs — run
//! formatting, numbering, images and fields are deliberately ignored.

mod html;
mod text;

pub use html::convert_to_html;
pub use text::extract_raw_text;

use crate::error::ConvertError;
use std::io::{Cursor, Read};

/// WordprocessingML main namespace.
pub(crate) const WML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Find the first WML child element with the given local name.
pub(crate) fn wml<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

/// True when the node is a WML element with the given local name.
pub(crate) fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

/// Pull `word/document.xml` out of the archive.
pub(crate) fn read_document_xml(bytes: &[u8]) -> Result<String, ConvertError> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ConvertError::DocxDecode {
            reason: format!("file is not a ZIP archive: {e}"),
        }
    })?;

    let mut content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| ConvertError::DocxDecode {
            reason: "missing word/document.xml (is this a .docx file?)".into(),
        })?
        .read_to_string(&mut content)
        .map_err(|e| ConvertError::DocxDecode {
            reason: format!("cannot read word/document.xml: {e}"),
        })?;
    Ok(content)
}

/// Parse the main part and hand its `<w:body>` to `walk`.
pub(crate) fn with_body<T>(
    bytes: &[u8],
    walk: impl FnOnce(roxmltree::Node) -> T,
) -> Result<T, ConvertError> {
    let xml = read_document_xml(bytes)?;
    let doc = roxmltree::Document::parse(&xml).map_err(|e| ConvertError::DocxDecode {
        reason: format!("malformed document XML: {e}"),
    })?;
    let body = wml(doc.root_element(), "body").ok_or_else(|| ConvertError::DocxDecode {
        reason: "document has no w:body element".into(),
    })?;
    Ok(walk(body))
}
