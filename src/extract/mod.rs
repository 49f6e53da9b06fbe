//! Heuristic structure extraction: raw text + markup → [`ManuscriptRecord`].
//!
//! The extractor is a fixed, ordered list of matcher rules over the
//! document's non-empty lines (plus its HTML rendering, for tables only):
//!
//! ```text
//!  lines[0]            → title
//!  lines[1..=window]   → author line (superscript marker, else lines[1])
//!  lines[author+1..]   → affiliation window
//!  full text           → abstract, keywords   (regex between markers)
//!  all lines           → sections             (keyword headings, one scan)
//!  markup              → tables               (<table> elements)
//!  lines after marker  → references
//! ```
//!
//! Every marker search is **first-match** — earliest in document order wins,
//! never longest or best match. No rule can fail the extraction: a rule that
//! matches nothing leaves an empty value or a fallback literal, and the
//! record reports the shortfall through
//! [`summary()`](ManuscriptRecord::summary). Errors can only come from the
//! document failing to decode, upstream of this module.

pub mod fields;
pub mod sections;
pub mod tables;

use crate::config::ExtractOptions;
use crate::manuscript::ManuscriptRecord;
use tracing::{debug, info};

/// Run every matcher rule over one document.
///
/// `raw_text` and `html` must come from the same bytes (see
/// [`crate::docx`]); `opts` selects between the template's strict and loose
/// heuristic variants.
pub fn extract_manuscript(
    raw_text: &str,
    html: &str,
    opts: &ExtractOptions,
) -> ManuscriptRecord {
    let lines: Vec<String> = raw_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    debug!("Extracting structure from {} non-empty lines", lines.len());

    let title = fields::title(&lines);
    let author_index = fields::author_line_index(&lines, opts);
    let authors = fields::authors(&lines, author_index);
    let affiliation_start = author_index.map(|i| i + 1).unwrap_or(2);
    let affiliations = fields::affiliations(&lines, affiliation_start, opts);

    let record = ManuscriptRecord {
        title,
        authors,
        affiliations,
        abstract_text: fields::abstract_text(raw_text),
        keywords: fields::keywords(raw_text, opts.keywords_as_list),
        sections: sections::sections(&lines, opts),
        tables: tables::tables(html),
        references: fields::references(&lines),
    };

    let s = record.summary();
    info!(
        "Structure detected: {} sections, {} tables, {} references, {} keywords, abstract: {}",
        s.section_count,
        s.table_count,
        s.reference_count,
        s.keyword_count,
        if s.has_abstract { "yes" } else { "no" }
    );
    record
}
