//! The structured extraction result for one uploaded manuscript.
//!
//! A [`ManuscriptRecord`] is produced once per upload and never mutated —
//! a new upload replaces it wholesale. Every field is populated on a
//! best-effort basis: heuristics that find nothing leave an empty value or
//! a fallback literal, never an error, so a record always exists once the
//! document bytes decoded. [`StructureSummary`] reports how much structure
//! was actually found so callers can warn on thin results.

use serde::{Deserialize, Serialize};

/// Fallback title when the document has no non-empty lines.
pub const FALLBACK_TITLE: &str = "Untitled Manuscript";

/// Fallback author line when no candidate line is found.
pub const FALLBACK_AUTHORS: &str = "Author names not found";

/// One recognised body section: heading line plus the lines it claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The heading line verbatim (e.g. "1. Introduction").
    pub title: String,
    /// Claimed lines, newline-joined, in document order.
    pub content: String,
}

/// One table lifted from the HTML rendering of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Caption text when the source table carried one; empty otherwise.
    pub caption: String,
    /// First row, promoted to the header band.
    pub head: Vec<String>,
    /// Remaining rows in document order.
    pub body: Vec<Vec<String>>,
}

impl TableBlock {
    /// Number of columns, taken from the widest row.
    pub fn column_count(&self) -> usize {
        self.body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.head.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Structured view of one manuscript, extracted heuristically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptRecord {
    /// First non-empty line, or [`FALLBACK_TITLE`].
    pub title: String,
    /// Author line (second line or superscript-marker match), or
    /// [`FALLBACK_AUTHORS`].
    pub authors: String,
    /// Institution lines following the author line; may be empty.
    pub affiliations: Vec<String>,
    /// Text between the "Abstract" marker and the next section marker;
    /// empty when no marker matched.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Keyword tokens (or one raw entry when splitting is disabled).
    pub keywords: Vec<String>,
    /// Recognised sections in first-occurrence order.
    pub sections: Vec<Section>,
    /// Tables in document order.
    pub tables: Vec<TableBlock>,
    /// Reference lines after the "References" marker.
    pub references: Vec<String>,
}

impl ManuscriptRecord {
    /// Count what the heuristics actually found.
    pub fn summary(&self) -> StructureSummary {
        StructureSummary {
            has_abstract: !self.abstract_text.is_empty(),
            keyword_count: self.keywords.len(),
            affiliation_count: self.affiliations.len(),
            section_count: self.sections.len(),
            table_count: self.tables.len(),
            reference_count: self.references.len(),
        }
    }

    /// First author surname-ish token for the citation line: everything up
    /// to the first comma in the author string.
    pub fn first_author(&self) -> &str {
        self.authors.split(',').next().unwrap_or("").trim()
    }
}

/// Counts shown to the user after extraction ("structure detected").
///
/// A record with zeroes everywhere is still valid — the manuscript simply
/// did not match the journal's expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSummary {
    pub has_abstract: bool,
    pub keyword_count: usize,
    pub affiliation_count: usize,
    pub section_count: usize,
    pub table_count: usize,
    pub reference_count: usize,
}

impl StructureSummary {
    /// True when not a single heuristic matched beyond the title fallback.
    pub fn is_empty(&self) -> bool {
        !self.has_abstract
            && self.keyword_count == 0
            && self.affiliation_count == 0
            && self.section_count == 0
            && self.table_count == 0
            && self.reference_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ManuscriptRecord {
        ManuscriptRecord {
            title: "A Study of X".into(),
            authors: "J. Doe, A. Smith".into(),
            affiliations: vec!["University A".into()],
            abstract_text: "This paper studies X.".into(),
            keywords: vec!["x".into(), "y".into()],
            sections: vec![Section {
                title: "Introduction".into(),
                content: "We study X.".into(),
            }],
            tables: vec![],
            references: vec!["Doe, J. (2020).".into()],
        }
    }

    #[test]
    fn summary_counts_fields() {
        let s = sample().summary();
        assert!(s.has_abstract);
        assert_eq!(s.keyword_count, 2);
        assert_eq!(s.section_count, 1);
        assert_eq!(s.table_count, 0);
        assert_eq!(s.reference_count, 1);
        assert!(!s.is_empty());
    }

    #[test]
    fn first_author_stops_at_comma() {
        assert_eq!(sample().first_author(), "J. Doe");
        let mut solo = sample();
        solo.authors = "Single Author".into();
        assert_eq!(solo.first_author(), "Single Author");
    }

    #[test]
    fn widest_row_wins_column_count() {
        let t = TableBlock {
            caption: String::new(),
            head: vec!["a".into(), "b".into()],
            body: vec![vec!["1".into(), "2".into(), "3".into()]],
        };
        assert_eq!(t.column_count(), 3);
    }

    #[test]
    fn record_serialises_abstract_under_plain_name() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"abstract\":"));
    }
}
