//! Section recognition: one left-to-right scan over the line sequence.
//!
//! A line is a heading when it matches one of [`SECTION_KEYWORDS`]
//! (case-insensitive prefix or substring, per config) and stays under the
//! length guard. A heading closes the open section and opens a new one;
//! every other line belongs to the open section, newline-joined. Lines
//! before the first heading belong to no section — the front matter is
//! claimed by the field rules instead.

use crate::config::{ExtractOptions, HeadingMatch, SECTION_KEYWORDS};
use crate::manuscript::Section;
use once_cell::sync::Lazy;

static KEYWORDS_LOWER: Lazy<Vec<String>> =
    Lazy::new(|| SECTION_KEYWORDS.iter().map(|k| k.to_lowercase()).collect());

/// True when `line` is a section heading under the given options.
pub fn is_heading(line: &str, opts: &ExtractOptions) -> bool {
    if line.chars().count() >= opts.heading_max_len {
        return false;
    }
    let lower = line.to_lowercase();
    KEYWORDS_LOWER.iter().any(|kw| match opts.heading_match {
        HeadingMatch::Prefix => lower.starts_with(kw),
        HeadingMatch::Substring => lower.contains(kw),
    })
}

/// Scan `lines` once, claiming each line for at most one section.
pub fn sections(lines: &[String], opts: &ExtractOptions) -> Vec<Section> {
    let mut out = Vec::new();
    let mut open: Option<Section> = None;

    for line in lines {
        if is_heading(line, opts) {
            if let Some(done) = open.take() {
                out.push(done);
            }
            open = Some(Section {
                title: line.clone(),
                content: String::new(),
            });
        } else if let Some(section) = open.as_mut() {
            if !section.content.is_empty() {
                section.content.push('\n');
            }
            section.content.push_str(line);
        }
    }

    if let Some(done) = open {
        out.push(done);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn opts() -> ExtractOptions {
        ExtractOptions::default()
    }

    #[test]
    fn headings_split_sections_in_document_order() {
        let ls = lines(&[
            "Title line",
            "Introduction",
            "First para.",
            "Second para.",
            "Methodology",
            "We used surveys.",
            "Conclusion",
            "It works.",
        ]);
        let got = sections(&ls, &opts());
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].title, "Introduction");
        assert_eq!(got[0].content, "First para.\nSecond para.");
        assert_eq!(got[1].title, "Methodology");
        assert_eq!(got[2].title, "Conclusion");
        assert_eq!(got[2].content, "It works.");
    }

    #[test]
    fn length_guard_rejects_prose_mentioning_keywords() {
        let prose =
            "Results show that the intervention outperformed the baseline in every trial";
        assert!(!is_heading(prose, &opts()));
        assert!(is_heading("Results", &opts()));
        assert!(is_heading("Results and Analysis", &opts()));
    }

    #[test]
    fn prefix_mode_requires_the_line_to_start_with_a_keyword() {
        let o = opts();
        assert!(!is_heading("1. Introduction", &o));

        let loose = ExtractOptions {
            heading_match: HeadingMatch::Substring,
            ..opts()
        };
        assert!(is_heading("1. Introduction", &loose));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_heading("INTRODUCTION", &opts()));
        assert!(is_heading("literature review", &opts()));
    }

    #[test]
    fn lines_before_first_heading_are_unclaimed() {
        let ls = lines(&["Title", "Authors", "Introduction", "Body."]);
        let got = sections(&ls, &opts());
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].content, "Body.");
    }

    #[test]
    fn scan_is_idempotent() {
        let ls = lines(&["Introduction", "a", "Discussion", "b"]);
        assert_eq!(sections(&ls, &opts()), sections(&ls, &opts()));
    }

    #[test]
    fn every_line_is_claimed_or_known_front_matter() {
        // Round-trip: section titles + contents + unclaimed front matter
        // reconstruct the full line sequence.
        let ls = lines(&[
            "Front matter",
            "Introduction",
            "one",
            "two",
            "Results",
            "three",
        ]);
        let got = sections(&ls, &opts());

        let mut reconstructed: Vec<String> = Vec::new();
        let first_heading = ls.iter().position(|l| is_heading(l, &opts())).unwrap();
        reconstructed.extend(ls[..first_heading].iter().cloned());
        for s in &got {
            reconstructed.push(s.title.clone());
            reconstructed.extend(s.content.lines().map(String::from));
        }
        assert_eq!(reconstructed, ls);
    }

    #[test]
    fn trailing_heading_yields_empty_section() {
        let ls = lines(&["Introduction", "body", "Conclusion"]);
        let got = sections(&ls, &opts());
        assert_eq!(got.len(), 2);
        assert_eq!(got[1].title, "Conclusion");
        assert_eq!(got[1].content, "");
    }
}
