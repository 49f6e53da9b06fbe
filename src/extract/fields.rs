//! Single-field matcher rules: title, authors, affiliations, abstract,
//! keywords, references.
//!
//! Each rule is a pure function over the line slice (or the full text for
//! the regex rules) returning its fallback on no match. The regexes are
//! compiled once; both are case-insensitive and dot-matches-newline so a
//! marker and its terminator may sit on different lines.

use crate::config::ExtractOptions;
use crate::manuscript::{FALLBACK_AUTHORS, FALLBACK_TITLE};
use once_cell::sync::Lazy;
use regex::Regex;

/// `Abstract … (Keywords | 1. | Introduction)` — capture is the abstract body.
static ABSTRACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)abstract:?\s*(.*?)\s*(?:keywords|1\.|introduction)")
        .expect("abstract pattern is valid")
});

/// `Keywords … (1. | Introduction | Methodology)` — capture is the keyword run.
static KEYWORDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)keywords:?\s*(.*?)\s*(?:1\.|introduction|methodology)")
        .expect("keywords pattern is valid")
});

/// The ten Unicode superscript digits used as affiliation markers.
///
/// Heuristic limitation: author detection depends on these exact code
/// points. Manuscripts that mark affiliations with plain digits, letters
/// or footnote symbols fall through to the second-line rule.
const SUPERSCRIPT_DIGITS: &[char] = &[
    '\u{00B9}', '\u{00B2}', '\u{00B3}', // ¹ ² ³
    '\u{2070}', '\u{2074}', '\u{2075}', '\u{2076}', '\u{2077}', '\u{2078}', '\u{2079}',
];

/// First line of the document, or the fallback literal.
pub fn title(lines: &[String]) -> String {
    lines
        .first()
        .cloned()
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Index of the line chosen as the author line.
///
/// Lines 1..=`author_scan_window` are scanned for a superscript affiliation
/// marker; the first hit wins. Without a hit, line 1 is taken when it
/// exists. `None` means the document has no candidate at all.
pub fn author_line_index(lines: &[String], opts: &ExtractOptions) -> Option<usize> {
    let end = lines.len().min(1 + opts.author_scan_window);
    for (i, line) in lines.iter().enumerate().take(end).skip(1) {
        if line.chars().any(|c| SUPERSCRIPT_DIGITS.contains(&c)) {
            return Some(i);
        }
    }
    if lines.len() > 1 {
        Some(1)
    } else {
        None
    }
}

/// The chosen author line verbatim, or the fallback literal.
pub fn authors(lines: &[String], author_index: Option<usize>) -> String {
    author_index
        .and_then(|i| lines.get(i))
        .cloned()
        .unwrap_or_else(|| FALLBACK_AUTHORS.to_string())
}

/// Affiliation lines from the window of `affiliation_window` lines at
/// `start`.
///
/// Collection ends at the first line containing "abstract" and at the
/// first line at or under the minimum-length filter — a short fragment
/// marks the end of the affiliation block, not a gap inside it.
pub fn affiliations(lines: &[String], start: usize, opts: &ExtractOptions) -> Vec<String> {
    let mut collected = Vec::new();
    for line in lines.iter().skip(start).take(opts.affiliation_window) {
        if line.to_lowercase().contains("abstract") {
            break;
        }
        if opts.min_affiliation_chars > 0
            && line.chars().count() <= opts.min_affiliation_chars
        {
            break;
        }
        collected.push(line.clone());
    }
    collected
}

/// Abstract body between the "Abstract" marker and the next section marker.
pub fn abstract_text(full_text: &str) -> String {
    ABSTRACT_RE
        .captures(full_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Keyword tokens after the "Keywords" marker.
///
/// With `as_list` the capture splits on `,`/`;` into trimmed, non-empty
/// tokens; otherwise the raw capture is returned as a single entry.
pub fn keywords(full_text: &str, as_list: bool) -> Vec<String> {
    let capture = KEYWORDS_RE
        .captures(full_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    if capture.is_empty() {
        return Vec::new();
    }
    if as_list {
        capture
            .split([',', ';'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    } else {
        vec![capture]
    }
}

/// Every non-empty line after the first line containing "reference".
pub fn references(lines: &[String]) -> Vec<String> {
    let marker = lines
        .iter()
        .position(|l| l.to_lowercase().contains("reference"));
    match marker {
        Some(i) => lines[i + 1..].to_vec(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn title_is_always_non_empty() {
        assert_eq!(title(&lines(&["A Study"])), "A Study");
        assert_eq!(title(&[]), FALLBACK_TITLE);
    }

    #[test]
    fn superscript_line_beats_second_line() {
        let ls = lines(&["Title", "Draft v3", "J. Doe\u{00B9}", "more"]);
        let idx = author_line_index(&ls, &ExtractOptions::default());
        assert_eq!(idx, Some(2));
        assert_eq!(authors(&ls, idx), "J. Doe\u{00B9}");
    }

    #[test]
    fn second_line_is_the_default_author_line() {
        let ls = lines(&["Title", "Jane Roe and John Doe"]);
        let idx = author_line_index(&ls, &ExtractOptions::default());
        assert_eq!(idx, Some(1));
        assert_eq!(authors(&ls, idx), "Jane Roe and John Doe");
    }

    #[test]
    fn superscript_scan_respects_window() {
        let mut items = vec!["Title"];
        items.extend(std::iter::repeat("filler line").take(9));
        items.push("Late J. Doe\u{00B9}"); // index 10, outside the window
        let ls = lines(&items);
        let idx = author_line_index(&ls, &ExtractOptions::default());
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn no_candidate_falls_back() {
        assert_eq!(authors(&lines(&["Title only"]), None), FALLBACK_AUTHORS);
        assert_eq!(
            author_line_index(&lines(&["Title only"]), &ExtractOptions::default()),
            None
        );
    }

    #[test]
    fn affiliations_stop_at_abstract_line() {
        let ls = lines(&[
            "Title",
            "Authors",
            "Department of Economics, Univ A",
            "School of Business, Univ B",
            "Abstract: text follows",
            "Department never reached",
        ]);
        let got = affiliations(&ls, 2, &ExtractOptions::default());
        assert_eq!(
            got,
            vec![
                "Department of Economics, Univ A".to_string(),
                "School of Business, Univ B".to_string(),
            ]
        );
    }

    #[test]
    fn affiliations_stop_at_short_line() {
        let ls = lines(&[
            "Title",
            "Authors",
            "Department of Economics, Univ A",
            "Dept. B", // 7 chars, under the strict minimum — ends the block
            "School of Business, Univ C",
        ]);
        let got = affiliations(&ls, 2, &ExtractOptions::default());
        assert_eq!(got, vec!["Department of Economics, Univ A".to_string()]);

        // Disabling the filter keeps the whole block.
        let loose = ExtractOptions {
            min_affiliation_chars: 0,
            ..ExtractOptions::default()
        };
        assert_eq!(affiliations(&ls, 2, &loose).len(), 3);
    }

    #[test]
    fn affiliation_window_caps_collection() {
        let many: Vec<String> = (0..10)
            .map(|i| format!("Affiliation line number {i}"))
            .collect();
        let got = affiliations(&many, 0, &ExtractOptions::default());
        assert_eq!(got.len(), 6);
    }

    #[test]
    fn abstract_stops_at_first_terminator() {
        let text = "Abstract: One. Two. Keywords: k1\nIntroduction\nBody";
        assert_eq!(abstract_text(text), "One. Two.");
    }

    #[test]
    fn abstract_without_marker_is_empty() {
        assert_eq!(abstract_text("No markers anywhere."), "");
    }

    #[test]
    fn abstract_terminated_by_numbered_heading() {
        let text = "ABSTRACT\nWe examine things.\n1. Background";
        assert_eq!(abstract_text(text), "We examine things.");
    }

    #[test]
    fn keywords_split_and_trim() {
        let text = "Keywords: alpha, beta ;  gamma\nIntroduction";
        assert_eq!(keywords(text, true), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn keywords_raw_mode_keeps_one_entry() {
        let text = "Keywords: alpha, beta\nIntroduction";
        assert_eq!(keywords(text, false), vec!["alpha, beta"]);
    }

    #[test]
    fn keywords_without_terminator_are_empty() {
        assert_eq!(keywords("Keywords: a, b, c", true), Vec::<String>::new());
    }

    #[test]
    fn references_follow_the_marker_verbatim() {
        let ls = lines(&["Title", "References", "Doe, J. (2020).", "Roe, R. (2021)."]);
        assert_eq!(
            references(&ls),
            vec!["Doe, J. (2020).".to_string(), "Roe, R. (2021).".to_string()]
        );
    }

    #[test]
    fn reference_marker_matches_as_substring() {
        let ls = lines(&["Title", "7. List of References", "Doe, J. (2020)."]);
        assert_eq!(references(&ls), vec!["Doe, J. (2020).".to_string()]);
    }

    #[test]
    fn no_reference_marker_means_no_references() {
        assert!(references(&lines(&["Title", "Body"])).is_empty());
    }
}
