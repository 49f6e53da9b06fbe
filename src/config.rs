//! Configuration types for manuscript-to-PDF conversion.
//!
//! All pipeline behaviour is controlled through [`ConvertConfig`], built via
//! its [`ConvertConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across threads, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! The extraction heuristics varied across the journal's template revisions
//! (strict prefix heading match vs. loose substring match; keywords as a
//! split list vs. one raw string). Those disagreements are exposed as
//! explicit knobs on [`ExtractOptions`] instead of being hard-coded, so
//! matcher behaviour is independently testable.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

/// 10 MiB — the upload gate the journal's submission form enforces.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Heading keywords recognised as section boundaries, in match-priority order.
///
/// A line is a heading only when it matches one of these (prefix or
/// substring per [`HeadingMatch`]) AND stays under the length guard — prose
/// sentences that merely mention "results" are not headings.
pub const SECTION_KEYWORDS: &[&str] = &[
    "Introduction",
    "Methodology",
    "Method",
    "Literature Review",
    "Results",
    "Result",
    "Discussion",
    "Conclusion",
    "References",
    "Acknowledgment",
];

/// Configuration for a manuscript conversion.
///
/// Built via [`ConvertConfig::builder()`] or using
/// [`ConvertConfig::default()`].
///
/// # Example
/// ```rust
/// use docx2journal::{ColumnMode, ConvertConfig, HeadingMatch};
///
/// let config = ConvertConfig::builder()
///     .columns(ColumnMode::Double)
///     .heading_match(HeadingMatch::Prefix)
///     .max_file_size_mb(10)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Maximum accepted input size in bytes. Default: 10 MiB.
    ///
    /// Inputs larger than this are rejected before any bytes are read into
    /// memory; the whole archive is buffered during decode, so the gate
    /// bounds peak memory as well as upload abuse.
    pub max_file_size: u64,

    /// Structure-extraction heuristics. See [`ExtractOptions`].
    pub extract: ExtractOptions,

    /// Page size, margins and column arrangement. See [`PageGeometry`].
    pub geometry: PageGeometry,

    /// The journal's fixed visual identity (masthead text, theme colours,
    /// filename prefix). See [`JournalProfile`].
    pub profile: JournalProfile,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            extract: ExtractOptions::default(),
            geometry: PageGeometry::default(),
            profile: JournalProfile::default(),
        }
    }
}

impl ConvertConfig {
    /// Create a new builder for `ConvertConfig`.
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConvertConfig`].
#[derive(Debug)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    /// Input size gate in whole megabytes. Clamped to at least 1 MB.
    pub fn max_file_size_mb(mut self, mb: u64) -> Self {
        self.config.max_file_size = mb.max(1) * 1024 * 1024;
        self
    }

    pub fn heading_match(mut self, mode: HeadingMatch) -> Self {
        self.config.extract.heading_match = mode;
        self
    }

    pub fn keywords_as_list(mut self, v: bool) -> Self {
        self.config.extract.keywords_as_list = v;
        self
    }

    pub fn min_affiliation_chars(mut self, n: usize) -> Self {
        self.config.extract.min_affiliation_chars = n;
        self
    }

    pub fn columns(mut self, mode: ColumnMode) -> Self {
        self.config.geometry.columns = mode;
        self
    }

    pub fn geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn profile(mut self, profile: JournalProfile) -> Self {
        self.config.profile = profile;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConvertConfig, ConvertError> {
        if let Err(reason) = self.config.geometry.validate() {
            return Err(ConvertError::InvalidConfig(reason));
        }
        if self.config.extract.heading_max_len == 0 {
            return Err(ConvertError::InvalidConfig(
                "heading length guard must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Extraction knobs ─────────────────────────────────────────────────────

/// Heuristic parameters for the structure extractor.
///
/// Every field has the strict-variant default; loosening any of them trades
/// false negatives for false positives on unusual manuscripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// How a line is tested against [`SECTION_KEYWORDS`]. Default: prefix.
    pub heading_match: HeadingMatch,

    /// Lines at or above this length are never headings. Default: 50.
    ///
    /// The guard keeps prose that happens to open with "Results show that…"
    /// from being promoted to a section boundary.
    pub heading_max_len: usize,

    /// Split the keywords capture on `,`/`;` into trimmed tokens. Default:
    /// true. When false the raw capture is kept as a single entry.
    pub keywords_as_list: bool,

    /// Lines examined for affiliations after the author line. Default: 6.
    pub affiliation_window: usize,

    /// Affiliation lines must be strictly longer than this; the first line
    /// at or under it ends the block. Default: 10.
    ///
    /// A short fragment ("Dept.", a page artifact) is taken as the end of
    /// the affiliation block. 0 disables the check.
    pub min_affiliation_chars: usize,

    /// How many lines past the title are scanned for a superscript
    /// affiliation marker when picking the author line. Default: 9.
    pub author_scan_window: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heading_match: HeadingMatch::Prefix,
            heading_max_len: 50,
            keywords_as_list: true,
            affiliation_window: 6,
            min_affiliation_chars: 10,
            author_scan_window: 9,
        }
    }
}

/// How section-heading keywords are matched against a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadingMatch {
    /// Line must start with the keyword (case-insensitive). (default)
    #[default]
    Prefix,
    /// Keyword may appear anywhere in the line (case-insensitive).
    Substring,
}

// ── Page geometry ────────────────────────────────────────────────────────

/// Column arrangement for the manuscript body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnMode {
    /// One full-width column; abstract box spans the content width.
    Single,
    /// Two columns; abstract boxed in the left column, body flows
    /// column-then-page. (default)
    #[default]
    Double,
}

impl ColumnMode {
    /// Number of body columns.
    pub fn count(self) -> usize {
        match self {
            ColumnMode::Single => 1,
            ColumnMode::Double => 2,
        }
    }
}

/// Page size, margins and column layout, all in millimetres.
///
/// Defaults reproduce the journal template: A4 portrait with a 35 mm head
/// margin (the masthead band lives inside it), 20 mm foot, 18 mm sides and
/// an 8 mm column gutter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width. Default: 210 (A4 portrait).
    pub page_width: f32,
    /// Page height. Default: 297 (A4 portrait).
    pub page_height: f32,
    /// Top margin; body content starts below it. Default: 35.
    pub margin_top: f32,
    /// Bottom margin; the flow cursor breaks before entering it. Default: 20.
    pub margin_bottom: f32,
    /// Left margin. Default: 18.
    pub margin_left: f32,
    /// Right margin. Default: 18.
    pub margin_right: f32,
    /// Gap between the two body columns. Default: 8.
    pub column_gap: f32,
    /// Column arrangement. Default: double.
    pub columns: ColumnMode,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_top: 35.0,
            margin_bottom: 20.0,
            margin_left: 18.0,
            margin_right: 18.0,
            column_gap: 8.0,
            columns: ColumnMode::Double,
        }
    }
}

impl PageGeometry {
    /// Usable width between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Width of one body column under the current [`ColumnMode`].
    pub fn column_width(&self) -> f32 {
        match self.columns {
            ColumnMode::Single => self.content_width(),
            ColumnMode::Double => (self.content_width() - self.column_gap) / 2.0,
        }
    }

    /// X origin of column `col` (0 = left).
    pub fn column_x(&self, col: usize) -> f32 {
        match col {
            0 => self.margin_left,
            _ => self.margin_left + self.column_width() + self.column_gap,
        }
    }

    /// Y where body content starts on a fresh page.
    pub fn body_top(&self) -> f32 {
        self.margin_top + 5.0
    }

    /// Y past which a line may no longer be placed.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    /// Check the geometry can hold any content at all.
    pub fn validate(&self) -> Result<(), String> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(format!(
                "page size must be positive, got {} × {} mm",
                self.page_width, self.page_height
            ));
        }
        let horizontal = self.margin_left + self.margin_right + self.column_gap;
        if horizontal >= self.page_width {
            return Err(format!(
                "margins + gutter ({horizontal} mm) leave no room on a {} mm page",
                self.page_width
            ));
        }
        if self.margin_top + self.margin_bottom >= self.page_height {
            return Err(format!(
                "vertical margins ({} mm) leave no room on a {} mm page",
                self.margin_top + self.margin_bottom,
                self.page_height
            ));
        }
        if self.column_width() < 20.0 {
            return Err(format!(
                "column width {:.1} mm is too narrow to flow text",
                self.column_width()
            ));
        }
        Ok(())
    }
}

// ── Journal identity ─────────────────────────────────────────────────────

/// An RGB colour in 0–255 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Theme colours used throughout the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Masthead, title and section-heading colour.
    pub main: Rgb,
    /// Fill for the metadata box and alternating table rows.
    pub light_fill: Rgb,
    /// Box borders and table grid lines.
    pub border: Rgb,
    /// Secondary text (contact block, footer).
    pub text_muted: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            main: Rgb::new(0, 51, 102),
            light_fill: Rgb::new(240, 245, 255),
            border: Rgb::new(180, 180, 180),
            text_muted: Rgb::new(80, 80, 80),
        }
    }
}

/// The journal's fixed visual identity: masthead text, contact block,
/// filename prefix and theme. Unlike [`JournalMetadata`] this does not
/// change per issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalProfile {
    /// Full journal name, set in the masthead and the footer line.
    pub name: String,
    /// Italic strapline under the journal name.
    pub tagline: String,
    /// Contact block, right-aligned in the masthead.
    pub email: String,
    pub website: String,
    /// Short code used as the output filename prefix.
    pub short_name: String,
    pub theme: Theme,
}

impl Default for JournalProfile {
    fn default() -> Self {
        Self {
            name: "International Journal of Scholarly Resources".into(),
            tagline: "Business & Management Studies - A Peer-Reviewed Academic Publication"
                .into(),
            email: "editor@ijsr.org.ng".into(),
            website: "www.ijsr.org.ng".into(),
            short_name: "IJSR".into(),
            theme: Theme::default(),
        }
    }
}

// ── Issue metadata ───────────────────────────────────────────────────────

/// Per-article, user-editable metadata consumed read-only at render time.
///
/// All fields are free text — the journal's workflow types dates like
/// "26th Dec 2025" and nothing validates them as calendar dates. Defaults
/// are recomputed from the current date on every fresh session rather than
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalMetadata {
    pub received: String,
    pub accepted: String,
    pub published: String,
    pub issn: String,
    pub volume: String,
    pub issue: String,
    pub year: String,
}

impl Default for JournalMetadata {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        let stamp = format_day(today);
        Self {
            received: stamp.clone(),
            accepted: stamp.clone(),
            published: stamp,
            issn: "1234-5678".into(),
            volume: "1".into(),
            issue: "1".into(),
            year: today.format("%Y").to_string(),
        }
    }
}

/// Format a date the way the journal writes them: `26th Dec 2025`.
fn format_day(date: chrono::NaiveDate) -> String {
    use chrono::Datelike;
    let day = date.day();
    format!("{}{} {}", day, ordinal_suffix(day), date.format("%b %Y"))
}

/// English ordinal suffix for a day-of-month (1st, 2nd, 3rd, 11th…).
fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn default_config_carries_the_documented_size_gate() {
        let c = ConvertConfig::default();
        assert_eq!(c.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(c.max_file_size, 10 * 1024 * 1024);
        // builder() starts from the default, so an unconfigured build keeps it
        let built = ConvertConfig::builder().build().unwrap();
        assert_eq!(built.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn builder_clamps_size_gate() {
        let c = ConvertConfig::builder().max_file_size_mb(0).build().unwrap();
        assert_eq!(c.max_file_size, 1024 * 1024);
    }

    #[test]
    fn default_geometry_matches_template() {
        let g = PageGeometry::default();
        assert_eq!(g.content_width(), 174.0);
        assert_eq!(g.column_width(), 83.0);
        assert_eq!(g.column_x(0), 18.0);
        assert_eq!(g.column_x(1), 18.0 + 83.0 + 8.0);
        assert_eq!(g.bottom_limit(), 277.0);
        g.validate().unwrap();
    }

    #[test]
    fn single_column_spans_content_width() {
        let g = PageGeometry {
            columns: ColumnMode::Single,
            ..PageGeometry::default()
        };
        assert_eq!(g.column_width(), g.content_width());
        g.validate().unwrap();
    }

    #[test]
    fn geometry_rejects_margin_overflow() {
        let g = PageGeometry {
            margin_left: 120.0,
            margin_right: 120.0,
            ..PageGeometry::default()
        };
        assert!(g.validate().is_err());
        let err = ConvertConfig::builder().geometry(g).build();
        assert!(matches!(err, Err(ConvertError::InvalidConfig(_))));
    }

    #[test]
    fn metadata_defaults_are_populated() {
        let m = JournalMetadata::default();
        assert!(!m.received.is_empty());
        assert_eq!(m.issn, "1234-5678");
        assert_eq!(m.year.len(), 4);
    }

    #[test]
    fn day_formatting_uses_ordinals() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(format_day(d(2025, 12, 26)), "26th Dec 2025");
        assert_eq!(format_day(d(2026, 8, 1)), "1st Aug 2026");
        assert_eq!(format_day(d(2026, 8, 2)), "2nd Aug 2026");
        assert_eq!(format_day(d(2026, 8, 3)), "3rd Aug 2026");
        assert_eq!(format_day(d(2026, 8, 11)), "11th Aug 2026");
        assert_eq!(format_day(d(2026, 8, 12)), "12th Aug 2026");
        assert_eq!(format_day(d(2026, 8, 13)), "13th Aug 2026");
        assert_eq!(format_day(d(2026, 8, 21)), "21st Aug 2026");
    }
}
