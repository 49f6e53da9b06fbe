//! # docx2journal
//!
//! Convert Word manuscripts (.docx) into stylized journal-article PDFs.
//!
//! ## Why this crate?
//!
//! Small journals receive manuscripts as loosely formatted Word files and
//! republish them under a fixed house template — masthead, two-column body,
//! boxed abstract, striped tables, numbered footers. Doing that by hand in a
//! word processor takes an editor an afternoon per issue. This crate reads
//! the manuscript, recovers its structure heuristically (no styles or
//! markup required of the author), and lays the result out on the journal
//! template deterministically.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .docx
//!  │
//!  ├─ 1. Gate     extension, size limit, ZIP magic
//!  ├─ 2. Decode   word/document.xml → raw text + minimal HTML
//!  ├─ 3. Extract  title / authors / abstract / sections / tables (heuristic)
//!  ├─ 4. Layout   masthead, boxed front matter, column flow, table pages
//!  └─ 5. Output   PDF bytes + derived filename + per-stage stats
//! ```
//!
//! Extraction never fails on thin input: each heuristic that finds nothing
//! leaves a fallback value, and [`ManuscriptRecord::summary`] reports what
//! was actually detected so callers can warn instead of erroring.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docx2journal::{convert, ConvertConfig, JournalMetadata, NoopStageCallback};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConvertConfig::default();
//!     let metadata = JournalMetadata::default();
//!     let output = convert("manuscript.docx", &metadata, &config, &NoopStageCallback).await?;
//!     std::fs::write(&output.pdf.filename, &output.pdf.bytes)?;
//!     eprintln!("{} pages in {}ms", output.stats.page_count, output.stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! For the upload / edit metadata / regenerate workflow, use [`Session`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docx2journal` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! docx2journal = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod docx;
pub mod error;
pub mod extract;
pub mod input;
pub mod layout;
pub mod manuscript;
pub mod progress;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ColumnMode, ConvertConfig, ConvertConfigBuilder, ExtractOptions, HeadingMatch,
    JournalMetadata, JournalProfile, PageGeometry, Rgb, Theme,
};
pub use convert::{
    convert, convert_sync, convert_to_file, parse_manuscript, render_to_pdf, write_atomic,
    ConvertOutput, ConvertStats,
};
pub use error::ConvertError;
pub use layout::{render_pdf, RenderedPdf};
pub use manuscript::{ManuscriptRecord, Section, StructureSummary, TableBlock};
pub use progress::{NoopStageCallback, Stage, StageCallback};
pub use session::Session;
