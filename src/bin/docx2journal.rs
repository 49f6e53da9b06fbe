//! CLI binary for docx2journal.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConvertConfig` / `JournalMetadata` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use docx2journal::{
    convert, layout::output_filename, parse_manuscript, ColumnMode, ConvertConfig, HeadingMatch,
    JournalMetadata, ManuscriptRecord, Stage, StageCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal stage reporter: a single spinner whose message follows the
/// pipeline, with a tick line printed per completed stage.
struct CliStageCallback {
    bar: ProgressBar,
}

impl CliStageCallback {
    fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl StageCallback for CliStageCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_message(format!("{stage}…"));
    }

    fn on_stage_complete(&self, stage: Stage) {
        self.bar.println(format!("  {} {}", green("✓"), stage));
    }
}

/// Silent callback for quiet / JSON runs.
struct SilentCallback;
impl StageCallback for SilentCallback {}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (output name derived from journal profile + year)
  docx2journal manuscript.docx

  # Convert to a chosen file
  docx2journal manuscript.docx -o article.pdf

  # Set the issue metadata printed in the boxes and footer
  docx2journal --issn 2805-4237 --volume 12 --issue 3 --year 2026 manuscript.docx

  # Single-column layout, loose heading matching
  docx2journal --columns single --heading-match substring manuscript.docx

  # Inspect the extracted structure without rendering
  docx2journal --inspect manuscript.docx
  docx2journal --inspect --json manuscript.docx > structure.json

  # Accept a larger upload
  docx2journal --max-size-mb 25 thesis.docx

EXTRACTION NOTES:
  The manuscript needs no Word styles. Structure is recovered heuristically:
    line 1                  → title
    superscript markers ¹²³ → author line + affiliations
    "Abstract:" … marker    → abstract and keywords
    Introduction/Results/…  → section boundaries
    document tables         → striped grid pages

  A manuscript that matches none of these still converts — missing pieces
  fall back to placeholders and the structure summary reports the shortfall.

ENVIRONMENT VARIABLES:
  DOCX2JOURNAL_OUTPUT     Default output path (same as -o)
  DOCX2JOURNAL_ISSN       Default ISSN
  DOCX2JOURNAL_MAX_SIZE   Default size gate in MB
  RUST_LOG                Tracing filter (overrides -v/-q)
"#;

/// Convert Word manuscripts into stylized journal-article PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "docx2journal",
    version,
    about = "Convert Word manuscripts (.docx) into stylized journal-article PDFs",
    long_about = "Convert a Word manuscript into a paginated journal article: masthead, boxed \
front matter, two-column body flow, striped table pages and numbered footers. Structure is \
recovered heuristically from the document text, so manuscripts need no particular Word styles.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the manuscript (.docx).
    input: PathBuf,

    /// Write the PDF to this path instead of the derived filename.
    #[arg(short, long, env = "DOCX2JOURNAL_OUTPUT")]
    output: Option<PathBuf>,

    /// ISSN printed in the citation box and footer.
    #[arg(long, env = "DOCX2JOURNAL_ISSN")]
    issn: Option<String>,

    /// Volume number for the issue metadata.
    #[arg(long)]
    volume: Option<String>,

    /// Issue number for the issue metadata.
    #[arg(long)]
    issue: Option<String>,

    /// Received date, free text (e.g. "26th Dec 2025"). Defaults to today.
    #[arg(long)]
    received: Option<String>,

    /// Accepted date, free text. Defaults to today.
    #[arg(long)]
    accepted: Option<String>,

    /// Published date, free text. Defaults to today.
    #[arg(long)]
    published: Option<String>,

    /// Publication year, used in the citation line and output filename.
    #[arg(long)]
    year: Option<String>,

    /// Body column arrangement.
    #[arg(long, value_enum, default_value = "double")]
    columns: ColumnsArg,

    /// How section-heading keywords match a line.
    #[arg(
        long,
        value_enum,
        default_value = "prefix",
        long_help = "How section-heading keywords are matched against a line.\n\
          prefix: the line must start with the keyword (strict, default).\n\
          substring: the keyword may appear anywhere (loose; catches numbered\n\
          headings like \"1. Introduction\" but risks false positives)."
    )]
    heading_match: HeadingMatchArg,

    /// Keep the keywords capture as one raw string instead of splitting on , and ;
    #[arg(long)]
    raw_keywords: bool,

    /// Print the extracted structure, no PDF.
    #[arg(long)]
    inspect: bool,

    /// Emit the extracted record as JSON on stdout (with or without --inspect).
    #[arg(long)]
    json: bool,

    /// Maximum accepted input size in megabytes.
    #[arg(long, env = "DOCX2JOURNAL_MAX_SIZE", default_value_t = 10)]
    max_size_mb: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ColumnsArg {
    Single,
    Double,
}

impl From<ColumnsArg> for ColumnMode {
    fn from(v: ColumnsArg) -> Self {
        match v {
            ColumnsArg::Single => ColumnMode::Single,
            ColumnsArg::Double => ColumnMode::Double,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum HeadingMatchArg {
    Prefix,
    Substring,
}

impl From<HeadingMatchArg> for HeadingMatch {
    fn from(v: HeadingMatchArg) -> Self {
        match v {
            HeadingMatchArg::Prefix => HeadingMatch::Prefix,
            HeadingMatchArg::Substring => HeadingMatch::Substring,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner carries the user feedback; library logs stay at error
    // level unless the user asks for more.
    let show_progress = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli).context("Invalid configuration")?;
    let metadata = build_metadata(&cli);

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect {
        let record = parse_manuscript(&cli.input, &config, &SilentCallback)
            .await
            .context("Failed to parse manuscript")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&record).context("Failed to serialise record")?
            );
        } else {
            print_structure(&record);
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let progress = show_progress.then(CliStageCallback::new);
    let callback: &dyn StageCallback = match progress {
        Some(ref cb) => cb,
        None => &SilentCallback,
    };

    let result = convert(&cli.input, &metadata, &config, callback).await;
    if let Some(ref cb) = progress {
        cb.finish();
    }
    let output = result.context("Conversion failed")?;

    let out_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(output_filename(&config.profile, &metadata)));

    write_output(&out_path, &output.pdf.bytes)
        .await
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output.record).context("Failed to serialise record")?
        );
    }

    if !cli.quiet {
        print_structure(&output.record);
        eprintln!(
            "{}  {} pages  {}ms  →  {}",
            green("✔"),
            bold(&output.stats.page_count.to_string()),
            output.stats.total_duration_ms,
            bold(&out_path.display().to_string()),
        );
        let summary = output.record.summary();
        if summary.is_empty() {
            eprintln!(
                "{}  no structure detected — the PDF carries placeholders; \
                 check the manuscript follows the expected shape",
                cyan("⚠")
            );
        }
    }

    Ok(())
}

/// Temp file + rename in the destination directory.
async fn write_output(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let path = path.to_path_buf();
    let bytes = bytes.to_vec();
    tokio::task::spawn_blocking(move || docx2journal::write_atomic(&path, &bytes)).await??;
    Ok(())
}

/// The "structure detected" block shown after extraction.
fn print_structure(record: &ManuscriptRecord) {
    let s = record.summary();
    eprintln!("{}", bold("Structure detected:"));
    eprintln!("  Title:        {}", record.title);
    eprintln!("  Authors:      {}", record.authors);
    eprintln!(
        "  Abstract:     {}",
        if s.has_abstract {
            "yes".to_string()
        } else {
            dim("none")
        }
    );
    eprintln!("  Keywords:     {}", s.keyword_count);
    eprintln!("  Affiliations: {}", s.affiliation_count);
    eprintln!("  Sections:     {}", s.section_count);
    eprintln!("  Tables:       {}", s.table_count);
    eprintln!("  References:   {}", s.reference_count);
}

/// Map CLI args to `ConvertConfig`.
fn build_config(cli: &Cli) -> Result<ConvertConfig> {
    ConvertConfig::builder()
        .max_file_size_mb(cli.max_size_mb)
        .columns(cli.columns.into())
        .heading_match(cli.heading_match.into())
        .keywords_as_list(!cli.raw_keywords)
        .build()
        .map_err(Into::into)
}

/// Today's defaults, overridden by whichever metadata flags were given.
fn build_metadata(cli: &Cli) -> JournalMetadata {
    let mut m = JournalMetadata::default();
    if let Some(ref v) = cli.issn {
        m.issn = v.clone();
    }
    if let Some(ref v) = cli.volume {
        m.volume = v.clone();
    }
    if let Some(ref v) = cli.issue {
        m.issue = v.clone();
    }
    if let Some(ref v) = cli.received {
        m.received = v.clone();
    }
    if let Some(ref v) = cli.accepted {
        m.accepted = v.clone();
    }
    if let Some(ref v) = cli.published {
        m.published = v.clone();
    }
    if let Some(ref v) = cli.year {
        m.year = v.clone();
    }
    m
}
