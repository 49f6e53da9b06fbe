//! Conversion entry points: manuscript path in, journal PDF out.
//!
//! The pipeline is strictly sequential — gate, read, decode, extract,
//! render — and each stage is reported through a [`StageCallback`] so the
//! CLI can show progress without the library knowing about terminals. The
//! CPU-bound stages (archive decode, layout) run under
//! [`tokio::task::spawn_blocking`] to keep the async runtime responsive
//! for callers embedding the library in a server.

use crate::config::{ConvertConfig, JournalMetadata};
use crate::docx;
use crate::error::ConvertError;
use crate::extract::extract_manuscript;
use crate::input::gate_manuscript;
use crate::layout::{render_pdf, RenderedPdf};
use crate::manuscript::ManuscriptRecord;
use crate::progress::{Stage, StageCallback};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Per-stage timings of one conversion run.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct ConvertStats {
    /// Gate + read + decode + extract, milliseconds.
    pub parse_duration_ms: u64,
    /// Layout run, milliseconds.
    pub render_duration_ms: u64,
    /// End-to-end wall time, milliseconds.
    pub total_duration_ms: u64,
    /// Pages in the produced PDF.
    pub page_count: usize,
}

/// Everything one conversion run produced.
#[derive(Debug)]
pub struct ConvertOutput {
    /// The extracted structure, for inspection or re-rendering.
    pub record: ManuscriptRecord,
    /// The finished document.
    pub pdf: RenderedPdf,
    pub stats: ConvertStats,
}

/// Parse a manuscript file into a [`ManuscriptRecord`] without rendering.
///
/// This is the `--inspect` path and the first half of [`convert`]. Returns
/// an error only when the input is rejected or undecodable; thin extraction
/// results degrade to fallbacks instead (see the record's
/// [`summary`](ManuscriptRecord::summary)).
pub async fn parse_manuscript(
    path: impl AsRef<Path>,
    config: &ConvertConfig,
    callback: &dyn StageCallback,
) -> Result<ManuscriptRecord, ConvertError> {
    let path = path.as_ref();
    info!("Parsing manuscript: {}", path.display());

    // ── Step 1: Gate and read the input ──────────────────────────────────
    callback.on_stage_start(Stage::Reading);
    let accepted = gate_manuscript(path, config.max_file_size).await?;
    let bytes = tokio::fs::read(&accepted).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ConvertError::PermissionDenied {
            path: accepted.clone(),
        },
        _ => ConvertError::Io(e),
    })?;
    debug!("Read {} bytes", bytes.len());
    callback.on_stage_complete(Stage::Reading);

    // ── Step 2: Decode the document ──────────────────────────────────────
    callback.on_stage_start(Stage::Decoding);
    let (raw_text, html) = tokio::task::spawn_blocking(move || {
        let raw_text = docx::extract_raw_text(&bytes)?;
        let html = docx::convert_to_html(&bytes)?;
        Ok::<_, ConvertError>((raw_text, html))
    })
    .await
    .map_err(|e| ConvertError::Internal(format!("decode task panicked: {e}")))??;
    callback.on_stage_complete(Stage::Decoding);

    // ── Step 3: Extract structure ────────────────────────────────────────
    callback.on_stage_start(Stage::Extracting);
    let record = extract_manuscript(&raw_text, &html, &config.extract);
    callback.on_stage_complete(Stage::Extracting);

    Ok(record)
}

/// Lay out a parsed record on a blocking worker thread.
pub async fn render_to_pdf(
    record: &ManuscriptRecord,
    metadata: &JournalMetadata,
    config: &ConvertConfig,
    callback: &dyn StageCallback,
) -> Result<RenderedPdf, ConvertError> {
    callback.on_stage_start(Stage::Rendering);
    let record = record.clone();
    let metadata = metadata.clone();
    let config = config.clone();
    let rendered = tokio::task::spawn_blocking(move || render_pdf(&record, &metadata, &config))
        .await
        .map_err(|e| ConvertError::RenderFailed {
            reason: format!("layout task panicked: {e}"),
        })??;
    callback.on_stage_complete(Stage::Rendering);
    Ok(rendered)
}

/// Convert a manuscript file to a journal PDF.
///
/// This is the primary entry point for the library: the full pipeline with
/// the PDF bytes held in memory. Use [`convert_to_file`] to also write them
/// out atomically.
pub async fn convert(
    path: impl AsRef<Path>,
    metadata: &JournalMetadata,
    config: &ConvertConfig,
    callback: &dyn StageCallback,
) -> Result<ConvertOutput, ConvertError> {
    let total_start = Instant::now();

    let parse_start = Instant::now();
    let record = parse_manuscript(path, config, callback).await?;
    let parse_duration_ms = parse_start.elapsed().as_millis() as u64;

    let render_start = Instant::now();
    let pdf = render_to_pdf(&record, metadata, config, callback).await?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    let stats = ConvertStats {
        parse_duration_ms,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        page_count: pdf.page_count,
    };
    info!(
        "Conversion complete: {} pages in {}ms",
        stats.page_count, stats.total_duration_ms
    );

    Ok(ConvertOutput { record, pdf, stats })
}

/// Convert a manuscript and write the PDF directly to a file.
///
/// The bytes go through a named temp file in the destination directory and
/// are renamed into place, so a crash mid-write never leaves a partial PDF
/// and concurrent runs targeting the same path cannot trample each other's
/// scratch file.
pub async fn convert_to_file(
    path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    metadata: &JournalMetadata,
    config: &ConvertConfig,
    callback: &dyn StageCallback,
) -> Result<ConvertStats, ConvertError> {
    let output = convert(path, metadata, config, callback).await?;
    let out = output_path.as_ref();

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ConvertError::OutputWriteFailed {
                path: out.to_path_buf(),
                source: e,
            })?;
    }

    let stats = output.stats;
    let bytes = output.pdf.bytes;
    let out_buf = out.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic(&out_buf, &bytes))
        .await
        .map_err(|e| ConvertError::Internal(format!("write task panicked: {e}")))??;

    info!("Wrote {}", out.display());
    Ok(stats)
}

/// Write `bytes` to `path` via a uniquely-named temp file in the same
/// directory, then rename into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let write_failed = |source: std::io::Error| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    std::io::Write::write_all(&mut tmp, bytes).map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    path: impl AsRef<Path>,
    metadata: &JournalMetadata,
    config: &ConvertConfig,
    callback: &dyn StageCallback,
) -> Result<ConvertOutput, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(convert(path, metadata, config, callback))
}
