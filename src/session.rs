//! An editing session: one manuscript, editable metadata, repeat renders.
//!
//! The session mirrors the submission workflow: upload a manuscript, adjust
//! the issue metadata, generate, adjust again, generate again. The record
//! is replaced wholesale on every successful upload; a failed upload leaves
//! the previous record and metadata untouched, so a typo'd path never
//! destroys an edited session.

use crate::config::{ConvertConfig, JournalMetadata};
use crate::convert::parse_manuscript;
use crate::error::ConvertError;
use crate::layout::{render_pdf, RenderedPdf};
use crate::manuscript::ManuscriptRecord;
use crate::progress::NoopStageCallback;
use std::path::Path;
use tracing::info;

/// Stateful upload/edit/generate workflow over one [`ConvertConfig`].
#[derive(Debug)]
pub struct Session {
    config: ConvertConfig,
    metadata: JournalMetadata,
    record: Option<ManuscriptRecord>,
}

impl Session {
    /// Fresh session with today's metadata defaults and no manuscript.
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            metadata: JournalMetadata::default(),
            record: None,
        }
    }

    /// The manuscript currently loaded, if any.
    pub fn record(&self) -> Option<&ManuscriptRecord> {
        self.record.as_ref()
    }

    pub fn metadata(&self) -> &JournalMetadata {
        &self.metadata
    }

    /// Edit the issue metadata in place between renders.
    pub fn metadata_mut(&mut self) -> &mut JournalMetadata {
        &mut self.metadata
    }

    /// Upload a manuscript, replacing any previous one.
    ///
    /// On failure the session keeps its previous record: the replacement
    /// only happens once parsing has fully succeeded.
    pub async fn upload(&mut self, path: &Path) -> Result<&ManuscriptRecord, ConvertError> {
        let record = parse_manuscript(path, &self.config, &NoopStageCallback).await?;
        info!("Session loaded '{}'", record.title);
        Ok(self.record.insert(record))
    }

    /// Render the loaded manuscript under the current metadata.
    pub fn generate(&self) -> Result<RenderedPdf, ConvertError> {
        let record = self.record.as_ref().ok_or_else(|| {
            ConvertError::Internal("no manuscript uploaded in this session".into())
        })?;
        render_pdf(record, &self.metadata, &self.config)
    }
}
