//! Stage-callback trait for conversion progress.
//!
//! The pipeline is a short, strictly sequential chain of stages, so progress
//! is reported per stage rather than per item. Inject a [`StageCallback`]
//! into [`crate::convert::parse_manuscript`] or [`crate::convert::convert`]
//! to receive events; the CLI renders them as a spinner, library callers can
//! forward them anywhere.
//!
//! All methods default to no-ops so implementations only override what they
//! care about. The trait is `Send + Sync` because the rendering stage runs
//! on a blocking worker thread.

/// One step of the conversion pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Gating and reading the input file bytes.
    Reading,
    /// Opening the archive and decoding the document XML.
    Decoding,
    /// Running the structure-extraction heuristics.
    Extracting,
    /// Laying out and writing the PDF.
    Rendering,
}

impl Stage {
    /// Human-readable label, used verbatim by the CLI spinner.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Reading => "Reading manuscript",
            Stage::Decoding => "Decoding document",
            Stage::Extracting => "Extracting structure",
            Stage::Rendering => "Rendering PDF",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives stage lifecycle events from the pipeline.
pub trait StageCallback: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage finishes successfully. A failed stage reports its
    /// error through the returned `Result` instead, never through here.
    fn on_stage_complete(&self, stage: Stage) {
        let _ = stage;
    }
}

/// Default callback for callers that don't need progress events.
pub struct NoopStageCallback;

impl StageCallback for NoopStageCallback {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        events: Mutex<Vec<(Stage, bool)>>,
    }

    impl StageCallback for Recorder {
        fn on_stage_start(&self, stage: Stage) {
            self.events.lock().unwrap().push((stage, false));
        }
        fn on_stage_complete(&self, stage: Stage) {
            self.events.lock().unwrap().push((stage, true));
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopStageCallback;
        cb.on_stage_start(Stage::Reading);
        cb.on_stage_complete(Stage::Rendering);
    }

    #[test]
    fn recorder_sees_start_and_complete() {
        let cb = Recorder {
            events: Mutex::new(Vec::new()),
        };
        cb.on_stage_start(Stage::Extracting);
        cb.on_stage_complete(Stage::Extracting);
        let events = cb.events.lock().unwrap();
        assert_eq!(*events, vec![(Stage::Extracting, false), (Stage::Extracting, true)]);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(Stage::Reading.to_string(), "Reading manuscript");
        assert_eq!(Stage::Rendering.label(), "Rendering PDF");
    }
}
