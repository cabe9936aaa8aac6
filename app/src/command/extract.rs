use std::path::PathBuf;

use arka_memory::ExtractionEngine;
use tracing::info;

use super::{print_json, read_text};

/// Input for [`ExtractStrategy`].
#[derive(Debug, Clone, Default)]
pub struct ExtractInput {
    /// Inline text; takes precedence over `file`.
    pub message: Option<String>,
    /// File to read; stdin when neither `message` nor `file` is set.
    pub file: Option<PathBuf>,
    pub agent_source: Option<String>,
    pub compact: bool,
}

/// Strategy for running the extraction pipeline on one text.
///
/// Prints the full `ExtractionResult` as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractStrategy {
    engine: ExtractionEngine,
}

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let content = match input.message {
            Some(message) => message,
            None => read_text(input.file.as_deref()).await?,
        };

        let result = self
            .engine
            .extract(&content, input.agent_source.as_deref());
        info!(
            "Extracted {} blocks (confidence {})",
            result.blocks.len(),
            result.metadata.confidence
        );

        print_json(&result, input.compact)
    }
}
