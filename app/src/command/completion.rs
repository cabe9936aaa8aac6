use std::path::PathBuf;

use anyhow::Context;
use arka_core::{BlockType, HasBlockType};
use arka_memory::calculate_context_completion;
use serde::Deserialize;

use super::read_text;

/// Input for [`CompletionStrategy`].
#[derive(Debug, Clone, Default)]
pub struct CompletionInput {
    /// Block types given on the command line; used instead of `file` when non-empty.
    pub types: Vec<BlockType>,
    /// JSON array of objects carrying a `block_type` field; stdin when unset.
    pub file: Option<PathBuf>,
}

/// Any JSON block record; only its type matters for completion.
#[derive(Debug, Deserialize)]
struct TypedRecord {
    block_type: BlockType,
}

impl HasBlockType for TypedRecord {
    fn block_type(&self) -> BlockType {
        self.block_type
    }
}

/// Strategy for computing the context completion of a block collection.
#[derive(Debug, Clone, Copy)]
pub struct CompletionStrategy;

impl super::CommandStrategy for CompletionStrategy {
    type Input = CompletionInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let completion = if input.types.is_empty() {
            let text = read_text(input.file.as_deref()).await?;
            let records = parse_records(&text)?;
            calculate_context_completion(&records)
        } else {
            calculate_context_completion(&input.types)
        };

        println!("{completion}");
        Ok(())
    }
}

fn parse_records(text: &str) -> anyhow::Result<Vec<TypedRecord>> {
    serde_json::from_str(text).context("Expected a JSON array of objects with a block_type field")
}
