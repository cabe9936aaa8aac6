//! Extraction pipeline: turns free text into typed, scored memory blocks.
//!
//! The engine walks the pattern catalog in declaration order. Every entry
//! that fires contributes one block, so a single message may yield several
//! blocks of different types.

use arka_core::{ExtractionMetadata, ExtractionResult, MemoryBlock, block_hash};
use rayon::prelude::*;
use tracing::debug;

use super::catalog::{PatternSpec, default_catalog};
use super::detector::{Detection, detect};
use super::text::agent_mentions;

/// Stateless extraction engine over an immutable pattern catalog.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionEngine {
    catalog: &'static [PatternSpec],
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionEngine {
    /// Create an engine over the default catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    /// Create an engine over a custom catalog, evaluated in slice order.
    #[must_use]
    pub const fn with_catalog(catalog: &'static [PatternSpec]) -> Self {
        Self { catalog }
    }

    /// Extract memory blocks from one piece of text.
    ///
    /// Never fails: empty or keyword-free input yields no blocks and a
    /// confidence of zero.
    #[must_use]
    pub fn extract(&self, content: &str, agent_source: Option<&str>) -> ExtractionResult {
        let mut blocks = Vec::new();
        let mut patterns_detected = Vec::new();
        let mut confidence_sum = 0.0_f64;
        let mut fired = 0_u32;

        for spec in self.catalog {
            let Some(detection) = detect(content, spec) else {
                continue;
            };
            debug!(
                "Pattern {} fired with triggers {:?} (confidence {:.2}, importance {})",
                spec.id(),
                detection.found_triggers,
                detection.confidence,
                detection.importance
            );

            confidence_sum += detection.confidence * spec.weight;
            fired += 1;
            patterns_detected.push(spec.block_type);
            blocks.push(Self::build_block(detection, agent_source));
        }

        let confidence = if fired > 0 {
            round_to_hundredths(confidence_sum / f64::from(fired))
        } else {
            0.0
        };

        debug!(
            "Extracted {} blocks from {} chars (confidence {confidence})",
            blocks.len(),
            content.chars().count()
        );

        ExtractionResult {
            blocks,
            metadata: ExtractionMetadata {
                confidence,
                patterns_detected,
                agent_mentions: agent_mentions(content),
            },
        }
    }

    /// Extract from many inputs in parallel; results keep input order.
    #[must_use]
    pub fn extract_batch<S>(
        &self,
        contents: &[S],
        agent_source: Option<&str>,
    ) -> Vec<ExtractionResult>
    where
        S: AsRef<str> + Sync,
    {
        contents
            .par_iter()
            .map(|content| self.extract(content.as_ref(), agent_source))
            .collect()
    }

    /// Assemble a block from a detection, hashing its structured content.
    fn build_block(detection: Detection, agent_source: Option<&str>) -> MemoryBlock {
        let hash = block_hash(&detection.content);
        MemoryBlock {
            block_type: detection.pattern.block_type,
            content: detection.content,
            agent_source: agent_source.map(str::to_string),
            importance: detection.importance,
            tags: detection.tags,
            hash,
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extract memory blocks with the default catalog.
#[must_use]
pub fn extract_memory_blocks(content: &str, agent_source: Option<&str>) -> ExtractionResult {
    ExtractionEngine::new().extract(content, agent_source)
}
