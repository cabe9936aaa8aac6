//! Per-type structured field extraction.
//!
//! Each block type has one [`FieldExtractor`] implementation. The pipeline
//! picks the implementation matching the catalog entry that fired; unknown
//! identifiers fall back to [`GenericExtractor`].

mod blocker;
mod decision;
mod evolution;
mod governance;
mod insight;
mod interaction;
mod vision;

use std::str::FromStr;

use arka_core::{BlockContent, BlockType, GenericContent};

use super::text::{agent_mentions, non_blank_lines, truncate_utf16};

pub use blocker::BlockerExtractor;
pub use decision::DecisionExtractor;
pub use evolution::ContextEvolutionExtractor;
pub use governance::GovernanceExtractor;
pub use insight::InsightExtractor;
pub use interaction::AgentsInteractionExtractor;
pub use vision::VisionExtractor;

const GENERIC_SUMMARY_UNITS: usize = 200;

/// Everything an extractor may look at for one input.
#[derive(Debug, Clone)]
pub struct FieldInput<'a> {
    /// The raw input text.
    pub content: &'a str,

    /// `content`, lowercased once.
    pub lower: String,

    /// Lines whose trimmed text is non-empty, untrimmed.
    pub lines: Vec<&'a str>,

    /// Triggers of the firing pattern found in the input, in catalog order.
    pub triggers: &'a [&'static str],
}

impl<'a> FieldInput<'a> {
    #[must_use]
    pub fn new(content: &'a str, triggers: &'a [&'static str]) -> Self {
        Self {
            content,
            lower: content.to_lowercase(),
            lines: non_blank_lines(content),
            triggers,
        }
    }

    /// Returns true if the lowercased input mentions `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    /// Returns true if the lowercased input mentions any of `needles`.
    #[must_use]
    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.mentions(needle))
    }

    /// The first known agent mentioned in the input, or empty.
    #[must_use]
    pub fn first_agent(&self) -> String {
        agent_mentions(self.content)
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

/// Heuristic parsing of structured fields for one block type.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent;
}

/// Fallback extractor: a short summary plus the full text.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericExtractor;

impl FieldExtractor for GenericExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        BlockContent::Generic(GenericContent {
            summary: truncate_utf16(input.content, GENERIC_SUMMARY_UNITS),
            full_content: input.content.to_string(),
        })
    }
}

/// The extractor registered for a block type.
#[must_use]
pub fn extractor_for(block_type: BlockType) -> &'static dyn FieldExtractor {
    match block_type {
        BlockType::Vision => &VisionExtractor,
        BlockType::Decision => &DecisionExtractor,
        BlockType::Blocker => &BlockerExtractor,
        BlockType::ContextEvolution => &ContextEvolutionExtractor,
        BlockType::AgentsInteraction => &AgentsInteractionExtractor,
        BlockType::Governance => &GovernanceExtractor,
        BlockType::Insight => &InsightExtractor,
    }
}

/// Extract structured fields for a pattern identifier.
///
/// Identifiers that do not name a block type get the generic record.
#[must_use]
pub fn extract_fields(pattern_id: &str, content: &str, triggers: &[&'static str]) -> BlockContent {
    let input = FieldInput::new(content, triggers);
    BlockType::from_str(pattern_id).map_or_else(
        |_| GenericExtractor.extract(&input),
        |block_type| extractor_for(block_type).extract(&input),
    )
}
