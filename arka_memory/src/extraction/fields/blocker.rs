use arka_core::{BlockContent, BlockerContent, Urgency};

use super::{FieldExtractor, FieldInput};
use crate::extraction::text::{
    RESOLUTION_KEYWORDS, first_sentence, impact_lines, sentence_with_keyword,
};

const HIGH_URGENCY: &[&str] = &["urgent", "critique"];
const MEDIUM_URGENCY: &[&str] = &["important", "priorité"];

/// What is blocked, why, and how urgently it needs resolving.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockerExtractor;

impl FieldExtractor for BlockerExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        let headline = first_sentence(input.content);

        BlockContent::Blocker(BlockerContent {
            blocker: headline.clone(),
            // No dedicated cause parser: the opening sentence stands in for it.
            cause: headline,
            impact: impact_lines(input.content).join("; "),
            resolution_needed: sentence_with_keyword(input.content, RESOLUTION_KEYWORDS),
            urgency: assess_urgency(input),
        })
    }
}

fn assess_urgency(input: &FieldInput<'_>) -> Urgency {
    if input.mentions_any(HIGH_URGENCY) {
        Urgency::High
    } else if input.mentions_any(MEDIUM_URGENCY) {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}
