use arka_core::{BlockContent, InsightContent};

use super::{FieldExtractor, FieldInput};
use crate::extraction::text::{
    RESOLUTION_KEYWORDS, first_sentence, sentence_with_keyword, truncate_utf16,
};

const LEARNING_KEYWORDS: &[&str] = &["apprentissage", "leçon", "retour", "expérience"];
const CONTEXT_UNITS: usize = 200;

/// An observation, the lesson drawn from it and what to do next.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightExtractor;

impl FieldExtractor for InsightExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        BlockContent::Insight(InsightContent {
            insight: first_sentence(input.content),
            context: truncate_utf16(input.content, CONTEXT_UNITS),
            learning: sentence_with_keyword(input.content, LEARNING_KEYWORDS),
            actionable: sentence_with_keyword(input.content, RESOLUTION_KEYWORDS),
        })
    }
}
