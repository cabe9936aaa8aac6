use arka_core::{BlockContent, ContextEvolutionContent};

use super::{FieldExtractor, FieldInput};
use crate::extraction::text::{agent_mentions, first_sentence, rationale};

const PAST_MARKERS: &[&str] = &["avant", "précédemment", "auparavant", "initialement"];
const PRESENT_MARKERS: &[&str] = &["maintenant", "désormais", "dorénavant", "actuellement"];

/// A change of context: what it was, what it is now, and why.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextEvolutionExtractor;

impl FieldExtractor for ContextEvolutionExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        let reason = match rationale(input.content) {
            r if r.is_empty() => first_sentence(input.content),
            r => r,
        };

        BlockContent::ContextEvolution(ContextEvolutionContent {
            previous_state: previous_state(input),
            new_state: new_state(input),
            reason,
            agents_impacted: agent_mentions(input.content),
            impact_analysis: first_sentence(input.content),
        })
    }
}

fn previous_state(input: &FieldInput<'_>) -> String {
    if !input.mentions_any(PAST_MARKERS) {
        return String::new();
    }
    input
        .content
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// The last `.`-segment, or the second one when the text ends with a period.
fn new_state(input: &FieldInput<'_>) -> String {
    if !input.mentions_any(PRESENT_MARKERS) {
        return first_sentence(input.content);
    }
    let segments: Vec<&str> = input.content.split('.').collect();
    segments
        .last()
        .filter(|last| !last.is_empty())
        .or_else(|| segments.get(1))
        .map(|segment| (*segment).to_string())
        .unwrap_or_default()
}
