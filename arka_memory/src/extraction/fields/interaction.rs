use arka_core::{AgentsInteractionContent, BlockContent};

use super::{FieldExtractor, FieldInput};
use crate::extraction::text::{agent_mentions, first_sentence, list_items};

const DECISION_KEYWORDS: &[&str] = &["décision", "décide", "valide"];
const ACTION_KEYWORDS: &[&str] = &["action", "tâche", "todo", "faire"];

/// Sentiment ladder, checked top to bottom; the first rung mentioned wins.
const SATISFACTION_LADDER: &[(&[&str], u8)] = &[
    (&["excellent", "parfait"], 10),
    (&["très bien", "satisfait"], 8),
    (&["bien", "ok"], 7),
    (&["moyen", "correct"], 5),
    (&["problème", "difficile"], 3),
];
const NEUTRAL_SATISFACTION: u8 = 6;

/// Who took part in an exchange, what was decided and what follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentsInteractionExtractor;

impl FieldExtractor for AgentsInteractionExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        BlockContent::AgentsInteraction(AgentsInteractionContent {
            summary: first_sentence(input.content),
            participants: agent_mentions(input.content),
            decisions_prises: list_items(input.content, DECISION_KEYWORDS),
            actions_suivies: list_items(input.content, ACTION_KEYWORDS),
            satisfaction: assess_satisfaction(input),
        })
    }
}

fn assess_satisfaction(input: &FieldInput<'_>) -> u8 {
    SATISFACTION_LADDER
        .iter()
        .find(|(words, _)| input.mentions_any(words))
        .map_or(NEUTRAL_SATISFACTION, |(_, score)| *score)
}
