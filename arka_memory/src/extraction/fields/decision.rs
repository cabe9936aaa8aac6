use arka_core::{BlockContent, DecisionContent};

use super::{FieldExtractor, FieldInput};
use crate::extraction::text::{impact_lines, rationale, truncate_utf16};

const DECISION_UNITS: usize = 200;
const SUMMARY_UNITS: usize = 100;

/// The decision line, its rationale, impacts and owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionExtractor;

impl FieldExtractor for DecisionExtractor {
    fn extract(&self, input: &FieldInput<'_>) -> BlockContent {
        let decision_line = input
            .lines
            .iter()
            .find(|line| {
                let lower = line.to_lowercase();
                input.triggers.iter().any(|trigger| lower.contains(trigger))
            })
            .or_else(|| input.lines.first())
            .copied()
            .unwrap_or_default();

        BlockContent::Decision(DecisionContent {
            decision: truncate_utf16(decision_line, DECISION_UNITS),
            rationale: rationale(input.content),
            impact: impact_lines(input.content),
            responsable: input.first_agent(),
            summary: truncate_utf16(decision_line, SUMMARY_UNITS),
        })
    }
}
