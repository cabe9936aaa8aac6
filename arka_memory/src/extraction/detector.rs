//! Pattern detection: does one catalog entry fire for a piece of text?

use arka_core::BlockContent;
use tracing::trace;

use super::catalog::PatternSpec;
use super::text::utf16_len;
use super::fields::{FieldInput, extractor_for};
use crate::scoring::{calculate_importance, generate_tags};

const CONFIDENCE_MAX: f64 = 0.9;
const CONFIDENCE_PER_TRIGGER: f64 = 0.3;
const STRUCTURED_BONUS: f64 = 0.4;
const UNSTRUCTURED_BONUS: f64 = 0.1;

/// The outcome of a pattern that fired.
#[derive(Debug, Clone)]
pub struct Detection {
    /// The catalog entry that fired.
    pub pattern: &'static PatternSpec,

    /// Distinct triggers present in the input, in catalog order.
    pub found_triggers: Vec<&'static str>,

    pub content: BlockContent,
    pub importance: u8,
    pub tags: Vec<String>,

    /// Detection confidence in `0.0..=0.9`, before category weighting.
    pub confidence: f64,
}

/// Distinct triggers of `spec` contained in the lowercased input.
#[must_use]
pub fn found_triggers(lower: &str, spec: &PatternSpec) -> Vec<&'static str> {
    spec.triggers
        .iter()
        .copied()
        .filter(|trigger| lower.contains(trigger))
        .collect()
}

/// Confidence that a fired pattern is a true positive.
///
/// Formula: `min(0.9, triggers * 0.3 + (structured ? 0.4 : 0.1))`
#[must_use]
#[allow(
    clippy::suboptimal_flops,
    reason = "A fused multiply-add rounds differently and would shift persisted scores"
)]
pub fn detection_confidence(trigger_count: usize, structured: bool) -> f64 {
    let bonus = if structured {
        STRUCTURED_BONUS
    } else {
        UNSTRUCTURED_BONUS
    };
    (trigger_count as f64 * CONFIDENCE_PER_TRIGGER + bonus).min(CONFIDENCE_MAX)
}

/// Test one content string against one catalog entry.
///
/// Returns `None` when none of the entry's triggers occur in the content.
#[must_use]
pub fn detect(content: &str, spec: &'static PatternSpec) -> Option<Detection> {
    let lower = content.to_lowercase();
    let found = found_triggers(&lower, spec);
    if found.is_empty() {
        trace!("Pattern {} did not fire", spec.id());
        return None;
    }

    let input = FieldInput::new(content, &found);
    let structured = extractor_for(spec.block_type).extract(&input);
    let importance = calculate_importance(spec.importance_base, found.len(), utf16_len(content));
    let tags = generate_tags(spec.block_type, &found, content);
    // Every extractor returns a record, so the structured bonus always applies.
    let confidence = detection_confidence(found.len(), true);

    Some(Detection {
        pattern: spec,
        found_triggers: found,
        content: structured,
        importance,
        tags,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::catalog::pattern_for;
    use arka_core::BlockType;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn spec(block_type: BlockType) -> &'static PatternSpec {
        pattern_for(block_type).expect("every block type is catalogued")
    }

    #[test]
    fn test_no_trigger_no_detection() {
        assert!(detect("Rien de particulier ici", spec(BlockType::Blocker)).is_none());
        assert!(detect("", spec(BlockType::Vision)).is_none());
    }

    #[test]
    fn test_triggers_counted_once_in_catalog_order() {
        let found = found_triggers(
            "livrable, objectif, objectif, livrable",
            spec(BlockType::Vision),
        );
        assert_eq!(found, vec!["objectif", "livrable"]);
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let detection = detect("NOUS DÉCIDERONS DEMAIN", spec(BlockType::Decision));
        assert!(detection.is_some_and(|d| d.found_triggers == vec!["décide"]));
    }

    #[test]
    fn test_confidence_formula() {
        assert!((detection_confidence(1, true) - 0.7).abs() < 1e-9);
        assert!((detection_confidence(1, false) - 0.4).abs() < 1e-9);
        assert!((detection_confidence(2, true) - 0.9).abs() < 1e-9);
        assert!((detection_confidence(5, false) - 0.9).abs() < 1e-9);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_detection_carries_scores() {
        let detection = detect(
            "Audit de gouvernance: validation conforme par le PMO",
            spec(BlockType::Governance),
        )
        .expect("governance triggers are present");

        assert_eq!(
            detection.found_triggers,
            vec!["validation", "conforme", "audit", "gouvernance"]
        );
        assert_eq!(detection.importance, 10);
        assert_eq!(detection.tags, vec!["governance", "validation", "conforme", "agents"]);
        assert!((detection.confidence - 0.9).abs() < 1e-9);
        assert!(matches!(detection.content, BlockContent::Governance(_)));
    }
}
