//! Importance scoring and tag generation for extracted blocks.

use arka_core::BlockType;

use crate::extraction::text::agent_mentions;

/// Highest importance a block can carry.
pub const IMPORTANCE_MAX: u8 = 10;

/// Content longer than this many UTF-16 units earns a detail bonus.
const DETAILED_CONTENT_UNITS: usize = 500;

/// More distinct triggers than this earn a breadth bonus.
const BROAD_SIGNAL_TRIGGERS: usize = 2;

const TRIGGER_TAGS_MAX: usize = 2;
const TAGS_MAX: usize = 5;
const AGENTS_TAG: &str = "agents";

/// Topic keywords that become tags when mentioned, in tag order.
const TOPIC_TAGS: &[&str] = &["budget", "planning", "sécurité"];

/// Compute block importance from the category base and the evidence.
///
/// Formula: `min(10, base + [triggers > 2] + [utf16 units > 500])`
#[must_use]
pub fn calculate_importance(importance_base: u8, trigger_count: usize, content_units: usize) -> u8 {
    let mut importance = importance_base;
    if trigger_count > BROAD_SIGNAL_TRIGGERS {
        importance = importance.saturating_add(1);
    }
    if content_units > DETAILED_CONTENT_UNITS {
        importance = importance.saturating_add(1);
    }
    importance.min(IMPORTANCE_MAX)
}

/// Generate the ordered, deduplicated tag list for a block.
///
/// Order: the category name, up to two matched triggers, `agents` when a
/// known agent is mentioned, then any topic keyword present. At most five.
#[must_use]
pub fn generate_tags(block_type: BlockType, found_triggers: &[&str], content: &str) -> Vec<String> {
    let lower = content.to_lowercase();

    let mut candidates: Vec<&str> = vec![block_type.as_str()];
    candidates.extend(found_triggers.iter().take(TRIGGER_TAGS_MAX));
    if !agent_mentions(content).is_empty() {
        candidates.push(AGENTS_TAG);
    }
    candidates.extend(TOPIC_TAGS.iter().filter(|topic| lower.contains(*topic)));

    let mut tags: Vec<String> = Vec::with_capacity(TAGS_MAX);
    for candidate in candidates {
        if tags.len() == TAGS_MAX {
            break;
        }
        if !tags.iter().any(|tag| tag == candidate) {
            tags.push(candidate.to_string());
        }
    }
    tags
}
