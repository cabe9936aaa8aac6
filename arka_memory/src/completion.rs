//! Context completion: how much of a project's knowledge base is filled in.
//!
//! Five block types contribute, each with its own weight; blockers and
//! insights never count. The weighted sum is normalized against a fixed
//! "fully mature project" size of 10 and expressed as a 0-100 percentage.

use arka_core::{BlockType, HasBlockType};

/// Weighted sum at which a project counts as fully documented.
///
/// Unrelated to the detection weights of the pattern catalog.
const MATURE_PROJECT_SCORE: f64 = 10.0;

const VISION_WEIGHT: f64 = 0.3;
const DECISION_WEIGHT: f64 = 0.25;
const CONTEXT_EVOLUTION_WEIGHT: f64 = 0.2;
const AGENTS_INTERACTION_WEIGHT: f64 = 0.15;
const GOVERNANCE_WEIGHT: f64 = 0.1;

/// Per-type block counts relevant to completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub vision: u32,
    pub decision: u32,
    pub blocker: u32,
    pub context_evolution: u32,
    pub agents_interaction: u32,
    pub governance: u32,
    pub insight: u32,
}

impl TypeCounts {
    /// Count block types in a collection.
    pub fn tally<'a, T, I>(blocks: I) -> Self
    where
        T: HasBlockType + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut counts = Self::default();
        for block in blocks {
            let slot = match block.block_type() {
                BlockType::Vision => &mut counts.vision,
                BlockType::Decision => &mut counts.decision,
                BlockType::Blocker => &mut counts.blocker,
                BlockType::ContextEvolution => &mut counts.context_evolution,
                BlockType::AgentsInteraction => &mut counts.agents_interaction,
                BlockType::Governance => &mut counts.governance,
                BlockType::Insight => &mut counts.insight,
            };
            *slot = slot.saturating_add(1);
        }
        counts
    }

    /// Weighted sum over the five contributing types.
    #[must_use]
    #[allow(
        clippy::suboptimal_flops,
        reason = "Fused multiply-adds round differently and would shift published percentages"
    )]
    pub fn weighted_score(&self) -> f64 {
        f64::from(self.vision) * VISION_WEIGHT
            + f64::from(self.decision) * DECISION_WEIGHT
            + f64::from(self.context_evolution) * CONTEXT_EVOLUTION_WEIGHT
            + f64::from(self.agents_interaction) * AGENTS_INTERACTION_WEIGHT
            + f64::from(self.governance) * GOVERNANCE_WEIGHT
    }

    /// Completion percentage in `0..=100`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Value is clamped to 0..=100 before the cast"
    )]
    pub fn completion(&self) -> u8 {
        let percentage = (self.weighted_score() / MATURE_PROJECT_SCORE * 100.0).round();
        percentage.clamp(0.0, 100.0) as u8
    }
}

/// Compute the context completion percentage of a block collection.
///
/// Formula: `clamp(0, 100, round((0.3 v + 0.25 d + 0.2 c + 0.15 a + 0.1 g) / 10 * 100))`
pub fn calculate_context_completion<'a, T, I>(blocks: I) -> u8
where
    T: HasBlockType + 'a,
    I: IntoIterator<Item = &'a T>,
{
    TypeCounts::tally(blocks).completion()
}
