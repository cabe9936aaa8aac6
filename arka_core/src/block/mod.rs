//! Memory block value types.
//!
//! A memory block is a typed, scored unit of knowledge extracted from one
//! piece of free text. Blocks carry no id or timestamp: those are assigned
//! by the store that persists them.

mod content;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub use content::{
    AgentsInteractionContent, BlockContent, BlockerContent, ContextEvolutionContent,
    DecisionContent, GenericContent, GovernanceContent, InsightContent, RiskLevel, Urgency,
    VisionContent,
};

/// The category of a memory block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockType {
    /// Project objectives, constraints and deliverables.
    Vision = 0,
    /// A choice that was made, with its rationale.
    Decision = 1,
    /// Something preventing progress.
    Blocker = 2,
    /// A change of direction or context.
    ContextEvolution = 3,
    /// Coordination between agents.
    AgentsInteraction = 4,
    /// Gates, audits and validations.
    Governance = 5,
    /// A lesson learned or observation.
    Insight = 6,
}

impl BlockType {
    /// All block types in catalog order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Vision,
            Self::Decision,
            Self::Blocker,
            Self::ContextEvolution,
            Self::AgentsInteraction,
            Self::Governance,
            Self::Insight,
        ]
    }

    /// Returns the string representation of this block type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::Decision => "decision",
            Self::Blocker => "blocker",
            Self::ContextEvolution => "context_evolution",
            Self::AgentsInteraction => "agents_interaction",
            Self::Governance => "governance",
            Self::Insight => "insight",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown block type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown block type: {0}")]
pub struct ParseBlockTypeError(pub String);

impl FromStr for BlockType {
    type Err = ParseBlockTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vision" => Ok(Self::Vision),
            "decision" => Ok(Self::Decision),
            "blocker" => Ok(Self::Blocker),
            "context_evolution" => Ok(Self::ContextEvolution),
            "agents_interaction" => Ok(Self::AgentsInteraction),
            "governance" => Ok(Self::Governance),
            "insight" => Ok(Self::Insight),
            _ => Err(ParseBlockTypeError(s.to_string())),
        }
    }
}

/// Anything that exposes the type of a memory block.
///
/// Completion scoring only looks at block types, so it accepts bare
/// `BlockType` values as well as full blocks and stored records.
pub trait HasBlockType {
    fn block_type(&self) -> BlockType;
}

impl HasBlockType for BlockType {
    fn block_type(&self) -> BlockType {
        *self
    }
}

/// A typed, scored, taggable unit of knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryBlock {
    pub block_type: BlockType,

    /// Structured fields; the schema depends on `block_type`.
    pub content: BlockContent,

    /// Free-text identifier echoed from the caller, never validated.
    pub agent_source: Option<String>,

    /// Priority score in `1..=10`.
    pub importance: u8,

    /// Deduplicated ordered tags, at most five.
    pub tags: Vec<String>,

    /// `sha256:<hex>` digest of the canonical content serialization.
    pub hash: String,
}

impl HasBlockType for MemoryBlock {
    fn block_type(&self) -> BlockType {
        self.block_type
    }
}

/// Metadata describing one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionMetadata {
    /// Weighted mean detection confidence, rounded to two decimals.
    pub confidence: f64,

    /// Identifiers of the catalog entries that fired, in catalog order.
    pub patterns_detected: Vec<BlockType>,

    /// Known agents mentioned anywhere in the input, in roster order.
    pub agent_mentions: Vec<String>,
}

/// The blocks and metadata produced from one input string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub blocks: Vec<MemoryBlock>,
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Returns true when no pattern fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Distinct block types present in this result, in catalog order.
    #[must_use]
    pub fn block_types(&self) -> Vec<BlockType> {
        let mut types: Vec<BlockType> = self.blocks.iter().map(|b| b.block_type).collect();
        types.dedup();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_conversion() {
        assert_eq!(BlockType::ContextEvolution.as_str(), "context_evolution");
        assert_eq!(
            BlockType::from_str("AGENTS_INTERACTION"),
            Ok(BlockType::AgentsInteraction)
        );
        assert!(BlockType::from_str("meeting").is_err());
    }

    #[test]
    fn test_block_type_round_trips_every_variant() {
        for kind in BlockType::all() {
            assert_eq!(BlockType::from_str(kind.as_str()), Ok(*kind));
        }
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_block_type_serializes_snake_case() {
        let json = serde_json::to_string(&BlockType::AgentsInteraction)
            .expect("block type should serialize");
        assert_eq!(json, "\"agents_interaction\"");
    }
}
