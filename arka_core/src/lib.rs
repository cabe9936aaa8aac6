#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod block;
pub mod repository;
pub mod util;

pub use block::{
    AgentsInteractionContent, BlockContent, BlockType, BlockerContent, ContextEvolutionContent,
    DecisionContent, ExtractionMetadata, ExtractionResult, GenericContent, GovernanceContent,
    HasBlockType, InsightContent, MemoryBlock, ParseBlockTypeError, RiskLevel, Urgency,
    VisionContent,
};
pub use repository::{
    ContextLink, ContextLinkRepo, MemoryBlockRepo, MemoryStore, RelationType, StoredBlock,
};
pub use util::{block_hash, is_block_hash};
