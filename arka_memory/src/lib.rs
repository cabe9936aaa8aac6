#![warn(
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
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

pub mod capture;
pub mod completion;
mod dedup;
pub mod extraction;
pub mod scoring;
pub mod storage;
pub mod summary;

pub use capture::{CaptureError, CaptureReport, CaptureRequest, CaptureService};
pub use completion::{TypeCounts, calculate_context_completion};
pub use dedup::{block_hash, is_block_hash};
pub use extraction::catalog::{PATTERN_CATALOG, PatternSpec, default_catalog};
pub use extraction::engine::{ExtractionEngine, extract_memory_blocks};
pub use scoring::{calculate_importance, generate_tags};
pub use storage::InMemoryBlockRepo;
pub use summary::{AgentState, GovernanceDigest, MemoryTotals, ProjectMemorySummary};
