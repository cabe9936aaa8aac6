//! Content hashing utilities.

// Hashing lives in arka_core so stored records can be verified without the engine.
pub use arka_core::{block_hash, is_block_hash};
