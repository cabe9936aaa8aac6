//! Utility functions for content hashing and deduplication.

use sha2::{Digest, Sha256};

use crate::block::BlockContent;

/// Prefix carried by every block hash.
pub const HASH_PREFIX: &str = "sha256:";

/// Compute the content-addressed hash of a block's structured content.
///
/// The content is serialized as pretty-printed JSON (two-space indent,
/// fields in declaration order) and digested with SHA-256. Identical
/// content always yields the same `sha256:<64 hex>` string, in any process.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "Block records hold only strings, lists, small integers and unit enums"
)]
pub fn block_hash(content: &BlockContent) -> String {
    let canonical =
        serde_json::to_string_pretty(content).expect("block records always serialize to JSON");
    digest_hex(canonical.as_bytes())
}

/// Hex-encoded, prefixed SHA-256 digest of raw bytes.
#[must_use]
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{HASH_PREFIX}{:x}", hasher.finalize())
}

/// Returns true when `hash` has the `sha256:<64 lowercase hex>` shape.
#[must_use]
pub fn is_block_hash(hash: &str) -> bool {
    hash.strip_prefix(HASH_PREFIX).is_some_and(|hex| {
        hex.len() == 64 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    })
}
