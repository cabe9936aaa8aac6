//! Capture service: extracts blocks from incoming messages and stores them.
//!
//! This is the ingestion side of the engine. It validates a capture request,
//! runs the extraction pipeline, drops blocks the project already holds,
//! links new decisions to new vision blocks and reports the project's
//! updated context completion. Blocks and links of one capture are written
//! in a single store call, so a failed capture leaves nothing behind.

use std::sync::Arc;

use arka_core::{BlockType, ContextLink, MemoryStore, StoredBlock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::completion::calculate_context_completion;
use crate::extraction::ExtractionEngine;
use crate::summary::ProjectMemorySummary;

/// Default upper bound on the joined content of one capture.
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Strength given to decision-to-vision links.
const DECISION_VISION_LINK_STRENGTH: f64 = 0.7;

const BLOCK_SEPARATOR: &str = "\n\n";

pub type Result<T> = std::result::Result<T, CaptureError>;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("content_blocks must be a non-empty array")]
    EmptyContentBlocks,

    #[error("No content to extract from content_blocks")]
    NoContent,

    #[error("Content is {len} bytes, above the {max} byte limit")]
    ContentTooLarge { len: usize, max: usize },

    #[error("No meaningful memory blocks could be extracted (confidence {confidence})")]
    NoBlocksExtracted { confidence: f64 },

    #[error("Repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

/// A batch of messages to capture into a project's memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub project_id: Uuid,

    #[serde(default)]
    pub thread_id: Option<Uuid>,

    /// Message bodies, joined with blank lines before extraction.
    pub content_blocks: Vec<String>,

    #[serde(default)]
    pub agent_source: Option<String>,
}

impl CaptureRequest {
    #[must_use]
    pub fn new(project_id: Uuid, content_blocks: Vec<String>) -> Self {
        Self {
            project_id,
            thread_id: None,
            content_blocks,
            agent_source: None,
        }
    }

    #[must_use]
    pub fn with_agent_source(mut self, agent_source: impl Into<String>) -> Self {
        self.agent_source = Some(agent_source.into());
        self
    }

    #[must_use]
    pub const fn with_thread(mut self, thread_id: Uuid) -> Self {
        self.thread_id = Some(thread_id);
        self
    }
}

/// Outcome of a successful capture.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureReport {
    pub project_id: Uuid,
    pub memory_blocks_created: usize,
    pub duplicates_skipped: usize,
    pub blocks: Vec<StoredBlock>,
    pub context_links_created: usize,
    /// Completion over every block the project holds after this capture.
    pub context_completion: u8,
    pub agents_notified: Vec<String>,
    pub extraction_confidence: f64,
}

/// Runs extraction and persistence for capture requests.
pub struct CaptureService<R> {
    repo: Arc<R>,
    engine: ExtractionEngine,
    max_content_bytes: usize,
}

impl<R> CaptureService<R>
where
    R: MemoryStore,
{
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            engine: ExtractionEngine::new(),
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }

    #[must_use]
    pub const fn with_max_content_bytes(mut self, max_content_bytes: usize) -> Self {
        self.max_content_bytes = max_content_bytes;
        self
    }

    /// Capture one request into the project's memory.
    pub async fn capture(&self, request: &CaptureRequest) -> Result<CaptureReport> {
        let content = self.validate(request)?;

        let extraction = self.engine.extract(&content, request.agent_source.as_deref());
        if extraction.is_empty() {
            return Err(CaptureError::NoBlocksExtracted {
                confidence: extraction.metadata.confidence,
            });
        }

        let mut stored = Vec::with_capacity(extraction.blocks.len());
        let mut duplicates_skipped = 0;
        for block in extraction.blocks {
            if let Some(existing) = self
                .repo
                .find_by_hash(&request.project_id, &block.hash)
                .await?
            {
                warn!(
                    "Skipping duplicate {} block \"{}\", already stored as {}",
                    block.block_type,
                    block.content.headline(),
                    existing.id
                );
                duplicates_skipped += 1;
                continue;
            }
            stored.push(StoredBlock::new(request.project_id, request.thread_id, block));
        }

        let links = link_decisions_to_vision(&stored);
        self.repo.insert_with_links(&stored, &links).await?;

        let project_blocks = self.repo.list_by_project(&request.project_id).await?;
        let context_completion = calculate_context_completion(&project_blocks);

        info!(
            "Captured {} blocks for project {} ({} duplicates, completion {}%)",
            stored.len(),
            request.project_id,
            duplicates_skipped,
            context_completion
        );

        Ok(CaptureReport {
            project_id: request.project_id,
            memory_blocks_created: stored.len(),
            duplicates_skipped,
            blocks: stored,
            context_links_created: links.len(),
            context_completion,
            agents_notified: extraction.metadata.agent_mentions,
            extraction_confidence: extraction.metadata.confidence,
        })
    }

    /// Summarize everything the project holds.
    pub async fn summarize(&self, project_id: &Uuid) -> Result<ProjectMemorySummary> {
        let blocks = self.repo.list_by_project(project_id).await?;
        Ok(ProjectMemorySummary::from_blocks(*project_id, &blocks))
    }

    /// Check the request and return the joined content to extract from.
    fn validate(&self, request: &CaptureRequest) -> Result<String> {
        if request.content_blocks.is_empty() {
            return Err(CaptureError::EmptyContentBlocks);
        }
        if request.content_blocks.iter().all(|block| block.trim().is_empty()) {
            return Err(CaptureError::NoContent);
        }
        let content = request.content_blocks.join(BLOCK_SEPARATOR);
        if content.len() > self.max_content_bytes {
            return Err(CaptureError::ContentTooLarge {
                len: content.len(),
                max: self.max_content_bytes,
            });
        }
        Ok(content)
    }
}

/// Link every new decision to every new vision block.
fn link_decisions_to_vision(stored: &[StoredBlock]) -> Vec<ContextLink> {
    let of_type = |block_type: BlockType| {
        stored
            .iter()
            .filter(move |record| record.block.block_type == block_type)
    };

    of_type(BlockType::Decision)
        .flat_map(|decision| {
            of_type(BlockType::Vision).map(|vision| {
                ContextLink::relates_to(decision.id, vision.id, DECISION_VISION_LINK_STRENGTH)
            })
        })
        .collect()
}
