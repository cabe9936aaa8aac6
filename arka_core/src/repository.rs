//! Collaborator interfaces for persisting memory blocks.
//!
//! The extraction engine itself never touches storage; these traits describe
//! what the capture service needs from whichever store backs a deployment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::block::{BlockType, HasBlockType, MemoryBlock};

/// A memory block once accepted by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredBlock {
    pub id: Uuid,
    pub project_id: Uuid,
    pub thread_id: Option<Uuid>,
    #[serde(flatten)]
    pub block: MemoryBlock,
    pub created_at: DateTime<Utc>,
}

impl StoredBlock {
    /// Wrap a freshly extracted block with a new id and timestamp.
    #[must_use]
    pub fn new(project_id: Uuid, thread_id: Option<Uuid>, block: MemoryBlock) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id,
            thread_id,
            block,
            created_at: Utc::now(),
        }
    }
}

impl HasBlockType for StoredBlock {
    fn block_type(&self) -> BlockType {
        self.block.block_type
    }
}

/// How two stored blocks relate.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    RelatesTo,
}

/// A directed relation between two stored blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextLink {
    pub id: Uuid,
    pub source_block_id: Uuid,
    pub target_block_id: Uuid,
    pub relation_type: RelationType,
    pub strength: f64,
}

impl ContextLink {
    #[must_use]
    pub fn relates_to(source_block_id: Uuid, target_block_id: Uuid, strength: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            source_block_id,
            target_block_id,
            relation_type: RelationType::RelatesTo,
            strength,
        }
    }
}

#[async_trait]
pub trait MemoryBlockRepo: Send + Sync {
    async fn insert(&self, block: &StoredBlock) -> anyhow::Result<()>;

    async fn find_by_hash(
        &self,
        project_id: &Uuid,
        hash: &str,
    ) -> anyhow::Result<Option<StoredBlock>>;

    async fn list_by_project(&self, project_id: &Uuid) -> anyhow::Result<Vec<StoredBlock>>;

    async fn list_by_type(
        &self,
        project_id: &Uuid,
        block_type: BlockType,
    ) -> anyhow::Result<Vec<StoredBlock>>;

    async fn list_by_agent(
        &self,
        project_id: &Uuid,
        agent_source: &str,
    ) -> anyhow::Result<Vec<StoredBlock>>;
}

#[async_trait]
pub trait ContextLinkRepo: Send + Sync {
    async fn link(&self, link: &ContextLink) -> anyhow::Result<()>;

    async fn links_from(&self, source_block_id: &Uuid) -> anyhow::Result<Vec<ContextLink>>;
}

/// A store that can write blocks together with the links between them.
#[async_trait]
pub trait MemoryStore: MemoryBlockRepo + ContextLinkRepo {
    /// Store every block and every link, or nothing at all.
    async fn insert_with_links(
        &self,
        blocks: &[StoredBlock],
        links: &[ContextLink],
    ) -> anyhow::Result<()>;
}
