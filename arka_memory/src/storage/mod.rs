//! In-process block store.
//!
//! Keeps stored blocks and context links in memory behind async locks. It
//! backs the CLI and the tests; deployments plug their own database behind
//! the same repository traits.

use async_trait::async_trait;
use arka_core::{
    BlockType, ContextLink, ContextLinkRepo, MemoryBlockRepo, MemoryStore, StoredBlock,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Memory-backed implementation of the block and link repositories.
#[derive(Debug, Default)]
pub struct InMemoryBlockRepo {
    blocks: RwLock<Vec<StoredBlock>>,
    links: RwLock<Vec<ContextLink>>,
}

impl InMemoryBlockRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks stored across all projects.
    pub async fn len(&self) -> usize {
        self.blocks.read().await.len()
    }

    /// Returns true when no block has been stored.
    pub async fn is_empty(&self) -> bool {
        self.blocks.read().await.is_empty()
    }

    async fn filter_project<F>(&self, project_id: &Uuid, keep: F) -> Vec<StoredBlock>
    where
        F: Fn(&StoredBlock) -> bool + Send,
    {
        self.blocks
            .read()
            .await
            .iter()
            .filter(|stored| stored.project_id == *project_id && keep(stored))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MemoryBlockRepo for InMemoryBlockRepo {
    async fn insert(&self, block: &StoredBlock) -> anyhow::Result<()> {
        let mut blocks = self.blocks.write().await;
        if blocks.iter().any(|stored| stored.id == block.id) {
            anyhow::bail!("Block {} already stored", block.id);
        }
        debug!(
            "Storing {} block {} for project {}",
            block.block.block_type, block.id, block.project_id
        );
        blocks.push(block.clone());
        Ok(())
    }

    async fn find_by_hash(
        &self,
        project_id: &Uuid,
        hash: &str,
    ) -> anyhow::Result<Option<StoredBlock>> {
        Ok(self
            .blocks
            .read()
            .await
            .iter()
            .find(|stored| stored.project_id == *project_id && stored.block.hash == hash)
            .cloned())
    }

    async fn list_by_project(&self, project_id: &Uuid) -> anyhow::Result<Vec<StoredBlock>> {
        Ok(self.filter_project(project_id, |_| true).await)
    }

    async fn list_by_type(
        &self,
        project_id: &Uuid,
        block_type: BlockType,
    ) -> anyhow::Result<Vec<StoredBlock>> {
        Ok(self
            .filter_project(project_id, |stored| stored.block.block_type == block_type)
            .await)
    }

    async fn list_by_agent(
        &self,
        project_id: &Uuid,
        agent_source: &str,
    ) -> anyhow::Result<Vec<StoredBlock>> {
        Ok(self
            .filter_project(project_id, |stored| {
                stored.block.agent_source.as_deref() == Some(agent_source)
            })
            .await)
    }
}

#[async_trait]
impl ContextLinkRepo for InMemoryBlockRepo {
    async fn link(&self, link: &ContextLink) -> anyhow::Result<()> {
        self.links.write().await.push(link.clone());
        Ok(())
    }

    async fn links_from(&self, source_block_id: &Uuid) -> anyhow::Result<Vec<ContextLink>> {
        Ok(self
            .links
            .read()
            .await
            .iter()
            .filter(|link| link.source_block_id == *source_block_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MemoryStore for InMemoryBlockRepo {
    async fn insert_with_links(
        &self,
        blocks: &[StoredBlock],
        links: &[ContextLink],
    ) -> anyhow::Result<()> {
        // Both locks are held until every record is validated and written.
        let mut stored_blocks = self.blocks.write().await;
        let mut stored_links = self.links.write().await;

        for (index, block) in blocks.iter().enumerate() {
            let clashes = stored_blocks.iter().any(|stored| stored.id == block.id)
                || blocks[..index].iter().any(|earlier| earlier.id == block.id);
            if clashes {
                anyhow::bail!("Block {} already stored", block.id);
            }
        }

        let known = |id: &Uuid| {
            blocks.iter().any(|block| block.id == *id)
                || stored_blocks.iter().any(|stored| stored.id == *id)
        };
        if let Some(dangling) = links
            .iter()
            .find(|link| !known(&link.source_block_id) || !known(&link.target_block_id))
        {
            anyhow::bail!("Link {} points at an unknown block", dangling.id);
        }

        debug!("Storing {} blocks and {} links", blocks.len(), links.len());
        stored_blocks.extend_from_slice(blocks);
        stored_links.extend_from_slice(links);
        Ok(())
    }
}
