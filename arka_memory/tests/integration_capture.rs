//! Integration tests for the capture service.
//!
//! These tests verify that:
//! - Captured blocks are persisted under their project
//! - Re-capturing the same message skips duplicates
//! - New decisions are linked to new vision blocks
//! - Completion is reported over the whole project
//! - A failed write leaves nothing behind, so a retry links correctly

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arka_core::{
    BlockType, ContextLink, ContextLinkRepo, MemoryBlockRepo, MemoryStore, RelationType,
    StoredBlock,
};
use arka_memory::{CaptureError, CaptureRequest, CaptureService, InMemoryBlockRepo};
use async_trait::async_trait;
use uuid::Uuid;

/// Store whose next batch write fails once, after which it behaves normally.
struct FailOnceStore {
    inner: InMemoryBlockRepo,
    fail_next_write: AtomicBool,
}

impl FailOnceStore {
    fn failing() -> Self {
        Self {
            inner: InMemoryBlockRepo::new(),
            fail_next_write: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl MemoryBlockRepo for FailOnceStore {
    async fn insert(&self, block: &StoredBlock) -> anyhow::Result<()> {
        self.inner.insert(block).await
    }

    async fn find_by_hash(
        &self,
        project_id: &Uuid,
        hash: &str,
    ) -> anyhow::Result<Option<StoredBlock>> {
        self.inner.find_by_hash(project_id, hash).await
    }

    async fn list_by_project(&self, project_id: &Uuid) -> anyhow::Result<Vec<StoredBlock>> {
        self.inner.list_by_project(project_id).await
    }

    async fn list_by_type(
        &self,
        project_id: &Uuid,
        block_type: BlockType,
    ) -> anyhow::Result<Vec<StoredBlock>> {
        self.inner.list_by_type(project_id, block_type).await
    }

    async fn list_by_agent(
        &self,
        project_id: &Uuid,
        agent_source: &str,
    ) -> anyhow::Result<Vec<StoredBlock>> {
        self.inner.list_by_agent(project_id, agent_source).await
    }
}

#[async_trait]
impl ContextLinkRepo for FailOnceStore {
    async fn link(&self, link: &ContextLink) -> anyhow::Result<()> {
        self.inner.link(link).await
    }

    async fn links_from(&self, source_block_id: &Uuid) -> anyhow::Result<Vec<ContextLink>> {
        self.inner.links_from(source_block_id).await
    }
}

#[async_trait]
impl MemoryStore for FailOnceStore {
    async fn insert_with_links(
        &self,
        blocks: &[StoredBlock],
        links: &[ContextLink],
    ) -> anyhow::Result<()> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            anyhow::bail!("link table unavailable");
        }
        self.inner.insert_with_links(blocks, links).await
    }
}

fn planning_request(project_id: Uuid) -> CaptureRequest {
    CaptureRequest::new(
        project_id,
        vec![
            "Objectif: organiser la journée coworking".to_string(),
            "Nous décidons de valider la salle côté est, avec PMO et AGP.".to_string(),
        ],
    )
    .with_agent_source("PMO")
}

#[tokio::test]
async fn test_capture_persists_and_links_blocks() {
    let repo = Arc::new(InMemoryBlockRepo::new());
    let service = CaptureService::new(Arc::clone(&repo));
    let project_id = Uuid::now_v7();

    let report = service
        .capture(&planning_request(project_id))
        .await
        .expect("capture should succeed");

    assert_eq!(report.project_id, project_id);
    assert_eq!(report.memory_blocks_created, 2);
    assert_eq!(report.duplicates_skipped, 0);
    assert_eq!(report.context_links_created, 1);
    assert_eq!(report.context_completion, 6);
    assert_eq!(report.agents_notified, vec!["PMO", "AGP"]);
    assert!((report.extraction_confidence - 0.6).abs() < f64::EPSILON);

    let stored = repo
        .list_by_project(&project_id)
        .await
        .expect("list should succeed");
    assert_eq!(stored, report.blocks);
    assert!(
        stored
            .iter()
            .all(|block| block.block.agent_source.as_deref() == Some("PMO"))
    );

    let decision = &report.blocks[1];
    let vision = &report.blocks[0];
    assert_eq!(decision.block.block_type, BlockType::Decision);
    let links = repo
        .links_from(&decision.id)
        .await
        .expect("links should load");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].target_block_id, vision.id);
    assert_eq!(links[0].relation_type, RelationType::RelatesTo);
    assert!((links[0].strength - 0.7).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_recapture_skips_duplicates() {
    let repo = Arc::new(InMemoryBlockRepo::new());
    let service = CaptureService::new(Arc::clone(&repo));
    let project_id = Uuid::now_v7();

    service
        .capture(&planning_request(project_id))
        .await
        .expect("first capture should succeed");
    let again = service
        .capture(&planning_request(project_id))
        .await
        .expect("second capture should succeed");

    assert_eq!(again.memory_blocks_created, 0);
    assert_eq!(again.duplicates_skipped, 2);
    assert_eq!(again.context_links_created, 0);
    assert_eq!(again.context_completion, 6);
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_same_message_in_other_project_is_not_a_duplicate() {
    let repo = Arc::new(InMemoryBlockRepo::new());
    let service = CaptureService::new(Arc::clone(&repo));

    service
        .capture(&planning_request(Uuid::now_v7()))
        .await
        .expect("capture should succeed");
    let other = service
        .capture(&planning_request(Uuid::now_v7()))
        .await
        .expect("capture should succeed");

    assert_eq!(other.memory_blocks_created, 2);
    assert_eq!(repo.len().await, 4);
}

#[tokio::test]
async fn test_completion_covers_the_whole_project() {
    let repo = Arc::new(InMemoryBlockRepo::new());
    let service = CaptureService::new(Arc::clone(&repo));
    let project_id = Uuid::now_v7();
    let thread_id = Uuid::now_v7();

    service
        .capture(&planning_request(project_id))
        .await
        .expect("capture should succeed");
    let report = service
        .capture(
            &CaptureRequest::new(
                project_id,
                vec!["Nous sommes bloqués par le traiteur".to_string()],
            )
            .with_thread(thread_id),
        )
        .await
        .expect("capture should succeed");

    assert_eq!(report.memory_blocks_created, 1);
    assert_eq!(report.blocks[0].block.block_type, BlockType::Blocker);
    assert_eq!(report.blocks[0].thread_id, Some(thread_id));
    assert!(report.blocks[0].block.agent_source.is_none());
    assert_eq!(report.context_links_created, 0);
    // Blockers do not count, the earlier vision and decision still do.
    assert_eq!(report.context_completion, 6);
}

#[tokio::test]
async fn test_rejected_requests_store_nothing() {
    let repo = Arc::new(InMemoryBlockRepo::new());
    let service = CaptureService::new(Arc::clone(&repo));
    let project_id = Uuid::now_v7();

    let empty = service
        .capture(&CaptureRequest::new(project_id, Vec::new()))
        .await;
    assert!(matches!(empty, Err(CaptureError::EmptyContentBlocks)));

    let chatter = service
        .capture(&CaptureRequest::new(
            project_id,
            vec!["Merci, à demain".to_string()],
        ))
        .await;
    assert!(matches!(chatter, Err(CaptureError::NoBlocksExtracted { .. })));

    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_report_serializes_flat_blocks() {
    let service = CaptureService::new(Arc::new(InMemoryBlockRepo::new()));
    let report = service
        .capture(&planning_request(Uuid::now_v7()))
        .await
        .expect("capture should succeed");

    let json = serde_json::to_value(&report).expect("report should serialize");
    let first = &json["blocks"][0];
    assert_eq!(first["block_type"], "vision");
    assert_eq!(first["agent_source"], "PMO");
    assert_eq!(
        first["content"]["objectif"],
        "Objectif: organiser la journée coworking\n\nNous décidons de valider la salle côté est, avec PMO et AGP"
    );
    assert!(first["hash"].as_str().is_some_and(|hash| hash.starts_with("sha256:")));
    assert_eq!(json["context_completion"], 6);
}

#[tokio::test]
async fn test_failed_write_leaves_nothing_and_retry_links() {
    let store = Arc::new(FailOnceStore::failing());
    let service = CaptureService::new(Arc::clone(&store));
    let project_id = Uuid::now_v7();
    let request = CaptureRequest::new(
        project_id,
        vec![
            "Objectif: salle".to_string(),
            "Le PMO valide la salle Est".to_string(),
        ],
    );

    let failed = service.capture(&request).await;
    assert!(matches!(failed, Err(CaptureError::Repository(_))));
    assert!(store.inner.is_empty().await);

    let retried = service
        .capture(&request)
        .await
        .expect("retry should succeed");
    assert_eq!(retried.memory_blocks_created, 2);
    assert_eq!(retried.duplicates_skipped, 0);
    assert_eq!(retried.context_links_created, 1);

    let decision = retried
        .blocks
        .iter()
        .find(|block| block.block.block_type == BlockType::Decision)
        .expect("decision should be stored");
    let links = store
        .links_from(&decision.id)
        .await
        .expect("links should load");
    assert_eq!(links.len(), 1);
}

#[tokio::test]
async fn test_summary_reflects_captured_project() {
    let repo = Arc::new(InMemoryBlockRepo::new());
    let service = CaptureService::new(Arc::clone(&repo));
    let project_id = Uuid::now_v7();

    service
        .capture(&planning_request(project_id))
        .await
        .expect("capture should succeed");
    service
        .capture(&CaptureRequest::new(
            project_id,
            vec!["Nous sommes bloqués par le traiteur".to_string()],
        ))
        .await
        .expect("capture should succeed");

    let summary = service
        .summarize(&project_id)
        .await
        .expect("summary should build");

    assert_eq!(summary.memory_summary.total_blocks, 3);
    assert_eq!(summary.memory_summary.context_completion, 6);
    assert_eq!(summary.memory_summary.by_type[&BlockType::Blocker], 1);
    assert_eq!(summary.agents_state["PMO"].blocks_contributed, 2);
    assert_eq!(summary.agents_state.len(), 1);
    assert_eq!(
        summary.governance.blockers_active,
        vec!["Nous sommes bloqués par le traiteur"]
    );
    assert!(summary.governance.gates_passed.is_empty());

    let json = serde_json::to_value(&summary).expect("summary should serialize");
    assert_eq!(json["memory_summary"]["by_type"]["vision"], 1);
}
