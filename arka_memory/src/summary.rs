//! Project memory summary: one view over everything a project has stored.

use std::collections::BTreeMap;

use arka_core::{BlockContent, BlockType, StoredBlock};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::completion::calculate_context_completion;

/// Most recent blocks carried in a summary.
pub const RECENT_BLOCKS_MAX: usize = 50;

/// Most active blockers carried in the governance digest.
pub const ACTIVE_BLOCKERS_MAX: usize = 5;

const UNKNOWN_BLOCKER: &str = "Unknown blocker";

/// Aggregate state of a project's memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMemorySummary {
    pub project_id: Uuid,
    pub memory_summary: MemoryTotals,
    /// Newest first, at most [`RECENT_BLOCKS_MAX`].
    pub memory_blocks: Vec<StoredBlock>,
    pub agents_state: BTreeMap<String, AgentState>,
    pub governance: GovernanceDigest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryTotals {
    pub total_blocks: usize,
    /// Only types with at least one block appear.
    pub by_type: BTreeMap<BlockType, usize>,
    pub context_completion: u8,
    /// Creation time of the newest block, `None` for an empty project.
    pub last_updated: Option<DateTime<Utc>>,
}

/// What one agent has contributed to the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentState {
    pub last_contribution: DateTime<Utc>,
    pub blocks_contributed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GovernanceDigest {
    /// Gate named by the newest governance block, if it names one.
    pub gates_passed: Vec<String>,
    /// Newest blockers first, at most [`ACTIVE_BLOCKERS_MAX`].
    pub blockers_active: Vec<String>,
}

impl ProjectMemorySummary {
    /// Summarize a project from its stored blocks, in any order.
    ///
    /// Blocks of other projects are ignored.
    #[must_use]
    pub fn from_blocks(project_id: Uuid, blocks: &[StoredBlock]) -> Self {
        let mut newest_first: Vec<&StoredBlock> = blocks
            .iter()
            .filter(|stored| stored.project_id == project_id)
            .collect();
        newest_first.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let mut by_type: BTreeMap<BlockType, usize> = BTreeMap::new();
        let mut agents_state: BTreeMap<String, AgentState> = BTreeMap::new();
        for stored in &newest_first {
            *by_type.entry(stored.block.block_type).or_default() += 1;

            if let Some(agent) = &stored.block.agent_source {
                let state = agents_state.entry(agent.clone()).or_insert(AgentState {
                    last_contribution: stored.created_at,
                    blocks_contributed: 0,
                });
                state.blocks_contributed += 1;
                state.last_contribution = state.last_contribution.max(stored.created_at);
            }
        }

        let memory_summary = MemoryTotals {
            total_blocks: newest_first.len(),
            by_type,
            context_completion: calculate_context_completion(newest_first.iter().copied()),
            last_updated: newest_first.first().map(|stored| stored.created_at),
        };

        Self {
            project_id,
            memory_summary,
            memory_blocks: newest_first
                .iter()
                .take(RECENT_BLOCKS_MAX)
                .map(|stored| (*stored).clone())
                .collect(),
            agents_state,
            governance: governance_digest(&newest_first),
        }
    }
}

fn governance_digest(newest_first: &[&StoredBlock]) -> GovernanceDigest {
    let gates_passed = newest_first
        .iter()
        .find_map(|stored| match &stored.block.content {
            BlockContent::Governance(governance) => Some(governance.gate_passed.clone()),
            _ => None,
        })
        .filter(|gate| !gate.is_empty())
        .into_iter()
        .collect();

    let blockers_active = newest_first
        .iter()
        .filter_map(|stored| match &stored.block.content {
            BlockContent::Blocker(blocker) if blocker.blocker.is_empty() => {
                Some(UNKNOWN_BLOCKER.to_string())
            }
            BlockContent::Blocker(blocker) => Some(blocker.blocker.clone()),
            _ => None,
        })
        .take(ACTIVE_BLOCKERS_MAX)
        .collect();

    GovernanceDigest {
        gates_passed,
        blockers_active,
    }
}
