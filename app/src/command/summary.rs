use std::sync::Arc;

use arka_memory::{CaptureRequest, CaptureService, InMemoryBlockRepo};
use tracing::{info, warn};
use uuid::Uuid;

use super::print_json;

/// Input for [`SummaryStrategy`].
#[derive(Debug, Clone)]
pub struct SummaryInput {
    pub messages: Vec<String>,
    pub agent_source: Option<String>,
    pub project_id: Uuid,
    pub max_content_bytes: usize,
    pub compact: bool,
}

/// Strategy for capturing messages and printing the resulting project summary.
#[derive(Debug, Clone, Copy)]
pub struct SummaryStrategy;

impl super::CommandStrategy for SummaryStrategy {
    type Input = SummaryInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let service = CaptureService::new(Arc::new(InMemoryBlockRepo::new()))
            .with_max_content_bytes(input.max_content_bytes);

        for message in input.messages {
            let mut request = CaptureRequest::new(input.project_id, vec![message]);
            if let Some(agent) = &input.agent_source {
                request = request.with_agent_source(agent.clone());
            }
            if let Err(e) = service.capture(&request).await {
                warn!("Message skipped: {e}");
            }
        }

        let summary = service.summarize(&input.project_id).await?;
        info!(
            "Project {} holds {} blocks",
            input.project_id, summary.memory_summary.total_blocks
        );
        print_json(&summary, input.compact)
    }
}
