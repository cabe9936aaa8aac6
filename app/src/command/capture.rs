use std::sync::Arc;

use arka_memory::{CaptureRequest, CaptureService, InMemoryBlockRepo};
use tracing::{error, info};
use uuid::Uuid;

use super::print_json;

/// Input for [`CaptureStrategy`].
#[derive(Debug, Clone)]
pub struct CaptureInput {
    /// Messages captured one after another into the same project.
    pub messages: Vec<String>,
    pub agent_source: Option<String>,
    pub project_id: Uuid,
    pub max_content_bytes: usize,
    pub compact: bool,
}

/// Strategy for capturing messages into an in-memory project store.
///
/// Each message is its own capture request, so later messages see the
/// blocks stored by earlier ones. A rejected message is reported and the
/// remaining messages are still captured.
#[derive(Debug, Clone, Copy)]
pub struct CaptureStrategy;

impl super::CommandStrategy for CaptureStrategy {
    type Input = CaptureInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let repo = Arc::new(InMemoryBlockRepo::new());
        let service =
            CaptureService::new(Arc::clone(&repo)).with_max_content_bytes(input.max_content_bytes);
        info!("Capturing {} messages into project {}", input.messages.len(), input.project_id);

        for message in input.messages {
            let mut request = CaptureRequest::new(input.project_id, vec![message]);
            if let Some(agent) = &input.agent_source {
                request = request.with_agent_source(agent.clone());
            }

            match service.capture(&request).await {
                Ok(report) => print_json(&report, input.compact)?,
                Err(e) => error!("Capture rejected: {e}"),
            }
        }

        info!("Store holds {} blocks", repo.len().await);
        Ok(())
    }
}
