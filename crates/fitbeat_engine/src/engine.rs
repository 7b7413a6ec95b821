use std::sync::Arc;

use engine_logging::engine_debug;
use tokio::sync::mpsc;

use crate::{EngineEvent, RecommenderApi, SessionId};

enum EngineCommand {
    CreateJob {
        session: SessionId,
        description: String,
    },
    FetchStatus {
        session: SessionId,
        job_id: String,
    },
}

/// Channel-driven front for the recommender API. Commands fan out as spawned
/// requests; outcomes come back on the event receiver in completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// Starts the command loop on the ambient tokio runtime.
    pub fn start(
        api: Arc<dyn RecommenderApi>,
    ) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(command) = cmd_rx.recv().await {
                let api = api.clone();
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    handle_command(api, command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn create_job(&self, session: SessionId, description: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::CreateJob {
            session,
            description: description.into(),
        });
    }

    pub fn fetch_status(&self, session: SessionId, job_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchStatus {
            session,
            job_id: job_id.into(),
        });
    }
}

async fn handle_command(
    api: Arc<dyn RecommenderApi>,
    command: EngineCommand,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::CreateJob {
            session,
            description,
        } => {
            engine_debug!(
                "CreateJob session={} description_len={}",
                session,
                description.len()
            );
            match api.create_job(&description).await {
                Ok(job_id) => EngineEvent::JobCreated { session, job_id },
                Err(error) => EngineEvent::SubmitFailed { session, error },
            }
        }
        EngineCommand::FetchStatus { session, job_id } => {
            engine_debug!("FetchStatus session={} job_id={}", session, job_id);
            match api.fetch_status(&job_id).await {
                Ok(response) => EngineEvent::StatusFetched { session, response },
                Err(error) => EngineEvent::StatusFailed { session, error },
            }
        }
    };
    let _ = event_tx.send(event);
}
