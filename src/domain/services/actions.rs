#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::AgentBox;
use crate::domain::models::AgentPrompt;
use crate::domain::models::Event;

async fn agent_request(
    agent: Arc<AgentBox>,
    prompt: AgentPrompt,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = agent.run(prompt).await;
    if let Err(err) = &res {
        tracing::error!(error = ?err, "Agent worker failed");
    }

    tx.send(Event::AgentResponse(res))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs each requested agent call on its own task and reports the
    /// outcome back as an event. Requests are never aborted once issued.
    pub async fn start(
        agent: AgentBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let agent = Arc::new(agent);

        while let Some(action) = rx.recv().await {
            match action {
                Action::AgentRequest(prompt) => {
                    let worker_agent = agent.clone();
                    let worker_tx = tx.clone();
                    tokio::spawn(async move {
                        return agent_request(worker_agent, prompt, worker_tx).await;
                    });
                }
            }
        }

        return Ok(());
    }
}
