#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Serialize;

/// One user turn addressed to the agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentPrompt {
    pub text: String,
    pub session_id: String,
}

impl AgentPrompt {
    pub fn new(text: &str, session_id: &str) -> AgentPrompt {
        return AgentPrompt {
            text: text.to_string(),
            session_id: session_id.to_string(),
        };
    }

    pub fn to_run_request(&self) -> RunRequest {
        return RunRequest {
            input_value: self.text.to_string(),
            output_type: "chat".to_string(),
            input_type: "chat".to_string(),
            session_id: self.session_id.to_string(),
        };
    }
}

/// Body of a flow run request. Exactly these four fields go over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunRequest {
    pub input_value: String,
    pub output_type: String,
    pub input_type: String,
    pub session_id: String,
}

#[async_trait]
pub trait Agent {
    /// Used at startup to verify all configurations are available to talk to
    /// the agent. Never touches the network.
    fn validate(&self) -> Result<()>;

    /// Sends one prompt and returns the raw JSON document the agent answered
    /// with. Transport errors, non-2xx statuses and bodies that aren't JSON are
    /// all errors.
    async fn run(&self, prompt: AgentPrompt) -> Result<serde_json::Value>;
}

pub type AgentBox = Box<dyn Agent + Send + Sync>;
