use super::AgentPrompt;

pub enum Action {
    AgentRequest(AgentPrompt),
}
