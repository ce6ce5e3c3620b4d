/// Position of the agent within a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentState {
    AwaitingUserInput,
    Reasoning,
    ToolExecuting { tool: String },
    Answering,
    /// Terminal: the tool server is gone.
    Failed { reason: String },
}

impl AgentState {
    pub fn is_failed(&self) -> bool {
        matches!(self, AgentState::Failed { .. })
    }
}
