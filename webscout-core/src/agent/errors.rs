use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("tool server session lost: {reason}")]
    SessionLost { reason: String },
    #[error("agent exceeded the maximum of {limit} tool rounds")]
    StepLimit { limit: usize },
}

impl AgentError {
    /// The session cannot continue; the shell should stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AgentError::SessionLost { .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            AgentError::Model(err) => err.user_message(),
            AgentError::SessionLost { reason } => {
                format!("Lost connection to the tool server: {reason}")
            }
            AgentError::StepLimit { limit } => {
                format!("Stopped after {limit} tool rounds without a final answer. Try a narrower question.")
            }
        }
    }
}
