use super::errors::AgentError;
use super::instructions::compose_system_prompt;
use super::models::{AgentOptions, AgentOutcome, AgentStep};
use super::state::AgentState;
use crate::domain::text::{summarise, truncate_chars};
use crate::model::{ModelProvider, ModelReply, ModelRequest};
use crate::tooling::ToolServer;
use crate::types::{ChatMessage, ToolCall, ToolDescriptor};
use tracing::{debug, info, warn};

/// Reason/act/observe loop over one conversation and one tool server.
pub struct Agent<P: ModelProvider, T: ToolServer> {
    provider: P,
    tool_server: T,
    options: AgentOptions,
    messages: Vec<ChatMessage>,
    state: AgentState,
}

impl<P: ModelProvider, T: ToolServer> Agent<P, T> {
    pub fn new(provider: P, tool_server: T, options: AgentOptions) -> Self {
        let system = compose_system_prompt(&options.system_prompt, tool_server.instructions());
        Self {
            provider,
            tool_server,
            options,
            messages: vec![ChatMessage::system(system)],
            state: AgentState::AwaitingUserInput,
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        self.tool_server.tools()
    }

    pub fn tool_server(&self) -> &T {
        &self.tool_server
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Answer one user message, running whatever tools the model asks for.
    ///
    /// On any error the conversation is restored to what it was before the
    /// turn. A lost tool server moves the agent to [`AgentState::Failed`],
    /// after which every turn fails immediately.
    pub async fn run_turn(&mut self, input: &str) -> Result<AgentOutcome, AgentError> {
        if let AgentState::Failed { reason } = &self.state {
            return Err(AgentError::SessionLost {
                reason: reason.clone(),
            });
        }

        let checkpoint = self.messages.len();
        let result = self.drive(input).await;
        match &result {
            Ok(outcome) => {
                info!(
                    steps = outcome.steps.len(),
                    response = %summarise(&outcome.response),
                    "Agent returned final response"
                );
                self.state = AgentState::AwaitingUserInput;
            }
            Err(AgentError::SessionLost { reason }) => {
                warn!(%reason, "Tool server lost; agent can no longer run turns");
                self.messages.truncate(checkpoint);
                self.state = AgentState::Failed {
                    reason: reason.clone(),
                };
            }
            Err(err) => {
                warn!(error = %err, "Turn failed; conversation rolled back");
                self.messages.truncate(checkpoint);
                self.state = AgentState::AwaitingUserInput;
            }
        }
        result
    }

    async fn drive(&mut self, input: &str) -> Result<AgentOutcome, AgentError> {
        let prompt = truncate_chars(input, self.options.max_input_chars);
        if prompt.len() < input.len() {
            debug!(limit = self.options.max_input_chars, "User input truncated");
        }
        self.messages.push(ChatMessage::user(prompt));

        let tools = self.tool_server.tools().to_vec();
        let mut steps = Vec::new();
        let mut rounds = 0usize;

        loop {
            self.state = AgentState::Reasoning;
            debug!(rounds, messages = self.messages.len(), "Requesting next move from model");
            let request = ModelRequest {
                messages: self.messages.clone(),
                tools: tools.clone(),
            };

            match self.provider.complete(request).await? {
                ModelReply::Answer(text) => {
                    self.state = AgentState::Answering;
                    self.messages.push(ChatMessage::assistant(text.clone()));
                    return Ok(AgentOutcome {
                        response: text,
                        steps,
                    });
                }
                ModelReply::ToolCalls { thought, calls } => {
                    if rounds == self.options.max_tool_rounds {
                        return Err(AgentError::StepLimit {
                            limit: self.options.max_tool_rounds,
                        });
                    }
                    rounds += 1;
                    self.messages
                        .push(ChatMessage::assistant_tool_calls(thought, calls.clone()));
                    for call in calls {
                        let step = self.execute(call).await?;
                        steps.push(step);
                    }
                }
            }
        }
    }

    async fn execute(&mut self, call: ToolCall) -> Result<AgentStep, AgentError> {
        let (success, observation) = if !self.tool_server.has_tool(&call.name) {
            warn!(tool = %call.name, "Model requested a tool the server does not offer");
            let available = self
                .tool_server
                .tools()
                .iter()
                .map(|tool| tool.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            (
                false,
                format!(
                    "Error: tool '{}' is not available. Available tools: {available}",
                    call.name
                ),
            )
        } else {
            self.state = AgentState::ToolExecuting {
                tool: call.name.clone(),
            };
            info!(tool = %call.name, input = %summarise(&call.arguments.to_string()), "Invoking tool");
            match self
                .tool_server
                .invoke(&call.name, call.arguments.clone())
                .await
            {
                Ok(output) if output.is_error => {
                    (false, format!("Tool error: {}", output.text))
                }
                Ok(output) => (true, output.text),
                Err(err) if err.is_session_fatal() => {
                    return Err(AgentError::SessionLost {
                        reason: err.to_string(),
                    });
                }
                Err(err) => (false, format!("Tool call failed: {err}")),
            }
        };

        debug!(
            tool = %call.name,
            success,
            output = %summarise(&observation),
            "Tool observation recorded"
        );
        self.messages
            .push(ChatMessage::tool_result(call.id, observation.clone()));
        Ok(AgentStep {
            tool: call.name,
            input: call.arguments,
            success,
            output: observation,
        })
    }
}
