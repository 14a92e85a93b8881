//! Tool-call front door: tool id plus parameters in, rendered text out.

use log::{error, info};
use serde::Serialize;
use simpilot_parser::RegistryError;
use simpilot_protocol::{serialize_json, CommandResult, Params};

use crate::command::{Command, LeafCommand};
use crate::context::CommandContext;
use crate::executor::Orchestrator;

/// Text payload handed back to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    fn success(result: &CommandResult) -> Self {
        match serialize_json(result) {
            Ok(text) => Self {
                text,
                is_error: false,
            },
            Err(err) => Self::error(format!("failed to render result: {err}")),
        }
    }

    fn error(message: impl std::fmt::Display) -> Self {
        Self {
            text: format!("Error: {message}"),
            is_error: true,
        }
    }

    fn from_result(result: &CommandResult) -> Self {
        if result.is_success() {
            Self::success(result)
        } else {
            Self::error(result.error().unwrap_or("command failed"))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolInvoker {
    orchestrator: Orchestrator,
    session_id: Option<String>,
}

impl ToolInvoker {
    #[must_use]
    pub const fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            session_id: None,
        }
    }

    /// Session used when the call's parameters do not carry one.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub const fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Builds the leaf command a tool call would execute.
    pub fn command_for_tool(&self, tool: &str, params: Params) -> Result<LeafCommand, RegistryError> {
        let definition = self
            .orchestrator
            .registry()
            .definition_for_tool(tool)
            .ok_or_else(|| RegistryError::UnknownTool(tool.to_string()))?;
        Ok(LeafCommand::new(definition.command(), params)
            .with_description(format!("tool call {tool} ({})", definition.name())))
    }

    pub async fn call_tool(&self, tool: &str, params: Params) -> ToolResponse {
        info!("Tool call {tool}");
        let command = match self.command_for_tool(tool, params) {
            Ok(leaf) => Command::Leaf(leaf),
            Err(err) => {
                error!("Error processing tool call {tool}: {err}");
                return ToolResponse::error(err);
            }
        };
        let result = self.orchestrator.execute(&command, Some(self.context())).await;
        ToolResponse::from_result(&result)
    }

    /// Free-text variant of [`ToolInvoker::call_tool`].
    pub async fn call_instruction(&self, text: &str) -> ToolResponse {
        info!("Instruction: {}", text.trim());
        match self
            .orchestrator
            .execute_instruction(text, Some(self.context()))
            .await
        {
            Ok(result) => ToolResponse::from_result(&result),
            Err(err) => {
                error!("Error processing instruction: {err}");
                ToolResponse::error(err)
            }
        }
    }

    fn context(&self) -> CommandContext {
        CommandContext {
            session_id: self.session_id.clone(),
            ..CommandContext::default()
        }
    }
}
