use simpilot_protocol::{CommandResult, Params};
use std::collections::HashMap;

/// Execution context threaded through a command tree.
///
/// Sequences record each child's result under the child's id, so later conditionals and
/// hooks can inspect what already ran.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub session_id: Option<String>,
    pub previous_results: HashMap<String, CommandResult>,
    pub variables: Params,
}

impl CommandContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn result(&self, command_id: &str) -> Option<&CommandResult> {
        self.previous_results.get(command_id)
    }

    /// Whether the command with this id ran and succeeded.
    #[must_use]
    pub fn succeeded(&self, command_id: &str) -> bool {
        self.result(command_id).is_some_and(CommandResult::is_success)
    }
}
