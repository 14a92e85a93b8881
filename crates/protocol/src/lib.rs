//! Shared value types for the simpilot workspace: command identities, execution results
//! and the error envelope rendered to tool callers.

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

mod command_type;

pub use command_type::CommandType;

/// Parameter bag carried by parse results and canonical commands.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Stable machine codes attached to failure results.
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const TIMEOUT: &str = "timeout";
    pub const UNSUPPORTED_COMMAND: &str = "unsupported_command";
    pub const BACKEND_FAILURE: &str = "backend_failure";
    pub const INVALID_PARAMETER: &str = "invalid_parameter";
    pub const UNKNOWN_TOOL: &str = "unknown_tool";
    pub const UNRECOGNIZED_INSTRUCTION: &str = "unrecognized_instruction";
    pub const HANDLED: &str = "handled";
}

/// Outcome of executing a command.
///
/// Either a success carrying `data` or a failure carrying `error`; never both.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct CommandResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    /// Completion time in milliseconds since the Unix epoch.
    timestamp: u64,
}

impl CommandResult {
    #[must_use]
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            timestamp: unix_ms_now(),
        }
    }

    /// Successful result with no payload (e.g. a conditional with no branch taken).
    #[must_use]
    pub fn noop() -> Self {
        Self::ok(serde_json::Value::Null)
    }

    #[must_use]
    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code.to_string()),
            timestamp: unix_ms_now(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Error envelope for a failed result, `None` on success.
    #[must_use]
    pub fn error_envelope(&self) -> Option<ErrorEnvelope> {
        if self.success {
            return None;
        }
        Some(ErrorEnvelope::new(
            self.code
                .clone()
                .unwrap_or_else(|| codes::BACKEND_FAILURE.to_string()),
            self.error.clone().unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ToolNextAction {
    pub tool: String,
    pub args: serde_json::Value,
    pub reason: String,
}

/// Structured error rendered to tool callers instead of a raw message.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub hint: Option<String>,
    #[serde(default)]
    pub next_actions: Vec<ToolNextAction>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
            next_actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_next_action(mut self, action: ToolNextAction) -> Self {
        self.next_actions.push(action);
        self
    }
}

#[must_use]
pub fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
