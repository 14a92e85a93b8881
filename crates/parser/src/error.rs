use simpilot_protocol::CommandType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading catalog groups.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid pattern for '{command}': {pattern} ({message})")]
    InvalidPattern {
        command: &'static str,
        pattern: String,
        message: String,
    },

    #[error("Conflicting catalog tables: {0}")]
    Conflict(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No pattern matched the instruction")]
    NoMatch,
}

/// Errors raised by the command registry to its immediate caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command group '{0}' is already registered")]
    DuplicateGroupKey(String),

    #[error("Command {command} is already declared by group '{group}'")]
    DuplicateCommand { command: CommandType, group: String },

    #[error("Tool \"{tool}\" is already declared by group '{group}'")]
    DuplicateTool { tool: String, group: String },

    #[error("Could not understand the instruction: {text}")]
    UnrecognizedInstruction { text: String },

    #[error("Could not map tool \"{0}\" to a command")]
    UnknownTool(String),
}

impl RegistryError {
    /// Stable machine code, shared with failure results.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateGroupKey(_)
            | Self::DuplicateCommand { .. }
            | Self::DuplicateTool { .. } => "invalid_catalog",
            Self::UnrecognizedInstruction { .. } => {
                simpilot_protocol::codes::UNRECOGNIZED_INSTRUCTION
            }
            Self::UnknownTool(_) => simpilot_protocol::codes::UNKNOWN_TOOL,
        }
    }
}
