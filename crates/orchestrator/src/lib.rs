//! Execution of canonical simulator commands.
//!
//! A [`Command`] is a leaf bound to a [`simpilot_protocol::CommandType`], or a sequence or
//! conditional over other commands. The [`Orchestrator`] walks the tree, applies each leaf's
//! hooks, timeout and retry policy, and dispatches to a [`SimulatorBackend`]. Failures come
//! back as failure results; `execute` itself never errors.

mod adapter;
pub mod backend;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod invoke;

pub use backend::{
    BackendResult, CrashLogFilter, DeviceButton, LogQuery, Point, SessionOptions,
    SimulatorBackend,
};
pub use command::{Command, ConditionalCommand, LeafCommand, SequenceCommand};
pub use config::OrchestratorConfig;
pub use context::CommandContext;
pub use error::{BackendError, CommandError, ConfigError};
pub use executor::Orchestrator;
pub use invoke::{ToolInvoker, ToolResponse};
