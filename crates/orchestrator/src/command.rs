//! Canonical commands: leaves bound to a command identity, plus sequence and conditional
//! composites. Commands are built once and never mutated; hooks are owned by the command.

use simpilot_protocol::{CommandResult, CommandType, Params};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::context::CommandContext;
use crate::error::CommandError;

pub type Validator = Box<dyn Fn(&Params, &CommandContext) -> bool + Send + Sync>;
pub type Transformer = Box<dyn Fn(&Params, &CommandContext) -> Params + Send + Sync>;
pub type ErrorHandler = Box<dyn Fn(&CommandError, &CommandContext) -> CommandResult + Send + Sync>;
pub type Predicate = Box<dyn Fn(&CommandContext) -> bool + Send + Sync>;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> String {
    format!("cmd-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

pub enum Command {
    Leaf(LeafCommand),
    Sequence(SequenceCommand),
    Conditional(ConditionalCommand),
}

impl Command {
    #[must_use]
    pub fn leaf(command: CommandType, params: Params) -> Self {
        Self::Leaf(LeafCommand::new(command, params))
    }

    #[must_use]
    pub fn sequence(commands: Vec<Command>, stop_on_error: bool) -> Self {
        Self::Sequence(SequenceCommand::new(commands, stop_on_error))
    }

    pub fn conditional(
        condition: impl Fn(&CommandContext) -> bool + Send + Sync + 'static,
        if_true: Command,
        if_false: Option<Command>,
    ) -> Self {
        Self::Conditional(ConditionalCommand::new(condition, if_true, if_false))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.id,
            Self::Sequence(sequence) => &sequence.id,
            Self::Conditional(conditional) => &conditional.id,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.description.as_deref(),
            Self::Sequence(sequence) => sequence.description.as_deref(),
            Self::Conditional(conditional) => conditional.description.as_deref(),
        }
    }
}

impl From<LeafCommand> for Command {
    fn from(leaf: LeafCommand) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<SequenceCommand> for Command {
    fn from(sequence: SequenceCommand) -> Self {
        Self::Sequence(sequence)
    }
}

impl From<ConditionalCommand> for Command {
    fn from(conditional: ConditionalCommand) -> Self {
        Self::Conditional(conditional)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => fmt::Debug::fmt(leaf, f),
            Self::Sequence(sequence) => fmt::Debug::fmt(sequence, f),
            Self::Conditional(conditional) => fmt::Debug::fmt(conditional, f),
        }
    }
}

/// A single backend operation with its parameters and execution policy.
pub struct LeafCommand {
    pub(crate) id: String,
    pub(crate) command: CommandType,
    pub(crate) params: Params,
    pub(crate) description: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retries: Option<u32>,
    pub(crate) validate: Option<Validator>,
    pub(crate) transform: Option<Transformer>,
    pub(crate) on_error: Option<ErrorHandler>,
}

impl LeafCommand {
    #[must_use]
    pub fn new(command: CommandType, params: Params) -> Self {
        Self {
            id: next_id(),
            command,
            params,
            description: None,
            timeout: None,
            retries: None,
            validate: None,
            transform: None,
            on_error: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Rejects the command before dispatch when the hook returns `false`.
    #[must_use]
    pub fn validate(
        mut self,
        hook: impl Fn(&Params, &CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Box::new(hook));
        self
    }

    /// Replaces the parameters handed to the backend.
    #[must_use]
    pub fn transform(
        mut self,
        hook: impl Fn(&Params, &CommandContext) -> Params + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Box::new(hook));
        self
    }

    /// Produces the result reported when this command fails.
    #[must_use]
    pub fn on_error(
        mut self,
        handler: impl Fn(&CommandError, &CommandContext) -> CommandResult + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn command(&self) -> CommandType {
        self.command
    }

    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub const fn retries(&self) -> Option<u32> {
        self.retries
    }
}

impl fmt::Debug for LeafCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafCommand")
            .field("id", &self.id)
            .field("command", &self.command)
            .field("params", &self.params)
            .field("description", &self.description)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("validate", &self.validate.is_some())
            .field("transform", &self.transform.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Children run strictly in order.
#[derive(Debug)]
pub struct SequenceCommand {
    pub(crate) id: String,
    pub(crate) description: Option<String>,
    pub(crate) commands: Vec<Command>,
    pub(crate) stop_on_error: bool,
}

impl SequenceCommand {
    #[must_use]
    pub fn new(commands: Vec<Command>, stop_on_error: bool) -> Self {
        Self {
            id: next_id(),
            description: None,
            commands,
            stop_on_error,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[must_use]
    pub const fn stop_on_error(&self) -> bool {
        self.stop_on_error
    }
}

pub struct ConditionalCommand {
    pub(crate) id: String,
    pub(crate) description: Option<String>,
    pub(crate) condition: Predicate,
    pub(crate) if_true: Box<Command>,
    pub(crate) if_false: Option<Box<Command>>,
}

impl ConditionalCommand {
    pub fn new(
        condition: impl Fn(&CommandContext) -> bool + Send + Sync + 'static,
        if_true: Command,
        if_false: Option<Command>,
    ) -> Self {
        Self {
            id: next_id(),
            description: None,
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: if_false.map(Box::new),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Debug for ConditionalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalCommand")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("if_true", &self.if_true)
            .field("if_false", &self.if_false)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..100)
            .map(|_| Command::leaf(CommandType::Tap, Params::new()).id().to_string())
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn builders_keep_explicit_settings() {
        let leaf = LeafCommand::new(CommandType::LaunchApp, Params::new())
            .with_id("launch")
            .with_timeout(Duration::from_secs(5))
            .with_retries(2);
        assert_eq!(leaf.id(), "launch");
        assert_eq!(leaf.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(leaf.retries(), Some(2));

        let sequence = Command::sequence(vec![leaf.into()], true);
        assert!(format!("{sequence:?}").contains("launch"));
    }
}
