//! Built-in command catalog, one table per functional domain.

mod accessibility;
mod app;
mod capture;
mod debug;
mod misc;
mod simulator;
mod ui;

use crate::definition::{CommandDefinition, DefinitionSpec, ParamSpec, ParamType};
use crate::error::Result;

pub(crate) const SESSION_ID: ParamSpec = ParamSpec::new("sessionId", ParamType::String)
    .describe("Simulator session to act on. Falls back to the current session.");

/// Functional domains of the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Accessibility,
    App,
    Capture,
    Debug,
    Ui,
    Simulator,
    Misc,
}

impl Domain {
    /// Registration order of the built-in groups.
    pub const ALL: [Domain; 7] = [
        Self::Accessibility,
        Self::App,
        Self::Capture,
        Self::Debug,
        Self::Ui,
        Self::Simulator,
        Self::Misc,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Accessibility => "accessibility",
            Self::App => "app",
            Self::Capture => "capture",
            Self::Debug => "debug",
            Self::Ui => "ui",
            Self::Simulator => "simulator",
            Self::Misc => "misc",
        }
    }

    #[must_use]
    pub fn definitions(self) -> &'static [DefinitionSpec] {
        match self {
            Self::Accessibility => accessibility::DEFINITIONS,
            Self::App => app::DEFINITIONS,
            Self::Capture => capture::DEFINITIONS,
            Self::Debug => debug::DEFINITIONS,
            Self::Ui => ui::DEFINITIONS,
            Self::Simulator => simulator::DEFINITIONS,
            Self::Misc => misc::DEFINITIONS,
        }
    }
}

/// A named set of compiled definitions, registered as a unit.
#[derive(Debug)]
pub struct CommandGroup {
    key: String,
    definitions: Vec<CommandDefinition>,
}

impl CommandGroup {
    pub fn new(key: impl Into<String>, specs: &'static [DefinitionSpec]) -> Result<Self> {
        let definitions = specs
            .iter()
            .map(CommandDefinition::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            key: key.into(),
            definitions,
        })
    }

    pub fn builtin(domain: Domain) -> Result<Self> {
        Self::new(domain.key(), domain.definitions())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn definitions(&self) -> &[CommandDefinition] {
        &self.definitions
    }
}

/// Compiles every built-in group in registration order.
pub fn builtin_groups() -> Result<Vec<CommandGroup>> {
    Domain::ALL.into_iter().map(CommandGroup::builtin).collect()
}
