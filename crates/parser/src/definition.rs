use regex::{Captures, Regex, RegexBuilder};
use serde_json::Value;
use simpilot_protocol::CommandType;
use std::fmt;

use crate::error::{CatalogError, Result};

/// Turns a pattern match into a typed parameter value.
///
/// Receives the match and the parameter name (which doubles as the capture group name).
/// Returning `None` leaves the parameter out of the parse result.
pub type Extractor = fn(&Captures<'_>, &str) -> Option<Value>;

/// Closed set of parameter type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Boolean,
    StringArray,
    NumberArray,
    /// Duration literal such as `30s` or `1m`.
    TimeString,
    Choice(&'static [&'static str]),
}

impl ParamType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringArray => "string-array",
            Self::NumberArray => "number-array",
            Self::TimeString => "time-string",
            Self::Choice(_) => "choice",
        }
    }

    /// Whether `value` has the runtime shape this tag declares.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String | Self::TimeString => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::NumberArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_number)),
            Self::Choice(choices) => value
                .as_str()
                .is_some_and(|raw| choices.contains(&raw)),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub extractor: Option<Extractor>,
    pub description: Option<&'static str>,
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("extractor", &self.extractor.is_some())
            .field("description", &self.description)
            .finish()
    }
}

impl ParamSpec {
    #[must_use]
    pub const fn new(name: &'static str, kind: ParamType) -> Self {
        Self {
            name,
            kind,
            extractor: None,
            description: None,
        }
    }

    #[must_use]
    pub const fn extract(mut self, extractor: Extractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    #[must_use]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Declarative command definition as written in the catalog tables.
#[derive(Debug)]
pub struct DefinitionSpec {
    pub name: &'static str,
    pub command: CommandType,
    pub description: &'static str,
    /// Recognition patterns, most specific first. Matched case-insensitively.
    pub patterns: &'static [&'static str],
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub params: &'static [ParamSpec],
    pub examples: &'static [&'static str],
}

impl DefinitionSpec {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|param| param.name == name)
    }
}

/// A catalog definition with its patterns compiled and its tool identifier derived.
#[derive(Debug)]
pub struct CommandDefinition {
    spec: &'static DefinitionSpec,
    patterns: Vec<Regex>,
    tool_name: String,
}

impl CommandDefinition {
    pub fn compile(spec: &'static DefinitionSpec) -> Result<Self> {
        let patterns = spec
            .patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|err| CatalogError::InvalidPattern {
                        command: spec.name,
                        pattern: (*pattern).to_string(),
                        message: err.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            spec,
            patterns,
            tool_name: slugify(spec.name),
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.spec.name
    }

    #[must_use]
    pub const fn command(&self) -> CommandType {
        self.spec.command
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.spec.description
    }

    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    #[must_use]
    pub const fn required(&self) -> &'static [&'static str] {
        self.spec.required
    }

    #[must_use]
    pub const fn optional(&self) -> &'static [&'static str] {
        self.spec.optional
    }

    #[must_use]
    pub const fn examples(&self) -> &'static [&'static str] {
        self.spec.examples
    }

    #[must_use]
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.spec.param(name)
    }

    /// Required then optional parameter names, in declaration order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &'static str> {
        self.spec
            .required
            .iter()
            .chain(self.spec.optional.iter())
            .copied()
    }

    /// First pattern that matches `text`, in declaration order.
    #[must_use]
    pub fn match_text<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.patterns.iter().find_map(|pattern| pattern.captures(text))
    }
}

/// Machine-safe tool identifier derived from a canonical command name.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.replace(' ', "-")
}
