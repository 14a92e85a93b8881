use log::{debug, trace};
use regex::Captures;
use serde::Serialize;
use serde_json::Value;
use simpilot_protocol::{CommandType, Params};

use crate::catalog::CommandGroup;
use crate::definition::CommandDefinition;
use crate::error::ParseError;

/// A recognized instruction: command identity plus extracted parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub command: CommandType,
    /// Canonical name of the definition that matched.
    pub name: &'static str,
    pub params: Params,
}

/// Priority-ordered pattern bank over registered command groups.
#[derive(Debug, Default)]
pub struct Parser {
    groups: Vec<CommandGroup>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_group(&mut self, group: CommandGroup) {
        self.groups.push(group);
    }

    #[must_use]
    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// Definitions in registration order, then declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.groups.iter().flat_map(|group| group.definitions().iter())
    }

    pub fn parse(&self, text: &str) -> Result<ParseResult, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::NoMatch);
        }

        for definition in self.definitions() {
            if let Some(caps) = definition.match_text(text) {
                debug!("'{text}' matched '{}'", definition.name());
                return Ok(ParseResult {
                    command: definition.command(),
                    name: definition.name(),
                    params: extract_params(definition, &caps),
                });
            }
        }

        trace!("no pattern matched '{text}'");
        Err(ParseError::NoMatch)
    }
}

fn extract_params(definition: &CommandDefinition, caps: &Captures<'_>) -> Params {
    let mut params = Params::new();
    for name in definition.parameter_names() {
        let value = match definition.param(name).and_then(|param| param.extractor) {
            Some(extractor) => extractor(caps, name),
            None => caps
                .name(name)
                .map(|m| Value::String(m.as_str().to_string())),
        };
        if let Some(value) = value {
            params.insert(name.to_string(), value);
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_groups, CommandGroup};
    use crate::definition::DefinitionSpec;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn builtin_parser() -> Parser {
        let mut parser = Parser::new();
        for group in builtin_groups().unwrap() {
            parser.push_group(group);
        }
        parser
    }

    #[test]
    fn tap_extracts_integer_coordinates() {
        let parsed = builtin_parser().parse("tap at 100, 200").unwrap();
        assert_eq!(parsed.command, CommandType::Tap);
        assert_eq!(
            Value::Object(parsed.params),
            json!({ "x": 100, "y": 200 })
        );
    }

    #[test]
    fn input_is_trimmed_and_case_insensitive() {
        let parsed = builtin_parser()
            .parse("   LAUNCH APP com.example.app  ")
            .unwrap();
        assert_eq!(parsed.command, CommandType::LaunchApp);
        assert_eq!(parsed.params["bundleId"], json!("com.example.app"));
    }

    #[test]
    fn blank_input_does_not_match() {
        assert_eq!(builtin_parser().parse("  \t"), Err(ParseError::NoMatch));
        assert_eq!(builtin_parser().parse("xyzzy"), Err(ParseError::NoMatch));
    }

    #[test]
    fn optional_parameters_without_captures_are_omitted() {
        let parsed = builtin_parser().parse("swipe from 1, 2 to 3, 4").unwrap();
        assert_eq!(parsed.command, CommandType::Swipe);
        assert!(!parsed.params.contains_key("duration"));
        assert!(!parsed.params.contains_key("sessionId"));

        let parsed = builtin_parser()
            .parse("swipe from 1, 2 to 3, 4 with duration 500")
            .unwrap();
        assert_eq!(parsed.params["duration"], json!(500));
    }

    #[test]
    fn raw_capture_is_used_without_extractor() {
        static RAW: &[DefinitionSpec] = &[DefinitionSpec {
            name: "open url",
            command: CommandType::OpenUrl,
            description: "",
            patterns: &[r"visit\s+(?P<url>\S+)"],
            required: &["url"],
            optional: &[],
            params: &[],
            examples: &[],
        }];
        let mut parser = Parser::new();
        parser.push_group(CommandGroup::new("raw", RAW).unwrap());
        let parsed = parser.parse("visit https://example.com").unwrap();
        assert_eq!(parsed.params["url"], json!("https://example.com"));
    }

    #[test]
    fn first_registered_group_wins() {
        static FIRST: &[DefinitionSpec] = &[DefinitionSpec {
            name: "first",
            command: CommandType::ClearKeychain,
            description: "",
            patterns: &[r"clear"],
            required: &[],
            optional: &[],
            params: &[],
            examples: &[],
        }];
        static SECOND: &[DefinitionSpec] = &[DefinitionSpec {
            name: "second",
            command: CommandType::DeleteCrashLogs,
            description: "",
            patterns: &[r"clear\s+crash\s+logs"],
            required: &[],
            optional: &[],
            params: &[],
            examples: &[],
        }];
        let mut parser = Parser::new();
        parser.push_group(CommandGroup::new("first", FIRST).unwrap());
        parser.push_group(CommandGroup::new("second", SECOND).unwrap());
        assert_eq!(
            parser.parse("clear crash logs").unwrap().command,
            CommandType::ClearKeychain
        );
    }
}
