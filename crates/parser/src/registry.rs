use log::{debug, info};
use serde::Serialize;
use simpilot_protocol::CommandType;
use std::collections::{HashMap, HashSet};

use crate::catalog::{builtin_groups, CommandGroup};
use crate::definition::CommandDefinition;
use crate::error::{CatalogError, RegistryError};
use crate::fuzzy::FuzzyRanker;
use crate::parser::{ParseResult, Parser};

pub const MAX_SUGGESTIONS: usize = 5;

/// Offered when the partial input is blank.
pub const DEFAULT_SUGGESTIONS: [&str; MAX_SUGGESTIONS] = [
    "create session",
    "list simulators",
    "install app",
    "launch app",
    "terminate session",
];

/// Discovery listing entry for one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSummary {
    pub name: &'static str,
    pub tool: String,
    pub command: CommandType,
    pub description: &'static str,
    pub required_parameters: &'static [&'static str],
    pub optional_parameters: &'static [&'static str],
}

/// A fuzzy "did you mean" candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCommand {
    pub name: &'static str,
    pub tool: String,
    pub score: f32,
}

/// Owns the parser and the tool-identifier mapping. Read-only once built.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    parser: Parser,
    group_keys: HashSet<String>,
    commands: HashMap<CommandType, String>,
    tools: HashMap<String, CommandType>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in group.
    pub fn with_builtin_catalog() -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for group in builtin_groups()? {
            // Built-in groups never collide; a collision means a broken table.
            if let Err(err) = registry.register(group) {
                return Err(CatalogError::Conflict(err.to_string()));
            }
        }
        info!(
            "Loaded {} command definitions in {} groups",
            registry.tools.len(),
            registry.group_keys.len()
        );
        Ok(registry)
    }

    /// Adds a group after every previously registered one.
    pub fn register(&mut self, group: CommandGroup) -> Result<(), RegistryError> {
        if self.group_keys.contains(group.key()) {
            return Err(RegistryError::DuplicateGroupKey(group.key().to_string()));
        }

        let mut seen = HashSet::new();
        let mut seen_tools = HashSet::new();
        for definition in group.definitions() {
            let tool = definition.tool_name();
            if let Some(owner) = self
                .tools
                .get(tool)
                .and_then(|command| self.commands.get(command))
            {
                return Err(RegistryError::DuplicateTool {
                    tool: tool.to_string(),
                    group: owner.clone(),
                });
            }
            if !seen_tools.insert(tool) {
                return Err(RegistryError::DuplicateTool {
                    tool: tool.to_string(),
                    group: group.key().to_string(),
                });
            }

            let command = definition.command();
            if let Some(owner) = self.commands.get(&command) {
                return Err(RegistryError::DuplicateCommand {
                    command,
                    group: owner.clone(),
                });
            }
            if !seen.insert(command) {
                return Err(RegistryError::DuplicateCommand {
                    command,
                    group: group.key().to_string(),
                });
            }
        }

        for definition in group.definitions() {
            self.commands
                .insert(definition.command(), group.key().to_string());
            self.tools
                .insert(definition.tool_name().to_string(), definition.command());
        }
        debug!(
            "Registered group '{}' with {} definitions",
            group.key(),
            group.definitions().len()
        );
        self.group_keys.insert(group.key().to_string());
        self.parser.push_group(group);
        Ok(())
    }

    #[must_use]
    pub const fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn resolve_instruction(&self, text: &str) -> Result<ParseResult, RegistryError> {
        self.parser
            .parse(text)
            .map_err(|_| RegistryError::UnrecognizedInstruction {
                text: text.to_string(),
            })
    }

    /// Every definition, in registration then declaration order.
    #[must_use]
    pub fn list_commands(&self) -> Vec<CommandSummary> {
        self.parser
            .definitions()
            .map(|definition| CommandSummary {
                name: definition.name(),
                tool: definition.tool_name().to_string(),
                command: definition.command(),
                description: definition.description(),
                required_parameters: definition.required(),
                optional_parameters: definition.optional(),
            })
            .collect()
    }

    /// Up to five names or examples containing `partial`, case-insensitively.
    #[must_use]
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return DEFAULT_SUGGESTIONS.iter().map(ToString::to_string).collect();
        }

        let mut suggestions: Vec<String> = Vec::new();
        for definition in self.parser.definitions() {
            let candidates = std::iter::once(definition.name())
                .chain(definition.examples().iter().copied());
            for candidate in candidates {
                if candidate.to_lowercase().contains(&needle)
                    && !suggestions.iter().any(|s| s == candidate)
                {
                    suggestions.push(candidate.to_string());
                    if suggestions.len() == MAX_SUGGESTIONS {
                        return suggestions;
                    }
                }
            }
        }
        suggestions
    }

    pub fn tool_to_command(&self, tool: &str) -> Result<CommandType, RegistryError> {
        self.tools
            .get(tool)
            .copied()
            .ok_or_else(|| RegistryError::UnknownTool(tool.to_string()))
    }

    #[must_use]
    pub fn definition(&self, command: CommandType) -> Option<&CommandDefinition> {
        self.parser
            .definitions()
            .find(|definition| definition.command() == command)
    }

    #[must_use]
    pub fn definition_for_tool(&self, tool: &str) -> Option<&CommandDefinition> {
        self.tool_to_command(tool)
            .ok()
            .and_then(|command| self.definition(command))
    }

    /// Closest definitions to `text` by fuzzy score, best first.
    #[must_use]
    pub fn rank_commands(&self, text: &str, limit: usize) -> Vec<RankedCommand> {
        let definitions: Vec<&CommandDefinition> = self.parser.definitions().collect();
        FuzzyRanker::new()
            .rank(text, definitions.iter().copied(), limit)
            .into_iter()
            .map(|(idx, score)| RankedCommand {
                name: definitions[idx].name(),
                tool: definitions[idx].tool_name().to_string(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::DefinitionSpec;
    use pretty_assertions::assert_eq;

    static EXTRA: &[DefinitionSpec] = &[DefinitionSpec {
        name: "tap twice",
        command: CommandType::Tap,
        description: "",
        patterns: &[r"double\s+tap"],
        required: &[],
        optional: &[],
        params: &[],
        examples: &["double tap"],
    }];

    #[test]
    fn duplicate_group_key_is_rejected() {
        let mut registry = CommandRegistry::with_builtin_catalog().unwrap();
        let group = CommandGroup::new("ui", EXTRA).unwrap();
        assert_eq!(
            registry.register(group),
            Err(RegistryError::DuplicateGroupKey("ui".into()))
        );
    }

    #[test]
    fn colliding_command_identity_is_rejected() {
        let mut registry = CommandRegistry::with_builtin_catalog().unwrap();
        let group = CommandGroup::new("gestures", EXTRA).unwrap();
        assert_eq!(
            registry.register(group),
            Err(RegistryError::DuplicateCommand {
                command: CommandType::Tap,
                group: "ui".into(),
            })
        );
        assert!(registry.tool_to_command("tap-twice").is_err());
    }

    static SWIPES: &[DefinitionSpec] = &[DefinitionSpec {
        name: "swipe left",
        command: CommandType::Swipe,
        description: "",
        patterns: &[r"swipe\s+left"],
        required: &[],
        optional: &[],
        params: &[],
        examples: &["swipe left"],
    }];

    static TAPS: &[DefinitionSpec] = &[DefinitionSpec {
        name: "swipe left",
        command: CommandType::Tap,
        description: "",
        patterns: &[r"poke"],
        required: &[],
        optional: &[],
        params: &[],
        examples: &["poke"],
    }];

    #[test]
    fn colliding_tool_identifier_is_rejected() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandGroup::new("gestures", SWIPES).unwrap())
            .unwrap();
        assert_eq!(
            registry.register(CommandGroup::new("taps", TAPS).unwrap()),
            Err(RegistryError::DuplicateTool {
                tool: "swipe-left".into(),
                group: "gestures".into(),
            })
        );
        assert_eq!(registry.tool_to_command("swipe-left"), Ok(CommandType::Swipe));
        assert!(registry.definition(CommandType::Tap).is_none());
    }

    #[test]
    fn definitions_are_found_by_tool_identifier() {
        let registry = CommandRegistry::with_builtin_catalog().unwrap();
        let definition = registry.definition_for_tool("press-key-sequence").unwrap();
        assert_eq!(definition.command(), CommandType::PressKeySequence);
        assert_eq!(definition.name(), "press key sequence");
        assert!(registry.definition_for_tool("teleport").is_none());
    }

    #[test]
    fn blank_partial_yields_defaults() {
        let registry = CommandRegistry::with_builtin_catalog().unwrap();
        assert_eq!(registry.suggest("   "), DEFAULT_SUGGESTIONS.to_vec());
    }

    #[test]
    fn suggestions_are_capped_and_unique() {
        let registry = CommandRegistry::with_builtin_catalog().unwrap();
        let suggestions = registry.suggest("APP");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "install app");
        let unique: HashSet<_> = suggestions.iter().collect();
        assert_eq!(unique.len(), suggestions.len());
    }

    #[test]
    fn suggestions_follow_catalog_order() {
        let registry = CommandRegistry::with_builtin_catalog().unwrap();
        assert_eq!(
            registry.suggest("debug st"),
            vec!["debug status".to_string(), "get debug status".to_string()]
        );
    }
}
