//! Tool schemas for agent-facing discovery.
//!
//! Each definition becomes one tool: a slug identifier, its canonical name as title, and a
//! JSON-schema object describing its parameters.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::definition::{CommandDefinition, ParamType};
use crate::registry::CommandRegistry;

/// Property emitted for definitions without parameters; some clients reject empty objects.
pub const PLACEHOLDER_PROPERTY: &str = "instruction";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    pub name: String,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: Map<String, Value>,
    pub required: Vec<&'static str>,
}

#[must_use]
pub fn tool_schema(definition: &CommandDefinition) -> ToolSchema {
    let mut properties = Map::new();
    let mut names = definition.parameter_names().peekable();
    if names.peek().is_none() {
        properties.insert(
            PLACEHOLDER_PROPERTY.to_string(),
            json!({
                "type": "string",
                "description": "Placeholder property for schema purposes. This tool has no parameters.",
            }),
        );
    }

    for name in names {
        let param = definition.param(name);
        let property = property_schema(
            param.map(|p| p.kind),
            param.and_then(|p| p.description),
        );
        properties.insert(name.to_string(), property);
    }

    ToolSchema {
        name: definition.tool_name().to_string(),
        title: definition.name(),
        description: definition.description(),
        input_schema: InputSchema {
            kind: "object",
            properties,
            required: definition.required().to_vec(),
        },
    }
}

fn property_schema(kind: Option<ParamType>, description: Option<&str>) -> Value {
    let describe = |fallback: &str| description.map_or_else(|| fallback.to_string(), str::to_string);
    match kind {
        Some(ParamType::String) => json!({
            "type": "string",
            "description": describe("Provide the relevant value."),
        }),
        Some(ParamType::Number) => json!({
            "type": "number",
            "description": describe("Provide the relevant value."),
        }),
        Some(ParamType::Boolean) => json!({
            "type": "boolean",
            "description": describe("Provide the relevant value in lowercase."),
        }),
        Some(ParamType::StringArray) => json!({
            "type": "array",
            "items": { "type": "string" },
            "description": describe("Provide an array of strings."),
        }),
        Some(ParamType::NumberArray) => json!({
            "type": "array",
            "items": { "type": "number" },
            "description": describe("Provide an array of numbers."),
        }),
        Some(ParamType::TimeString) => json!({
            "type": "string",
            "description": describe("Provide a time string such as: 1m (1 minute), or 30s (30 seconds)."),
        }),
        Some(ParamType::Choice(choices)) => json!({
            "type": "string",
            "description": describe("Choose the relevant value."),
            "enum": choices,
        }),
        None => json!({
            "type": "string",
            "description": describe("Provide the relevant value."),
        }),
    }
}

/// Schemas for every registered definition, in catalog order.
#[must_use]
pub fn tool_schemas(registry: &CommandRegistry) -> Vec<ToolSchema> {
    registry.parser().definitions().map(tool_schema).collect()
}

/// Compact listing of tool identifiers and descriptions.
#[must_use]
pub fn tool_inventory_json(registry: &CommandRegistry, version: &str) -> Value {
    let tools: Vec<Value> = registry
        .parser()
        .definitions()
        .map(|definition| {
            json!({
                "name": definition.tool_name(),
                "summary": definition.description(),
            })
        })
        .collect();

    json!({
        "binary": "simpilot",
        "version": version,
        "count": tools.len(),
        "tools": tools,
    })
}

/// Plain-text usage notes for agents, one line per tool.
#[must_use]
pub fn tool_instructions(registry: &CommandRegistry) -> String {
    let mut lines = vec![
        "Simpilot drives an iOS simulator from natural-language instructions.".to_string(),
        "Call a tool directly with structured parameters, or send free text such as \"tap at 100, 200\"."
            .to_string(),
        "Tools:".to_string(),
    ];
    for definition in registry.parser().definitions() {
        lines.push(format!(
            "- {}: {}",
            definition.tool_name(),
            definition.description()
        ));
    }
    lines.join("\n")
}
