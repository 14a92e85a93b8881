//! Natural-language instruction parsing for simulator control.
//!
//! The [`catalog`] holds one table of [`definition::DefinitionSpec`]s per domain. A
//! [`CommandRegistry`] compiles and registers them in priority order, resolves free text into
//! a [`ParseResult`], and serves discovery: listings, completions, fuzzy ranking and
//! [`schema`] generation for tool-calling clients.

pub mod catalog;
pub mod definition;
pub mod error;
pub mod extract;
pub mod fuzzy;
pub mod parser;
pub mod registry;
pub mod schema;

pub use catalog::{builtin_groups, CommandGroup, Domain};
pub use definition::{slugify, CommandDefinition, DefinitionSpec, ParamSpec, ParamType};
pub use error::{CatalogError, ParseError, RegistryError};
pub use parser::{ParseResult, Parser};
pub use registry::{CommandRegistry, CommandSummary, RankedCommand};
pub use schema::{tool_inventory_json, tool_instructions, tool_schema, tool_schemas, ToolSchema};
