use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use serde_json::{json, Value};
use simpilot_orchestrator::{
    Command, CommandContext, Orchestrator, OrchestratorConfig, ToolInvoker,
};
use simpilot_parser::{tool_instructions, tool_inventory_json, tool_schemas, CommandRegistry};
use simpilot_protocol::{
    serialize_json_pretty, CommandResult, ErrorEnvelope, Params, ToolNextAction,
};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod dry_run;

pub use dry_run::DryRunBackend;

/// Number of "did you mean" candidates printed for an unrecognized instruction.
const RANKED_HINTS: usize = 3;

#[derive(Parser)]
#[command(name = "simpilot")]
#[command(about = "Drive an iOS simulator with natural-language instructions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Orchestrator defaults (TOML); SIMPILOT_* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an instruction and print the recognized command
    Parse(TextArgs),

    /// List every command the catalog understands
    Commands,

    /// Complete a partial instruction
    Suggest(SuggestArgs),

    /// Print tool schemas for agent integrations
    Tools(ToolsArgs),

    /// Print the JSON schema of command results
    Schema,

    /// Execute an instruction or tool call against the dry-run backend
    Run(RunArgs),
}

#[derive(Args)]
struct TextArgs {
    /// Instruction text, e.g. "tap at 100, 200"
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

#[derive(Args)]
struct SuggestArgs {
    /// Partial instruction; blank prints the defaults
    #[arg(num_args = 0..)]
    text: Vec<String>,
}

#[derive(Args)]
struct ToolsArgs {
    /// Print only tool names and summaries
    #[arg(long, conflicts_with = "instructions")]
    inventory: bool,

    /// Print plain-text usage notes
    #[arg(long)]
    instructions: bool,
}

#[derive(Args)]
struct RunArgs {
    /// Instruction text (omit when using --tool)
    #[arg(num_args = 0.., conflicts_with = "tool")]
    text: Vec<String>,

    /// Tool identifier, e.g. "launch-app"
    #[arg(long)]
    tool: Option<String>,

    /// Tool parameters as a JSON object
    #[arg(long, requires = "tool")]
    params: Option<String>,

    /// Simulator session id
    #[arg(long)]
    session: Option<String>,

    /// Timeout for the command in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Extra attempts on transient failures
    #[arg(long)]
    retries: Option<u32>,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let outcome = run(cli).await;
    log::logger().flush();
    outcome
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let registry = CommandRegistry::with_builtin_catalog().context("Failed to build catalog")?;

    match cli.command {
        Commands::Parse(args) => run_parse(&registry, &args.text.join(" ")),
        Commands::Commands => print_json(&registry.list_commands()),
        Commands::Suggest(args) => {
            for suggestion in registry.suggest(&args.text.join(" ")) {
                println!("{suggestion}");
            }
            Ok(())
        }
        Commands::Tools(args) => {
            if args.inventory {
                print_json(&tool_inventory_json(&registry, env!("CARGO_PKG_VERSION")))
            } else if args.instructions {
                println!("{}", tool_instructions(&registry));
                Ok(())
            } else {
                print_json(&tool_schemas(&registry))
            }
        }
        Commands::Schema => print_json(&schemars::schema_for!(CommandResult)),
        Commands::Run(args) => {
            let config = OrchestratorConfig::resolve(cli.config.as_deref())
                .context("Failed to load orchestrator config")?;
            run_command(registry, config, args).await
        }
    }
}

fn run_parse(registry: &CommandRegistry, text: &str) -> Result<()> {
    match registry.resolve_instruction(text) {
        Ok(parsed) => print_json(&parsed),
        Err(err) => {
            let mut envelope = ErrorEnvelope::new(err.code(), err.to_string());
            let ranked = registry.rank_commands(text, RANKED_HINTS);
            if let Some(best) = ranked.first() {
                envelope = envelope.with_hint(format!("Did you mean \"{}\"?", best.name));
            }
            for candidate in &ranked {
                envelope = envelope.with_next_action(ToolNextAction {
                    tool: candidate.tool.clone(),
                    args: json!({}),
                    reason: format!("closest match to \"{}\" ({:.2})", text.trim(), candidate.score),
                });
            }
            print_json(&json!({ "error": envelope, "candidates": ranked }))?;
            bail!("{err}");
        }
    }
}

async fn run_command(
    registry: CommandRegistry,
    config: OrchestratorConfig,
    args: RunArgs,
) -> Result<()> {
    let backend = Arc::new(DryRunBackend::new());
    let invoker = ToolInvoker::new(
        Orchestrator::new(backend.clone(), Arc::new(registry)).with_config(config),
    );
    let orchestrator = invoker.orchestrator();

    let mut leaf = match &args.tool {
        Some(tool) => {
            let params = parse_params(args.params.as_deref().unwrap_or("{}"))?;
            invoker.command_for_tool(tool, params)?
        }
        None => {
            let text = args.text.join(" ");
            if text.trim().is_empty() {
                bail!("Provide an instruction or --tool");
            }
            orchestrator.command_for_instruction(&text)?
        }
    };
    if let Some(ms) = args.timeout_ms {
        leaf = leaf.with_timeout(Duration::from_millis(ms));
    }
    if let Some(retries) = args.retries {
        leaf = leaf.with_retries(retries);
    }

    let context = CommandContext {
        session_id: args.session,
        ..CommandContext::default()
    };
    let result = orchestrator.execute(&Command::Leaf(leaf), Some(context)).await;
    let envelope = result.error_envelope();

    print_json(&json!({
        "result": result,
        "operations": backend.journal(),
    }))?;
    match envelope {
        Some(envelope) => bail!("{} ({})", envelope.message, envelope.code),
        None => Ok(()),
    }
}

fn parse_params(raw: &str) -> Result<Params> {
    match serde_json::from_str::<Value>(raw).context("--params must be valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("--params must be a JSON object, got {other}"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serialize_json_pretty(value)?);
    Ok(())
}
