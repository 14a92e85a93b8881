use futures::FutureExt;
use log::{debug, error, warn};
use simpilot_parser::{CommandRegistry, RegistryError};
use simpilot_protocol::{CommandResult, CommandType, Params};
use std::borrow::Cow;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;

use crate::adapter;
use crate::backend::SimulatorBackend;
use crate::command::{Command, ConditionalCommand, LeafCommand, SequenceCommand};
use crate::config::OrchestratorConfig;
use crate::context::CommandContext;
use crate::error::{CommandError, Result};

type ExecFuture<'a> = Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>>;

/// Executes canonical commands against a backend.
///
/// `execute` never fails: every error is normalized into a failure [`CommandResult`], or
/// into whatever the command's error handler returns.
#[derive(Clone)]
pub struct Orchestrator {
    backend: Arc<dyn SimulatorBackend>,
    registry: Arc<CommandRegistry>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn SimulatorBackend>, registry: Arc<CommandRegistry>) -> Self {
        Self {
            backend,
            registry,
            config: OrchestratorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub async fn execute(&self, command: &Command, context: Option<CommandContext>) -> CommandResult {
        let mut context = context.unwrap_or_default();
        self.execute_in(command, &mut context).await
    }

    /// Like [`Orchestrator::execute`], leaving recorded results in `context`.
    pub fn execute_in<'a>(
        &'a self,
        command: &'a Command,
        context: &'a mut CommandContext,
    ) -> ExecFuture<'a> {
        Box::pin(async move {
            match command {
                Command::Leaf(leaf) => self.execute_leaf(leaf, context).await,
                Command::Sequence(sequence) => self.execute_sequence(sequence, context).await,
                Command::Conditional(conditional) => {
                    self.execute_conditional(conditional, context).await
                }
            }
        })
    }

    /// Parses `text` and executes the resulting leaf command.
    pub async fn execute_instruction(
        &self,
        text: &str,
        context: Option<CommandContext>,
    ) -> Result<CommandResult, RegistryError> {
        let leaf = self.command_for_instruction(text)?;
        Ok(self.execute(&Command::Leaf(leaf), context).await)
    }

    /// Builds the leaf command `text` resolves to.
    pub fn command_for_instruction(&self, text: &str) -> Result<LeafCommand, RegistryError> {
        let parsed = self.registry.resolve_instruction(text)?;
        Ok(LeafCommand::new(parsed.command, parsed.params).with_description(text.trim()))
    }

    async fn execute_sequence(
        &self,
        sequence: &SequenceCommand,
        context: &mut CommandContext,
    ) -> CommandResult {
        debug!(
            "Running sequence {} ({} commands)",
            sequence.id,
            sequence.commands.len()
        );
        let mut last = CommandResult::noop();
        for child in &sequence.commands {
            let result = self.execute_in(child, context).await;
            context
                .previous_results
                .insert(child.id().to_string(), result.clone());
            if !result.is_success() && sequence.stop_on_error {
                warn!(
                    "Sequence {} stopped at {}: {}",
                    sequence.id,
                    child.id(),
                    result.error().unwrap_or_default()
                );
                return result;
            }
            last = result;
        }
        last
    }

    async fn execute_conditional(
        &self,
        conditional: &ConditionalCommand,
        context: &mut CommandContext,
    ) -> CommandResult {
        let branch = if (conditional.condition)(context) {
            Some(&*conditional.if_true)
        } else {
            conditional.if_false.as_deref()
        };
        match branch {
            Some(branch) => self.execute_in(branch, context).await,
            None => {
                debug!("Conditional {} took no branch", conditional.id);
                CommandResult::noop()
            }
        }
    }

    async fn execute_leaf(&self, leaf: &LeafCommand, context: &CommandContext) -> CommandResult {
        if let Some(validate) = &leaf.validate {
            if !validate(&leaf.params, context) {
                return self.fail(leaf, CommandError::ValidationFailed, context);
            }
        }

        let params = match &leaf.transform {
            Some(transform) => Cow::Owned(transform(&leaf.params, context)),
            None => Cow::Borrowed(&leaf.params),
        };
        let session_id = self.session_id(&params, context);
        let retries = leaf.retries.unwrap_or(self.config.default_retries);
        let attempts = self.dispatch_with_retries(leaf.command, &params, &session_id, retries);

        let outcome = match leaf.timeout.or_else(|| self.config.default_timeout()) {
            Some(limit) => match tokio::time::timeout(limit, attempts).await {
                Ok(outcome) => outcome,
                Err(_) => Err(CommandError::Timeout(
                    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                )),
            },
            None => attempts.await,
        };

        match outcome {
            Ok(data) => {
                debug!("Command {} ({}) succeeded", leaf.id, leaf.command);
                CommandResult::ok(data)
            }
            Err(err) => self.fail(leaf, err, context),
        }
    }

    async fn dispatch_with_retries(
        &self,
        command: CommandType,
        params: &Params,
        session_id: &str,
        retries: u32,
    ) -> Result<serde_json::Value> {
        let mut attempt = 0;
        loop {
            let dispatch = adapter::dispatch(self.backend.as_ref(), command, params, session_id);
            let outcome = match AssertUnwindSafe(dispatch).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(payload) => {
                    return Err(CommandError::Backend(format!(
                        "backend panicked during {command}: {}",
                        panic_message(payload.as_ref())
                    )))
                }
            };
            match outcome {
                Ok(data) => return Ok(data),
                Err(err) if err.is_transient() && attempt < retries => {
                    attempt += 1;
                    warn!("{command} failed ({err}), retry {attempt}/{retries}");
                    let delay = self.config.retry_delay();
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(err) => return Err(CommandError::from_backend(command, err)),
            }
        }
    }

    /// Command parameter, then context, then configured default, then empty.
    fn session_id(&self, params: &Params, context: &CommandContext) -> String {
        params
            .get("sessionId")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
            .or_else(|| context.session_id.as_deref().filter(|id| !id.is_empty()))
            .or(self.config.default_session_id.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    fn fail(&self, leaf: &LeafCommand, err: CommandError, context: &CommandContext) -> CommandResult {
        error!("Error executing command {} ({}): {err}", leaf.id, leaf.command);
        match &leaf.on_error {
            Some(handler) => handler(&err, context),
            None => CommandResult::failure(err.code(), err.to_string()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendResult, Point};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Sessions {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SimulatorBackend for Sessions {
        async fn tap(&self, session_id: &str, _point: Point) -> BackendResult<()> {
            self.seen.lock().unwrap().push(session_id.to_string());
            Ok(())
        }
    }

    fn orchestrator(backend: Arc<Sessions>, config: OrchestratorConfig) -> Orchestrator {
        let registry = Arc::new(CommandRegistry::with_builtin_catalog().unwrap());
        Orchestrator::new(backend, registry).with_config(config)
    }

    fn tap(params: serde_json::Value) -> Command {
        Command::leaf(CommandType::Tap, params.as_object().cloned().unwrap())
    }

    #[tokio::test]
    async fn session_id_resolution_order() {
        let backend = Arc::new(Sessions::default());
        let config = OrchestratorConfig {
            default_session_id: Some("configured".into()),
            ..OrchestratorConfig::default()
        };
        let orchestrator = orchestrator(backend.clone(), config);

        let ctx = || Some(CommandContext::new().with_session("context"));
        orchestrator
            .execute(&tap(json!({"x": 1, "y": 1, "sessionId": "param"})), ctx())
            .await;
        orchestrator
            .execute(&tap(json!({"x": 1, "y": 1})), ctx())
            .await;
        orchestrator
            .execute(&tap(json!({"x": 1, "y": 1})), None)
            .await;

        assert_eq!(
            *backend.seen.lock().unwrap(),
            vec!["param", "context", "configured"]
        );
    }

    #[tokio::test]
    async fn transform_replaces_dispatched_parameters() {
        let backend = Arc::new(Sessions::default());
        let orchestrator = orchestrator(backend, OrchestratorConfig::default());
        let command: Command = LeafCommand::new(CommandType::Tap, Params::new())
            .transform(|_, _| {
                let mut params = Params::new();
                params.insert("x".into(), json!(5));
                params.insert("y".into(), json!(6));
                params
            })
            .into();

        let result = orchestrator.execute(&command, None).await;
        assert!(result.is_success());
        assert_eq!(result.data(), Some(&json!({"x": 5, "y": 6})));
    }

    #[tokio::test]
    async fn instruction_text_runs_end_to_end() {
        let backend = Arc::new(Sessions::default());
        let orchestrator = orchestrator(backend.clone(), OrchestratorConfig::default());

        let result = orchestrator
            .execute_instruction("tap at 100, 200", Some(CommandContext::new().with_session("sim")))
            .await
            .unwrap();
        assert_eq!(result.data(), Some(&json!({"x": 100, "y": 200})));
        assert_eq!(*backend.seen.lock().unwrap(), vec!["sim"]);

        let err = orchestrator.execute_instruction("xyzzy", None).await.unwrap_err();
        assert!(matches!(err, RegistryError::UnrecognizedInstruction { .. }));
    }
}
