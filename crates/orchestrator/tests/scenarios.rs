use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use simpilot_orchestrator::{
    BackendError, BackendResult, Command, CommandContext, ConditionalCommand, LeafCommand,
    Orchestrator, OrchestratorConfig, Point, SequenceCommand, SimulatorBackend, ToolInvoker,
};
use simpilot_parser::CommandRegistry;
use simpilot_protocol::{codes, CommandType, Params};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every call; fails `launch_app` for bundle ids starting with `fail.` and fails
/// `terminate_app` transiently until `flaky` attempts have been used up.
#[derive(Default)]
struct ScriptedBackend {
    calls: Mutex<Vec<String>>,
    flaky: AtomicUsize,
    terminate_attempts: AtomicUsize,
}

impl ScriptedBackend {
    fn flaky(failures: usize) -> Self {
        Self {
            flaky: AtomicUsize::new(failures),
            ..Self::default()
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SimulatorBackend for ScriptedBackend {
    async fn launch_app(&self, _session_id: &str, bundle_id: &str) -> BackendResult<()> {
        self.record(format!("launch {bundle_id}"));
        if bundle_id.starts_with("fail.") {
            return Err(BackendError::Operation(format!("cannot launch {bundle_id}")));
        }
        Ok(())
    }

    async fn terminate_app(&self, _session_id: &str, bundle_id: &str) -> BackendResult<()> {
        self.terminate_attempts.fetch_add(1, Ordering::SeqCst);
        self.record(format!("terminate {bundle_id}"));
        let remaining = self.flaky.load(Ordering::SeqCst);
        if remaining > 0 {
            self.flaky.store(remaining - 1, Ordering::SeqCst);
            return Err(BackendError::Transient("device busy".into()));
        }
        Ok(())
    }

    async fn tap(&self, session_id: &str, point: Point) -> BackendResult<()> {
        self.record(format!("tap {session_id} {} {}", point.x, point.y));
        Ok(())
    }

    async fn list_apps(&self, _session_id: &str) -> BackendResult {
        tokio::time::sleep(Duration::from_secs(10)).await;
        self.record("list apps");
        Ok(json!([]))
    }
}

fn params(value: Value) -> Params {
    value.as_object().cloned().unwrap_or_default()
}

fn orchestrator(backend: Arc<ScriptedBackend>) -> Orchestrator {
    let registry = Arc::new(CommandRegistry::with_builtin_catalog().unwrap());
    Orchestrator::new(backend, registry)
}

fn launch(bundle_id: &str) -> Command {
    Command::leaf(CommandType::LaunchApp, params(json!({ "bundleId": bundle_id })))
}

#[tokio::test]
async fn stop_on_error_returns_the_failing_result() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let sequence = Command::sequence(
        vec![launch("com.one"), launch("fail.two"), launch("com.three")],
        true,
    );

    let result = orchestrator.execute(&sequence, None).await;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("cannot launch fail.two"));
    assert_eq!(result.code(), Some(codes::BACKEND_FAILURE));
    assert_eq!(backend.calls(), vec!["launch com.one", "launch fail.two"]);
}

#[tokio::test]
async fn sequence_without_stop_returns_last_result_and_records_all() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let failing = LeafCommand::new(
        CommandType::LaunchApp,
        params(json!({ "bundleId": "fail.two" })),
    )
    .with_id("second");
    let sequence = Command::sequence(
        vec![
            launch("com.one"),
            failing.into(),
            LeafCommand::new(
                CommandType::LaunchApp,
                params(json!({ "bundleId": "com.three" })),
            )
            .with_id("third")
            .into(),
        ],
        false,
    );

    let mut context = CommandContext::new();
    let result = orchestrator.execute_in(&sequence, &mut context).await;

    assert!(result.is_success());
    assert_eq!(result.data(), Some(&json!({ "bundleId": "com.three" })));
    assert_eq!(context.previous_results.len(), 3);
    assert!(!context.succeeded("second"));
    assert!(context.succeeded("third"));
    assert_eq!(backend.calls().len(), 3);
}

#[tokio::test]
async fn empty_sequence_is_a_successful_noop() {
    let orchestrator = orchestrator(Arc::new(ScriptedBackend::default()));
    let result = orchestrator
        .execute(&Command::sequence(Vec::new(), true), None)
        .await;
    assert!(result.is_success());
    assert_eq!(result.data(), Some(&Value::Null));
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let backend = Arc::new(ScriptedBackend::flaky(2));
    let orchestrator = orchestrator(backend.clone());
    let command: Command = LeafCommand::new(
        CommandType::TerminateApp,
        params(json!({ "bundleId": "com.example.app" })),
    )
    .with_retries(2)
    .into();

    let result = orchestrator.execute(&command, None).await;

    assert!(result.is_success(), "{result:?}");
    assert_eq!(backend.terminate_attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retries_are_exhausted_into_a_backend_failure() {
    let backend = Arc::new(ScriptedBackend::flaky(5));
    let orchestrator = orchestrator(backend.clone());
    let command: Command = LeafCommand::new(
        CommandType::TerminateApp,
        params(json!({ "bundleId": "com.example.app" })),
    )
    .with_retries(1)
    .into();

    let result = orchestrator.execute(&command, None).await;

    assert_eq!(result.code(), Some(codes::BACKEND_FAILURE));
    assert_eq!(result.error(), Some("device busy"));
    assert_eq!(backend.terminate_attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn non_transient_failures_are_not_retried() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let command: Command = LeafCommand::new(
        CommandType::LaunchApp,
        params(json!({ "bundleId": "fail.app" })),
    )
    .with_retries(3)
    .into();

    let result = orchestrator.execute(&command, None).await;

    assert!(!result.is_success());
    assert_eq!(backend.calls(), vec!["launch fail.app"]);
}

#[tokio::test]
async fn configured_retries_apply_when_the_command_sets_none() {
    let backend = Arc::new(ScriptedBackend::flaky(1));
    let orchestrator = orchestrator(backend.clone()).with_config(OrchestratorConfig {
        default_retries: 1,
        ..OrchestratorConfig::default()
    });
    let command = Command::leaf(
        CommandType::TerminateApp,
        params(json!({ "bundleId": "com.example.app" })),
    );

    assert!(orchestrator.execute(&command, None).await.is_success());
    assert_eq!(backend.terminate_attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn false_conditional_without_branch_is_a_noop() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let conditional = Command::conditional(|_| false, launch("com.example.app"), None);

    let result = orchestrator.execute(&conditional, None).await;

    assert!(result.is_success());
    assert_eq!(result.data(), Some(&Value::Null));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn conditional_sees_earlier_results() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let first: Command = LeafCommand::new(
        CommandType::LaunchApp,
        params(json!({ "bundleId": "fail.first" })),
    )
    .with_id("first")
    .into();
    let recover = Command::conditional(
        |context| !context.succeeded("first"),
        launch("com.fallback"),
        Some(launch("com.unreachable")),
    );

    let result = orchestrator
        .execute(&Command::sequence(vec![first, recover], false), None)
        .await;

    assert!(result.is_success());
    assert_eq!(backend.calls(), vec!["launch fail.first", "launch com.fallback"]);
}

#[tokio::test]
async fn validation_failure_skips_the_backend() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let command: Command = LeafCommand::new(
        CommandType::LaunchApp,
        params(json!({ "bundleId": "com.example.app" })),
    )
    .validate(|params, _| params.contains_key("sessionId"))
    .into();

    let result = orchestrator.execute(&command, None).await;

    assert_eq!(result.error(), Some("Validation failed"));
    assert_eq!(result.code(), Some(codes::VALIDATION_FAILED));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn error_handler_replaces_the_failure() {
    let orchestrator = orchestrator(Arc::new(ScriptedBackend::default()));
    let command: Command = LeafCommand::new(
        CommandType::LaunchApp,
        params(json!({ "bundleId": "fail.app" })),
    )
    .on_error(|err, _| simpilot_protocol::CommandResult::failure(codes::HANDLED, format!("handled: {err}")))
    .into();

    let result = orchestrator.execute(&command, None).await;

    assert_eq!(result.code(), Some(codes::HANDLED));
    assert_eq!(result.error(), Some("handled: cannot launch fail.app"));
}

#[tokio::test(start_paused = true)]
async fn every_command_type_yields_a_result() {
    let orchestrator = orchestrator(Arc::new(ScriptedBackend::default()));
    for command in CommandType::ALL.iter().copied() {
        let result = orchestrator
            .execute(&Command::leaf(command, Params::new()), None)
            .await;
        if !result.is_success() {
            assert!(result.error().is_some(), "{command}: {result:?}");
            assert!(result.code().is_some(), "{command}: {result:?}");
        }
    }
}

#[tokio::test]
async fn unsupported_operations_name_the_command() {
    let orchestrator = orchestrator(Arc::new(ScriptedBackend::default()));
    let result = orchestrator
        .execute(
            &Command::leaf(
                CommandType::OpenUrl,
                params(json!({ "url": "https://example.com" })),
            ),
            None,
        )
        .await;
    assert_eq!(result.error(), Some("Unsupported command type: openUrl"));
    assert_eq!(result.code(), Some(codes::UNSUPPORTED_COMMAND));
}

#[tokio::test(start_paused = true)]
async fn slow_dispatch_times_out() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let command: Command = LeafCommand::new(CommandType::ListApps, Params::new())
        .with_timeout(Duration::from_secs(1))
        .into();

    let result = orchestrator.execute(&command, None).await;

    assert_eq!(result.code(), Some(codes::TIMEOUT));
    assert_eq!(result.error(), Some("Command timed out after 1000 ms"));
    assert!(backend.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn configured_timeout_applies_by_default() {
    let orchestrator = orchestrator(Arc::new(ScriptedBackend::default())).with_config(
        OrchestratorConfig {
            default_timeout_ms: Some(250),
            ..OrchestratorConfig::default()
        },
    );
    let result = orchestrator
        .execute(&Command::leaf(CommandType::ListApps, Params::new()), None)
        .await;
    assert_eq!(result.code(), Some(codes::TIMEOUT));
}

#[tokio::test]
async fn tool_calls_render_results_as_text() {
    let backend = Arc::new(ScriptedBackend::default());
    let invoker = ToolInvoker::new(orchestrator(backend.clone())).with_session("sim-7");

    let response = invoker
        .call_tool("tap", params(json!({ "x": 3, "y": 4 })))
        .await;
    assert!(!response.is_error);
    let rendered: Value = serde_json::from_str(&response.text).unwrap();
    assert_eq!(rendered["success"], json!(true));
    assert_eq!(rendered["data"], json!({ "x": 3, "y": 4 }));
    assert_eq!(backend.calls(), vec!["tap sim-7 3 4"]);

    let response = invoker
        .call_tool("launch-app", params(json!({ "bundleId": "fail.app" })))
        .await;
    assert!(response.is_error);
    assert_eq!(response.text, "Error: cannot launch fail.app");

    let response = invoker.call_tool("teleport", Params::new()).await;
    assert!(response.is_error);
    assert!(response.text.starts_with("Error: "), "{}", response.text);
}

#[tokio::test]
async fn instructions_run_through_the_invoker() {
    let backend = Arc::new(ScriptedBackend::default());
    let invoker = ToolInvoker::new(orchestrator(backend.clone()));

    let response = invoker.call_instruction("launch app com.example.app").await;
    assert!(!response.is_error, "{}", response.text);
    assert_eq!(backend.calls(), vec!["launch com.example.app"]);

    let response = invoker.call_instruction("xyzzy").await;
    assert!(response.is_error);
    assert!(response.text.contains("xyzzy"), "{}", response.text);
}

/// Fails every call: operation errors, transient errors, a panic and, for everything
/// else, the default unsupported bodies.
#[derive(Default)]
struct BrokenBackend {
    taps: AtomicUsize,
}

#[async_trait]
impl SimulatorBackend for BrokenBackend {
    async fn launch_app(&self, _session_id: &str, bundle_id: &str) -> BackendResult<()> {
        Err(BackendError::Operation(format!("cannot launch {bundle_id}")))
    }

    async fn tap(&self, _session_id: &str, _point: Point) -> BackendResult<()> {
        self.taps.fetch_add(1, Ordering::SeqCst);
        Err(BackendError::Transient("touch input stalled".into()))
    }

    async fn list_apps(&self, _session_id: &str) -> BackendResult {
        panic!("simctl listapps crashed");
    }
}

fn broken_orchestrator(backend: Arc<BrokenBackend>) -> Orchestrator {
    let registry = Arc::new(CommandRegistry::with_builtin_catalog().unwrap());
    Orchestrator::new(backend, registry)
}

#[tokio::test]
async fn backend_panics_become_backend_failures() {
    let orchestrator = broken_orchestrator(Arc::new(BrokenBackend::default()));
    let command: Command = LeafCommand::new(CommandType::ListApps, Params::new())
        .with_retries(3)
        .into();

    let result = orchestrator.execute(&command, None).await;

    assert_eq!(result.code(), Some(codes::BACKEND_FAILURE));
    assert_eq!(
        result.error(),
        Some("backend panicked during listApps: simctl listapps crashed")
    );
}

#[tokio::test]
async fn trees_over_a_failing_backend_still_produce_results() {
    let backend = Arc::new(BrokenBackend::default());
    let orchestrator = broken_orchestrator(backend.clone());
    let inner: Command = SequenceCommand::new(
        vec![
            LeafCommand::new(CommandType::Tap, params(json!({ "x": 1, "y": 2 })))
                .with_retries(1)
                .into(),
            launch("com.never"),
        ],
        true,
    )
    .with_id("inner")
    .into();
    let fallback: Command = ConditionalCommand::new(
        |context| !context.succeeded("inner"),
        LeafCommand::new(CommandType::ListApps, Params::new()).into(),
        Some(launch("com.unreachable")),
    )
    .with_id("fallback")
    .into();
    let tree = Command::sequence(
        vec![
            LeafCommand::new(
                CommandType::LaunchApp,
                params(json!({ "bundleId": "com.first" })),
            )
            .with_id("first")
            .into(),
            inner,
            LeafCommand::new(
                CommandType::OpenUrl,
                params(json!({ "url": "https://example.com" })),
            )
            .with_id("open")
            .into(),
            fallback,
        ],
        false,
    );

    let mut context = CommandContext::new();
    let result = orchestrator.execute_in(&tree, &mut context).await;

    assert_eq!(result.code(), Some(codes::BACKEND_FAILURE));
    assert_eq!(backend.taps.load(Ordering::SeqCst), 2);
    assert_eq!(
        context.result("first").and_then(|r| r.error()),
        Some("cannot launch com.first")
    );
    assert_eq!(
        context.result("inner").and_then(|r| r.error()),
        Some("touch input stalled")
    );
    assert_eq!(
        context.result("open").and_then(|r| r.code()),
        Some(codes::UNSUPPORTED_COMMAND)
    );
    assert!(!context.succeeded("fallback"));
}

#[tokio::test(start_paused = true)]
async fn timeout_bounds_the_retries() {
    let backend = Arc::new(ScriptedBackend::flaky(usize::MAX));
    let orchestrator = orchestrator(backend.clone()).with_config(OrchestratorConfig {
        retry_delay_ms: 1000,
        ..OrchestratorConfig::default()
    });
    let command: Command = LeafCommand::new(
        CommandType::TerminateApp,
        params(json!({ "bundleId": "com.example.app" })),
    )
    .with_retries(5)
    .with_timeout(Duration::from_millis(1500))
    .into();

    let result = orchestrator.execute(&command, None).await;

    assert_eq!(result.code(), Some(codes::TIMEOUT));
    assert_eq!(result.error(), Some("Command timed out after 1500 ms"));
    assert_eq!(backend.terminate_attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn conditionals_read_context_variables() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());
    let relaunch = || {
        Command::conditional(
            |context| context.variables.get("relaunch") == Some(&json!(true)),
            launch("com.example.app"),
            None,
        )
    };

    let context = CommandContext::new().with_variable("relaunch", json!(true));
    assert!(orchestrator.execute(&relaunch(), Some(context)).await.is_success());
    let context = CommandContext::new().with_variable("relaunch", json!(false));
    assert!(orchestrator.execute(&relaunch(), Some(context)).await.is_success());

    assert_eq!(backend.calls(), vec!["launch com.example.app"]);
}

#[tokio::test]
async fn tool_ids_build_described_leaf_commands() {
    let invoker = ToolInvoker::new(orchestrator(Arc::new(ScriptedBackend::default())));

    let leaf = invoker
        .command_for_tool("launch-app", params(json!({ "bundleId": "com.example.app" })))
        .unwrap();
    assert_eq!(leaf.command(), CommandType::LaunchApp);
    assert_eq!(leaf.params()["bundleId"], json!("com.example.app"));
    let command: Command = leaf.into();
    assert_eq!(command.description(), Some("tool call launch-app (launch app)"));

    assert!(invoker.command_for_tool("teleport", Params::new()).is_err());
}

#[tokio::test]
async fn overflowing_instruction_numbers_never_reach_the_backend() {
    let backend = Arc::new(ScriptedBackend::default());
    let orchestrator = orchestrator(backend.clone());

    let result = orchestrator
        .execute_instruction("tap at 99999999999999999999, 200", None)
        .await
        .unwrap();

    assert_eq!(result.code(), Some(codes::INVALID_PARAMETER));
    assert!(backend.calls().is_empty());
}
