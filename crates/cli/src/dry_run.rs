//! Backend that performs nothing and journals what it would have done.

use async_trait::async_trait;
use log::info;
use serde_json::{json, Value};
use simpilot_orchestrator::{
    BackendResult, CrashLogFilter, DeviceButton, LogQuery, Point, SessionOptions,
    SimulatorBackend,
};
use std::sync::Mutex;

const DRY_RUN_SESSION: &str = "dry-run-session";

#[derive(Debug, Default)]
pub struct DryRunBackend {
    journal: Mutex<Vec<Value>>,
}

impl DryRunBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations planned so far, oldest first.
    pub fn journal(&self) -> Vec<Value> {
        self.journal
            .lock()
            .map(|journal| journal.clone())
            .unwrap_or_default()
    }

    fn plan(&self, operation: &str, session_id: Option<&str>, args: Value) -> Value {
        info!("dry run: {operation} {args}");
        let mut entry = json!({ "operation": operation, "args": args });
        if let Some(session_id) = session_id {
            entry["sessionId"] = json!(session_id);
        }
        if let Ok(mut journal) = self.journal.lock() {
            journal.push(entry.clone());
        }
        entry
    }

    fn planned(&self, operation: &str, session_id: &str, args: Value) -> BackendResult {
        let mut entry = self.plan(operation, Some(session_id), args);
        entry["dryRun"] = json!(true);
        Ok(entry)
    }

    fn done(&self, operation: &str, session_id: &str, args: Value) -> BackendResult<()> {
        self.plan(operation, Some(session_id), args);
        Ok(())
    }
}

#[async_trait]
impl SimulatorBackend for DryRunBackend {
    async fn describe_all_elements(&self, session_id: &str) -> BackendResult {
        self.planned("describe_all_elements", session_id, json!({}))
    }

    async fn describe_point(&self, session_id: &str, point: Point) -> BackendResult {
        self.planned("describe_point", session_id, json!(point))
    }

    async fn install_app(&self, session_id: &str, app_path: &str) -> BackendResult {
        self.planned("install_app", session_id, json!({ "appPath": app_path }))
    }

    async fn launch_app(&self, session_id: &str, bundle_id: &str) -> BackendResult<()> {
        self.done("launch_app", session_id, json!({ "bundleId": bundle_id }))
    }

    async fn terminate_app(&self, session_id: &str, bundle_id: &str) -> BackendResult<()> {
        self.done("terminate_app", session_id, json!({ "bundleId": bundle_id }))
    }

    async fn uninstall_app(&self, session_id: &str, bundle_id: &str) -> BackendResult<()> {
        self.done("uninstall_app", session_id, json!({ "bundleId": bundle_id }))
    }

    async fn list_apps(&self, session_id: &str) -> BackendResult {
        self.planned("list_apps", session_id, json!({}))
    }

    async fn is_app_installed(&self, session_id: &str, bundle_id: &str) -> BackendResult<bool> {
        self.plan(
            "is_app_installed",
            Some(session_id),
            json!({ "bundleId": bundle_id }),
        );
        Ok(true)
    }

    async fn take_screenshot(&self, session_id: &str, output_path: Option<&str>) -> BackendResult {
        self.planned(
            "take_screenshot",
            session_id,
            json!({ "outputPath": output_path }),
        )
    }

    async fn start_recording(&self, session_id: &str, output_path: &str) -> BackendResult {
        self.planned(
            "start_recording",
            session_id,
            json!({ "outputPath": output_path }),
        )
    }

    async fn stop_recording(&self, session_id: &str, recording_id: Option<&str>) -> BackendResult {
        self.planned(
            "stop_recording",
            session_id,
            json!({ "recordingId": recording_id }),
        )
    }

    async fn system_logs(&self, session_id: &str, query: &LogQuery) -> BackendResult {
        self.planned(
            "system_logs",
            session_id,
            json!({ "bundleId": query.bundle_id, "timeout": query.timeout }),
        )
    }

    async fn app_logs(
        &self,
        session_id: &str,
        bundle_id: &str,
        timeout: Option<&str>,
    ) -> BackendResult {
        self.planned(
            "app_logs",
            session_id,
            json!({ "bundleId": bundle_id, "timeout": timeout }),
        )
    }

    async fn start_debug(&self, session_id: &str, bundle_id: &str) -> BackendResult {
        self.planned("start_debug", session_id, json!({ "bundleId": bundle_id }))
    }

    async fn stop_debug(&self, session_id: &str) -> BackendResult<()> {
        self.done("stop_debug", session_id, json!({}))
    }

    async fn debug_status(&self, session_id: &str) -> BackendResult {
        self.planned("debug_status", session_id, json!({}))
    }

    async fn list_crash_logs(&self, session_id: &str, bundle_id: Option<&str>) -> BackendResult {
        self.planned(
            "list_crash_logs",
            session_id,
            json!({ "bundleId": bundle_id }),
        )
    }

    async fn show_crash_log(&self, session_id: &str, crash_name: &str) -> BackendResult {
        self.planned(
            "show_crash_log",
            session_id,
            json!({ "crashName": crash_name }),
        )
    }

    async fn delete_crash_logs(&self, session_id: &str, filter: &CrashLogFilter) -> BackendResult {
        self.planned(
            "delete_crash_logs",
            session_id,
            json!({ "bundleId": filter.bundle_id, "all": filter.all }),
        )
    }

    async fn create_session(&self, options: &SessionOptions) -> BackendResult {
        let mut entry = self.plan("create_session", None, json!(options));
        entry["sessionId"] = json!(DRY_RUN_SESSION);
        entry["dryRun"] = json!(true);
        Ok(entry)
    }

    async fn terminate_session(&self, session_id: &str) -> BackendResult<()> {
        self.done("terminate_session", session_id, json!({}))
    }

    async fn list_available_simulators(&self) -> BackendResult {
        Ok(self.plan("list_available_simulators", None, json!({})))
    }

    async fn list_booted_simulators(&self) -> BackendResult {
        Ok(self.plan("list_booted_simulators", None, json!({})))
    }

    async fn boot_simulator(&self, udid: &str) -> BackendResult<()> {
        self.plan("boot_simulator", None, json!({ "udid": udid }));
        Ok(())
    }

    async fn shutdown_simulator_by_udid(&self, udid: &str) -> BackendResult<()> {
        self.plan("shutdown_simulator_by_udid", None, json!({ "udid": udid }));
        Ok(())
    }

    async fn shutdown_simulator(&self, session_id: &str) -> BackendResult<()> {
        self.done("shutdown_simulator", session_id, json!({}))
    }

    async fn focus_simulator(&self, session_id: &str) -> BackendResult<()> {
        self.done("focus_simulator", session_id, json!({}))
    }

    async fn is_simulator_booted(&self, session_id: &str) -> BackendResult<bool> {
        self.plan("is_simulator_booted", Some(session_id), json!({}));
        Ok(true)
    }

    async fn tap(&self, session_id: &str, point: Point) -> BackendResult<()> {
        self.done("tap", session_id, json!(point))
    }

    async fn swipe(
        &self,
        session_id: &str,
        from: Point,
        to: Point,
        duration_ms: Option<u64>,
    ) -> BackendResult<()> {
        self.done(
            "swipe",
            session_id,
            json!({ "from": from, "to": to, "durationMs": duration_ms }),
        )
    }

    async fn press_button(
        &self,
        session_id: &str,
        button: DeviceButton,
        duration_ms: Option<u64>,
    ) -> BackendResult<()> {
        self.done(
            "press_button",
            session_id,
            json!({ "button": button, "durationMs": duration_ms }),
        )
    }

    async fn input_text(&self, session_id: &str, text: &str) -> BackendResult<()> {
        self.done("input_text", session_id, json!({ "text": text }))
    }

    async fn press_key(
        &self,
        session_id: &str,
        key_code: u32,
        duration_ms: Option<u64>,
    ) -> BackendResult<()> {
        self.done(
            "press_key",
            session_id,
            json!({ "keyCode": key_code, "durationMs": duration_ms }),
        )
    }

    async fn press_key_sequence(&self, session_id: &str, key_codes: &[u32]) -> BackendResult<()> {
        self.done(
            "press_key_sequence",
            session_id,
            json!({ "keyCodes": key_codes }),
        )
    }

    async fn install_dylib(&self, session_id: &str, dylib_path: &str) -> BackendResult<()> {
        self.done(
            "install_dylib",
            session_id,
            json!({ "dylibPath": dylib_path }),
        )
    }

    async fn open_url(&self, session_id: &str, url: &str) -> BackendResult<()> {
        self.done("open_url", session_id, json!({ "url": url }))
    }

    async fn clear_keychain(&self, session_id: &str) -> BackendResult<()> {
        self.done("clear_keychain", session_id, json!({}))
    }

    async fn set_location(&self, session_id: &str, latitude: f64, longitude: f64) -> BackendResult<()> {
        self.done(
            "set_location",
            session_id,
            json!({ "latitude": latitude, "longitude": longitude }),
        )
    }

    async fn add_media(&self, session_id: &str, media_paths: &[String]) -> BackendResult<()> {
        self.done("add_media", session_id, json!({ "mediaPaths": media_paths }))
    }

    async fn approve_permissions(
        &self,
        session_id: &str,
        bundle_id: &str,
        permissions: &[String],
    ) -> BackendResult<()> {
        self.done(
            "approve_permissions",
            session_id,
            json!({ "bundleId": bundle_id, "permissions": permissions }),
        )
    }

    async fn update_contacts(&self, session_id: &str, db_path: &str) -> BackendResult<()> {
        self.done("update_contacts", session_id, json!({ "dbPath": db_path }))
    }
}
