//! Capability interface of the device-control backend.
//!
//! One method per leaf command. Every method has a default body reporting
//! [`BackendError::Unsupported`], so a backend implements exactly the operations it has and
//! the orchestrator turns the rest into `UnsupportedCommand` failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::BackendError;

pub type BackendResult<T = Value> = Result<T, BackendError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Hardware buttons a simulator can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceButton {
    ApplePay,
    Home,
    Lock,
    SideButton,
    Siri,
}

impl DeviceButton {
    pub const ALL: [DeviceButton; 5] = [
        Self::ApplePay,
        Self::Home,
        Self::Lock,
        Self::SideButton,
        Self::Siri,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplePay => "APPLE_PAY",
            Self::Home => "HOME",
            Self::Lock => "LOCK",
            Self::SideButton => "SIDE_BUTTON",
            Self::Siri => "SIRI",
        }
    }
}

impl fmt::Display for DeviceButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|button| button.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown device button '{trimmed}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub bundle_id: Option<String>,
    /// Duration literal such as `30s` or `1m`, passed through untouched.
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrashLogFilter {
    pub bundle_id: Option<String>,
    pub all: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
    pub autoboot: bool,
}

#[async_trait]
pub trait SimulatorBackend: Send + Sync {
    // Accessibility

    async fn describe_all_elements(&self, _session_id: &str) -> BackendResult {
        Err(BackendError::Unsupported("describe_all_elements"))
    }

    async fn describe_point(&self, _session_id: &str, _point: Point) -> BackendResult {
        Err(BackendError::Unsupported("describe_point"))
    }

    // Applications

    async fn install_app(&self, _session_id: &str, _app_path: &str) -> BackendResult {
        Err(BackendError::Unsupported("install_app"))
    }

    async fn launch_app(&self, _session_id: &str, _bundle_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("launch_app"))
    }

    async fn terminate_app(&self, _session_id: &str, _bundle_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("terminate_app"))
    }

    async fn uninstall_app(&self, _session_id: &str, _bundle_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("uninstall_app"))
    }

    async fn list_apps(&self, _session_id: &str) -> BackendResult {
        Err(BackendError::Unsupported("list_apps"))
    }

    async fn is_app_installed(&self, _session_id: &str, _bundle_id: &str) -> BackendResult<bool> {
        Err(BackendError::Unsupported("is_app_installed"))
    }

    // Capture and logs

    async fn take_screenshot(
        &self,
        _session_id: &str,
        _output_path: Option<&str>,
    ) -> BackendResult {
        Err(BackendError::Unsupported("take_screenshot"))
    }

    async fn start_recording(&self, _session_id: &str, _output_path: &str) -> BackendResult {
        Err(BackendError::Unsupported("start_recording"))
    }

    async fn stop_recording(
        &self,
        _session_id: &str,
        _recording_id: Option<&str>,
    ) -> BackendResult {
        Err(BackendError::Unsupported("stop_recording"))
    }

    async fn system_logs(&self, _session_id: &str, _query: &LogQuery) -> BackendResult {
        Err(BackendError::Unsupported("system_logs"))
    }

    async fn app_logs(
        &self,
        _session_id: &str,
        _bundle_id: &str,
        _timeout: Option<&str>,
    ) -> BackendResult {
        Err(BackendError::Unsupported("app_logs"))
    }

    // Debugging

    async fn start_debug(&self, _session_id: &str, _bundle_id: &str) -> BackendResult {
        Err(BackendError::Unsupported("start_debug"))
    }

    async fn stop_debug(&self, _session_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("stop_debug"))
    }

    async fn debug_status(&self, _session_id: &str) -> BackendResult {
        Err(BackendError::Unsupported("debug_status"))
    }

    async fn list_crash_logs(
        &self,
        _session_id: &str,
        _bundle_id: Option<&str>,
    ) -> BackendResult {
        Err(BackendError::Unsupported("list_crash_logs"))
    }

    async fn show_crash_log(&self, _session_id: &str, _crash_name: &str) -> BackendResult {
        Err(BackendError::Unsupported("show_crash_log"))
    }

    async fn delete_crash_logs(
        &self,
        _session_id: &str,
        _filter: &CrashLogFilter,
    ) -> BackendResult {
        Err(BackendError::Unsupported("delete_crash_logs"))
    }

    // Simulator lifecycle

    async fn create_session(&self, _options: &SessionOptions) -> BackendResult {
        Err(BackendError::Unsupported("create_session"))
    }

    async fn terminate_session(&self, _session_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("terminate_session"))
    }

    async fn list_available_simulators(&self) -> BackendResult {
        Err(BackendError::Unsupported("list_available_simulators"))
    }

    async fn list_booted_simulators(&self) -> BackendResult {
        Err(BackendError::Unsupported("list_booted_simulators"))
    }

    async fn boot_simulator(&self, _udid: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("boot_simulator"))
    }

    async fn shutdown_simulator_by_udid(&self, _udid: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("shutdown_simulator_by_udid"))
    }

    async fn shutdown_simulator(&self, _session_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("shutdown_simulator"))
    }

    async fn focus_simulator(&self, _session_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("focus_simulator"))
    }

    async fn is_simulator_booted(&self, _session_id: &str) -> BackendResult<bool> {
        Err(BackendError::Unsupported("is_simulator_booted"))
    }

    // UI interaction

    async fn tap(&self, _session_id: &str, _point: Point) -> BackendResult<()> {
        Err(BackendError::Unsupported("tap"))
    }

    async fn swipe(
        &self,
        _session_id: &str,
        _from: Point,
        _to: Point,
        _duration_ms: Option<u64>,
    ) -> BackendResult<()> {
        Err(BackendError::Unsupported("swipe"))
    }

    async fn press_button(
        &self,
        _session_id: &str,
        _button: DeviceButton,
        _duration_ms: Option<u64>,
    ) -> BackendResult<()> {
        Err(BackendError::Unsupported("press_button"))
    }

    async fn input_text(&self, _session_id: &str, _text: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("input_text"))
    }

    async fn press_key(
        &self,
        _session_id: &str,
        _key_code: u32,
        _duration_ms: Option<u64>,
    ) -> BackendResult<()> {
        Err(BackendError::Unsupported("press_key"))
    }

    async fn press_key_sequence(&self, _session_id: &str, _key_codes: &[u32]) -> BackendResult<()> {
        Err(BackendError::Unsupported("press_key_sequence"))
    }

    // Misc

    async fn install_dylib(&self, _session_id: &str, _dylib_path: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("install_dylib"))
    }

    async fn open_url(&self, _session_id: &str, _url: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("open_url"))
    }

    async fn clear_keychain(&self, _session_id: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("clear_keychain"))
    }

    async fn set_location(
        &self,
        _session_id: &str,
        _latitude: f64,
        _longitude: f64,
    ) -> BackendResult<()> {
        Err(BackendError::Unsupported("set_location"))
    }

    async fn add_media(&self, _session_id: &str, _media_paths: &[String]) -> BackendResult<()> {
        Err(BackendError::Unsupported("add_media"))
    }

    async fn approve_permissions(
        &self,
        _session_id: &str,
        _bundle_id: &str,
        _permissions: &[String],
    ) -> BackendResult<()> {
        Err(BackendError::Unsupported("approve_permissions"))
    }

    async fn update_contacts(&self, _session_id: &str, _db_path: &str) -> BackendResult<()> {
        Err(BackendError::Unsupported("update_contacts"))
    }
}
