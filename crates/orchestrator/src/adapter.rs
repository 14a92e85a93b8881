//! Maps a command identity plus its parameter map onto a backend call.
//!
//! Parameters arrive loosely typed (parsed text, tool-call JSON, transform hooks), so numbers
//! may be JSON numbers or numeric strings and lists may be arrays or delimited strings.
//! Operations without a meaningful return value echo the parameters they acted on.

use serde_json::{json, Value};
use simpilot_protocol::{CommandType, Params};

use crate::backend::{
    BackendResult, CrashLogFilter, DeviceButton, LogQuery, Point, SessionOptions,
    SimulatorBackend,
};
use crate::error::BackendError;

pub(crate) async fn dispatch(
    backend: &dyn SimulatorBackend,
    command: CommandType,
    params: &Params,
    session_id: &str,
) -> BackendResult {
    let args = Args(params);
    match command {
        CommandType::DescribeElements => backend.describe_all_elements(session_id).await,
        CommandType::DescribePoint => {
            backend
                .describe_point(session_id, args.point("x", "y")?)
                .await
        }

        CommandType::InstallApp => backend.install_app(session_id, args.text("appPath")?).await,
        CommandType::LaunchApp => {
            let bundle_id = args.text("bundleId")?;
            backend.launch_app(session_id, bundle_id).await?;
            Ok(json!({ "bundleId": bundle_id }))
        }
        CommandType::TerminateApp => {
            let bundle_id = args.text("bundleId")?;
            backend.terminate_app(session_id, bundle_id).await?;
            Ok(json!({ "bundleId": bundle_id }))
        }
        CommandType::UninstallApp => {
            let bundle_id = args.text("bundleId")?;
            backend.uninstall_app(session_id, bundle_id).await?;
            Ok(json!({ "bundleId": bundle_id }))
        }
        CommandType::ListApps => backend.list_apps(session_id).await,
        CommandType::IsAppInstalled => backend
            .is_app_installed(session_id, args.text("bundleId")?)
            .await
            .map(Value::Bool),

        CommandType::TakeScreenshot => {
            backend
                .take_screenshot(session_id, args.opt_text("outputPath"))
                .await
        }
        CommandType::RecordVideo => {
            backend
                .start_recording(session_id, args.text("outputPath")?)
                .await
        }
        CommandType::StopRecording => {
            backend
                .stop_recording(session_id, args.opt_text("recordingId"))
                .await
        }
        CommandType::GetSystemLogs => {
            let query = LogQuery {
                bundle_id: args.opt_text("bundleId").map(str::to_string),
                timeout: args.opt_text("timeout").map(str::to_string),
            };
            backend.system_logs(session_id, &query).await
        }
        CommandType::GetAppLogs => {
            backend
                .app_logs(session_id, args.text("bundleId")?, args.opt_text("timeout"))
                .await
        }

        CommandType::StartDebug => backend.start_debug(session_id, args.text("bundleId")?).await,
        CommandType::StopDebug => {
            backend.stop_debug(session_id).await?;
            Ok(json!({ "sessionId": session_id }))
        }
        CommandType::DebugStatus => backend.debug_status(session_id).await,
        CommandType::ListCrashLogs => {
            backend
                .list_crash_logs(session_id, args.opt_text("bundleId"))
                .await
        }
        CommandType::ShowCrashLog => {
            backend
                .show_crash_log(session_id, args.text("crashName")?)
                .await
        }
        CommandType::DeleteCrashLogs => {
            let filter = CrashLogFilter {
                bundle_id: args.opt_text("bundleId").map(str::to_string),
                all: args.opt_bool("all")?.unwrap_or(false),
            };
            backend.delete_crash_logs(session_id, &filter).await
        }

        CommandType::CreateSimulatorSession => {
            let options = SessionOptions {
                device_name: args.opt_text("deviceName").map(str::to_string),
                platform_version: args.opt_text("platformVersion").map(str::to_string),
                autoboot: args.opt_bool("autoboot")?.unwrap_or(false),
            };
            backend.create_session(&options).await
        }
        CommandType::TerminateSimulatorSession => {
            backend.terminate_session(session_id).await?;
            Ok(json!({ "sessionId": session_id }))
        }
        CommandType::ListAvailableSimulators => backend.list_available_simulators().await,
        CommandType::ListBootedSimulators => backend.list_booted_simulators().await,
        CommandType::BootSimulator => {
            let udid = args.text("udid")?;
            backend.boot_simulator(udid).await?;
            Ok(json!({ "udid": udid }))
        }
        CommandType::ShutdownSimulator => match args.opt_text("udid") {
            Some(udid) => {
                backend.shutdown_simulator_by_udid(udid).await?;
                Ok(json!({ "udid": udid }))
            }
            None => {
                backend.shutdown_simulator(session_id).await?;
                Ok(json!({ "sessionId": session_id }))
            }
        },
        CommandType::FocusSimulator => {
            backend.focus_simulator(session_id).await?;
            Ok(json!({ "sessionId": session_id }))
        }
        CommandType::IsSimulatorBooted => backend
            .is_simulator_booted(session_id)
            .await
            .map(Value::Bool),

        CommandType::Tap => {
            let point = args.point("x", "y")?;
            backend.tap(session_id, point).await?;
            Ok(json!({ "x": number(point.x), "y": number(point.y) }))
        }
        CommandType::Swipe => {
            let from = args.point("startX", "startY")?;
            let to = args.point("endX", "endY")?;
            let duration = args.opt_u64("duration")?;
            backend.swipe(session_id, from, to, duration).await?;
            let mut echo = json!({
                "startX": number(from.x),
                "startY": number(from.y),
                "endX": number(to.x),
                "endY": number(to.y),
            });
            if let Some(duration) = duration {
                echo["duration"] = json!(duration);
            }
            Ok(echo)
        }
        CommandType::PressDeviceButton => {
            let button = args.button("button")?;
            let duration = args.opt_u64("duration")?;
            backend.press_button(session_id, button, duration).await?;
            Ok(json!({ "button": button, "duration": duration }))
        }
        CommandType::InputText => {
            let text = args.text("text")?;
            backend.input_text(session_id, text).await?;
            Ok(json!({ "text": text }))
        }
        CommandType::PressKey => {
            let key_code = args.uint("keyCode")?;
            let duration = args.opt_u64("duration")?;
            backend.press_key(session_id, key_code, duration).await?;
            Ok(json!({ "keyCode": key_code, "duration": duration }))
        }
        CommandType::PressKeySequence => {
            let key_codes = args.uint_list("keyCodes")?;
            backend.press_key_sequence(session_id, &key_codes).await?;
            Ok(json!({ "keyCodes": key_codes }))
        }

        CommandType::InstallDylib => {
            let path = args.text("dylibPath")?;
            backend.install_dylib(session_id, path).await?;
            Ok(json!({ "dylibPath": path }))
        }
        CommandType::OpenUrl => {
            let url = args.text("url")?;
            backend.open_url(session_id, url).await?;
            Ok(json!({ "url": url }))
        }
        CommandType::ClearKeychain => {
            backend.clear_keychain(session_id).await?;
            Ok(json!({ "sessionId": session_id }))
        }
        CommandType::SetLocation => {
            let latitude = args.float("latitude")?;
            let longitude = args.float("longitude")?;
            backend.set_location(session_id, latitude, longitude).await?;
            Ok(json!({ "latitude": latitude, "longitude": longitude }))
        }
        CommandType::AddMedia => {
            let paths = args.string_list("mediaPaths")?;
            backend.add_media(session_id, &paths).await?;
            Ok(json!({ "mediaPaths": paths }))
        }
        CommandType::ApprovePermissions => {
            let bundle_id = args.text("bundleId")?;
            let permissions = args.string_list("permissions")?;
            backend
                .approve_permissions(session_id, bundle_id, &permissions)
                .await?;
            Ok(json!({ "bundleId": bundle_id, "permissions": permissions }))
        }
        CommandType::UpdateContacts => {
            let path = args.text("dbPath")?;
            backend.update_contacts(session_id, path).await?;
            Ok(json!({ "dbPath": path }))
        }
    }
}

/// Integral coordinates echo as integers.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

struct Args<'a>(&'a Params);

impl<'a> Args<'a> {
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    fn text(&self, name: &str) -> BackendResult<&'a str> {
        self.opt_text(name)
            .ok_or_else(|| BackendError::invalid(name, "expected a non-empty string"))
    }

    fn opt_text(&self, name: &str) -> Option<&'a str> {
        self.get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }

    fn float(&self, name: &str) -> BackendResult<f64> {
        self.opt_float(name)?
            .ok_or_else(|| BackendError::invalid(name, "missing"))
    }

    fn opt_float(&self, name: &str) -> BackendResult<Option<f64>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(raw) => raw.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| BackendError::invalid(name, format!("expected a number, got {value}")))
    }

    fn point(&self, x: &str, y: &str) -> BackendResult<Point> {
        Ok(Point::new(self.float(x)?, self.float(y)?))
    }

    fn opt_u64(&self, name: &str) -> BackendResult<Option<u64>> {
        match self.opt_float(name)? {
            None => Ok(None),
            Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(Some(n as u64)),
            Some(n) => Err(BackendError::invalid(
                name,
                format!("expected a non-negative integer, got {n}"),
            )),
        }
    }

    fn uint(&self, name: &str) -> BackendResult<u32> {
        self.opt_u64(name)?
            .ok_or_else(|| BackendError::invalid(name, "missing"))
            .and_then(|n| to_u32(name, n))
    }

    fn uint_list(&self, name: &str) -> BackendResult<Vec<u32>> {
        let items = self.list(name)?;
        if items.is_empty() {
            return Err(BackendError::invalid(name, "expected at least one key code"));
        }
        items
            .into_iter()
            .map(|item| {
                let n = match &item {
                    Value::Number(n) => n.as_u64(),
                    Value::String(raw) => raw.parse::<u64>().ok(),
                    _ => None,
                };
                n.ok_or_else(|| BackendError::invalid(name, format!("invalid key code {item}")))
                    .and_then(|n| to_u32(name, n))
            })
            .collect()
    }

    fn string_list(&self, name: &str) -> BackendResult<Vec<String>> {
        let items = self
            .list(name)?
            .into_iter()
            .map(|item| match item {
                Value::String(raw) => Ok(raw),
                other => Err(BackendError::invalid(name, format!("expected strings, got {other}"))),
            })
            .collect::<BackendResult<Vec<_>>>()?;
        if items.is_empty() {
            return Err(BackendError::invalid(name, "expected at least one entry"));
        }
        Ok(items)
    }

    /// Array values, or a string split on commas and whitespace.
    fn list(&self, name: &str) -> BackendResult<Vec<Value>> {
        match self.get(name) {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(Value::String(raw)) => Ok(raw
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| Value::String(token.to_string()))
                .collect()),
            Some(other) => Err(BackendError::invalid(name, format!("expected a list, got {other}"))),
            None => Err(BackendError::invalid(name, "missing")),
        }
    }

    fn opt_bool(&self, name: &str) -> BackendResult<Option<bool>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(Value::String(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Some(true)),
                "false" | "no" | "0" => Ok(Some(false)),
                _ => Err(BackendError::invalid(name, format!("expected a boolean, got '{raw}'"))),
            },
            Some(other) => Err(BackendError::invalid(name, format!("expected a boolean, got {other}"))),
        }
    }

    fn button(&self, name: &str) -> BackendResult<DeviceButton> {
        self.text(name)?
            .parse()
            .map_err(|err: String| BackendError::invalid(name, err))
    }
}

fn to_u32(name: &str, n: u64) -> BackendResult<u32> {
    u32::try_from(n).map_err(|_| BackendError::invalid(name, format!("{n} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SimulatorBackend for Recorder {
        async fn tap(&self, session_id: &str, point: Point) -> BackendResult<()> {
            self.record(format!("tap {session_id} {} {}", point.x, point.y));
            Ok(())
        }

        async fn press_key_sequence(&self, session_id: &str, key_codes: &[u32]) -> BackendResult<()> {
            self.record(format!("keys {session_id} {key_codes:?}"));
            Ok(())
        }

        async fn shutdown_simulator(&self, session_id: &str) -> BackendResult<()> {
            self.record(format!("shutdown session {session_id}"));
            Ok(())
        }

        async fn shutdown_simulator_by_udid(&self, udid: &str) -> BackendResult<()> {
            self.record(format!("shutdown udid {udid}"));
            Ok(())
        }
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn numeric_strings_are_coerced() {
        let backend = Recorder::default();
        let echo = dispatch(
            &backend,
            CommandType::Tap,
            &params(json!({ "x": "100", "y": 200 })),
            "sim-1",
        )
        .await
        .unwrap();
        assert_eq!(echo, json!({ "x": 100, "y": 200 }));
        assert_eq!(backend.calls(), vec!["tap sim-1 100 200"]);
    }

    #[tokio::test]
    async fn key_codes_accept_arrays_and_strings() {
        let backend = Recorder::default();
        dispatch(&backend, CommandType::PressKeySequence, &params(json!({ "keyCodes": [4, 5] })), "s")
            .await
            .unwrap();
        dispatch(&backend, CommandType::PressKeySequence, &params(json!({ "keyCodes": "6 7,8" })), "s")
            .await
            .unwrap();
        assert_eq!(backend.calls(), vec!["keys s [4, 5]", "keys s [6, 7, 8]"]);
    }

    #[tokio::test]
    async fn shutdown_prefers_udid_over_session() {
        let backend = Recorder::default();
        let echo = dispatch(
            &backend,
            CommandType::ShutdownSimulator,
            &params(json!({ "udid": "ABC" })),
            "sim-1",
        )
        .await
        .unwrap();
        assert_eq!(echo, json!({ "udid": "ABC" }));

        let echo = dispatch(&backend, CommandType::ShutdownSimulator, &Params::new(), "sim-1")
            .await
            .unwrap();
        assert_eq!(echo, json!({ "sessionId": "sim-1" }));
        assert_eq!(
            backend.calls(),
            vec!["shutdown udid ABC", "shutdown session sim-1"]
        );
    }

    #[tokio::test]
    async fn missing_or_malformed_parameters_are_invalid() {
        let backend = Recorder::default();
        let err = dispatch(&backend, CommandType::Tap, &params(json!({ "x": 1 })), "s")
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::invalid("y", "missing"));

        let err = dispatch(
            &backend,
            CommandType::Tap,
            &params(json!({ "x": "left", "y": 1 })),
            "s",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BackendError::InvalidParameter { ref name, .. } if name == "x"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn unimplemented_operation_is_unsupported() {
        let backend = Recorder::default();
        let err = dispatch(
            &backend,
            CommandType::OpenUrl,
            &params(json!({ "url": "https://example.com" })),
            "s",
        )
        .await
        .unwrap_err();
        assert_eq!(err, BackendError::Unsupported("open_url"));
    }

    #[test]
    fn device_button_names_are_validated() {
        let p = params(json!({ "button": "home" }));
        assert_eq!(Args(&p).button("button"), Ok(DeviceButton::Home));
        let p = params(json!({ "button": "POWER" }));
        assert!(Args(&p).button("button").is_err());
    }
}
