use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a leaf command.
///
/// Composite commands (sequences, conditionals) are structural and do not carry a
/// `CommandType` of their own.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CommandType {
    // Accessibility
    DescribeElements,
    DescribePoint,

    // Application lifecycle
    InstallApp,
    LaunchApp,
    TerminateApp,
    UninstallApp,
    ListApps,
    IsAppInstalled,

    // Capture and logging
    TakeScreenshot,
    RecordVideo,
    StopRecording,
    GetSystemLogs,
    GetAppLogs,

    // Debug
    StartDebug,
    StopDebug,
    DebugStatus,
    ListCrashLogs,
    ShowCrashLog,
    DeleteCrashLogs,

    // Simulator lifecycle
    CreateSimulatorSession,
    TerminateSimulatorSession,
    ListAvailableSimulators,
    ListBootedSimulators,
    BootSimulator,
    ShutdownSimulator,
    FocusSimulator,
    IsSimulatorBooted,

    // UI interaction
    Tap,
    Swipe,
    PressDeviceButton,
    InputText,
    PressKey,
    PressKeySequence,

    // Misc
    InstallDylib,
    OpenUrl,
    ClearKeychain,
    SetLocation,
    AddMedia,
    ApprovePermissions,
    UpdateContacts,
}

impl CommandType {
    pub const ALL: &'static [CommandType] = &[
        Self::DescribeElements,
        Self::DescribePoint,
        Self::InstallApp,
        Self::LaunchApp,
        Self::TerminateApp,
        Self::UninstallApp,
        Self::ListApps,
        Self::IsAppInstalled,
        Self::TakeScreenshot,
        Self::RecordVideo,
        Self::StopRecording,
        Self::GetSystemLogs,
        Self::GetAppLogs,
        Self::StartDebug,
        Self::StopDebug,
        Self::DebugStatus,
        Self::ListCrashLogs,
        Self::ShowCrashLog,
        Self::DeleteCrashLogs,
        Self::CreateSimulatorSession,
        Self::TerminateSimulatorSession,
        Self::ListAvailableSimulators,
        Self::ListBootedSimulators,
        Self::BootSimulator,
        Self::ShutdownSimulator,
        Self::FocusSimulator,
        Self::IsSimulatorBooted,
        Self::Tap,
        Self::Swipe,
        Self::PressDeviceButton,
        Self::InputText,
        Self::PressKey,
        Self::PressKeySequence,
        Self::InstallDylib,
        Self::OpenUrl,
        Self::ClearKeychain,
        Self::SetLocation,
        Self::AddMedia,
        Self::ApprovePermissions,
        Self::UpdateContacts,
    ];

    /// Wire label, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DescribeElements => "describeElements",
            Self::DescribePoint => "describePoint",
            Self::InstallApp => "installApp",
            Self::LaunchApp => "launchApp",
            Self::TerminateApp => "terminateApp",
            Self::UninstallApp => "uninstallApp",
            Self::ListApps => "listApps",
            Self::IsAppInstalled => "isAppInstalled",
            Self::TakeScreenshot => "takeScreenshot",
            Self::RecordVideo => "recordVideo",
            Self::StopRecording => "stopRecording",
            Self::GetSystemLogs => "getSystemLogs",
            Self::GetAppLogs => "getAppLogs",
            Self::StartDebug => "startDebug",
            Self::StopDebug => "stopDebug",
            Self::DebugStatus => "debugStatus",
            Self::ListCrashLogs => "listCrashLogs",
            Self::ShowCrashLog => "showCrashLog",
            Self::DeleteCrashLogs => "deleteCrashLogs",
            Self::CreateSimulatorSession => "createSimulatorSession",
            Self::TerminateSimulatorSession => "terminateSimulatorSession",
            Self::ListAvailableSimulators => "listAvailableSimulators",
            Self::ListBootedSimulators => "listBootedSimulators",
            Self::BootSimulator => "bootSimulator",
            Self::ShutdownSimulator => "shutdownSimulator",
            Self::FocusSimulator => "focusSimulator",
            Self::IsSimulatorBooted => "isSimulatorBooted",
            Self::Tap => "tap",
            Self::Swipe => "swipe",
            Self::PressDeviceButton => "pressDeviceButton",
            Self::InputText => "inputText",
            Self::PressKey => "pressKey",
            Self::PressKeySequence => "pressKeySequence",
            Self::InstallDylib => "installDylib",
            Self::OpenUrl => "openUrl",
            Self::ClearKeychain => "clearKeychain",
            Self::SetLocation => "setLocation",
            Self::AddMedia => "addMedia",
            Self::ApprovePermissions => "approvePermissions",
            Self::UpdateContacts => "updateContacts",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|command| command.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown command type '{trimmed}'"))
    }
}
