use simpilot_protocol::CommandType;

use super::SESSION_ID;
use crate::definition::{DefinitionSpec, ParamSpec, ParamType};
use crate::extract;

const BUNDLE_ID: ParamSpec =
    ParamSpec::new("bundleId", ParamType::String).extract(extract::trimmed);

const CRASH_FILTER: ParamSpec = ParamSpec::new("bundleId", ParamType::String)
    .extract(extract::trimmed)
    .describe("Restrict the operation to crash logs produced by this bundle identifier.");

pub(crate) static DEFINITIONS: &[DefinitionSpec] = &[
    DefinitionSpec {
        name: "start debug",
        command: CommandType::StartDebug,
        description: "Starts a debug session for an application",
        patterns: &[
            r"iniciar\s+debug\s+(?P<bundleId>[^\s,]+)",
            r"start\s+debug\s+(?P<bundleId>[^\s,]+)",
            r"debug\s+app\s+(?P<bundleId>[^\s,]+)",
            r"begin\s+debug\s+(?P<bundleId>[^\s,]+)",
            r"launch\s+debug\s+(?P<bundleId>[^\s,]+)",
        ],
        required: &["bundleId"],
        optional: &["sessionId"],
        params: &[BUNDLE_ID, SESSION_ID],
        examples: &[
            "iniciar debug com.example.app",
            "start debug com.apple.mobilesafari",
            "debug app com.example.app",
            "begin debug com.example.app",
            "launch debug com.apple.mobilesafari",
        ],
    },
    DefinitionSpec {
        name: "stop debug",
        command: CommandType::StopDebug,
        description: "Stops a debug session",
        patterns: &[
            r"detener\s+debug",
            r"parar\s+debug",
            r"stop\s+debug",
            r"end\s+debug",
            r"terminate\s+debug",
        ],
        required: &[],
        optional: &["sessionId"],
        params: &[SESSION_ID],
        examples: &[
            "detener debug",
            "parar debug",
            "stop debug",
            "end debug",
            "terminate debug",
        ],
    },
    DefinitionSpec {
        name: "debug status",
        command: CommandType::DebugStatus,
        description: "Gets the debug session status",
        patterns: &[
            r"estado\s+debug",
            r"status\s+debug",
            r"información\s+debug",
            r"debug\s+status",
            r"get\s+debug\s+status",
        ],
        required: &[],
        optional: &["sessionId"],
        params: &[SESSION_ID],
        examples: &[
            "estado debug",
            "status debug",
            "información debug",
            "debug status",
            "get debug status",
        ],
    },
    DefinitionSpec {
        name: "list crash logs",
        command: CommandType::ListCrashLogs,
        description: "Lists available crash logs",
        patterns: &[
            r"(listar|mostrar)\s+crash\s+logs(\s+de\s+(?P<bundleId>[^\s,]+))?",
            r"(list|show|display)\s+crash\s+logs(\s+for\s+(?P<bundleId>[^\s,]+))?",
        ],
        required: &[],
        optional: &["bundleId", "sessionId"],
        params: &[CRASH_FILTER, SESSION_ID],
        examples: &[
            "listar crash logs",
            "mostrar crash logs",
            "list crash logs",
            "show crash logs for com.example.app",
            "display crash logs",
        ],
    },
    DefinitionSpec {
        name: "show crash log",
        command: CommandType::ShowCrashLog,
        description: "Gets the content of a crash log",
        patterns: &[
            r"(mostrar|ver)\s+crash\s+log\s+(?P<crashName>[^\s,]+)",
            r"(show|display|view)\s+crash\s+log\s+(?P<crashName>[^\s,]+)",
        ],
        required: &["crashName"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("crashName", ParamType::String)
                .extract(extract::trimmed)
                .describe("Name of the crash log as reported by list crash logs."),
            SESSION_ID,
        ],
        examples: &[
            "mostrar crash log crash_2023-01-01",
            "ver crash log app_crash_123",
            "show crash log system_crash",
            "display crash log error_log_123",
            "view crash log app_crash_456",
        ],
    },
    DefinitionSpec {
        name: "delete crash logs",
        command: CommandType::DeleteCrashLogs,
        description: "Deletes crash logs",
        patterns: &[
            r"(eliminar|borrar)\s+(?P<all>todos\s+los\s+)?crash\s+logs(\s+de\s+(?P<bundleId>[^\s,]+))?",
            r"(delete|remove|clear)\s+(?P<all>all\s+)?crash\s+logs(\s+for\s+(?P<bundleId>[^\s,]+))?",
        ],
        required: &[],
        optional: &["bundleId", "sessionId", "all"],
        params: &[
            CRASH_FILTER,
            SESSION_ID,
            ParamSpec::new("all", ParamType::Boolean).extract(extract::flag),
        ],
        examples: &[
            "eliminar crash logs",
            "borrar todos los crash logs",
            "delete crash logs for com.example.app",
            "remove crash logs",
            "clear all crash logs",
        ],
    },
];
