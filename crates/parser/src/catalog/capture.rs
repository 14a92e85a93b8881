use simpilot_protocol::CommandType;

use super::SESSION_ID;
use crate::definition::{DefinitionSpec, ParamSpec, ParamType};
use crate::extract;

const OUTPUT_PATH: ParamSpec = ParamSpec::new("outputPath", ParamType::String)
    .extract(extract::trimmed)
    .describe("Destination file path on the host.");

const LOG_TIMEOUT: ParamSpec = ParamSpec::new("timeout", ParamType::TimeString);

// "get app logs" precedes "get system logs": the system patterns accept an optional
// trailing bundle id and would otherwise swallow "logs de la app ...".
pub(crate) static DEFINITIONS: &[DefinitionSpec] = &[
    DefinitionSpec {
        name: "capture screen",
        command: CommandType::TakeScreenshot,
        description: "Captures a screenshot of the simulator",
        patterns: &[
            r"capturar\s+(la\s+)?pantalla(\s+en\s+(?P<outputPath>[^\s,]+))?",
            r"tomar\s+(una\s+)?captura(\s+en\s+(?P<outputPath>[^\s,]+))?",
            r"capture\s+(the\s+)?screen(\s+to\s+(?P<outputPath>[^\s,]+))?",
            r"take\s+(a\s+)?screenshot(\s+to\s+(?P<outputPath>[^\s,]+))?",
            r"screenshot(\s+(en|to)\s+(?P<outputPath>[^\s,]+))?",
        ],
        required: &[],
        optional: &["outputPath", "sessionId"],
        params: &[OUTPUT_PATH, SESSION_ID],
        examples: &[
            "capturar pantalla",
            "screenshot en /ruta/captura.png",
            "tomar una captura",
            "capture screen",
            "take screenshot to /path/capture.png",
        ],
    },
    DefinitionSpec {
        name: "record video",
        command: CommandType::RecordVideo,
        description: "Starts video recording of the simulator",
        patterns: &[
            r"grabar\s+video\s+(?P<outputPath>[^\s,]+)",
            r"iniciar\s+grabación\s+de\s+video\s+(?P<outputPath>[^\s,]+)",
            r"record\s+video\s+(?P<outputPath>[^\s,]+)",
            r"start\s+recording\s+video\s+(?P<outputPath>[^\s,]+)",
            r"begin\s+video\s+recording\s+(?P<outputPath>[^\s,]+)",
        ],
        required: &["outputPath"],
        optional: &["sessionId"],
        params: &[OUTPUT_PATH, SESSION_ID],
        examples: &[
            "grabar video /ruta/video.mp4",
            "iniciar grabación de video /ruta/salida.mp4",
            "record video /path/video.mp4",
            "start recording video /path/output.mp4",
        ],
    },
    DefinitionSpec {
        name: "stop recording",
        command: CommandType::StopRecording,
        description: "Stops video recording of the simulator",
        patterns: &[
            r"detener\s+(la\s+)?grabación(\s+de\s+video)?",
            r"parar\s+(la\s+)?grabación(\s+de\s+video)?",
            r"stop\s+(video\s+)?recording",
            r"end\s+(video\s+)?recording",
        ],
        required: &[],
        optional: &["recordingId", "sessionId"],
        params: &[ParamSpec::new("recordingId", ParamType::String), SESSION_ID],
        examples: &[
            "detener grabación",
            "parar grabación de video",
            "stop recording",
            "end recording",
            "stop video recording",
        ],
    },
    DefinitionSpec {
        name: "get app logs",
        command: CommandType::GetAppLogs,
        description: "Gets logs from a specific application",
        patterns: &[
            r"(obtener|mostrar)\s+(los\s+)?logs\s+de\s+la\s+(app|aplicación)\s+(?P<bundleId>[^\s,]+)",
            r"(get|show|display)\s+(the\s+)?app\s+logs\s+(for|of)\s+(?P<bundleId>[^\s,]+)",
            r"(get|show|display)\s+(the\s+)?logs\s+(for|of)\s+(the\s+)?app\s+(?P<bundleId>[^\s,]+)",
        ],
        required: &["bundleId"],
        optional: &["timeout", "sessionId"],
        params: &[
            ParamSpec::new("bundleId", ParamType::String).extract(extract::trimmed),
            LOG_TIMEOUT,
            SESSION_ID,
        ],
        examples: &[
            "obtener logs de la app com.example.app",
            "mostrar logs de la aplicación com.apple.mobilesafari",
            "get app logs for com.example.app",
            "show logs for app com.apple.mobilesafari",
        ],
    },
    DefinitionSpec {
        name: "get system logs",
        command: CommandType::GetSystemLogs,
        description: "Gets system logs",
        patterns: &[
            r"obtener\s+(los\s+)?logs(\s+de\s+(?P<bundleId>[^\s,]+))?",
            r"mostrar\s+(los\s+)?logs(\s+de\s+(?P<bundleId>[^\s,]+))?",
            r"get\s+(the\s+)?(system\s+)?logs(\s+for\s+(?P<bundleId>[^\s,]+))?",
            r"show\s+(the\s+)?(system\s+)?logs(\s+for\s+(?P<bundleId>[^\s,]+))?",
            r"display\s+(the\s+)?(system\s+)?logs(\s+for\s+(?P<bundleId>[^\s,]+))?",
        ],
        required: &[],
        optional: &["bundleId", "timeout", "sessionId"],
        params: &[
            ParamSpec::new("bundleId", ParamType::String)
                .extract(extract::trimmed)
                .describe("Only keep log lines emitted by this bundle identifier."),
            LOG_TIMEOUT,
            SESSION_ID,
        ],
        examples: &[
            "obtener logs",
            "mostrar logs de com.example.app",
            "get logs for com.apple.mobilesafari",
            "show system logs",
            "display logs for com.example.app",
        ],
    },
];
