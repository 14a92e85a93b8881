use simpilot_protocol::CommandType;

use super::SESSION_ID;
use crate::definition::{DefinitionSpec, ParamSpec, ParamType};
use crate::extract;

const UDID: ParamSpec = ParamSpec::new("udid", ParamType::String)
    .extract(extract::uppercase)
    .describe("Simulator device UDID.");

pub(crate) static DEFINITIONS: &[DefinitionSpec] = &[
    DefinitionSpec {
        name: "create simulator session",
        command: CommandType::CreateSimulatorSession,
        description: "Creates a new simulator session",
        patterns: &[
            r"crear\s+(una\s+)?(nueva\s+)?sesión(\s+de\s+simulador)?(\s+(con|para)\s+(?P<deviceName>[^,]+?))?(\s+ios\s+(?P<platformVersion>\d+(\.\d+)*))?\s*$",
            r"create\s+(a\s+)?(new\s+)?(simulator\s+)?session(\s+(with|for|on)\s+(?P<deviceName>[^,]+?))?(\s+ios\s+(?P<platformVersion>\d+(\.\d+)*))?\s*$",
            r"(start|open)\s+(a\s+)?(new\s+)?simulator\s+session",
        ],
        required: &[],
        optional: &["deviceName", "platformVersion", "autoboot"],
        params: &[
            ParamSpec::new("deviceName", ParamType::String)
                .extract(extract::trimmed)
                .describe("Device model to simulate, e.g. iPhone 15 Pro."),
            ParamSpec::new("platformVersion", ParamType::String)
                .extract(extract::trimmed)
                .describe("iOS runtime version, e.g. 17.2."),
            ParamSpec::new("autoboot", ParamType::Boolean)
                .describe("Boot the simulator as part of session creation."),
        ],
        examples: &[
            "crear sesión",
            "crear una nueva sesión con iPhone 15",
            "create session",
            "create simulator session with iPhone 15 Pro",
            "create a new session for iPad Air ios 17.2",
        ],
    },
    DefinitionSpec {
        name: "terminate simulator session",
        command: CommandType::TerminateSimulatorSession,
        description: "Terminates the current simulator session",
        patterns: &[
            r"(terminar|cerrar|finalizar)\s+(la\s+)?sesión",
            r"(terminate|end|close)\s+(the\s+)?(simulator\s+)?session",
        ],
        required: &[],
        optional: &["sessionId"],
        params: &[SESSION_ID],
        examples: &[
            "terminar sesión",
            "cerrar la sesión",
            "terminate session",
            "end simulator session",
        ],
    },
    DefinitionSpec {
        name: "list available simulators",
        command: CommandType::ListAvailableSimulators,
        description: "Lists the simulators available on this host",
        patterns: &[
            r"listar\s+(los\s+)?simuladores(\s+disponibles)?\s*$",
            r"mostrar\s+(los\s+)?simuladores(\s+disponibles)?\s*$",
            r"(list|show)\s+(the\s+)?(available\s+)?simulators\s*$",
        ],
        required: &[],
        optional: &[],
        params: &[],
        examples: &[
            "listar simuladores",
            "mostrar simuladores disponibles",
            "list simulators",
            "list available simulators",
        ],
    },
    DefinitionSpec {
        name: "list booted simulators",
        command: CommandType::ListBootedSimulators,
        description: "Lists the simulators that are currently booted",
        patterns: &[
            r"(listar|mostrar)\s+(los\s+)?simuladores\s+(arrancados|iniciados)",
            r"(list|show)\s+(the\s+)?(booted|running)\s+simulators",
        ],
        required: &[],
        optional: &[],
        params: &[],
        examples: &[
            "listar simuladores arrancados",
            "list booted simulators",
            "show running simulators",
        ],
    },
    DefinitionSpec {
        name: "boot simulator",
        command: CommandType::BootSimulator,
        description: "Boots a simulator by UDID",
        patterns: &[
            r"(arrancar|iniciar)\s+(el\s+)?simulador\s+(?P<udid>[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12})",
            r"(boot|start)\s+(the\s+)?simulator\s+(?P<udid>[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12})",
        ],
        required: &["udid"],
        optional: &[],
        params: &[UDID],
        examples: &[
            "arrancar simulador 5A1B2C3D-1111-2222-3333-444455556666",
            "boot simulator 5A1B2C3D-1111-2222-3333-444455556666",
        ],
    },
    DefinitionSpec {
        name: "shutdown simulator",
        command: CommandType::ShutdownSimulator,
        description: "Shuts down a simulator by UDID, or the session simulator",
        patterns: &[
            r"(apagar|detener)\s+(el\s+)?simulador(\s+(?P<udid>[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}))?",
            r"(shutdown|shut\s+down|stop)\s+(the\s+)?simulator(\s+(?P<udid>[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}))?",
        ],
        required: &[],
        optional: &["udid", "sessionId"],
        params: &[UDID, SESSION_ID],
        examples: &[
            "apagar simulador",
            "shutdown simulator",
            "shut down simulator 5A1B2C3D-1111-2222-3333-444455556666",
        ],
    },
    DefinitionSpec {
        name: "focus simulator",
        command: CommandType::FocusSimulator,
        description: "Brings the simulator window to the foreground",
        patterns: &[
            r"(enfocar|mostrar)\s+(la\s+ventana\s+del\s+|el\s+)?simulador\s*$",
            r"(focus|bring\s+up)\s+(the\s+)?simulator(\s+window)?",
        ],
        required: &[],
        optional: &["sessionId"],
        params: &[SESSION_ID],
        examples: &["enfocar simulador", "focus simulator", "bring up the simulator window"],
    },
    DefinitionSpec {
        name: "is simulator booted",
        command: CommandType::IsSimulatorBooted,
        description: "Checks whether the session simulator is booted",
        patterns: &[
            r"(está|esta)\s+(el\s+)?simulador\s+(arrancado|iniciado)",
            r"is\s+(the\s+)?simulator\s+(booted|running)",
        ],
        required: &[],
        optional: &["sessionId"],
        params: &[SESSION_ID],
        examples: &["está el simulador arrancado", "is simulator booted", "is the simulator running"],
    },
];
