use simpilot_protocol::CommandType;

use super::SESSION_ID;
use crate::definition::{DefinitionSpec, ParamSpec, ParamType};
use crate::extract;

const DEVICE_BUTTONS: &[&str] = &["APPLE_PAY", "HOME", "LOCK", "SIDE_BUTTON", "SIRI"];
const COORDINATE_UNITS: &[&str] = &["points", "pixels"];

const fn coordinate(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, ParamType::Number).extract(extract::integer)
}

const UNITS: ParamSpec = ParamSpec::new("coordinateUnits", ParamType::Choice(COORDINATE_UNITS))
    .describe("Units of the supplied coordinates, \"points\" or \"pixels\". Defaults to points.");

const DURATION: ParamSpec = ParamSpec::new("duration", ParamType::Number)
    .extract(extract::optional_integer)
    .describe("Duration in milliseconds.");

pub(crate) static DEFINITIONS: &[DefinitionSpec] = &[
    DefinitionSpec {
        name: "tap",
        command: CommandType::Tap,
        description: "Performs a tap at the specified coordinates",
        patterns: &[
            r"tap(\s+(at|en))?\s+(?P<x>\d+)\s*,\s*(?P<y>\d+)",
            r"tocar(\s+en)?\s+(?P<x>\d+)\s*,\s*(?P<y>\d+)",
            r"pulsar(\s+en)?\s+(?P<x>\d+)\s*,\s*(?P<y>\d+)",
        ],
        required: &["x", "y"],
        optional: &["sessionId", "duration", "coordinateUnits"],
        params: &[coordinate("x"), coordinate("y"), SESSION_ID, DURATION, UNITS],
        examples: &[
            "tap en 100, 200",
            "tocar 150, 300",
            "pulsar en 200, 400",
            "tap at 100, 200",
            "tap 150, 300",
        ],
    },
    DefinitionSpec {
        name: "swipe",
        command: CommandType::Swipe,
        description: "Performs a swipe from one point to another",
        patterns: &[
            r"swipe\s+from\s+(?P<startX>\d+)\s*,\s*(?P<startY>\d+)\s+to\s+(?P<endX>\d+)\s*,\s*(?P<endY>\d+)(\s+with\s+duration\s+(?P<duration>\d+))?",
            r"(deslizar|swipe)\s+desde\s+(?P<startX>\d+)\s*,\s*(?P<startY>\d+)\s+hasta\s+(?P<endX>\d+)\s*,\s*(?P<endY>\d+)(\s+con\s+duración\s+(?P<duration>\d+))?",
        ],
        required: &["startX", "startY", "endX", "endY"],
        optional: &["duration", "sessionId", "coordinateUnits"],
        params: &[
            coordinate("startX"),
            coordinate("startY"),
            coordinate("endX"),
            coordinate("endY"),
            DURATION,
            SESSION_ID,
            UNITS,
        ],
        examples: &[
            "swipe desde 100, 200 hasta 300, 400",
            "deslizar desde 150, 300 hasta 150, 100 con duración 500",
            "swipe from 100, 200 to 300, 400",
            "swipe from 150, 300 to 150, 100 with duration 500",
        ],
    },
    DefinitionSpec {
        name: "press device button",
        command: CommandType::PressDeviceButton,
        description: "Presses a hardware device button",
        patterns: &[
            r"(presionar|pulsar)\s+(el\s+)?botón\s+del\s+dispositivo\s+(?P<button>APPLE_PAY|HOME|LOCK|SIDE_BUTTON|SIRI)",
            r"presionar\s+(el\s+)?botón\s+físico\s+(?P<button>APPLE_PAY|HOME|LOCK|SIDE_BUTTON|SIRI)",
            r"(press|push|tap)\s+(the\s+)?device\s+button\s+(?P<button>APPLE_PAY|HOME|LOCK|SIDE_BUTTON|SIRI)",
        ],
        required: &["button"],
        optional: &["duration", "sessionId"],
        params: &[
            ParamSpec::new("button", ParamType::Choice(DEVICE_BUTTONS)).extract(extract::uppercase),
            DURATION,
            SESSION_ID,
        ],
        examples: &[
            "presionar botón del dispositivo HOME",
            "pulsar botón del dispositivo SIRI",
            "presionar botón físico HOME",
            "press device button HOME",
            "push device button SIRI",
            "tap device button LOCK",
        ],
    },
    DefinitionSpec {
        name: "input text",
        command: CommandType::InputText,
        description: "Inputs text in the simulator",
        patterns: &[
            r"(introducir|escribir)\s+texto\s+(?P<text>.+)",
            r"(input|type|enter)\s+text\s+(?P<text>.+)",
        ],
        required: &["text"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("text", ParamType::String).extract(extract::trimmed),
            SESSION_ID,
        ],
        examples: &[
            "introducir texto Hola mundo",
            "escribir texto Prueba de texto",
            "input text Hello world",
            "type text Test message",
            "enter text Hello",
        ],
    },
    // Sequence patterns come first: "press key sequence 4 5" must not read as key 4.
    DefinitionSpec {
        name: "press key sequence",
        command: CommandType::PressKeySequence,
        description: "Presses a sequence of keys",
        patterns: &[
            r"(presionar|pulsar)\s+secuencia\s+de\s+teclas\s+(?P<keyCodes>[\d\s,]+)",
            r"(press|type|enter)\s+key\s+sequence\s+(?P<keyCodes>[\d\s,]+)",
        ],
        required: &["keyCodes"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("keyCodes", ParamType::NumberArray).extract(extract::integer_list),
            SESSION_ID,
        ],
        examples: &[
            "presionar secuencia de teclas 4 5 6",
            "pulsar secuencia de teclas 65 66 67",
            "press key sequence 4 5 6",
            "type key sequence 65 66 67",
            "enter key sequence 13 14 15",
        ],
    },
    DefinitionSpec {
        name: "press key",
        command: CommandType::PressKey,
        description: "Presses a specific key by its code",
        patterns: &[
            r"(presionar|pulsar)\s+(la\s+)?tecla\s+(?P<keyCode>\d+)",
            r"(press|hit|type)\s+key\s+(?P<keyCode>\d+)",
        ],
        required: &["keyCode"],
        optional: &["duration", "sessionId"],
        params: &[
            ParamSpec::new("keyCode", ParamType::Number)
                .extract(extract::integer)
                .describe("HID keyboard usage code."),
            DURATION,
            SESSION_ID,
        ],
        examples: &[
            "presionar tecla 4",
            "pulsar la tecla 65",
            "press key 4",
            "hit key 65",
            "type key 13",
        ],
    },
];
