use simpilot_protocol::CommandType;

use super::SESSION_ID;
use crate::definition::{DefinitionSpec, ParamSpec, ParamType};
use crate::extract;

pub(crate) static DEFINITIONS: &[DefinitionSpec] = &[
    DefinitionSpec {
        name: "describe elements",
        command: CommandType::DescribeElements,
        description: "Describes all accessibility elements on the screen",
        patterns: &[
            r"describir\s+(todos\s+los\s+)?elementos",
            r"describe\s+(all\s+)?(the\s+)?(screen\s+)?elements",
            r"mostrar\s+elementos\s+de\s+accesibilidad",
            r"show\s+accessibility\s+elements",
        ],
        required: &[],
        optional: &["sessionId"],
        params: &[SESSION_ID],
        examples: &[
            "describir todos los elementos",
            "describe all elements",
            "mostrar elementos de accesibilidad",
            "show accessibility elements",
        ],
    },
    DefinitionSpec {
        name: "describe point",
        command: CommandType::DescribePoint,
        description: "Describes the accessibility element at a specific point",
        patterns: &[
            r"describir\s+(el\s+)?punto\s+(?P<x>\d+)\s*,\s*(?P<y>\d+)",
            r"describe\s+(the\s+)?point\s+(?P<x>\d+)\s*,\s*(?P<y>\d+)",
            r"qué\s+hay\s+en\s+(?P<x>\d+)\s*,\s*(?P<y>\d+)",
            r"what\s+is\s+at\s+(?P<x>\d+)\s*,\s*(?P<y>\d+)",
        ],
        required: &["x", "y"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("x", ParamType::Number).extract(extract::integer),
            ParamSpec::new("y", ParamType::Number).extract(extract::integer),
            SESSION_ID,
        ],
        examples: &[
            "describir punto 100, 200",
            "describe point 150, 300",
            "qué hay en 200, 400",
            "what is at 20, 40",
        ],
    },
];
