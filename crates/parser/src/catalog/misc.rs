use simpilot_protocol::CommandType;

use super::SESSION_ID;
use crate::definition::{DefinitionSpec, ParamSpec, ParamType};
use crate::extract;

const fn path(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec::new(name, ParamType::String)
        .extract(extract::trimmed)
        .describe(description)
}

pub(crate) static DEFINITIONS: &[DefinitionSpec] = &[
    DefinitionSpec {
        name: "install dylib",
        command: CommandType::InstallDylib,
        description: "Installs a dynamic library in the simulator",
        patterns: &[
            r"\binstalar\s+(la\s+)?(librería\s+)?dylib\s+(?P<dylibPath>[^\s,]+)",
            r"\binstall\s+(the\s+)?dylib\s+(?P<dylibPath>[^\s,]+)",
            r"inject\s+(the\s+)?dylib\s+(?P<dylibPath>[^\s,]+)",
        ],
        required: &["dylibPath"],
        optional: &["sessionId"],
        params: &[path("dylibPath", "Path to the .dylib on the host."), SESSION_ID],
        examples: &[
            "instalar dylib /ruta/libtest.dylib",
            "install dylib /path/to/libinject.dylib",
            "inject dylib /tmp/libhook.dylib",
        ],
    },
    DefinitionSpec {
        name: "open url",
        command: CommandType::OpenUrl,
        description: "Opens a URL in the simulator",
        patterns: &[
            r"abrir\s+(la\s+)?(url|enlace)\s+(?P<url>\S+)",
            r"open\s+(the\s+)?(url|link)\s+(?P<url>\S+)",
            r"(navigate|go)\s+to\s+(?P<url>[a-z][a-z0-9+.-]*://\S+)",
        ],
        required: &["url"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("url", ParamType::String).extract(extract::trimmed),
            SESSION_ID,
        ],
        examples: &[
            "abrir url https://example.com",
            "open url https://www.apple.com",
            "open link myapp://settings",
            "navigate to https://example.com/login",
        ],
    },
    DefinitionSpec {
        name: "clear keychain",
        command: CommandType::ClearKeychain,
        description: "Clears the simulator keychain",
        patterns: &[
            r"(borrar|limpiar)\s+(el\s+)?(llavero|keychain)",
            r"(clear|reset)\s+(the\s+)?keychain",
        ],
        required: &[],
        optional: &["sessionId"],
        params: &[SESSION_ID],
        examples: &["limpiar keychain", "borrar el llavero", "clear keychain", "reset the keychain"],
    },
    DefinitionSpec {
        name: "set location",
        command: CommandType::SetLocation,
        description: "Sets the simulated GPS location",
        patterns: &[
            r"(establecer|fijar|simular)\s+(la\s+)?ubicación\s+(en\s+)?(?P<latitude>-?\d+(\.\d+)?)\s*,\s*(?P<longitude>-?\d+(\.\d+)?)",
            r"(set|simulate)\s+(the\s+)?location\s+(to\s+)?(?P<latitude>-?\d+(\.\d+)?)\s*,\s*(?P<longitude>-?\d+(\.\d+)?)",
        ],
        required: &["latitude", "longitude"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("latitude", ParamType::Number).extract(extract::decimal),
            ParamSpec::new("longitude", ParamType::Number).extract(extract::decimal),
            SESSION_ID,
        ],
        examples: &[
            "establecer ubicación 40.4168, -3.7038",
            "fijar la ubicación en 41.3874, 2.1686",
            "set location 37.7749, -122.4194",
            "set location to 51.5074, -0.1278",
        ],
    },
    DefinitionSpec {
        name: "add media",
        command: CommandType::AddMedia,
        description: "Adds photos or videos to the simulator camera roll",
        patterns: &[
            r"(añadir|agregar)\s+(archivos\s+)?(multimedia|media|fotos|videos)\s+(?P<mediaPaths>.+)",
            r"add\s+(media|photos?|videos?)\s+(?P<mediaPaths>.+)",
        ],
        required: &["mediaPaths"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("mediaPaths", ParamType::StringArray)
                .extract(extract::string_list)
                .describe("Host paths of the media files to import."),
            SESSION_ID,
        ],
        examples: &[
            "añadir multimedia /ruta/foto.jpg /ruta/video.mp4",
            "agregar fotos /ruta/a.png, /ruta/b.png",
            "add media /path/photo.jpg /path/clip.mov",
            "add photos /path/a.png and /path/b.png",
        ],
    },
    DefinitionSpec {
        name: "approve permissions",
        command: CommandType::ApprovePermissions,
        description: "Grants privacy permissions to an application",
        patterns: &[
            r"(aprobar|conceder)\s+(los\s+)?permisos\s+(de\s+)?(?P<permissions>[a-z_,\s]+?)\s+(para|a)\s+(?P<bundleId>[^\s,]+)",
            r"(approve|grant)\s+(?P<permissions>[a-z_,\s]+?)\s+permissions?\s+(to|for)\s+(?P<bundleId>[^\s,]+)",
            r"(approve|grant)\s+permissions?\s+(?P<permissions>[a-z_,\s]+?)\s+(to|for)\s+(?P<bundleId>[^\s,]+)",
        ],
        required: &["bundleId", "permissions"],
        optional: &["sessionId"],
        params: &[
            ParamSpec::new("bundleId", ParamType::String).extract(extract::trimmed),
            ParamSpec::new("permissions", ParamType::StringArray)
                .extract(extract::lowercase_list)
                .describe("Permission services: photos, camera, contacts, url, location, notification, microphone."),
            SESSION_ID,
        ],
        examples: &[
            "conceder permisos camera, photos para com.example.app",
            "grant photos and camera permissions to com.example.app",
            "approve permissions location for com.apple.Maps",
        ],
    },
    DefinitionSpec {
        name: "update contacts",
        command: CommandType::UpdateContacts,
        description: "Replaces the simulator contacts database",
        patterns: &[
            r"(actualizar|importar)\s+(los\s+)?contactos\s+(desde\s+)?(?P<dbPath>[^\s,]+)",
            r"(update|import)\s+(the\s+)?contacts\s+(from\s+)?(?P<dbPath>[^\s,]+)",
        ],
        required: &["dbPath"],
        optional: &["sessionId"],
        params: &[path("dbPath", "Path to a contacts sqlite database on the host."), SESSION_ID],
        examples: &[
            "actualizar contactos /ruta/contactos.sqlite",
            "update contacts /path/to/contacts.sqlite",
            "import contacts from /tmp/AddressBook.sqlitedb",
        ],
    },
];
