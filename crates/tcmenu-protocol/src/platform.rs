use serde::Serialize;

/// Runtime a remote peer reports in its join message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiPlatform {
    Arduino,
    JavaApi,
    Arduino32,
    DotnetApi,
    JavascriptClient,
    PythonApi,
}

impl ApiPlatform {
    pub fn key(self) -> i32 {
        match self {
            ApiPlatform::Arduino => 0,
            ApiPlatform::JavaApi => 1,
            ApiPlatform::Arduino32 => 2,
            ApiPlatform::DotnetApi => 3,
            ApiPlatform::JavascriptClient => 4,
            ApiPlatform::PythonApi => 5,
        }
    }

    pub fn from_key(key: i32) -> Option<Self> {
        match key {
            0 => Some(ApiPlatform::Arduino),
            1 => Some(ApiPlatform::JavaApi),
            2 => Some(ApiPlatform::Arduino32),
            3 => Some(ApiPlatform::DotnetApi),
            4 => Some(ApiPlatform::JavascriptClient),
            5 => Some(ApiPlatform::PythonApi),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ApiPlatform::Arduino => "Arduino 8-bit",
            ApiPlatform::JavaApi => "Java API",
            ApiPlatform::Arduino32 => "Arduino 32-bit",
            ApiPlatform::DotnetApi => ".NET API",
            ApiPlatform::JavascriptClient => "JavaScript client",
            ApiPlatform::PythonApi => "Python API",
        }
    }
}

/// Body encoding selected by the byte after the start-of-message marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandProtocol {
    Invalid,
    TagVal,
    RawBin,
}

impl CommandProtocol {
    pub fn protocol_id(self) -> u8 {
        match self {
            CommandProtocol::Invalid => 0,
            CommandProtocol::TagVal => 1,
            CommandProtocol::RawBin => 2,
        }
    }

    /// Selector byte to protocol. Anything other than 1 frames a raw body.
    pub fn from_selector(selector: u8) -> Self {
        match selector {
            1 => CommandProtocol::TagVal,
            _ => CommandProtocol::RawBin,
        }
    }
}

/// This library's version as `major * 100 + minor`, as sent in joins.
pub fn module_version_code() -> i32 {
    let major: i32 = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor: i32 = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    major * 100 + minor
}
