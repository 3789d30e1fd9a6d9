use serde::Serialize;
use uuid::Uuid;

use crate::correlation::CorrelationId;
use crate::platform::ApiPlatform;

/// Serial number sent when the client has none of its own.
pub const DEFAULT_SERIAL_NUMBER: i64 = 999_999_999;

/// Default heartbeat interval in milliseconds.
pub const DEFAULT_HEARTBEAT_INTERVAL: i32 = 10_000;

/// First message either side sends after connecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuJoinCommand {
    pub my_name: String,
    pub api_version: i32,
    pub platform: ApiPlatform,
    pub app_uuid: Uuid,
    pub serial_number: i64,
}

/// Request to pair with a device that requires authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuPairingCommand {
    pub name: String,
    pub uuid: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeartbeatMode {
    #[default]
    Normal,
    Start,
    End,
}

impl HeartbeatMode {
    pub fn id(self) -> i32 {
        match self {
            HeartbeatMode::Normal => 0,
            HeartbeatMode::Start => 1,
            HeartbeatMode::End => 2,
        }
    }

    /// Unknown ids read as [`HeartbeatMode::Normal`].
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => HeartbeatMode::Start,
            2 => HeartbeatMode::End,
            _ => HeartbeatMode::Normal,
        }
    }
}

/// Keep-alive carrying the sender's interval; `End` announces a disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuHeartbeatCommand {
    pub heartbeat_interval: i32,
    pub mode: HeartbeatMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BootType {
    Start,
    End,
}

impl BootType {
    pub fn as_str(self) -> &'static str {
        match self {
            BootType::Start => "START",
            BootType::End => "END",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "START" => Some(BootType::Start),
            "END" => Some(BootType::End),
            _ => None,
        }
    }
}

/// Brackets the stream of boot items sent after a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuBootstrapCommand {
    pub boot_type: BootType,
}

/// Outcome reported in an acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AckStatus {
    Warning,
    Success,
    IdNotFound,
    InvalidCredentials,
    UnknownError,
}

impl AckStatus {
    pub fn status_code(self) -> i32 {
        match self {
            AckStatus::Warning => -1,
            AckStatus::Success => 0,
            AckStatus::IdNotFound => 1,
            AckStatus::InvalidCredentials => 2,
            AckStatus::UnknownError => 10000,
        }
    }

    /// Unknown codes read as [`AckStatus::UnknownError`].
    pub fn from_status_code(code: i32) -> Self {
        match code {
            -1 => AckStatus::Warning,
            0 => AckStatus::Success,
            1 => AckStatus::IdNotFound,
            2 => AckStatus::InvalidCredentials,
            _ => AckStatus::UnknownError,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AckStatus::Warning => "Warning",
            AckStatus::Success => "Success",
            AckStatus::IdNotFound => "ID not found",
            AckStatus::InvalidCredentials => "Invalid credentials",
            AckStatus::UnknownError => "Unknown error",
        }
    }

    pub fn is_error(self) -> bool {
        self.status_code() > 0
    }
}

/// Reply to a change, matched to it by correlation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuAcknowledgementCommand {
    pub correlation_id: CorrelationId,
    pub ack_status: AckStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_status_codes() {
        for status in [
            AckStatus::Warning,
            AckStatus::Success,
            AckStatus::IdNotFound,
            AckStatus::InvalidCredentials,
            AckStatus::UnknownError,
        ] {
            assert_eq!(AckStatus::from_status_code(status.status_code()), status);
        }
        assert_eq!(AckStatus::from_status_code(42), AckStatus::UnknownError);
    }

    #[test]
    fn only_positive_codes_are_errors() {
        assert!(!AckStatus::Warning.is_error());
        assert!(!AckStatus::Success.is_error());
        assert!(AckStatus::IdNotFound.is_error());
        assert!(AckStatus::UnknownError.is_error());
    }

    #[test]
    fn boot_type_text() {
        assert_eq!(BootType::parse("START"), Some(BootType::Start));
        assert_eq!(BootType::End.as_str(), "END");
        assert_eq!(BootType::parse("start"), None);
    }

    #[test]
    fn heartbeat_mode_falls_back_to_normal() {
        assert_eq!(HeartbeatMode::from_id(2), HeartbeatMode::End);
        assert_eq!(HeartbeatMode::from_id(7), HeartbeatMode::Normal);
    }
}
