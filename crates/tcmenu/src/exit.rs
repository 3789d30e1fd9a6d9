use std::fmt;
use std::io;

use tcmenu_persist::PersistError;
use tcmenu_protocol::ProtocolError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const USAGE: i32 = 40;
pub const DATA_INVALID: i32 = 60;
pub const UNKNOWN_MESSAGE: i32 = 61;
pub const IO_ERROR: i32 = 62;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(IO_ERROR, format!("{context}: {err}"))
}

pub fn protocol_error(context: &str, err: ProtocolError) -> CliError {
    match err {
        ProtocolError::Io(source) => io_error(context, source),
        ProtocolError::UnknownMessageType { .. } | ProtocolError::NoDecoder { .. } => {
            CliError::new(UNKNOWN_MESSAGE, format!("{context}: {err}"))
        }
        ProtocolError::ConnectionClosed
        | ProtocolError::NoEncoder(_)
        | ProtocolError::DuplicateField(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn persist_error(context: &str, err: PersistError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_errors_map_to_exit_codes() {
        let unknown = ProtocolError::UnknownMessageType {
            high: 'Z',
            low: 'Z',
        };
        assert_eq!(protocol_error("decode", unknown).code, UNKNOWN_MESSAGE);
        assert_eq!(protocol_error("decode", ProtocolError::Truncated).code, DATA_INVALID);
        assert_eq!(
            protocol_error("read", ProtocolError::Io(io::Error::from(io::ErrorKind::BrokenPipe)))
                .code,
            IO_ERROR
        );
        assert_eq!(protocol_error("read", ProtocolError::ConnectionClosed).code, FAILURE);
    }
}
