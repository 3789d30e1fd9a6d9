use crate::field::MessageField;

/// Errors that can occur while encoding, decoding or transporting commands.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame names a message type that is not registered.
    #[error("unknown message type {high}{low}")]
    UnknownMessageType { high: char, low: char },

    /// A message field was registered twice.
    #[error("message field {0} is already registered")]
    DuplicateField(MessageField),

    /// A mandatory TagVal key is absent.
    #[error("mandatory field {0} is missing")]
    MissingField(String),

    /// A TagVal key was empty.
    #[error("empty key in TagVal body")]
    EmptyKey,

    /// A field is present but its value cannot be used.
    #[error("field {key} has invalid value {value:?}")]
    InvalidField { key: String, value: String },

    /// A choice list exceeds the `A..Z` key range.
    #[error("too many choices ({0}, max 26)")]
    TooManyChoices(usize),

    /// No decoder is registered for the message and body encoding.
    #[error("no {protocol} decoder registered for {field}")]
    NoDecoder {
        field: MessageField,
        protocol: &'static str,
    },

    /// No encoder is registered for the command's message type.
    #[error("no encoder registered for {0}")]
    NoEncoder(MessageField),

    /// An out-processor was given a command it does not handle.
    #[error("processor for {field} cannot encode {actual} command")]
    UnexpectedCommand {
        field: MessageField,
        actual: MessageField,
    },

    /// The frame ended before its body was complete.
    #[error("frame truncated")]
    Truncated,

    /// The frame exceeds the configured maximum size.
    #[error("message too large ({size} bytes, max {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// A TagVal token is not valid UTF-8.
    #[error("TagVal body is not valid UTF-8")]
    InvalidUtf8,

    /// An I/O error occurred while reading or writing commands.
    #[error("protocol I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
