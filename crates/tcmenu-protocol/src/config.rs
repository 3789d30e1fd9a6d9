use std::time::Duration;

/// Default maximum frame size: 64 KiB.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Which encoder wins when a message type has both a raw and a TagVal
/// out-processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPreference {
    #[default]
    RawFirst,
    TagValFirst,
}

/// Configuration for the protocol converter and the stream codec.
#[derive(Debug, Clone)]
pub struct ProtocolConfig {
    /// Maximum size of one frame in bytes. Default: 64 KiB.
    pub max_message_size: usize,
    /// Register the standard TagVal codecs. Default: true.
    pub include_default_processors: bool,
    pub encoding_preference: EncodingPreference,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            include_default_processors: true,
            encoding_preference: EncodingPreference::default(),
        }
    }
}

/// Socket timeouts applied by blocking connectors. `None` blocks forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderConfig {
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl ReaderConfig {
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }
}
