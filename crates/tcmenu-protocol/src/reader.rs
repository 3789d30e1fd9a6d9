use std::io::{ErrorKind, Read};
use std::sync::Arc;

use bytes::BytesMut;

use crate::codec::decode_command;
use crate::command::MenuCommand;
use crate::converter::ProtocolConverter;
use crate::error::{ProtocolError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete commands from any `Read` stream.
///
/// Handles partial reads internally; callers always get whole commands.
pub struct CommandReader<T> {
    inner: T,
    buf: BytesMut,
    converter: Arc<ProtocolConverter>,
}

impl<T: Read> CommandReader<T> {
    /// Create a reader using a converter with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_converter(inner, Arc::new(ProtocolConverter::new()))
    }

    /// Create a reader sharing an existing converter.
    pub fn with_converter(inner: T, converter: Arc<ProtocolConverter>) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            converter,
        }
    }

    /// Read the next complete command (blocking).
    ///
    /// Returns `Err(ProtocolError::ConnectionClosed)` when EOF is reached.
    pub fn read_command(&mut self) -> Result<MenuCommand> {
        loop {
            if let Some(cmd) = decode_command(&mut self.buf, &self.converter)? {
                return Ok(cmd);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ProtocolError::Io(err)),
            };

            if read == 0 {
                return Err(ProtocolError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn converter(&self) -> &ProtocolConverter {
        &self.converter
    }
}
