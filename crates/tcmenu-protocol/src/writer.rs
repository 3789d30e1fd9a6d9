use std::io::{ErrorKind, Write};
use std::sync::Arc;

use bytes::BytesMut;

use crate::codec::encode_command;
use crate::command::MenuCommand;
use crate::converter::ProtocolConverter;
use crate::error::{ProtocolError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete commands to any `Write` stream.
pub struct CommandWriter<T> {
    inner: T,
    buf: BytesMut,
    converter: Arc<ProtocolConverter>,
}

impl<T: Write> CommandWriter<T> {
    /// Create a writer using a converter with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_converter(inner, Arc::new(ProtocolConverter::new()))
    }

    /// Create a writer sharing an existing converter.
    pub fn with_converter(inner: T, converter: Arc<ProtocolConverter>) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            converter,
        }
    }

    /// Encode and send one command (blocking).
    pub fn send(&mut self, cmd: &MenuCommand) -> Result<()> {
        self.buf.clear();
        encode_command(&self.converter, cmd, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(ProtocolError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(ProtocolError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(ProtocolError::Io(err)),
            }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn converter(&self) -> &ProtocolConverter {
        &self.converter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BootType, MenuBootstrapCommand};

    fn bootstrap() -> MenuCommand {
        MenuBootstrapCommand {
            boot_type: BootType::End,
        }
        .into()
    }

    #[test]
    fn writes_encoded_frame() {
        let mut writer = CommandWriter::new(Vec::new());
        writer.send(&bootstrap()).unwrap();
        assert_eq!(writer.get_ref().as_slice(), b"\x01\x01BSBT=END|\x02");
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        data: Vec<u8>,
        flushes: usize,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn send_flushes_each_command() {
        let mut writer = CommandWriter::new(FlushTrackingWriter::default());
        writer.send(&bootstrap()).unwrap();
        writer.send(&bootstrap()).unwrap();
        assert_eq!(writer.get_ref().flushes, 2);
    }

    struct InterruptedOnce {
        interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedOnce {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn interrupted_write_is_retried() {
        let mut writer = CommandWriter::new(InterruptedOnce {
            interrupted: false,
            data: Vec::new(),
        });
        writer.send(&bootstrap()).unwrap();
        assert_eq!(writer.get_ref().data, b"\x01\x01BSBT=END|\x02");
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn zero_write_is_connection_closed() {
        let mut writer = CommandWriter::new(ZeroWriter);
        assert!(matches!(
            writer.send(&bootstrap()),
            Err(ProtocolError::ConnectionClosed)
        ));
    }
}
