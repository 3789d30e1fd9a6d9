use std::collections::HashMap;
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::command::MenuCommand;
use crate::config::{EncodingPreference, ProtocolConfig};
use crate::error::{ProtocolError, Result};
use crate::field::{FieldRegistry, MessageField};
use crate::platform::CommandProtocol;
use crate::tagval::processors::{decode_builtin, encode_builtin, has_builtin_codec};
use crate::tagval::{TagValTextParser, TagValWriter, END_OF_MSG};

/// Marks the start of every frame.
pub const START_OF_MSG: u8 = 0x01;

/// Builds a command from a parsed TagVal body.
pub type TagValInProcessor = Box<dyn Fn(&TagValTextParser) -> Result<MenuCommand> + Send + Sync>;
/// Writes a command's TagVal body.
pub type TagValOutProcessor =
    Box<dyn Fn(&mut TagValWriter, &MenuCommand) -> Result<()> + Send + Sync>;
/// Builds a command from a raw body, length prefix already removed.
pub type RawInProcessor = Box<dyn Fn(&[u8]) -> Result<MenuCommand> + Send + Sync>;
/// Writes a command's raw body; the converter adds the length prefix.
pub type RawOutProcessor = Box<dyn Fn(&mut BytesMut, &MenuCommand) -> Result<()> + Send + Sync>;

enum Encoder<'a> {
    Raw(&'a RawOutProcessor),
    TagVal(&'a TagValOutProcessor),
    BuiltinTagVal,
}

/// Translates between frames and [`MenuCommand`]s.
///
/// Each converter owns its message type registry and its extension
/// processors, which take precedence over the built-in TagVal codecs.
pub struct ProtocolConverter {
    fields: FieldRegistry,
    tagval_in: HashMap<MessageField, TagValInProcessor>,
    tagval_out: HashMap<MessageField, TagValOutProcessor>,
    raw_in: HashMap<MessageField, RawInProcessor>,
    raw_out: HashMap<MessageField, RawOutProcessor>,
    config: ProtocolConfig,
}

impl ProtocolConverter {
    /// Create a converter with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProtocolConfig::default())
    }

    /// Create a converter with explicit configuration.
    pub fn with_config(config: ProtocolConfig) -> Self {
        Self {
            fields: FieldRegistry::with_builtins(),
            tagval_in: HashMap::new(),
            tagval_out: HashMap::new(),
            raw_in: HashMap::new(),
            raw_out: HashMap::new(),
            config,
        }
    }

    /// Register a custom message type. Fails if it is already known.
    pub fn register_message_field(&mut self, field: MessageField) -> Result<()> {
        self.fields.register(field)?;
        debug!(%field, "registered message field");
        Ok(())
    }

    pub fn add_tagval_in_processor<F>(&mut self, field: MessageField, processor: F)
    where
        F: Fn(&TagValTextParser) -> Result<MenuCommand> + Send + Sync + 'static,
    {
        self.ensure_registered(field);
        self.tagval_in.insert(field, Box::new(processor));
    }

    pub fn add_tagval_out_processor<F>(&mut self, field: MessageField, processor: F)
    where
        F: Fn(&mut TagValWriter, &MenuCommand) -> Result<()> + Send + Sync + 'static,
    {
        self.ensure_registered(field);
        self.tagval_out.insert(field, Box::new(processor));
    }

    pub fn add_raw_in_processor<F>(&mut self, field: MessageField, processor: F)
    where
        F: Fn(&[u8]) -> Result<MenuCommand> + Send + Sync + 'static,
    {
        self.ensure_registered(field);
        self.raw_in.insert(field, Box::new(processor));
    }

    /// The processor writes only the body; the frame's 4-byte length prefix
    /// is added by the converter.
    pub fn add_raw_out_processor<F>(&mut self, field: MessageField, processor: F)
    where
        F: Fn(&mut BytesMut, &MenuCommand) -> Result<()> + Send + Sync + 'static,
    {
        self.ensure_registered(field);
        self.raw_out.insert(field, Box::new(processor));
    }

    fn ensure_registered(&mut self, field: MessageField) {
        if self.fields.register(field).is_ok() {
            debug!(%field, "registered message field for processor");
        }
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Decode one frame whose start marker has already been consumed.
    ///
    /// `src` is advanced past the frame, including the TagVal end marker.
    pub fn from_channel(&self, src: &mut Bytes) -> Result<MenuCommand> {
        if src.remaining() < 3 {
            return Err(ProtocolError::Truncated);
        }
        let protocol = CommandProtocol::from_selector(src.get_u8());
        let high = src.get_u8();
        let low = src.get_u8();
        let field = self.fields.resolve(high, low)?;
        trace!(%field, ?protocol, "decoding frame");

        match protocol {
            CommandProtocol::TagVal => {
                let (parser, consumed) = TagValTextParser::parse(src.chunk())?;
                src.advance(consumed);
                if let Some(processor) = self.tagval_in.get(&field) {
                    processor(&parser)
                } else if self.config.include_default_processors && has_builtin_codec(field) {
                    decode_builtin(field, &parser)
                } else {
                    Err(ProtocolError::NoDecoder {
                        field,
                        protocol: "TagVal",
                    })
                }
            }
            _ => {
                if src.remaining() < 4 {
                    return Err(ProtocolError::Truncated);
                }
                let len = src.get_u32() as usize;
                if len > self.config.max_message_size {
                    return Err(ProtocolError::MessageTooLarge {
                        size: len,
                        max: self.config.max_message_size,
                    });
                }
                if src.remaining() < len {
                    return Err(ProtocolError::Truncated);
                }
                let body = src.split_to(len);
                match self.raw_in.get(&field) {
                    Some(processor) => processor(&body[..]),
                    None => Err(ProtocolError::NoDecoder {
                        field,
                        protocol: "raw",
                    }),
                }
            }
        }
    }

    /// Encode `cmd` as one complete frame appended to `dst`.
    ///
    /// On error nothing is left in `dst` from this call.
    pub fn to_channel(&self, dst: &mut BytesMut, cmd: &MenuCommand) -> Result<()> {
        let start = dst.len();
        let result = self.write_frame(dst, cmd);
        if result.is_err() {
            dst.truncate(start);
            return result;
        }
        let size = dst.len() - start;
        if size > self.config.max_message_size {
            dst.truncate(start);
            return Err(ProtocolError::MessageTooLarge {
                size,
                max: self.config.max_message_size,
            });
        }
        Ok(())
    }

    fn write_frame(&self, dst: &mut BytesMut, cmd: &MenuCommand) -> Result<()> {
        let field = cmd.command_type();
        let encoder = self
            .select_encoder(cmd, field)
            .ok_or(ProtocolError::NoEncoder(field))?;

        dst.put_u8(START_OF_MSG);
        match encoder {
            Encoder::Raw(processor) => {
                dst.put_u8(CommandProtocol::RawBin.protocol_id());
                dst.put_u8(field.high());
                dst.put_u8(field.low());
                let mut body = BytesMut::new();
                processor(&mut body, cmd)?;
                dst.put_u32(body.len() as u32);
                dst.put_slice(&body);
            }
            Encoder::TagVal(processor) => {
                let mut writer = TagValWriter::new();
                processor(&mut writer, cmd)?;
                put_tagval(dst, field, &writer);
            }
            Encoder::BuiltinTagVal => {
                let mut writer = TagValWriter::new();
                encode_builtin(&mut writer, cmd)?;
                put_tagval(dst, field, &writer);
            }
        }
        trace!(%field, "encoded frame");
        Ok(())
    }

    fn select_encoder(&self, cmd: &MenuCommand, field: MessageField) -> Option<Encoder<'_>> {
        let raw = self.raw_out.get(&field).map(Encoder::Raw);
        let tagval = self.tagval_out.get(&field).map(Encoder::TagVal).or_else(|| {
            let builtin = self.config.include_default_processors
                && has_builtin_codec(field)
                && !matches!(cmd, MenuCommand::Custom(_));
            builtin.then_some(Encoder::BuiltinTagVal)
        });
        match self.config.encoding_preference {
            EncodingPreference::RawFirst => raw.or(tagval),
            EncodingPreference::TagValFirst => tagval.or(raw),
        }
    }
}

fn put_tagval(dst: &mut BytesMut, field: MessageField, writer: &TagValWriter) {
    dst.put_u8(CommandProtocol::TagVal.protocol_id());
    dst.put_u8(field.high());
    dst.put_u8(field.low());
    dst.put_slice(writer.as_bytes());
    dst.put_u8(END_OF_MSG);
}

impl Default for ProtocolConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProtocolConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolConverter")
            .field("fields", &self.fields.fields())
            .field("tagval_in", &self.tagval_in.len())
            .field("tagval_out", &self.tagval_out.len())
            .field("raw_in", &self.raw_in.len())
            .field("raw_out", &self.raw_out.len())
            .field("config", &self.config)
            .finish()
    }
}
