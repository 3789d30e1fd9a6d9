//! Framed wire protocol for tcMenu remote control.
//!
//! Every message is framed as:
//! - A `0x01` start marker for stream synchronization
//! - A selector byte: 1 for a TagVal text body, anything else for raw binary
//! - A 2-byte message type such as `HB` or `VC`
//! - The body; TagVal ends with `0x02`, raw carries a 4-byte big-endian length
//!
//! [`ProtocolConverter`] maps frames to [`MenuCommand`]s and back, and
//! [`apply_command_to_tree`] replays received commands onto a
//! [`tcmenu_domain::MenuTree`].
//!
//! Blocking streams use [`CommandReader`] and [`CommandWriter`]; with the
//! `async` feature, `MenuCommandCodec` plugs into `tokio_util::codec::Framed`.

pub mod apply;
pub mod codec;
pub mod command;
pub mod config;
pub mod converter;
pub mod correlation;
pub mod error;
pub mod factory;
pub mod field;
#[cfg(feature = "async")]
pub mod framed;
pub mod platform;
pub mod reader;
pub mod tagval;
pub mod writer;

pub use apply::{apply_command_to_tree, ApplyOutcome};
pub use codec::{decode_command, encode_command, HEADER_SIZE};
pub use command::{boot_command_for_item, CustomMenuCommand, MenuCommand};
pub use config::{EncodingPreference, ProtocolConfig, ReaderConfig, DEFAULT_MAX_MESSAGE_SIZE};
pub use converter::{
    ProtocolConverter, RawInProcessor, RawOutProcessor, TagValInProcessor, TagValOutProcessor,
    START_OF_MSG,
};
pub use correlation::{Clock, CorrelationGenerator, CorrelationId, SystemClock};
pub use error::{ProtocolError, Result};
pub use field::{FieldRegistry, MessageField};
#[cfg(feature = "async")]
pub use framed::MenuCommandCodec;
pub use platform::{module_version_code, ApiPlatform, CommandProtocol};
pub use reader::CommandReader;
pub use tagval::{TagValTextParser, TagValWriter};
pub use writer::CommandWriter;
