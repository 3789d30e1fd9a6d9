//! TagVal text bodies: `KEY=value|` pairs closed by an end marker.

pub mod fields;
pub mod parser;
pub mod processors;
pub mod writer;

pub use parser::{find_end_of_message, TagValTextParser};
pub use writer::TagValWriter;

/// Closes a TagVal body.
pub const END_OF_MSG: u8 = 0x02;

/// Escapes the following byte inside a key or value.
pub const ESCAPE: u8 = b'\\';

pub const FIELD_SEPARATOR: u8 = b'|';

pub const KEY_VALUE_SEPARATOR: u8 = b'=';
