use std::fmt::Display;

use crate::error::{ProtocolError, Result};
use crate::tagval::fields::{choice_key, KEY_NO_OF_CHOICES};
use crate::tagval::{END_OF_MSG, ESCAPE, FIELD_SEPARATOR, KEY_VALUE_SEPARATOR};

/// Builds a TagVal body, escaping values as they are appended.
///
/// The end marker is not written; the converter adds it when framing.
#[derive(Debug, Clone, Default)]
pub struct TagValWriter {
    buf: Vec<u8>,
}

impl TagValWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value|`.
    pub fn append_field(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.buf.extend_from_slice(key.as_bytes());
        self.buf.push(KEY_VALUE_SEPARATOR);
        for byte in value.to_string().bytes() {
            if matches!(byte, FIELD_SEPARATOR | KEY_VALUE_SEPARATOR | ESCAPE | END_OF_MSG) {
                self.buf.push(ESCAPE);
            }
            self.buf.push(byte);
        }
        self.buf.push(FIELD_SEPARATOR);
        self
    }

    /// Append a boolean as `1` or `0`.
    pub fn append_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.append_field(key, u8::from(value))
    }

    /// Append `NC` followed by each entry under `{prefix}A`, `{prefix}B`, ...
    pub fn append_choices(&mut self, prefix: &str, entries: &[String]) -> Result<&mut Self> {
        if entries.len() > 26 {
            return Err(ProtocolError::TooManyChoices(entries.len()));
        }
        self.append_field(KEY_NO_OF_CHOICES, entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let key = choice_key(prefix, idx).ok_or(ProtocolError::TooManyChoices(entries.len()))?;
            self.append_field(&key, entry);
        }
        Ok(self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
