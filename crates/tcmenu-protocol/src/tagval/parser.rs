use std::collections::HashMap;

use crate::error::{ProtocolError, Result};
use crate::tagval::fields::{choice_key, KEY_NO_OF_CHOICES, KEY_PREPEND_CHOICE};
use crate::tagval::{END_OF_MSG, ESCAPE, FIELD_SEPARATOR, KEY_VALUE_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Equals,
    Pipe,
    End,
    Eof,
}

/// Key to value map read from one TagVal body.
///
/// Bodies look like `K1=v1|K2=v2|` followed by the `0x02` end marker. A
/// backslash escapes the next byte so values may contain `|`, `=`, `\` or
/// the end marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagValTextParser {
    fields: HashMap<String, String>,
}

impl TagValTextParser {
    /// Parse `body` up to and including its end marker.
    ///
    /// Returns the parser and the number of bytes consumed. A body cut off
    /// before the marker yields the pairs that were complete.
    pub fn parse(body: &[u8]) -> Result<(Self, usize)> {
        let mut fields = HashMap::new();
        let mut pos = 0;

        while pos < body.len() {
            let (key, term) = read_token(body, &mut pos)?;
            match term {
                Terminator::End | Terminator::Eof => break,
                _ if key.is_empty() => return Err(ProtocolError::EmptyKey),
                Terminator::Pipe => {
                    fields.insert(key, String::new());
                    continue;
                }
                Terminator::Equals => {}
            }

            let (value, term) = read_token(body, &mut pos)?;
            match term {
                Terminator::Eof => break,
                Terminator::End => {
                    fields.insert(key, value);
                    break;
                }
                Terminator::Equals | Terminator::Pipe => {
                    fields.insert(key, value);
                }
            }
        }

        Ok((Self { fields }, pos))
    }

    /// Parse a complete body, ignoring the consumed length.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        Self::parse(body).map(|(parser, _)| parser)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Mandatory string value.
    pub fn get_value(&self, key: &str) -> Result<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ProtocolError::MissingField(key.to_string()))
    }

    pub fn get_value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.fields.get(key).map(String::as_str).unwrap_or(default)
    }

    /// Mandatory integer value.
    pub fn get_value_as_int(&self, key: &str) -> Result<i32> {
        parse_number(key, self.get_value(key)?)
    }

    /// Integer value, or `default` when the key is absent. A present value
    /// that is not a number is still an error.
    pub fn get_value_as_int_or(&self, key: &str, default: i32) -> Result<i32> {
        match self.fields.get(key) {
            Some(value) => parse_number(key, value),
            None => Ok(default),
        }
    }

    pub fn get_value_as_long(&self, key: &str) -> Result<i64> {
        parse_number(key, self.get_value(key)?)
    }

    pub fn get_value_as_long_or(&self, key: &str, default: i64) -> Result<i64> {
        match self.fields.get(key) {
            Some(value) => parse_number(key, value),
            None => Ok(default),
        }
    }

    /// Read `NC` choices stored under `CA`, `CB`, and so on.
    pub fn get_choices(&self) -> Result<Vec<String>> {
        self.get_prefixed_list(KEY_PREPEND_CHOICE)
    }

    /// Read `NC` entries stored under `{prefix}A`, `{prefix}B`, and so on.
    pub fn get_prefixed_list(&self, prefix: &str) -> Result<Vec<String>> {
        let count = usize::try_from(self.get_value_as_int(KEY_NO_OF_CHOICES)?).map_err(|_| {
            ProtocolError::InvalidField {
                key: KEY_NO_OF_CHOICES.to_string(),
                value: self.get_value_or(KEY_NO_OF_CHOICES, "").to_string(),
            }
        })?;
        if count > 26 {
            return Err(ProtocolError::TooManyChoices(count));
        }
        (0..count)
            .map(|idx| {
                let key = choice_key(prefix, idx).ok_or(ProtocolError::TooManyChoices(count))?;
                self.get_value(&key).map(str::to_string)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ProtocolError::InvalidField {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn read_token(body: &[u8], pos: &mut usize) -> Result<(String, Terminator)> {
    let mut token = Vec::new();
    let term = loop {
        let Some(&byte) = body.get(*pos) else {
            break Terminator::Eof;
        };
        *pos += 1;
        match byte {
            END_OF_MSG => break Terminator::End,
            ESCAPE => {
                if let Some(&escaped) = body.get(*pos) {
                    token.push(escaped);
                    *pos += 1;
                }
            }
            KEY_VALUE_SEPARATOR => break Terminator::Equals,
            FIELD_SEPARATOR => break Terminator::Pipe,
            other => token.push(other),
        }
    };
    let token = String::from_utf8(token).map_err(|_| ProtocolError::InvalidUtf8)?;
    Ok((token, term))
}

/// Offset of the first unescaped end marker in `body`.
pub fn find_end_of_message(body: &[u8]) -> Option<usize> {
    let mut idx = 0;
    while idx < body.len() {
        match body[idx] {
            ESCAPE => idx += 2,
            END_OF_MSG => return Some(idx),
            _ => idx += 1,
        }
    }
    None
}
