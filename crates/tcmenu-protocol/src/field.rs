use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{ProtocolError, Result};

/// Two-character identity of a message kind, such as `NJ` for join.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageField {
    high: u8,
    low: u8,
}

impl MessageField {
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn low(&self) -> u8 {
        self.low
    }
}

impl fmt::Display for MessageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high as char, self.low as char)
    }
}

impl fmt::Debug for MessageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageField({self})")
    }
}

impl Serialize for MessageField {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const JOIN: MessageField = MessageField::new(b'N', b'J');
pub const PAIRING_REQUEST: MessageField = MessageField::new(b'P', b'R');
pub const HEARTBEAT: MessageField = MessageField::new(b'H', b'B');
pub const BOOTSTRAP: MessageField = MessageField::new(b'B', b'S');
pub const ANALOG_BOOT_ITEM: MessageField = MessageField::new(b'B', b'A');
pub const ACTION_BOOT_ITEM: MessageField = MessageField::new(b'B', b'C');
pub const SUBMENU_BOOT_ITEM: MessageField = MessageField::new(b'B', b'M');
pub const ENUM_BOOT_ITEM: MessageField = MessageField::new(b'B', b'E');
pub const BOOLEAN_BOOT_ITEM: MessageField = MessageField::new(b'B', b'B');
pub const TEXT_BOOT_ITEM: MessageField = MessageField::new(b'B', b'T');
pub const RUNTIME_LIST_BOOT: MessageField = MessageField::new(b'B', b'L');
pub const BOOT_SCROLL_CHOICE: MessageField = MessageField::new(b'B', b'Z');
pub const BOOT_RGB_COLOR: MessageField = MessageField::new(b'B', b'K');
pub const LARGE_NUM_BOOT_ITEM: MessageField = MessageField::new(b'B', b'N');
pub const FLOAT_BOOT_ITEM: MessageField = MessageField::new(b'B', b'F');
pub const REMOTE_BOOT_ITEM: MessageField = MessageField::new(b'B', b'R');
pub const ACKNOWLEDGEMENT: MessageField = MessageField::new(b'A', b'K');
pub const CHANGE_INT_FIELD: MessageField = MessageField::new(b'V', b'C');
pub const DIALOG_UPDATE: MessageField = MessageField::new(b'D', b'M');

/// Message kinds known to every converter.
pub const BUILTIN_FIELDS: &[MessageField] = &[
    JOIN,
    PAIRING_REQUEST,
    HEARTBEAT,
    BOOTSTRAP,
    ANALOG_BOOT_ITEM,
    ACTION_BOOT_ITEM,
    SUBMENU_BOOT_ITEM,
    ENUM_BOOT_ITEM,
    BOOLEAN_BOOT_ITEM,
    TEXT_BOOT_ITEM,
    RUNTIME_LIST_BOOT,
    BOOT_SCROLL_CHOICE,
    BOOT_RGB_COLOR,
    LARGE_NUM_BOOT_ITEM,
    FLOAT_BOOT_ITEM,
    REMOTE_BOOT_ITEM,
    ACKNOWLEDGEMENT,
    CHANGE_INT_FIELD,
    DIALOG_UPDATE,
];

/// Set of message kinds a converter accepts.
///
/// Each converter owns one; registering the same identity twice fails.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: HashSet<MessageField>,
}

impl FieldRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with [`BUILTIN_FIELDS`].
    pub fn with_builtins() -> Self {
        Self {
            fields: BUILTIN_FIELDS.iter().copied().collect(),
        }
    }

    pub fn register(&mut self, field: MessageField) -> Result<()> {
        if !self.fields.insert(field) {
            return Err(ProtocolError::DuplicateField(field));
        }
        Ok(())
    }

    pub fn contains(&self, field: MessageField) -> bool {
        self.fields.contains(&field)
    }

    /// Look up the identity read from a frame header.
    pub fn resolve(&self, high: u8, low: u8) -> Result<MessageField> {
        let field = MessageField::new(high, low);
        if self.contains(field) {
            Ok(field)
        } else {
            Err(ProtocolError::UnknownMessageType {
                high: high as char,
                low: low as char,
            })
        }
    }

    /// Registered identities, sorted.
    pub fn fields(&self) -> Vec<MessageField> {
        let mut fields: Vec<_> = self.fields.iter().copied().collect();
        fields.sort_unstable();
        fields
    }
}
