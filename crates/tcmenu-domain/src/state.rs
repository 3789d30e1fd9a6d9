use std::fmt;

use serde::Serialize;

use crate::color::PortableColor;
use crate::scroll::CurrentScrollPosition;

/// Storage kind of a state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageKind {
    Integer,
    Boolean,
    Float,
    String,
    StringList,
    ScrollPosition,
    PortableColor,
    BigDecimal,
}

/// The current value of a menu item.
///
/// Large numbers are held as `BigDecimal(f64)`, so precision beyond an f64
/// mantissa is not kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Integer(i32),
    Boolean(bool),
    Float(f64),
    String(String),
    StringList(Vec<String>),
    ScrollPosition(CurrentScrollPosition),
    Color(PortableColor),
    BigDecimal(f64),
}

impl StateValue {
    pub fn storage_kind(&self) -> StorageKind {
        match self {
            Self::Integer(_) => StorageKind::Integer,
            Self::Boolean(_) => StorageKind::Boolean,
            Self::Float(_) => StorageKind::Float,
            Self::String(_) => StorageKind::String,
            Self::StringList(_) => StorageKind::StringList,
            Self::ScrollPosition(_) => StorageKind::ScrollPosition,
            Self::Color(_) => StorageKind::PortableColor,
            Self::BigDecimal(_) => StorageKind::BigDecimal,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Float or big decimal value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) | Self::BigDecimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::StringList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_scroll(&self) -> Option<&CurrentScrollPosition> {
        match self {
            Self::ScrollPosition(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<PortableColor> {
        match self {
            Self::Color(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Float(v) | Self::BigDecimal(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::StringList(v) => f.write_str(&v.join(",")),
            Self::ScrollPosition(v) => write!(f, "{v}"),
            Self::Color(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for StateValue {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<String>> for StateValue {
    fn from(v: Vec<String>) -> Self {
        Self::StringList(v)
    }
}

impl From<CurrentScrollPosition> for StateValue {
    fn from(v: CurrentScrollPosition) -> Self {
        Self::ScrollPosition(v)
    }
}

impl From<PortableColor> for StateValue {
    fn from(v: PortableColor) -> Self {
        Self::Color(v)
    }
}

/// The value of one item plus its changed and active flags.
///
/// States are replaced, never edited: every change builds a new record that
/// takes the old one's place in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuState {
    pub item_id: i32,
    pub value: StateValue,
    pub changed: bool,
    pub active: bool,
}

impl MenuState {
    pub fn new(item_id: i32, value: StateValue, changed: bool, active: bool) -> Self {
        Self {
            item_id,
            value,
            changed,
            active,
        }
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.value.storage_kind()
    }
}
