use serde::Serialize;
use tcmenu_domain::{ListResponse, StateValue};

use crate::correlation::CorrelationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// Signed step applied to the current integer or scroll position.
    Delta,
    /// Replacement value as text.
    Absolute,
    /// Replacement rows for a runtime list.
    AbsoluteList,
    /// A row of a list was selected or invoked.
    ListStateChange,
}

impl ChangeType {
    pub fn id(self) -> i32 {
        match self {
            ChangeType::Delta => 0,
            ChangeType::Absolute => 1,
            ChangeType::AbsoluteList => 2,
            ChangeType::ListStateChange => 3,
        }
    }

    /// Unknown ids read as [`ChangeType::Delta`].
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => ChangeType::Absolute,
            2 => ChangeType::AbsoluteList,
            3 => ChangeType::ListStateChange,
            _ => ChangeType::Delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChangeValue {
    Single(String),
    List(Vec<String>),
}

impl ChangeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ChangeValue::Single(text) => Some(text),
            ChangeValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ChangeValue::List(rows) => Some(rows),
            ChangeValue::Single(_) => None,
        }
    }
}

impl From<ChangeValue> for StateValue {
    fn from(value: ChangeValue) -> Self {
        match value {
            ChangeValue::Single(text) => StateValue::String(text),
            ChangeValue::List(rows) => StateValue::StringList(rows),
        }
    }
}

/// A value change in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuChangeCommand {
    pub menu_item_id: i32,
    pub correlation_id: CorrelationId,
    pub change_type: ChangeType,
    pub value: ChangeValue,
}

impl MenuChangeCommand {
    /// The row selection carried by a [`ChangeType::ListStateChange`].
    pub fn list_response(&self) -> Option<ListResponse> {
        if self.change_type != ChangeType::ListStateChange {
            return None;
        }
        self.value.as_str().and_then(ListResponse::from_text)
    }
}
