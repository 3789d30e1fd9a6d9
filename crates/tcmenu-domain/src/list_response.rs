use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// What the user did with a runtime list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    SelectItem,
    InvokeItem,
}

/// A row selection or invocation on a runtime list, sent as `row:flag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListResponse {
    pub row: u32,
    pub response_type: ResponseType,
}

impl ListResponse {
    pub fn new(row: u32, response_type: ResponseType) -> Self {
        Self { row, response_type }
    }

    /// Parses `row:flag`; flag 1 is an invocation, any other digit a selection.
    pub fn from_text(text: &str) -> Option<Self> {
        let (row, flag) = text.split_once(':')?;
        if row.is_empty() || !row.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if flag.len() != 1 || !flag.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let response_type = if flag == "1" {
            ResponseType::InvokeItem
        } else {
            ResponseType::SelectItem
        };
        Some(Self::new(row.parse().ok()?, response_type))
    }
}

impl fmt::Display for ListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = match self.response_type {
            ResponseType::SelectItem => 0,
            ResponseType::InvokeItem => 1,
        };
        write!(f, "{}:{flag}", self.row)
    }
}

impl FromStr for ListResponse {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s).ok_or_else(|| DomainError::InvalidListResponse(s.to_string()))
    }
}
