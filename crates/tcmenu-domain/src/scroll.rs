use std::fmt;

use serde::{Deserialize, Serialize};

/// Selected position of a scroll-choice item together with its display text.
///
/// The text form is `position-value`, split at the first `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CurrentScrollPosition {
    pub position: i32,
    pub value: String,
}

impl CurrentScrollPosition {
    pub fn new(position: i32, value: impl Into<String>) -> Self {
        Self {
            position,
            value: value.into(),
        }
    }

    /// Never fails: a bad position reads as 0 and text without a
    /// separator reads as `0-Unknown`.
    pub fn from_text(text: &str) -> Self {
        match text.split_once('-') {
            Some((position, value)) => Self::new(position.trim().parse().unwrap_or(0), value),
            None => Self::new(0, "Unknown"),
        }
    }
}

impl fmt::Display for CurrentScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.position, self.value)
    }
}
