use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An RGBA color that renders the same on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortableColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl PortableColor {
    pub const BLACK: PortableColor = PortableColor::rgb(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Lenient html parse: anything unrecognised becomes opaque black.
    pub fn from_html(html: &str) -> Self {
        parse_html(html).unwrap_or(Self::BLACK)
    }
}

impl Default for PortableColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for PortableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl FromStr for PortableColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_html(s).ok_or_else(|| DomainError::InvalidColor(s.to_string()))
    }
}

fn parse_html(html: &str) -> Option<PortableColor> {
    let digits = html.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        3 => {
            let nibble = |idx: usize| u8::from_str_radix(&digits[idx..idx + 1], 16).ok();
            Some(PortableColor::rgb(
                nibble(0)? << 4,
                nibble(1)? << 4,
                nibble(2)? << 4,
            ))
        }
        6 | 8 => {
            let byte = |idx: usize| u8::from_str_radix(&digits[idx..idx + 2], 16).ok();
            let alpha = if digits.len() == 8 { byte(6)? } else { 255 };
            Some(PortableColor::new(byte(0)?, byte(2)?, byte(4)?, alpha))
        }
        _ => None,
    }
}
