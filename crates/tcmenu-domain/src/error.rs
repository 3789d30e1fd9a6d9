/// Errors raised by the strict text parsers of the domain value types.
///
/// Most domain operations clamp or fall back instead of failing; these are
/// only returned from `FromStr` implementations.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// The text is not a `row:flag` list response.
    #[error("invalid list response {0:?} (expected \"row:flag\")")]
    InvalidListResponse(String),

    /// The text is not an html color of the form `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid html color {0:?}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
