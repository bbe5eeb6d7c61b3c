use thiserror::Error;

/// Error when parsing a string into one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} '{invalid}'. Valid values: {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    invalid: String,
    expected: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, invalid: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            invalid: invalid.to_string(),
            expected: expected.join(", "),
        }
    }

    /// The rejected input.
    pub fn invalid(&self) -> &str {
        &self.invalid
    }
}
