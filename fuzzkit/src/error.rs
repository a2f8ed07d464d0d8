//! Error types for fuzzer construction and check failures.

use std::fmt;

/// Misuse errors raised when building a fuzzer
#[derive(Debug, Clone, PartialEq)]
pub enum FuzzError {
    /// `int_range` was given a lower bound above its upper bound
    InvalidRange { min: i64, max: i64 },

    /// `one_of` was given nothing to choose from
    EmptyChoices,
}

impl fmt::Display for FuzzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuzzError::InvalidRange { min, max } => {
                write!(f, "Invalid range: min {} is greater than max {}", min, max)
            }
            FuzzError::EmptyChoices => write!(f, "Cannot choose from an empty set of values"),
        }
    }
}

impl std::error::Error for FuzzError {}

/// A failed check, rendered into the panic that fails the registered test
#[derive(Debug, Clone, PartialEq)]
pub struct CheckFailure {
    /// Description the test was registered under
    pub description: String,
    /// What the check reported
    pub message: String,
    /// Zero-based repetition index, for batched tests
    pub pass: Option<usize>,
    /// Rendering of the inputs that failed
    pub input: Option<String>,
}

impl CheckFailure {
    /// Create a failure with no pass or input context
    pub fn new(description: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            message: message.into(),
            pass: None,
            input: None,
        }
    }

    /// Attach the repetition index the failure happened on
    pub fn on_pass(mut self, pass: usize) -> Self {
        self.pass = Some(pass);
        self
    }

    /// Attach the rendered input that failed
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check failed for '{}': {}", self.description, self.message)?;
        if let Some(pass) = self.pass {
            write!(f, " (pass: {})", pass)?;
        }
        if let Some(input) = &self.input {
            write!(f, " (input: {})", input)?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckFailure {}

/// Return types a check callback may use to report its verdict.
///
/// Returning `()` always passes; failures are then signalled by panicking,
/// e.g. with `assert!`. A `bool` fails on `false`. A `Result` fails on `Err`,
/// carrying the error's `Display` text as the failure message.
pub trait CheckOutcome {
    /// Convert into `Ok(())` on pass or the failure message
    fn into_verdict(self) -> Result<(), String>;
}

impl CheckOutcome for () {
    fn into_verdict(self) -> Result<(), String> {
        Ok(())
    }
}

impl CheckOutcome for bool {
    fn into_verdict(self) -> Result<(), String> {
        if self {
            Ok(())
        } else {
            Err("check returned false".to_string())
        }
    }
}

impl<E: fmt::Display> CheckOutcome for Result<(), E> {
    fn into_verdict(self) -> Result<(), String> {
        self.map_err(|err| err.to_string())
    }
}
