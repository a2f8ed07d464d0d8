//! Configuration for the test harness.

/// Number of repetitions every harness entry point runs.
pub const TEST_PASSES: usize = 100;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid number of passes (must be > 0)
    InvalidPasses(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPasses(n) => {
                write!(f, "Invalid pass count: {} (must be > 0)", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for harness registrations
///
/// The free functions in [`crate::harness`] always use the default,
/// [`TEST_PASSES`] repetitions. Build one of these to register tests with a
/// different count through its methods. The pass count is only settable
/// through [`FuzzConfig::new`], so a registered test always runs its check at
/// least once.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzConfig {
    passes: usize,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            passes: TEST_PASSES,
        }
    }
}

impl FuzzConfig {
    /// Create a new configuration with validation
    pub fn new(passes: usize) -> Result<Self, ConfigError> {
        let config = Self { passes };
        config.validate()?;
        Ok(config)
    }

    /// Repetitions per batched test, or registered units per explained test
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.passes == 0 {
            return Err(ConfigError::InvalidPasses(self.passes));
        }
        Ok(())
    }
}
