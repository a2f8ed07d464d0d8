//! In-process test host
//!
//! [`TestSuite`] is a [`Registrar`] that keeps every registration and runs
//! them on demand, so fuzz tests can be driven from a single `#[test]`
//! function or from any program without an external test framework.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::harness::{Registrar, TestBody};

/// Outcome of one registered test unit
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    /// The body returned normally
    Passed { name: String, duration: Duration },
    /// The body panicked
    Failed {
        name: String,
        message: String,
        duration: Duration,
    },
}

impl TestResult {
    /// Name the unit was registered under
    pub fn name(&self) -> &str {
        match self {
            TestResult::Passed { name, .. } => name,
            TestResult::Failed { name, .. } => name,
        }
    }

    /// Check if the test passed
    pub fn is_passed(&self) -> bool {
        matches!(self, TestResult::Passed { .. })
    }

    /// Check if the test failed
    pub fn is_failed(&self) -> bool {
        matches!(self, TestResult::Failed { .. })
    }

    /// Time spent running the body
    pub fn duration(&self) -> Duration {
        match self {
            TestResult::Passed { duration, .. } => *duration,
            TestResult::Failed { duration, .. } => *duration,
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Passed { name, duration } => {
                write!(f, "test {} ... ok ({:?})", name, duration)
            }
            TestResult::Failed {
                name,
                message,
                duration,
            } => {
                write!(f, "test {} ... FAILED ({:?})", name, duration)?;
                write!(f, "\n  {}", message)
            }
        }
    }
}

/// A named collection of registered test units
pub struct TestSuite {
    name: String,
    units: Vec<(String, TestBody)>,
}

impl TestSuite {
    /// Create an empty suite
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Vec::new(),
        }
    }

    /// Name of the suite
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the registered units, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.units.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Run every unit in registration order.
    ///
    /// A failing unit does not stop the suite; each unit's panic is caught
    /// and recorded in its [`TestResult`].
    pub fn run(self) -> SuiteReport {
        debug!(suite = %self.name, units = self.units.len(), "running suite");

        let mut results = Vec::with_capacity(self.units.len());
        for (name, body) in self.units {
            let start = Instant::now();
            let outcome = catch_unwind(AssertUnwindSafe(body));
            let duration = start.elapsed();

            results.push(match outcome {
                Ok(()) => TestResult::Passed { name, duration },
                Err(payload) => TestResult::Failed {
                    name,
                    message: panic_message(payload.as_ref()),
                    duration,
                },
            });
        }

        let report = SuiteReport {
            suite: self.name,
            results,
        };
        debug!(
            suite = %report.suite,
            passed = report.passed(),
            failed = report.failed(),
            "suite finished"
        );
        report
    }
}

impl Registrar for TestSuite {
    fn register(&mut self, name: String, body: TestBody) {
        self.units.push((name, body));
    }
}

impl fmt::Debug for TestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSuite")
            .field("name", &self.name)
            .field("units", &self.names())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "test panicked with a non-string payload".to_string()
    }
}

/// Results of running a [`TestSuite`]
#[derive(Debug, Clone)]
pub struct SuiteReport {
    suite: String,
    results: Vec<TestResult>,
}

impl SuiteReport {
    /// Name of the suite that produced this report
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Per-unit results, in registration order
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Number of passing units
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_passed()).count()
    }

    /// Number of failing units
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// Check if every unit passed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Panic with a summary of every failure, if there were any
    pub fn assert_success(&self) {
        if !self.is_success() {
            panic!("{}", self);
        }
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "suite {}: {} passed; {} failed",
            self.suite,
            self.passed(),
            self.failed()
        )?;
        for result in self.results.iter().filter(|r| r.is_failed()) {
            write!(f, "\n{}", result)?;
        }
        Ok(())
    }
}
