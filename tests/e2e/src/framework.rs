//! Core E2E testing framework

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info};

/// A named end-to-end flow that records the checks it performs
pub trait TestScenario {
    fn name(&self) -> &str;

    fn run(&self, checks: &mut CheckLog) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub description: String,
    pub passed: bool,
}

/// Ordered record of checks; the first failure aborts the scenario
#[derive(Debug, Default)]
pub struct CheckLog {
    checks: Vec<Check>,
}

impl CheckLog {
    pub fn ensure(&mut self, passed: bool, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        self.checks.push(Check {
            description: description.clone(),
            passed,
        });
        if !passed {
            bail!("check failed: {}", description);
        }
        Ok(())
    }

    /// Record an equality check, reporting both sides on failure
    pub fn ensure_eq<T: PartialEq + std::fmt::Debug>(
        &mut self,
        actual: T,
        expected: T,
        description: &str,
    ) -> Result<()> {
        let passed = actual == expected;
        let description = if passed {
            description.to_string()
        } else {
            format!("{}: got {:?}, expected {:?}", description, actual, expected)
        };
        self.ensure(passed, description)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    fn into_checks(self) -> Vec<Check> {
        self.checks
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub scenario: String,
    pub passed: bool,
    pub duration_ms: u128,
    pub checks: Vec<Check>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct TestFramework;

impl TestFramework {
    pub fn new() -> Self {
        Self
    }

    pub fn run_scenario(&self, scenario: &dyn TestScenario) -> TestResult {
        info!("Running scenario: {}", scenario.name());
        let started = Instant::now();
        let mut log = CheckLog::default();
        let outcome = scenario.run(&mut log);
        let duration_ms = started.elapsed().as_millis();

        let error = match outcome {
            Ok(()) => {
                info!(
                    "Scenario {} passed: {} checks in {}ms",
                    scenario.name(),
                    log.len(),
                    duration_ms
                );
                None
            }
            Err(err) => {
                error!("Scenario {} failed: {:#}", scenario.name(), err);
                Some(format!("{:#}", err))
            }
        };

        TestResult {
            scenario: scenario.name().to_string(),
            passed: error.is_none(),
            duration_ms,
            checks: log.into_checks(),
            error,
        }
    }
}
