//! Result collection and reporting.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{HarnessError, Result};

const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
}

/// Ordered test label → verdict mapping, in the order tests ran.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestResults {
    outcomes: Vec<TestOutcome>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [TestOutcome],
    passed: usize,
    total: usize,
}

impl TestResults {
    /// Records a verdict. A label seen before is overwritten in place.
    pub fn record(&mut self, name: impl Into<String>, passed: bool) {
        let name = name.into();
        match self.outcomes.iter_mut().find(|o| o.name == name) {
            Some(existing) => existing.passed = passed,
            None => self.outcomes.push(TestOutcome { name, passed }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.outcomes.iter().find(|o| o.name == name).map(|o| o.passed)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.len()
    }

    /// Renders the summary block printed at the end of a run.
    pub fn render_summary(&self) -> String {
        let rule = "=".repeat(50);
        let mut out = format!("\n{}\nTEST SUMMARY\n{}\n", rule, rule);
        for outcome in &self.outcomes {
            let status = if outcome.passed {
                "PASS".to_string()
            } else {
                format!("{}FAIL{}", RED, RESET)
            };
            out.push_str(&format!("{:25} {}\n", outcome.name, status));
        }
        out.push_str(&format!(
            "\nResults: {}/{} tests passed\n",
            self.passed(),
            self.len()
        ));
        if self.all_passed() {
            out.push_str("All tests passed! ✓\n");
        } else {
            out.push_str("Some tests failed! ✗\n");
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            results: &self.outcomes,
            passed: self.passed(),
            total: self.len(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json + "\n").map_err(|e| HarnessError::io(path, e))
    }
}
