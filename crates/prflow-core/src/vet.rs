//! Pull request compliance checks.
//!
//! A pull request is vetted against labels, its milestone and notes in its
//! description. Every configured criterion either passes or contributes a
//! failure line; the verdict then depends on whether any or all criteria
//! must pass.

use prflow_github::PullRequest;
use regex::Regex;

use crate::error::{Error, Result};
use crate::note::NoteParser;

/// What a pull request must satisfy.
#[derive(Debug, Clone)]
pub struct VetRules {
    /// Labels that must be present, one criterion each.
    pub labels: Vec<String>,
    /// Patterns at least one label must match, one criterion each.
    pub label_patterns: Vec<String>,
    /// Exact milestone title.
    pub milestone: Option<String>,
    /// Patterns the milestone title must match, one criterion each.
    pub milestone_patterns: Vec<String>,
    /// Require some milestone to be set.
    pub any_milestone: bool,
    /// Titles of notes that must appear in the description.
    pub notes: Vec<String>,
    /// Fail unless at least one criterion passed.
    pub require_any: bool,
    /// Fail if any criterion failed.
    pub require_all: bool,
}

impl Default for VetRules {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            label_patterns: Vec::new(),
            milestone: None,
            milestone_patterns: Vec::new(),
            any_milestone: false,
            notes: Vec::new(),
            require_any: true,
            require_all: false,
        }
    }
}

/// Outcome of evaluating every criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VetReport {
    pub passed: usize,
    pub failures: Vec<String>,
}

impl VetReport {
    fn pass(&mut self) {
        self.passed += 1;
    }

    fn fail(&mut self, reason: String) {
        self.failures.push(reason);
    }

    /// Human-readable list of failures.
    #[must_use]
    pub fn failure_message(&self) -> String {
        let lines: Vec<String> = self.failures.iter().map(|f| format!("* {f}")).collect();
        format!("{} check(s) failed:\n{}", self.failures.len(), lines.join("\n"))
    }
}

/// Compiled rules, ready to evaluate pull requests.
#[derive(Debug, Clone)]
pub struct Vet {
    rules: VetRules,
    label_patterns: Vec<Regex>,
    milestone_patterns: Vec<Regex>,
    notes: NoteParser,
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| Error::InvalidPattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

impl Vet {
    /// Compile the rules' patterns.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] if a label or milestone pattern does
    /// not compile.
    pub fn new(rules: VetRules, notes: NoteParser) -> Result<Self> {
        Ok(Self {
            label_patterns: compile(&rules.label_patterns)?,
            milestone_patterns: compile(&rules.milestone_patterns)?,
            rules,
            notes,
        })
    }

    /// Evaluate every criterion against `pr`, reading notes from `body`.
    #[must_use]
    pub fn evaluate(&self, pr: &PullRequest, body: &str) -> VetReport {
        let mut report = VetReport::default();

        for required in &self.rules.labels {
            if pr.labels.iter().any(|l| l == required) {
                report.pass();
            } else {
                report.fail(format!("missing label: {required}"));
            }
        }

        for (pattern, regex) in self.rules.label_patterns.iter().zip(&self.label_patterns) {
            if pr.labels.iter().any(|l| regex.is_match(l)) {
                report.pass();
            } else {
                report.fail(format!("no label matched {pattern:?}"));
            }
        }

        let milestone = pr.milestone.as_deref().unwrap_or_default();

        if let Some(expected) = &self.rules.milestone {
            if milestone == expected {
                report.pass();
            } else {
                report.fail(format!(
                    "unexpected milestone: expected {expected:?}, got {milestone:?}"
                ));
            }
        }

        for (pattern, regex) in self
            .rules
            .milestone_patterns
            .iter()
            .zip(&self.milestone_patterns)
        {
            if regex.is_match(milestone) {
                report.pass();
            } else {
                report.fail(format!("milestone did not match {pattern:?}"));
            }
        }

        if self.rules.any_milestone {
            if milestone.is_empty() {
                report.fail("missing milestone".to_string());
            } else {
                report.pass();
            }
        }

        if !self.rules.notes.is_empty() {
            let found = self.notes.notes(body);
            for title in &self.rules.notes {
                if found.iter().any(|n| &n.title == title) {
                    report.pass();
                } else {
                    report.fail(format!("missing note titled {title:?}"));
                }
            }
        }

        tracing::debug!(
            pr = pr.number,
            passed = report.passed,
            failed = report.failures.len(),
            "evaluated pull request"
        );

        report
    }

    /// Apply the verdict to a report.
    ///
    /// # Errors
    /// Returns [`Error::VetFailed`] listing every failure when require-any
    /// is set and nothing passed, or require-all is set and anything failed.
    pub fn verdict(&self, report: &VetReport) -> Result<String> {
        let none_passed = report.passed == 0;
        let some_failed = !report.failures.is_empty();

        if (self.rules.require_any && none_passed) || (self.rules.require_all && some_failed) {
            return Err(Error::VetFailed(report.failure_message()));
        }

        Ok(format!("{} check(s) passed", report.passed))
    }

    /// Evaluate and apply the verdict in one step.
    ///
    /// # Errors
    /// See [`Vet::verdict`].
    pub fn check(&self, pr: &PullRequest, body: &str) -> Result<String> {
        self.verdict(&self.evaluate(pr, body))
    }
}
