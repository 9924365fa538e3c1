//! Flattening SARIF results into per-location violations.

mod path;

use serde::Serialize;
use serde_json::Value;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

pub use self::path::PathNormalizer;
use crate::diff::ChangedLines;
use crate::sarif::{Level, SarifLog};

/// One reported problem at one location, classified against a diff.
///
/// A violation is immutable. Whether it sits on a changed line is decided
/// once, when it is built from a [`ViolationDraft`], and cannot be set any
/// other way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    tool_name: String,
    rule_id: Option<String>,
    rule: Option<Value>,
    path: String,
    start_line: u32,
    end_line: u32,
    message: String,
    was_changed: bool,
    level: Level,
}

impl Violation {
    /// Name of the tool that reported the problem.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Identifier of the violated rule, if the tool supplied one.
    #[must_use]
    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_deref()
    }

    /// The rule descriptor found at the result's `ruleIndex`, if any.
    #[must_use]
    pub const fn rule(&self) -> Option<&Value> {
        self.rule.as_ref()
    }

    /// Repository-relative file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 1-indexed first line.
    #[must_use]
    pub const fn start_line(&self) -> u32 {
        self.start_line
    }

    /// 1-indexed last line.
    #[must_use]
    pub const fn end_line(&self) -> u32 {
        self.end_line
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` iff the start line was added by the diff.
    #[must_use]
    pub const fn was_changed(&self) -> bool {
        self.was_changed
    }

    /// Reported severity.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

/// The fields of a violation before it is classified against a diff.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolationDraft {
    /// Name of the reporting tool.
    pub tool_name: String,
    /// Identifier of the violated rule.
    pub rule_id: Option<String>,
    /// Rule descriptor, passed through untouched.
    pub rule: Option<Value>,
    /// Repository-relative file path.
    pub path: String,
    /// 1-indexed first line.
    pub start_line: u32,
    /// 1-indexed last line.
    pub end_line: u32,
    /// Human-readable description.
    pub message: String,
    /// Reported severity.
    pub level: Level,
}

impl ViolationDraft {
    /// Classifies the draft against `changed`, producing a [`Violation`].
    #[must_use]
    pub fn resolve(self, changed: &ChangedLines) -> Violation {
        let was_changed = changed.contains(&self.path, self.start_line);

        Violation {
            tool_name: self.tool_name,
            rule_id: self.rule_id,
            rule: self.rule,
            path: self.path,
            start_line: self.start_line,
            end_line: self.end_line,
            message: self.message,
            was_changed,
            level: self.level,
        }
    }
}

/// Produces one violation per (run, result, location), in report order.
///
/// Locations without a file URI or a start line cannot be placed on a diff
/// line and are skipped. A missing or out-of-range rule index leaves
/// [`Violation::rule`] empty; a missing level reads as [`Level::Error`].
#[must_use]
pub fn extract_violations(log: &SarifLog, changed: &ChangedLines, paths: &PathNormalizer) -> Vec<Violation> {
    let mut violations = Vec::new();

    for run in &log.runs {
        let driver = &run.tool.driver;

        for result in &run.results {
            let rule = driver.rule(result.rule_index);
            let level = result.level.unwrap_or_default();
            let message = result.message.text.clone().unwrap_or_default();

            for location in &result.locations {
                let Some(physical) = location.physical_location.as_ref() else {
                    #[cfg(feature = "tracing")]
                    debug!(tool = %driver.name, rule = ?result.rule_id, "skipping location without physicalLocation");
                    continue;
                };

                let uri = physical.artifact_location.as_ref().and_then(|a| a.uri.as_deref());
                let start_line = physical.region.and_then(|r| r.start_line);

                let (Some(uri), Some(start_line)) = (uri, start_line) else {
                    #[cfg(feature = "tracing")]
                    debug!(tool = %driver.name, rule = ?result.rule_id, "skipping location without uri or start line");
                    continue;
                };

                let end_line = physical.region.and_then(|r| r.end_line).unwrap_or(start_line);

                let violation = ViolationDraft {
                    tool_name: driver.name.clone(),
                    rule_id: result.rule_id.clone(),
                    rule: rule.cloned(),
                    path: paths.normalize(uri),
                    start_line,
                    end_line,
                    message: message.clone(),
                    level,
                }
                .resolve(changed);

                #[cfg(feature = "tracing")]
                trace!(path = violation.path(), line = start_line, changed = violation.was_changed(), "violation");

                violations.push(violation);
            }
        }
    }

    violations
}
