//! Turning classified violations into a check-run result.

use serde::Serialize;

use crate::sarif::Level;
use crate::violation::Violation;

/// Name under which the check run is published.
pub const CHECK_NAME: &str = "Code Quality";

/// Severity of an inline annotation, as understood by the check-run API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    /// Informational.
    Notice,
    /// Worth a look.
    Warning,
    /// Must be fixed.
    Failure,
}

impl From<Level> for AnnotationLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Self::Failure,
            Level::Warning => Self::Warning,
            Level::Note | Level::None => Self::Notice,
        }
    }
}

/// Overall verdict of the check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    /// No errors on changed lines.
    Success,
    /// At least one error on a changed line.
    Failure,
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// A single-line marker attached to a file in the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Repository-relative file path.
    pub path: String,
    /// Line the marker is attached to.
    pub start_line: u32,
    /// Always equal to `start_line`.
    pub end_line: u32,
    /// Severity bucket.
    pub annotation_level: AnnotationLevel,
    /// The violation's message.
    pub message: String,
    /// `"<tool> - <rule>"`, or just the tool name when the rule is unknown.
    pub title: String,
}

impl From<&Violation> for Annotation {
    fn from(violation: &Violation) -> Self {
        let title = match violation.rule_id() {
            Some(rule_id) => format!("{} - {rule_id}", violation.tool_name()),
            None => violation.tool_name().to_string(),
        };

        Self {
            path: violation.path().to_string(),
            start_line: violation.start_line(),
            end_line: violation.start_line(),
            annotation_level: violation.level().into(),
            message: violation.message().to_string(),
            title,
        }
    }
}

/// Number of annotations per severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Annotations at [`AnnotationLevel::Failure`].
    pub error_count: usize,
    /// Annotations at [`AnnotationLevel::Warning`].
    pub warning_count: usize,
    /// Annotations at [`AnnotationLevel::Notice`].
    pub notice_count: usize,
}

impl Counts {
    fn record(&mut self, level: AnnotationLevel) {
        match level {
            AnnotationLevel::Failure => self.error_count += 1,
            AnnotationLevel::Warning => self.warning_count += 1,
            AnnotationLevel::Notice => self.notice_count += 1,
        }
    }

    /// Sum of all buckets.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.error_count + self.warning_count + self.notice_count
    }

    /// One-line summary, e.g. `"1 errors, 0 warnings, 2 infos."`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} errors, {} warnings, {} infos.",
            self.error_count, self.warning_count, self.notice_count
        )
    }
}

/// Title, summary, and annotations of a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunOutput {
    /// Short title; identical to `summary`.
    pub title: String,
    /// Long-form summary.
    pub summary: String,
    /// Annotations in extraction order.
    pub annotations: Vec<Annotation>,
}

/// Everything needed to publish a completed check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunPayload {
    /// Verdict derived from the error count.
    pub conclusion: Conclusion,
    /// Per-severity annotation counts.
    pub counts: Counts,
    /// Rendered output.
    pub output: CheckRunOutput,
}

/// Builds the check-run payload from violations on changed lines.
///
/// Violations with `was_changed == false` are dropped entirely. The rest
/// keep their order. The conclusion is `failure` exactly when an error
/// survives the filter; warnings and notices never fail the check.
#[must_use]
pub fn build_check_run(violations: &[Violation]) -> CheckRunPayload {
    let mut counts = Counts::default();

    let annotations: Vec<Annotation> = violations
        .iter()
        .filter(|v| v.was_changed())
        .map(Annotation::from)
        .inspect(|a| counts.record(a.annotation_level))
        .collect();

    let conclusion = if counts.error_count > 0 {
        Conclusion::Failure
    } else {
        Conclusion::Success
    };

    let summary = counts.summary();

    CheckRunPayload {
        conclusion,
        counts,
        output: CheckRunOutput {
            title: summary.clone(),
            summary,
            annotations,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::violation;

    #[test]
    fn empty_input_succeeds_with_zero_counts() {
        let payload = build_check_run(&[]);

        assert_eq!(payload.conclusion, Conclusion::Success);
        assert_eq!(payload.counts, Counts::default());
        assert_eq!(payload.output.title, "0 errors, 0 warnings, 0 infos.");
        assert!(payload.output.annotations.is_empty());
    }

    #[test]
    fn unchanged_violations_are_excluded() {
        let violations = [
            violation("a.js", 10, Level::Warning, true),
            violation("a.js", 99, Level::Error, false),
        ];

        let payload = build_check_run(&violations);

        assert_eq!(payload.output.annotations.len(), 1);
        assert_eq!(payload.counts.error_count, 0);
        assert_eq!(payload.counts.warning_count, 1);
        assert_eq!(payload.conclusion, Conclusion::Success);
    }

    #[test]
    fn any_changed_error_fails() {
        let violations = [
            violation("a.js", 1, Level::Note, true),
            violation("a.js", 2, Level::Error, true),
        ];

        assert_eq!(build_check_run(&violations).conclusion, Conclusion::Failure);
    }

    #[test]
    fn severity_mapping_is_total() {
        assert_eq!(AnnotationLevel::from(Level::Error), AnnotationLevel::Failure);
        assert_eq!(AnnotationLevel::from(Level::Warning), AnnotationLevel::Warning);
        assert_eq!(AnnotationLevel::from(Level::Note), AnnotationLevel::Notice);
        assert_eq!(AnnotationLevel::from(Level::None), AnnotationLevel::Notice);
    }

    #[test]
    fn annotation_spans_only_the_start_line() {
        let v = crate::violation::ViolationDraft {
            tool_name: "clippy".into(),
            rule_id: Some("needless_return".into()),
            path: "src/lib.rs".into(),
            start_line: 4,
            end_line: 9,
            message: "unneeded `return` statement".into(),
            level: Level::Warning,
            ..Default::default()
        }
        .resolve(&crate::test_utils::changed(&[("src/lib.rs", 4)]));

        let payload = build_check_run(&[v]);
        let annotation = &payload.output.annotations[0];

        assert_eq!(annotation.start_line, 4);
        assert_eq!(annotation.end_line, 4);
        assert_eq!(annotation.title, "clippy - needless_return");
        assert_eq!(annotation.message, "unneeded `return` statement");
    }

    #[test]
    fn missing_rule_id_titles_with_tool_only() {
        let v = crate::violation::ViolationDraft {
            tool_name: "semgrep".into(),
            path: "x.py".into(),
            start_line: 1,
            end_line: 1,
            ..Default::default()
        }
        .resolve(&crate::test_utils::changed(&[("x.py", 1)]));

        assert_eq!(build_check_run(&[v]).output.annotations[0].title, "semgrep");
    }

    #[test]
    fn summary_and_title_are_identical() {
        let violations = [
            violation("a", 1, Level::Error, true),
            violation("a", 2, Level::Warning, true),
            violation("a", 3, Level::Note, true),
            violation("a", 4, Level::None, true),
        ];

        let payload = build_check_run(&violations);

        assert_eq!(payload.output.summary, "1 errors, 1 warnings, 2 infos.");
        assert_eq!(payload.output.title, payload.output.summary);
    }

    #[test]
    fn annotations_keep_extraction_order() {
        let violations = [
            violation("z.rs", 9, Level::Warning, true),
            violation("a.rs", 1, Level::Error, true),
        ];

        let paths: Vec<_> = build_check_run(&violations)
            .output
            .annotations
            .into_iter()
            .map(|a| a.path)
            .collect();

        assert_eq!(paths, vec!["z.rs", "a.rs"]);
    }

    #[test]
    fn serialises_with_api_field_names() {
        let payload = build_check_run(&[violation("a.rs", 3, Level::Error, true)]);
        let json = serde_json::to_value(&payload.output.annotations[0]).unwrap();

        assert_eq!(json["annotation_level"], "failure");
        assert_eq!(json["start_line"], 3);
        assert_eq!(json["end_line"], 3);
        assert_eq!(serde_json::to_value(payload.conclusion).unwrap(), "failure");
    }
}
