//! The subset of SARIF v2.1.0 that sieve reads.
//!
//! Only the fields needed to place a result on a line are modelled; every
//! other property is ignored. Rule descriptors are kept as raw JSON since
//! they are passed through without interpretation.

mod level;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use self::level::Level;

/// Errors that can occur when reading a SARIF report.
#[derive(Debug, Error)]
pub enum SarifError {
    /// The report was not valid JSON, or did not have the SARIF shape.
    #[error("failed to parse SARIF report: {source}")]
    Parse {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// A complete SARIF log: one or more analysis runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SarifLog {
    /// Runs in report order.
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl SarifLog {
    /// Parses a SARIF log from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SarifError> {
        serde_json::from_str(text).map_err(|source| SarifError::Parse { source })
    }
}

/// A single invocation of one analysis tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Run {
    /// The tool that produced the results.
    #[serde(default)]
    pub tool: Tool,
    /// Results in report order.
    #[serde(default)]
    pub results: Vec<SarifResult>,
}

/// Wrapper around the tool's driver component.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tool {
    /// The primary tool component.
    #[serde(default)]
    pub driver: Driver,
}

/// The analysis tool's name and rule catalogue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Driver {
    /// Tool name, e.g. `"ESLint"`.
    #[serde(default)]
    pub name: String,
    /// Rule descriptors, addressed positionally by `ruleIndex`.
    #[serde(default)]
    pub rules: Vec<Value>,
}

impl Driver {
    /// Looks up a rule descriptor by position.
    ///
    /// Returns `None` for an absent, negative, or out-of-range index.
    #[must_use]
    pub fn rule(&self, index: Option<i64>) -> Option<&Value> {
        let index = usize::try_from(index?).ok()?;
        self.rules.get(index)
    }
}

/// One finding reported by the tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    /// Identifier of the violated rule, if the tool provided one.
    #[serde(default)]
    pub rule_id: Option<String>,
    /// Position of the rule in [`Driver::rules`]. SARIF uses `-1` for "unset".
    #[serde(default)]
    pub rule_index: Option<i64>,
    /// Severity, if the tool provided one.
    #[serde(default)]
    pub level: Option<Level>,
    /// Human-readable description of the finding.
    #[serde(default)]
    pub message: Message,
    /// Where the finding was detected. May be empty.
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// A SARIF message object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    /// Plain-text rendering of the message.
    #[serde(default)]
    pub text: Option<String>,
}

/// A result location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// File and region, if the location is physical.
    #[serde(default)]
    pub physical_location: Option<PhysicalLocation>,
}

/// A location within a file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    /// The file.
    #[serde(default)]
    pub artifact_location: Option<ArtifactLocation>,
    /// The span within the file.
    #[serde(default)]
    pub region: Option<Region>,
}

/// Reference to a file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactLocation {
    /// Absolute or relative URI of the file.
    #[serde(default)]
    pub uri: Option<String>,
}

/// A span of lines within a file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// 1-indexed first line.
    #[serde(default)]
    pub start_line: Option<u32>,
    /// 1-indexed last line. Equal to `start_line` when omitted.
    #[serde(default)]
    pub end_line: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "version": "2.1.0",
        "runs": [{
            "tool": { "driver": {
                "name": "ESLint",
                "rules": [{ "id": "no-unused-vars" }, { "id": "eqeqeq" }]
            }},
            "results": [{
                "ruleId": "eqeqeq",
                "ruleIndex": 1,
                "level": "warning",
                "message": { "text": "Expected '===' and instead saw '=='." },
                "locations": [{ "physicalLocation": {
                    "artifactLocation": { "uri": "src/a.js" },
                    "region": { "startLine": 10, "startColumn": 7, "endLine": 10 }
                }}]
            }]
        }]
    }"#;

    #[test]
    fn parses_results_and_rules() {
        let log = SarifLog::from_json(REPORT).unwrap();
        let run = &log.runs[0];
        let result = &run.results[0];

        assert_eq!(run.tool.driver.name, "ESLint");
        assert_eq!(result.rule_id.as_deref(), Some("eqeqeq"));
        assert_eq!(result.level, Some(Level::Warning));
        assert_eq!(
            run.tool.driver.rule(result.rule_index).and_then(|r| r["id"].as_str()),
            Some("eqeqeq")
        );

        let physical = result.locations[0].physical_location.as_ref().unwrap();
        assert_eq!(physical.artifact_location.as_ref().unwrap().uri.as_deref(), Some("src/a.js"));
        assert_eq!(physical.region.unwrap().start_line, Some(10));
    }

    #[test]
    fn missing_optional_fields_default() {
        let log = SarifLog::from_json(r#"{"runs":[{"tool":{"driver":{"name":"x"}},"results":[{"message":{}}]}]}"#)
            .unwrap();
        let result = &log.runs[0].results[0];

        assert!(result.level.is_none());
        assert!(result.rule_id.is_none());
        assert!(result.locations.is_empty());
        assert!(result.message.text.is_none());
    }

    #[test]
    fn rule_lookup_rejects_bad_indices() {
        let driver = Driver {
            name: "x".into(),
            rules: vec![serde_json::json!({"id": "a"})],
        };

        assert!(driver.rule(Some(0)).is_some());
        assert!(driver.rule(Some(1)).is_none());
        assert!(driver.rule(Some(-1)).is_none());
        assert!(driver.rule(None).is_none());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = SarifLog::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse SARIF report"));
    }

    #[test]
    fn empty_object_has_no_runs() {
        assert!(SarifLog::from_json("{}").unwrap().runs.is_empty());
    }
}
