//! Test utilities for `sieve_core` (compiled only during testing).

use serde_json::{Value, json};

use crate::diff::ChangedLines;
use crate::sarif::Level;
use crate::violation::{Violation, ViolationDraft};

pub fn changed(lines: &[(&str, u32)]) -> ChangedLines {
    lines.iter().map(|&(path, line)| (path.to_string(), line)).collect()
}

pub fn violation(path: &str, line: u32, level: Level, on_changed_line: bool) -> Violation {
    let lines = if on_changed_line {
        changed(&[(path, line)])
    } else {
        ChangedLines::default()
    };

    ViolationDraft {
        tool_name: "lint".into(),
        rule_id: Some("rule".into()),
        rule: None,
        path: path.into(),
        start_line: line,
        end_line: line,
        message: format!("problem at {path}:{line}"),
        level,
    }
    .resolve(&lines)
}

pub fn sarif_result(level: Option<&str>, uri: &str, line: u32) -> Value {
    let mut result = json!({
        "ruleId": "rule",
        "message": { "text": format!("problem at {uri}:{line}") },
        "locations": [{
            "physicalLocation": {
                "artifactLocation": { "uri": uri },
                "region": { "startLine": line }
            }
        }]
    });

    if let Some(level) = level {
        result["level"] = json!(level);
    }

    result
}

pub fn sarif_run(tool: &str, results: &[Value]) -> String {
    json!({
        "version": "2.1.0",
        "runs": [{
            "tool": { "driver": { "name": tool, "rules": [] } },
            "results": results
        }]
    })
    .to_string()
}
