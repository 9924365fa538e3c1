//! Request bodies for the check-runs API.

use serde::Serialize;
use sieve_core::{Annotation, CHECK_NAME, CheckRunOutput, CheckRunPayload, Conclusion};

/// Upper bound the API places on annotations in a single request.
pub const MAX_ANNOTATIONS_PER_REQUEST: usize = 50;

const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Serialize)]
pub(crate) struct Output<'a> {
    title: &'a str,
    summary: &'a str,
    annotations: &'a [Annotation],
}

/// `POST /repos/{owner}/{repo}/check-runs`
#[derive(Debug, Serialize)]
pub(crate) struct CreateCheckRun<'a> {
    name: &'static str,
    head_sha: &'a str,
    status: &'static str,
    conclusion: Conclusion,
    output: Output<'a>,
}

/// `PATCH /repos/{owner}/{repo}/check-runs/{id}`; the API appends annotations.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateCheckRun<'a> {
    output: Output<'a>,
}

/// Splits a payload into one creation request and zero or more updates,
/// each carrying at most [`MAX_ANNOTATIONS_PER_REQUEST`] annotations.
pub(crate) fn batches<'a>(
    head_sha: &'a str,
    payload: &'a CheckRunPayload,
) -> (CreateCheckRun<'a>, Vec<UpdateCheckRun<'a>>) {
    let output = &payload.output;
    let mut chunks = output.annotations.chunks(MAX_ANNOTATIONS_PER_REQUEST);

    let create = CreateCheckRun {
        name: CHECK_NAME,
        head_sha,
        status: STATUS_COMPLETED,
        conclusion: payload.conclusion,
        output: batch(output, chunks.next().unwrap_or_default()),
    };

    let updates = chunks
        .map(|annotations| UpdateCheckRun {
            output: batch(output, annotations),
        })
        .collect();

    (create, updates)
}

fn batch<'a>(output: &'a CheckRunOutput, annotations: &'a [Annotation]) -> Output<'a> {
    Output {
        title: &output.title,
        summary: &output.summary,
        annotations,
    }
}

#[cfg(test)]
mod tests {
    use sieve_core::{AnnotationLevel, Counts};

    use super::*;

    fn payload(annotation_count: usize) -> CheckRunPayload {
        let annotations: Vec<Annotation> = (1..=annotation_count)
            .map(|line| Annotation {
                path: "src/a.js".into(),
                start_line: u32::try_from(line).unwrap(),
                end_line: u32::try_from(line).unwrap(),
                annotation_level: AnnotationLevel::Warning,
                message: "m".into(),
                title: "eslint - eqeqeq".into(),
            })
            .collect();

        let counts = Counts {
            warning_count: annotation_count,
            ..Counts::default()
        };

        CheckRunPayload {
            conclusion: Conclusion::Success,
            counts,
            output: CheckRunOutput {
                title: counts.summary(),
                summary: counts.summary(),
                annotations,
            },
        }
    }

    #[test]
    fn small_payload_fits_in_creation_request() {
        let payload = payload(3);
        let (create, updates) = batches("abc", &payload);

        assert_eq!(create.output.annotations.len(), 3);
        assert!(updates.is_empty());
    }

    #[test]
    fn empty_payload_creates_without_annotations() {
        let payload = payload(0);
        let (create, updates) = batches("abc", &payload);

        assert!(create.output.annotations.is_empty());
        assert!(updates.is_empty());
    }

    #[test]
    fn large_payload_is_split_in_order() {
        let payload = payload(120);
        let (create, updates) = batches("abc", &payload);

        assert_eq!(create.output.annotations.len(), 50);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].output.annotations[0].start_line, 51);
        assert_eq!(updates[1].output.annotations.len(), 20);
        assert_eq!(updates[1].output.title, "0 errors, 120 warnings, 0 infos.");
    }

    #[test]
    fn creation_body_has_api_shape() {
        let payload = payload(1);
        let (create, _) = batches("abc", &payload);
        let json = serde_json::to_value(&create).unwrap();

        assert_eq!(json["name"], "Code Quality");
        assert_eq!(json["head_sha"], "abc");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["conclusion"], "success");
        assert_eq!(json["output"]["annotations"][0]["annotation_level"], "warning");
        assert_eq!(json["output"]["annotations"][0]["path"], "src/a.js");
    }
}
