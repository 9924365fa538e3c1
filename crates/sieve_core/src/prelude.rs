//! Convenience re-exports of the most commonly used types.

pub use crate::check_run::{
    Annotation, AnnotationLevel, CHECK_NAME, CheckRunOutput, CheckRunPayload, Conclusion, Counts, build_check_run,
};
pub use crate::config::{Config, ConfigError};
pub use crate::diff::{ChangedLines, DiffError};
pub use crate::error::SieveError;
pub use crate::sarif::{Level, SarifError, SarifLog};
pub use crate::violation::{PathNormalizer, Violation, ViolationDraft, extract_violations};
