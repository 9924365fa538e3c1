use std::path::{Path, PathBuf};

/// Run configuration, resolved once before any work starts.
///
/// The report list arrives as a single comma-separated string, either from
/// the action input or from the `SARIF_REPORTS` environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    sarif_reports: Vec<PathBuf>,
}

impl Config {
    /// Builds a configuration from a comma-separated list of report paths.
    ///
    /// Entries are trimmed and blank entries dropped. Returns
    /// `ConfigError::NoReports` if nothing remains.
    pub fn from_report_list(list: &str) -> Result<Self, ConfigError> {
        Self::from_reports(
            list.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(PathBuf::from),
        )
    }

    /// Builds a configuration from already separated report paths.
    pub fn from_reports(reports: impl IntoIterator<Item = PathBuf>) -> Result<Self, ConfigError> {
        let sarif_reports: Vec<PathBuf> = reports.into_iter().collect();

        if sarif_reports.is_empty() {
            return Err(ConfigError::NoReports);
        }

        Ok(Self { sarif_reports })
    }

    /// Report paths in the order they were given.
    pub fn sarif_reports(&self) -> impl Iterator<Item = &Path> {
        self.sarif_reports.iter().map(PathBuf::as_path)
    }

    /// Number of configured reports.
    #[must_use]
    pub fn report_count(&self) -> usize {
        self.sarif_reports.len()
    }
}

/// Errors that can occur when resolving the run configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No SARIF report paths were configured.
    #[error("no SARIF reports configured (set the `sarif_reports` input or the SARIF_REPORTS environment variable)")]
    NoReports,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_report_list() {
        let config = Config::from_report_list(" eslint.sarif, ,clippy.sarif ").unwrap();
        let reports: Vec<_> = config.sarif_reports().collect();

        assert_eq!(reports, vec![Path::new("eslint.sarif"), Path::new("clippy.sarif")]);
        assert_eq!(config.report_count(), 2);
    }

    #[test]
    fn empty_list_is_a_configuration_error() {
        assert_eq!(Config::from_report_list(""), Err(ConfigError::NoReports));
        assert_eq!(Config::from_report_list(" , ,"), Err(ConfigError::NoReports));
    }

    #[test]
    fn preserves_input_order() {
        let config = Config::from_reports(["b.sarif".into(), "a.sarif".into()]).unwrap();
        let reports: Vec<_> = config.sarif_reports().collect();

        assert_eq!(reports, vec![Path::new("b.sarif"), Path::new("a.sarif")]);
    }

    #[test]
    fn error_mentions_both_sources() {
        let message = ConfigError::NoReports.to_string();

        assert!(message.contains("sarif_reports"));
        assert!(message.contains("SARIF_REPORTS"));
    }
}
