// src/config/report.rs
// Findings from checking merged settings before the server starts

use std::fmt;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// The server cannot start
    Error,
    /// Usable, but likely to misbehave against GitHub
    Warning,
}

/// One finding, tied to the setting it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Env var or file key, e.g. `GITHUB_TOKEN`
    pub setting: &'static str,
    pub message: String,
}

/// Everything found wrong with a configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigReport {
    issues: Vec<ConfigIssue>,
}

impl ConfigReport {
    pub fn error(&mut self, setting: &'static str, message: impl Into<String>) {
        self.push(Severity::Error, setting, message.into());
    }

    pub fn warning(&mut self, setting: &'static str, message: impl Into<String>) {
        self.push(Severity::Warning, setting, message.into());
    }

    fn push(&mut self, severity: Severity, setting: &'static str, message: String) {
        self.issues.push(ConfigIssue {
            severity,
            setting,
            message,
        });
    }

    /// No errors; warnings alone do not block startup
    pub fn is_usable(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Errors only, joined for a single error message
    pub fn error_summary(&self) -> String {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| format!("{}: {}", i.setting, i.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ConfigReport {
    /// Errors first, one line per finding
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "Configuration OK");
        }
        let mut sorted: Vec<&ConfigIssue> = self.issues.iter().collect();
        sorted.sort_by_key(|i| i.severity);
        for (n, issue) in sorted.iter().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            let severity = issue.severity.to_string();
            write!(f, "{:<7} {}: {}", severity, issue.setting, issue.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_ok() {
        let report = ConfigReport::default();
        assert!(report.is_usable());
        assert_eq!(report.to_string(), "Configuration OK");
        assert_eq!(report.error_summary(), "");
    }

    #[test]
    fn test_errors_listed_before_warnings() {
        let mut report = ConfigReport::default();
        report.warning("ROADMAP_MAX_CONCURRENCY", "32 is high");
        report.error("GITHUB_TOKEN", "is required");

        assert!(!report.is_usable());
        let lines: Vec<String> = report.to_string().lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "error   GITHUB_TOKEN: is required",
                "warning ROADMAP_MAX_CONCURRENCY: 32 is high",
            ]
        );
        assert_eq!(report.error_summary(), "GITHUB_TOKEN: is required");
    }

    #[test]
    fn test_warnings_alone_stay_usable() {
        let mut report = ConfigReport::default();
        report.warning("ROADMAP_MAX_CONCURRENCY", "32 is high");
        assert!(report.is_usable());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.issues()[0].severity, Severity::Warning);
    }
}
