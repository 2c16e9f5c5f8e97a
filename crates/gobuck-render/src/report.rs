//! Batch reports.

use std::fmt;
use std::path::PathBuf;

use gobuck_model::BuckTarget;

use crate::error::RenderError;

/// A target whose text could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub import_path: String,
    pub message: String,
}

impl RenderFailure {
    pub fn new(target: &BuckTarget, error: &RenderError) -> Self {
        Self {
            import_path: target.import_path.clone(),
            message: error.to_string(),
        }
    }
}

/// Summary of a render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderReport {
    /// Every file created, in batch order. Includes files of failed targets.
    pub files: Vec<PathBuf>,
    /// Targets that failed to render; their files may be empty or partial.
    pub failures: Vec<RenderFailure>,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl RenderReport {
    /// Files that were rendered completely.
    pub fn written(&self) -> usize {
        self.files.len() - self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rendered {} BUCK files in {} ms",
            self.written(),
            self.duration_ms
        )?;
        write_failures(f, &self.failures)
    }
}

/// Summary of a staleness check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Number of files whose content matched.
    pub up_to_date: usize,
    /// Files that are missing or differ from what would be rendered.
    pub stale: Vec<PathBuf>,
    /// Targets that failed to render.
    pub failures: Vec<RenderFailure>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.failures.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} BUCK files up to date", self.up_to_date)?;
        if !self.stale.is_empty() {
            writeln!(f, "{} stale:", self.stale.len())?;
            for path in &self.stale {
                writeln!(f, "  {}", path.display())?;
            }
        }
        write_failures(f, &self.failures)
    }
}

fn write_failures(f: &mut fmt::Formatter<'_>, failures: &[RenderFailure]) -> fmt::Result {
    if failures.is_empty() {
        return Ok(());
    }
    writeln!(f, "{} failed to render:", failures.len())?;
    for failure in failures {
        writeln!(f, "  {}: {}", failure.import_path, failure.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_report_display() {
        let report = RenderReport {
            files: vec![PathBuf::from("a/BUCK"), PathBuf::from("b/BUCK")],
            failures: vec![RenderFailure {
                import_path: "x/b".into(),
                message: "missing required config field: library-rule".into(),
            }],
            duration_ms: 3,
        };
        assert_eq!(report.written(), 1);
        assert!(!report.is_clean());

        let output = format!("{report}");
        assert!(output.contains("Rendered 1 BUCK files in 3 ms"));
        assert!(output.contains("1 failed to render"));
        assert!(output.contains("x/b: missing required config field"));
    }

    #[test]
    fn check_report_display() {
        let report = CheckReport {
            up_to_date: 4,
            stale: vec![PathBuf::from("vendor/x/a/BUCK")],
            failures: Vec::new(),
        };
        assert!(!report.is_clean());
        let output = format!("{report}");
        assert!(output.contains("4 BUCK files up to date"));
        assert!(output.contains("1 stale:"));
        assert!(output.contains("vendor/x/a/BUCK"));
        assert!(!output.contains("failed"));
    }

    #[test]
    fn failure_from_error() {
        let target = BuckTarget::library("foo", "x/foo");
        let err = RenderError::MissingConfig {
            field: "deps-attr".into(),
        };
        let failure = RenderFailure::new(&target, &err);
        assert_eq!(failure.import_path, "x/foo");
        assert!(failure.message.contains("deps-attr"));
    }
}
