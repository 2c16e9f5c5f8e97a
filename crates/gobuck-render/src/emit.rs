//! Writing BUCK files into the vendor tree.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gobuck_model::BuckTarget;

use crate::config::BuckConfig;
use crate::error::EmitError;
use crate::report::{CheckReport, RenderFailure, RenderReport};
use crate::rule::{render_target, render_target_to_string};

/// Location of a target's build file: `<third_party_dir>/vendor/<import_path>/<file_name>`.
pub fn buck_file_path(third_party_dir: &Path, import_path: &str, file_name: &str) -> PathBuf {
    third_party_dir
        .join("vendor")
        .join(import_path)
        .join(file_name)
}

/// Render every target to its build file, in batch order.
///
/// Files are created or truncated. Parent directories must already exist;
/// failing to create a file aborts the batch with everything before it
/// already written. A target that fails to render is logged and recorded in
/// the report, and the batch carries on.
pub fn render_buck_files(
    config: &BuckConfig,
    third_party_dir: &Path,
    targets: &[BuckTarget],
) -> Result<RenderReport, EmitError> {
    render_batch(config, third_party_dir, targets, |path| {
        File::create(path).map(BufWriter::new)
    })
}

/// The batch loop over an arbitrary sink factory.
fn render_batch<W, F>(
    config: &BuckConfig,
    third_party_dir: &Path,
    targets: &[BuckTarget],
    mut create: F,
) -> Result<RenderReport, EmitError>
where
    W: Write,
    F: FnMut(&Path) -> io::Result<W>,
{
    let start = Instant::now();
    let mut report = RenderReport::default();

    for target in targets {
        let path = buck_file_path(third_party_dir, &target.import_path, &config.buildfile_name);
        let sink = create(&path).map_err(|source| EmitError::CreateFile {
            path: path.clone(),
            source,
        })?;

        match render_target(config, target, sink) {
            Ok(()) => tracing::debug!(path = %path.display(), "wrote BUCK file"),
            Err(e) => {
                tracing::error!(
                    import_path = %target.import_path,
                    error = %e,
                    "failed to render BUCK file"
                );
                report.failures.push(RenderFailure::new(target, &e));
            }
        }
        report.files.push(path);
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        files = report.files.len(),
        failures = report.failures.len(),
        "rendered BUCK files"
    );
    Ok(report)
}

/// Compare every target's rendered text with its file on disk.
///
/// Missing or unreadable files count as stale. Nothing is written.
pub fn check_buck_files(
    config: &BuckConfig,
    third_party_dir: &Path,
    targets: &[BuckTarget],
) -> CheckReport {
    let mut report = CheckReport::default();

    for target in targets {
        let path = buck_file_path(third_party_dir, &target.import_path, &config.buildfile_name);
        let rendered = match render_target_to_string(config, target) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    import_path = %target.import_path,
                    error = %e,
                    "failed to render BUCK file"
                );
                report.failures.push(RenderFailure::new(target, &e));
                continue;
            }
        };

        match fs::read(&path) {
            Ok(on_disk) if on_disk == rendered.as_bytes() => report.up_to_date += 1,
            Ok(_) => {
                tracing::debug!(path = %path.display(), "BUCK file differs");
                report.stale.push(path);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "BUCK file unreadable");
                report.stale.push(path);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buck_file_location() {
        let path = buck_file_path(Path::new("/repo/third-party/go"), "github.com/x/foo", "BUCK");
        assert_eq!(path, Path::new("/repo/third-party/go/vendor/github.com/x/foo/BUCK"));
    }

    #[test]
    fn custom_buildfile_name() {
        let path = buck_file_path(Path::new("tp"), "x/foo", "BUCK.v2");
        assert_eq!(path, Path::new("tp/vendor/x/foo/BUCK.v2"));
    }

    /// Discards output; fails once `budget` bytes have gone through.
    struct LimitedSink {
        budget: usize,
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_error_fails_one_target_and_batch_continues() {
        let targets: Vec<BuckTarget> = (0..3)
            .map(|i| BuckTarget::library(format!("pkg{i}"), format!("x/pkg{i}")))
            .collect();
        let report = render_batch(&BuckConfig::default(), Path::new("tp"), &targets, |path| {
            let budget = if path.starts_with("tp/vendor/x/pkg1") { 10 } else { usize::MAX };
            Ok(LimitedSink { budget })
        })
        .unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.written(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].import_path, "x/pkg1");
        assert!(report.failures[0].message.contains("no space left"));
    }

    #[test]
    fn sink_creation_error_aborts_batch() {
        let targets = vec![BuckTarget::library("a", "x/a"), BuckTarget::library("b", "x/b")];
        let mut opened = Vec::new();
        let err = render_batch(&BuckConfig::default(), Path::new("tp"), &targets, |path| {
            opened.push(path.to_path_buf());
            Err::<LimitedSink, _>(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .unwrap_err();

        let EmitError::CreateFile { path, .. } = err;
        assert_eq!(path, Path::new("tp/vendor/x/a/BUCK"));
        assert_eq!(opened.len(), 1);
    }

    #[test]
    fn empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let report = render_buck_files(&BuckConfig::default(), dir.path(), &[]).unwrap();
        assert!(report.files.is_empty());
        assert!(report.is_clean());
    }
}
