//! Writing generated lines to files and streams.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::app::generate::generate_lines;
use crate::app::template::LineTemplate;
use crate::domain::errors::GenerateError;
use crate::domain::model::RangeSpec;

/// One range paired with the template used to render its lines.
#[derive(Clone, Copy)]
pub struct ScanJob<'a> {
    pub spec: RangeSpec,
    pub template: &'a dyn LineTemplate,
}

impl<'a> ScanJob<'a> {
    pub fn new(spec: RangeSpec, template: &'a dyn LineTemplate) -> Self {
        Self { spec, template }
    }
}

/// Outcome of a successful [`write_generated_file`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub lines: usize,
}

/// Write every line of `jobs` to `writer`, each followed by `\n`.
///
/// Jobs are emitted in order and each job's lines are complete before the next
/// begins. `target` names the destination in errors. Returns the line count.
pub fn write_lines<W: Write>(
    writer: &mut W,
    target: &str,
    jobs: &[ScanJob<'_>],
) -> Result<usize, GenerateError> {
    let io_error = |source: std::io::Error| GenerateError::Io {
        target: target.to_owned(),
        source,
    };

    let mut written = 0;
    for job in jobs {
        for line in generate_lines(&job.spec, job.template) {
            let line = line?;
            writeln!(writer, "{line}").map_err(io_error)?;
            written += 1;
        }
    }
    writer.flush().map_err(io_error)?;
    Ok(written)
}

/// Create or truncate `path` and write the lines of every job into it.
///
/// Missing parent directories are not created. On failure the file may hold a
/// partial prefix of the output and must not be used.
pub fn write_generated_file(
    path: &Path,
    jobs: &[ScanJob<'_>],
) -> Result<WriteSummary, GenerateError> {
    let target = path.display().to_string();
    let file = File::create(path).map_err(|source| GenerateError::Io {
        target: target.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let lines = write_lines(&mut writer, &target, jobs)?;
    tracing::info!(path = %target, lines, "wrote generated file");

    Ok(WriteSummary {
        path: path.to_path_buf(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::model::ScaledValue;

    fn csv(raw: i64, scaled: ScaledValue) -> String {
        format!("{raw},{scaled}")
    }

    fn jobs(template: &dyn LineTemplate) -> Vec<ScanJob<'_>> {
        vec![
            ScanJob::new(RangeSpec::new(20, 40, 10, 1000).unwrap(), template),
            ScanJob::new(RangeSpec::new(1000, 3000, 1000, 1000).unwrap(), template),
        ]
    }

    #[test]
    fn writes_jobs_in_order_with_newlines() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out.txt");

        let summary = write_generated_file(&path, &jobs(&csv)).unwrap();

        assert_eq!(summary.lines, 4);
        assert_eq!(summary.path, path);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "20,0.02\n30,0.03\n1000,1\n2000,2\n"
        );
    }

    #[test]
    fn rewriting_truncates_and_is_deterministic() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out.txt");
        fs::write(&path, "stale contents that are longer than the output\n".repeat(10)).unwrap();

        write_generated_file(&path, &jobs(&csv)).unwrap();
        let first = fs::read(&path).unwrap();
        write_generated_file(&path, &jobs(&csv)).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, b"20,0.02\n30,0.03\n1000,1\n2000,2\n");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing").join("out.txt");

        let err = write_generated_file(&path, &jobs(&csv)).unwrap_err();

        assert!(matches!(err, GenerateError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn streams_to_any_writer() {
        let mut buffer = Vec::new();
        let written = write_lines(&mut buffer, "<memory>", &jobs(&csv)).unwrap();
        assert_eq!(written, 4);
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 4);
    }
}
