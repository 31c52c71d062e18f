//! Source capabilities: file reading and formatting
//!
//! Both are injectable seams like [`Analyzer`](crate::analyzer::Analyzer).
//! The shipped implementations are local and synchronous-ish stand-ins; a
//! future backend can replace either without touching the pipeline.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::ReviewError;

/// Boxed future returned by [`SourceReader::read_text`].
pub type ReadFuture = Pin<Box<dyn Future<Output = Result<String, ReviewError>> + Send>>;

/// Reads a file's content fully into memory as text.
pub trait SourceReader: Send + Sync {
    fn read_text(&self, path: PathBuf) -> ReadFuture;
}

/// Reader backed by the local filesystem.
///
/// Fails with [`ReviewError::Read`] on missing files and on content that is
/// not valid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
    fn read_text(&self, path: PathBuf) -> ReadFuture {
        Box::pin(async move {
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ReviewError::Read(format!("{}: {}", path.display(), e)))
        })
    }
}

/// Applies a formatting transform to source text.
pub trait Formatter: Send + Sync {
    fn format(&self, source: &str) -> Result<String, ReviewError>;
}

/// Whitespace-normalizing formatter.
///
/// Expands tabs to four spaces, strips trailing whitespace, collapses runs
/// of blank lines to one, and guarantees a single trailing newline. Rejects
/// sources containing NUL bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicFormatter;

impl Formatter for BasicFormatter {
    fn format(&self, source: &str) -> Result<String, ReviewError> {
        if source.contains('\0') {
            return Err(ReviewError::Format("source contains binary data".into()));
        }

        let mut out = String::with_capacity(source.len());
        let mut blank_run = 0usize;
        for line in source.lines() {
            let line = line.replace('\t', "    ");
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fs_reader_reads_utf8_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x = 1\n").unwrap();

        let text = FsSourceReader
            .read_text(file.path().to_path_buf())
            .await
            .unwrap();

        assert_eq!(text, "x = 1\n");
    }

    #[tokio::test]
    async fn test_fs_reader_fails_on_missing_file() {
        let err = FsSourceReader
            .read_text(PathBuf::from("/nonexistent/solution.py"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), crate::error::FailureKind::Read);
        assert!(err.to_string().contains("solution.py"));
    }

    #[tokio::test]
    async fn test_fs_reader_fails_on_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = FsSourceReader
            .read_text(file.path().to_path_buf())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), crate::error::FailureKind::Read);
    }

    #[test]
    fn test_formatter_normalizes_whitespace() {
        let formatted = BasicFormatter
            .format("def f():\n\treturn 1  \n\n\n\nx = f()")
            .unwrap();

        assert_eq!(formatted, "def f():\n    return 1\n\nx = f()\n");
    }

    #[test]
    fn test_formatter_is_stable_on_formatted_input() {
        let once = BasicFormatter.format("x = 1\n\ny = 2\n").unwrap();
        let twice = BasicFormatter.format(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_formatter_rejects_binary() {
        let err = BasicFormatter.format("x = \0").unwrap_err();
        assert_eq!(err.kind(), crate::error::FailureKind::Format);
    }
}
