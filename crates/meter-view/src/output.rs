//! Writing rendered report lines to the console or a file.

use std::io::Write;
use std::path::Path;

use tracing::info;

use meter_core::error::{ReportError, Result};

/// Write `lines` to `out`, one per line.
pub fn print_lines<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Write `lines` to the file at `path`, replacing any previous content.
pub fn write_report(path: &Path, lines: &[String]) -> Result<()> {
    let to_write_error = |source| ReportError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::io::BufWriter::new(std::fs::File::create(path).map_err(to_write_error)?);
    print_lines(&mut file, lines).map_err(to_write_error)?;
    info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines() -> Vec<String> {
        vec!["Week 42".to_string(), String::new(), "Maanantai 0,15".to_string()]
    }

    #[test]
    fn test_print_lines() {
        let mut buf: Vec<u8> = Vec::new();
        print_lines(&mut buf, &lines()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Week 42\n\nMaanantai 0,15\n");
    }

    #[test]
    fn test_write_report_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.txt");
        std::fs::write(&path, "old content that is longer than the new one\n").unwrap();

        write_report(&path, &lines()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Week 42\n\nMaanantai 0,15\n");
    }

    #[test]
    fn test_write_report_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("report.txt");
        let err = write_report(&path, &lines()).unwrap_err();
        assert!(matches!(err, ReportError::FileWrite { .. }));
    }
}
