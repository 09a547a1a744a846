//! Delimited-text impulse-response reading.
//!
//! Measurement software commonly exports impulse responses as one sample
//! per line, optionally with extra columns after a separator. Only the
//! first field of each line is read.

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a mono impulse response from a delimited text file.
///
/// One sample per line; for lines with multiple fields, everything after
/// the first `separator` is ignored. Blank lines are skipped. A field that
/// does not parse as a float fails with [`Error::Parse`] naming the line.
pub fn read_text<P: AsRef<Path>>(path: P, separator: char) -> Result<Vec<f64>> {
    let contents = fs::read_to_string(path)?;

    let mut samples = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let field = line.split(separator).next().unwrap_or(line).trim();
        let value = field.parse::<f64>().map_err(|_| Error::Parse {
            line: index + 1,
            value: field.to_string(),
        })?;
        samples.push(value);
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_one_sample_per_line() {
        let file = write_fixture("9.687375e-06\n-5.1842585e-06\n-3.502343e-05\n");
        let samples = read_text(file.path(), ',').unwrap();
        assert_eq!(samples, vec![9.687375e-06, -5.1842585e-06, -3.502343e-05]);
    }

    #[test]
    fn keeps_only_the_first_field() {
        let file = write_fixture("0.5,left\n-0.25,right\n");
        let samples = read_text(file.path(), ',').unwrap();
        assert_eq!(samples, vec![0.5, -0.25]);
    }

    #[test]
    fn skips_blank_lines() {
        let file = write_fixture("1.0\n\n  \n2.0\n");
        let samples = read_text(file.path(), ',').unwrap();
        assert_eq!(samples, vec![1.0, 2.0]);
    }

    #[test]
    fn reports_offending_line_on_parse_failure() {
        let file = write_fixture("1.0\nnot-a-number\n3.0\n");
        let err = read_text(file.path(), ',');
        assert!(matches!(
            err,
            Err(Error::Parse { line: 2, ref value }) if value == "not-a-number"
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = read_text("/nonexistent/ir.txt", ',');
        assert!(matches!(err, Err(Error::Io(_))));
    }
}
