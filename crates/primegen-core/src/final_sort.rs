//! Exact sort of the presorted output file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use num_bigint::BigUint;
use tracing::info;

use crate::constants::DEFAULT_SORT_CHUNK;
use crate::error::PrimeError;

/// Post-processing pass producing a globally ordered output file.
///
/// The sink only orders each flush window, so global order needs the whole
/// file in memory at once.
#[derive(Debug, Clone, Copy)]
pub struct FinalSortPass {
    chunk_lines: usize,
}

impl FinalSortPass {
    /// Flush the writer every `chunk_lines` lines (at least one).
    #[must_use]
    pub fn new(chunk_lines: usize) -> Self {
        Self {
            chunk_lines: chunk_lines.max(1),
        }
    }

    /// Sort `presorted` into `output`, then delete `presorted`.
    ///
    /// Every line is parsed before `output` is created, so a malformed file
    /// never produces a partial result. Returns the number of lines written.
    pub fn run(&self, presorted: &Path, output: &Path) -> Result<u64, PrimeError> {
        let mut primes = read_primes(presorted)?;
        primes.sort();

        let file = File::create(output).map_err(|e| PrimeError::io(output, e))?;
        let mut writer = BufWriter::new(file);
        let mut written = 0u64;
        for (i, prime) in primes.iter().enumerate() {
            writeln!(writer, "{prime}").map_err(|e| PrimeError::io(output, e))?;
            written += 1;
            if (i + 1) % self.chunk_lines == 0 {
                writer.flush().map_err(|e| PrimeError::io(output, e))?;
            }
        }
        writer.flush().map_err(|e| PrimeError::io(output, e))?;
        drop(writer);

        std::fs::remove_file(presorted).map_err(|e| PrimeError::io(presorted, e))?;
        info!(lines = written, output = %output.display(), "final sort complete");
        Ok(written)
    }
}

impl Default for FinalSortPass {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_CHUNK)
    }
}

/// Read one decimal integer per line. Empty lines are skipped; any other
/// line must consist of ASCII digits only.
pub fn read_primes(path: &Path) -> Result<Vec<BigUint>, PrimeError> {
    let content = std::fs::read_to_string(path).map_err(|e| PrimeError::io(path, e))?;
    parse_primes(&content)
}

fn parse_primes(content: &str) -> Result<Vec<BigUint>, PrimeError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            let malformed = || PrimeError::Parse {
                line: i + 1,
                content: line.to_string(),
            };
            // parse_bytes alone accepts a sign and digit separators.
            if !line.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            BigUint::parse_bytes(line.as_bytes(), 10).ok_or_else(malformed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sorts_and_removes_presorted() {
        let dir = TempDir::new().unwrap();
        let presorted = dir.path().join("primes.txt.presorted");
        let output = dir.path().join("primes.txt");
        std::fs::write(&presorted, "5\n11\n13\n2\n3\n7\n").unwrap();

        let written = FinalSortPass::new(2).run(&presorted, &output).unwrap();

        assert_eq!(written, 6);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "2\n3\n5\n7\n11\n13\n");
        assert!(!presorted.exists());
    }

    #[test]
    fn malformed_line_aborts_before_output() {
        let dir = TempDir::new().unwrap();
        let presorted = dir.path().join("in.presorted");
        let output = dir.path().join("out.txt");
        std::fs::write(&presorted, "5\n7\nseven\n11\n").unwrap();

        let err = FinalSortPass::default().run(&presorted, &output).unwrap_err();

        assert!(matches!(err, PrimeError::Parse { line: 3, ref content } if content == "seven"));
        assert!(!output.exists());
        assert!(presorted.exists(), "input must survive a failed pass");
    }

    #[test]
    fn negative_value_is_malformed() {
        assert!(matches!(
            parse_primes("5\n-7\n"),
            Err(PrimeError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn non_digit_lines_are_malformed() {
        let cases = [
            ("5\n1_3\n", 2),
            ("+5\n", 1),
            ("5\n11\n 7\n", 3),
            ("7 \n", 1),
        ];
        for (content, line) in cases {
            let result = parse_primes(content);
            assert!(
                matches!(result, Err(PrimeError::Parse { line: l, .. }) if l == line),
                "content = {content:?}"
            );
        }
    }

    #[test]
    fn empty_lines_are_skipped() {
        let values = parse_primes("5\n\n7\n").unwrap();
        assert_eq!(values, vec![BigUint::from(5u32), BigUint::from(7u32)]);
    }

    #[test]
    fn missing_presorted_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = FinalSortPass::default()
            .run(&dir.path().join("absent"), &dir.path().join("out.txt"))
            .unwrap_err();
        assert!(matches!(err, PrimeError::Io { .. }));
    }

    #[test]
    fn unwritable_output_is_io_error() {
        let dir = TempDir::new().unwrap();
        let presorted = dir.path().join("in.presorted");
        std::fs::write(&presorted, "5\n").unwrap();
        let output = dir.path().join("no_such_dir").join("out.txt");

        let err = FinalSortPass::default().run(&presorted, &output).unwrap_err();
        assert!(matches!(err, PrimeError::Io { .. }));
        assert!(presorted.exists());
    }

    #[test]
    fn empty_file_produces_empty_output() {
        let dir = TempDir::new().unwrap();
        let presorted = dir.path().join("in.presorted");
        let output = dir.path().join("out.txt");
        std::fs::write(&presorted, "").unwrap();

        assert_eq!(FinalSortPass::default().run(&presorted, &output).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn parses_values_beyond_u64() {
        let big = "340282366920938463463374607431768211507";
        let values = parse_primes(&format!("{big}\n5\n")).unwrap();
        assert_eq!(values[0].to_string(), big);
        assert_eq!(values[1], BigUint::from(5u32));
    }
}
