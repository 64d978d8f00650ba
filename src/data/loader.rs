// ============================================================
// Layer 4 — Questions File Loader
// ============================================================
// Reads the labelled questions file into memory.
//
// File format (UTF-8, no header, one example per line):
//
//   0\tHello
//   1\tHow are you
//   2\tWhere did you go to school
//
// The number before the tab is the intent index into the label
// set; everything after the first tab is the question text.
//
// Blank lines are skipped. Any other line that doesn't match
// the format aborts the whole load — training on a partially
// parsed file would silently drop examples.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::error::{IntentError, Result};
use crate::domain::example::Example;

/// Load every example from a questions file, in file order.
pub fn load_examples(path: impl AsRef<Path>) -> Result<Vec<Example>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let examples = parse_examples(BufReader::new(file))?;
    tracing::debug!("Parsed {} examples from '{}'", examples.len(), path.display());
    Ok(examples)
}

/// Parse examples from any buffered reader.
pub fn parse_examples<R: BufRead>(reader: R) -> Result<Vec<Example>> {
    let mut examples = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        // Windows line endings leave a trailing \r behind
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        examples.push(parse_line(line, i + 1)?);
    }

    Ok(examples)
}

/// Parse one `<intent>\t<text>` line. `line_no` is 1-based.
fn parse_line(line: &str, line_no: usize) -> Result<Example> {
    let (intent, text) = line.split_once('\t').ok_or_else(|| IntentError::MalformedRecord {
        line:   line_no,
        reason: "missing tab separator".to_string(),
    })?;

    let intent = intent.trim().parse::<usize>().map_err(|e| IntentError::MalformedRecord {
        line:   line_no,
        reason: format!("intent '{}' is not a non-negative integer: {e}", intent.trim()),
    })?;

    Ok(Example::new(intent, text))
}
