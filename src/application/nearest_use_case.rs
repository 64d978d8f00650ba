// ============================================================
// Layer 2 — NearestUseCase
// ============================================================
// Sanity check for a word-vector file: list the words whose
// vectors point the same way as the query word's.
//
//   intent-rnn nearest --word college --top 5
//   → school, university, attend, graduate, ...

use anyhow::{Context, Result};

use crate::infra::word_vectors::WordVectors;

pub struct NearestUseCase {
    vectors_path: String,
}

impl NearestUseCase {
    pub fn new(vectors_path: impl Into<String>) -> Self {
        Self { vectors_path: vectors_path.into() }
    }

    pub fn execute(&self, word: &str, top: usize) -> Result<Vec<(String, f32)>> {
        let vectors = WordVectors::load(&self.vectors_path)
            .with_context(|| format!("Cannot load word vectors from '{}'", self.vectors_path))?;

        // Vectors are keyed by normalised tokens
        let word = word.to_lowercase();
        Ok(vectors.nearest(&word, top)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lowercases_query_word() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "job 1 0\nwork 0.9 0.1\nbanana 0 1\n").unwrap();

        let use_case = NearestUseCase::new(file.path().to_string_lossy());
        let nearest  = use_case.execute("JOB", 1).unwrap();
        assert_eq!(nearest[0].0, "work");
    }

    #[test]
    fn test_unknown_word_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "job 1 0\n").unwrap();

        let use_case = NearestUseCase::new(file.path().to_string_lossy());
        assert!(use_case.execute("college", 3).is_err());
    }
}
