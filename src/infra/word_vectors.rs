// ============================================================
// Layer 6 — Word Vector Store
// ============================================================
// Loads pre-trained word embeddings from a plain text file and
// serves them to the batcher through the EmbeddingProvider trait.
//
// File format — one word per line, whitespace separated:
//
//   hello 0.0123 -0.4410 0.0982 ... (d floats)
//   school -0.2231 0.1170 0.5012 ...
//
// A word2vec-style header line ("<count> <dim>") is accepted
// and skipped. The first vector fixes the dimension; every
// other line must match it.
//
// All vectors live in one flat Vec<f32> (row = word) so a
// lookup is a HashMap hit plus a slice, no allocation.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::error::{IntentError, Result};
use crate::domain::traits::EmbeddingProvider;

#[derive(Debug)]
pub struct WordVectors {
    /// word → row index into `data`
    index: HashMap<String, usize>,
    /// Row order = file order
    words: Vec<String>,
    data:  Vec<f32>,
    dim:   usize,
}

impl WordVectors {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path    = path.as_ref();
        let file    = File::open(path)?;
        let vectors = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "Loaded {} word vectors (dim={}) from '{}'",
            vectors.len(),
            vectors.dim,
            path.display()
        );
        Ok(vectors)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut index = HashMap::new();
        let mut words = Vec::new();
        let mut data  = Vec::new();
        let mut dim   = None;

        for (i, line) in reader.lines().enumerate() {
            let line    = line?;
            let line_no = i + 1;
            let mut fields = line.split_whitespace();

            let Some(word) = fields.next() else { continue };
            let rest: Vec<&str> = fields.collect();

            if words.is_empty() && dim.is_none() && is_header(word, &rest) {
                continue;
            }

            let values = rest
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| IntentError::MalformedVector {
                    line:   line_no,
                    reason: format!("'{word}': {e}"),
                })?;

            let expected = *dim.get_or_insert(values.len());
            if values.is_empty() || values.len() != expected {
                return Err(IntentError::MalformedVector {
                    line:   line_no,
                    reason: format!("'{word}' has {} values, expected {expected}", values.len()),
                });
            }

            // Later duplicates overwrite earlier ones, same row
            match index.get(word) {
                Some(&row) => {
                    data[row * expected..(row + 1) * expected].copy_from_slice(&values);
                }
                None => {
                    index.insert(word.to_string(), words.len());
                    words.push(word.to_string());
                    data.extend_from_slice(&values);
                }
            }
        }

        let dim = dim.ok_or_else(|| IntentError::MalformedVector {
            line:   0,
            reason: "no word vectors found".to_string(),
        })?;

        Ok(Self { index, words, data, dim })
    }

    /// Number of words with a vector
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The `k` words closest to `word` by cosine similarity, best first.
    /// The query word itself is never returned.
    pub fn nearest(&self, word: &str, k: usize) -> Result<Vec<(String, f32)>> {
        let query = self
            .vector(word)
            .ok_or_else(|| IntentError::UnknownWord(word.to_string()))?;
        let query_norm = norm(query);

        let mut scored: Vec<(String, f32)> = self
            .words
            .iter()
            .enumerate()
            .filter(|(_, w)| w.as_str() != word)
            .map(|(row, w)| {
                let v = self.row(row);
                let denom = query_norm * norm(v);
                let sim = if denom > 0.0 { dot(query, v) / denom } else { 0.0 };
                (w.clone(), sim)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        Ok(scored)
    }

    fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.dim..(row + 1) * self.dim]
    }
}

impl EmbeddingProvider for WordVectors {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&row| self.row(row))
    }
}

/// "<count> <dim>" — exactly two non-negative integers.
fn is_header(first: &str, rest: &[&str]) -> bool {
    rest.len() == 1 && first.parse::<usize>().is_ok() && rest[0].parse::<usize>().is_ok()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}
