// ============================================================
// Layer 4 — Example Store
// ============================================================
// The ordered, immutable collection of training examples, plus
// the pagination state used to walk it in batches.
//
// The read position lives in a Cursor that the CALLER owns,
// not inside the store. That way several independent passes
// can share one store, and a training epoch is simply
// "make a new Cursor, pull pages until exhausted":
//
//   let mut cursor = Cursor::default();
//   while store.has_next(&cursor) {
//       let page = store.next(&mut cursor, 32)?;
//       ...
//   }
//
// Pulling from an exhausted cursor is an error (`Exhausted`),
// which is distinct from asking for zero examples (an empty
// page, not an error).

use std::path::Path;

use crate::data::loader::{load_examples, parse_examples};
use crate::domain::error::{IntentError, Result};
use crate::domain::example::Example;

/// Read position into an ExampleStore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

/// One pull from the store.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub examples: &'a [Example],
    /// Whether the cursor still has examples left after this page
    pub has_more: bool,
}

pub struct ExampleStore {
    examples: Vec<Example>,
}

impl ExampleStore {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    /// Load a `<intent>\t<text>` questions file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(load_examples(path)?))
    }

    pub fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self> {
        Ok(Self::new(parse_examples(reader)?))
    }

    pub fn total_count(&self) -> usize {
        self.examples.len()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn has_next(&self, cursor: &Cursor) -> bool {
        cursor.position < self.examples.len()
    }

    /// Return up to `n` examples from the cursor and advance it past them.
    pub fn next<'a>(&'a self, cursor: &mut Cursor, n: usize) -> Result<Page<'a>> {
        let total = self.examples.len();
        if cursor.position >= total {
            return Err(IntentError::Exhausted { position: cursor.position, total });
        }

        let start = cursor.position;
        let end   = start.saturating_add(n).min(total);
        cursor.position = end;

        Ok(Page {
            examples: &self.examples[start..end],
            has_more: end < total,
        })
    }

    /// Check that every intent index fits the label set.
    pub fn validate_labels(&self, num_classes: usize) -> Result<()> {
        match self.examples.iter().position(|e| e.intent >= num_classes) {
            Some(index) => Err(IntentError::UnknownIntent {
                index,
                intent:  self.examples[index].intent,
                classes: num_classes,
            }),
            None => Ok(()),
        }
    }
}
