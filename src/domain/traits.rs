// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The batch builder needs two collaborators:
//
//   Tokenizer          → raw sentence → normalised word tokens
//   EmbeddingProvider  → word token   → fixed-length vector
//
// Both are traits so the batcher can be tested with tiny
// in-memory vocabularies instead of a real embedding file,
// and so another tokenisation scheme can be dropped in later.
//
// Both require Send + Sync because burn's Batcher trait does.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

// ─── Tokenizer ────────────────────────────────────────────────────────────────
/// Splits a sentence into normalised word tokens.
///
/// Implementations:
///   - CommonTokenizer → whitespace split, strip digits/punctuation, lowercase
pub trait Tokenizer: Send + Sync {
    /// Tokens in sentence order. Never contains empty strings.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

// ─── EmbeddingProvider ────────────────────────────────────────────────────────
/// A lookup table from words to fixed-length vectors.
///
/// Implementations:
///   - WordVectors → loaded from a whitespace-delimited text file
pub trait EmbeddingProvider: Send + Sync {
    /// Length of every vector returned by `vector`
    fn dimension(&self) -> usize;

    /// The vector for `word`, or None if the word is unknown.
    fn vector(&self, word: &str) -> Option<&[f32]>;

    fn has_word(&self, word: &str) -> bool {
        self.vector(word).is_some()
    }
}
