// ============================================================
// Layer 4 — Token Preprocessor
// ============================================================
// Turns a raw question into the word tokens used to look up
// word vectors.
//
// The word-vector file was built from lower-cased text with
// punctuation and digits removed, so questions must be
// normalised the same way or most lookups would miss:
//
//   "Where did you attend school?"
//     → ["where", "did", "you", "attend", "school"]
//
// Steps (applied to each whitespace-separated piece):
//   1. Remove ASCII digits
//   2. Remove . : , " ' ( ) [ ] | / ? ! ;
//   3. Remove control characters
//   4. Lowercase
//   5. Drop the token if nothing is left
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

use crate::domain::traits::Tokenizer;

/// Characters stripped from every token, in addition to digits.
const STRIPPED: &[char] = &['.', ':', ',', '"', '\'', '(', ')', '[', ']', '|', '/', '?', '!', ';'];

/// Whitespace tokenizer with punctuation stripping and lowercasing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonTokenizer;

impl CommonTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalise a single token. May return an empty string.
    pub fn normalize(&self, token: &str) -> String {
        token
            .chars()
            .filter(|c| !c.is_ascii_digit() && !c.is_control() && !STRIPPED.contains(c))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl Tokenizer for CommonTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|piece| self.normalize(piece))
            .filter(|token| !token.is_empty())
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_question_mark() {
        let t = CommonTokenizer::new();
        assert_eq!(
            t.tokenize("Where did you attend school?"),
            vec!["where", "did", "you", "attend", "school"]
        );
    }

    #[test]
    fn test_strips_digits_and_quotes() {
        let t = CommonTokenizer::new();
        assert_eq!(t.tokenize("\"CS101\" isn't (hard)"), vec!["cs", "isnt", "hard"]);
    }

    #[test]
    fn test_keeps_non_ascii_numerals() {
        let t = CommonTokenizer::new();
        assert_eq!(t.tokenize("x² ½ 三 4"), vec!["x²", "½", "三"]);
    }

    #[test]
    fn test_drops_tokens_that_become_empty() {
        let t = CommonTokenizer::new();
        assert_eq!(t.tokenize("hello ?! 2024 world"), vec!["hello", "world"]);
    }

    #[test]
    fn test_collapses_any_whitespace() {
        let t = CommonTokenizer::new();
        assert_eq!(t.tokenize("  how\tare\u{00A0}you \n"), vec!["how", "are", "you"]);
    }

    #[test]
    fn test_empty_string() {
        let t = CommonTokenizer::new();
        assert!(t.tokenize("").is_empty());
    }
}
