// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, traits and errors that describe what the
// system works with: labelled questions, intent names, and the
// tokenizer / embedding abstractions.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Labelled questions and the intent label set
pub mod example;

// Tokenizer and EmbeddingProvider abstractions
pub mod traits;

// The IntentError enum shared by every layer below the CLI
pub mod error;
