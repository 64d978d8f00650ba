// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the questions file and the tensors the
// network trains on:
//
//   questions file
//       │
//       ▼
//   loader          → parses `<intent>\t<text>` lines
//       │
//       ▼
//   ExampleStore    → ordered examples, paged with a Cursor
//       │
//       ▼
//   CommonTokenizer → lowercase word tokens
//       │
//       ▼
//   IntentBatcher   → padded, masked, one-hot tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Parses the labelled questions file
pub mod loader;

/// Whitespace tokenizer with punctuation stripping
pub mod preprocessor;

/// Example store and caller-owned pagination
pub mod dataset;

/// Builds training batches and inference features
pub mod batcher;
