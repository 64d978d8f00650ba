// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: each use case wires the data,
// ml and infra layers together for one CLI command.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)

// Train the intent classifier and answer ad-hoc questions
pub mod train_use_case;

// Inspect a word-vector file
pub mod nearest_use_case;
