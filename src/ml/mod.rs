// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
//   model.rs      — stacked LSTM + linear intent head, masked loss
//   trainer.rs    — epoch loop, Adam, early stopping
//   inferencer.rs — single-sentence classification and evaluation
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Recurrent intent classifier architecture
pub mod model;

/// Training loop with per-epoch evaluation
pub mod trainer;

/// Sentence classification with a trained model
pub mod inferencer;
