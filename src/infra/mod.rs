// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
//   word_vectors.rs — loads the pre-trained embedding file and
//                     answers nearest-word queries
//   config_file.rs  — TrainConfig ⇄ JSON
//   metrics.rs      — per-epoch CSV log

/// Word embedding file loader
pub mod word_vectors;

/// Training configuration persistence
pub mod config_file;

/// Training metrics CSV logger
pub mod metrics;
