// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate the configuration
//   Step 2: Load the word vectors           (Layer 6 - infra)
//   Step 3: Load the labelled questions     (Layer 4 - data)
//   Step 4: Build the batcher               (Layer 4 - data)
//   Step 5: Save the effective config       (Layer 6 - infra)
//   Step 6: Run the training loop           (Layer 5 - ml)
//   Step 7: Classify any ad-hoc questions   (Layer 5 - ml)
//
// The trained network is kept in memory only.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{batcher::IntentBatcher, dataset::ExampleStore, preprocessor::CommonTokenizer};
use crate::domain::example::{Example, IntentLabels};
use crate::infra::{config_file::save_config, metrics::MetricsLogger, word_vectors::WordVectors};
use crate::ml::inferencer::Prediction;
use crate::ml::trainer::{run_training, TrainOutcome};

// ─── Training Configuration ──────────────────────────────────────────────────
// All paths and hyperparameters for a training run.
// #[serde(default)] lets a config file name only the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// `<intent>\t<question>` training file
    pub questions_path:     String,
    /// Whitespace-delimited word vector file
    pub vectors_path:       String,
    /// Where metrics.csv and train_config.json are written
    pub metrics_dir:        String,
    pub batch_size:         usize,
    /// Maximum timesteps per training example
    pub truncate_len:       usize,
    /// Padded length of single-sentence inference features
    pub eval_max_len:       usize,
    pub epochs:             usize,
    /// Training stops once accuracy is strictly above this
    pub accuracy_threshold: f64,
    pub lr:                 f64,
    pub weight_decay:       f32,
    /// Element-wise gradient clipping threshold
    pub grad_clip:          f32,
    pub hidden_sizes:       Vec<usize>,
    pub seed:               u64,
    pub intents:            IntentLabels,
    pub eval_set:           Vec<Example>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            questions_path:     "data/chatbot-questions.txt".to_string(),
            vectors_path:       "data/word-vectors.txt".to_string(),
            metrics_dir:        "runs".to_string(),
            batch_size:         32,
            truncate_len:       15,
            eval_max_len:       10,
            epochs:             1000,
            accuracy_threshold: 0.95,
            lr:                 0.005,
            weight_decay:       1e-5,
            grad_clip:          1.0,
            hidden_sizes:       vec![40, 30, 20],
            seed:               42,
            intents:            IntentLabels::default(),
            eval_set:           default_eval_set(),
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        if self.truncate_len == 0 {
            bail!("truncate_len must be at least 1");
        }
        if self.eval_max_len == 0 {
            bail!("eval_max_len must be at least 1");
        }
        if self.intents.is_empty() {
            bail!("at least one intent is required");
        }
        if self.hidden_sizes.is_empty() || self.hidden_sizes.contains(&0) {
            bail!("hidden_sizes must list at least one non-zero layer size");
        }
        if let Some(e) = self.eval_set.iter().find(|e| e.intent >= self.intents.len()) {
            bail!(
                "eval sentence '{}' has intent {}, but only {} intents are defined",
                e.text, e.intent, self.intents.len()
            );
        }
        Ok(())
    }
}

/// Held-out interview questions, phrased differently from the training file.
fn default_eval_set() -> Vec<Example> {
    [
        (0, "Hello"),
        (2, "Where did you attend school?"),
        (3, "What about programming do you like?"),
        (1, "How are you?"),
        (5, "Tell me why I should hire you."),
        (7, "Talk about your weaknesses."),
        (6, "What are your strengths?"),
        (4, "What projects have you been working on?"),
        (0, "Hi"),
        (2, "What school did you go to?"),
        (7, "What is your biggest weakness?"),
        (1, "How have you been recently"),
        (5, "Why should we hire you instead of someone else?"),
        (4, "What have you done to improve yourself?"),
        (0, "Nice to meet you."),
        (2, "What school did you graduate from?"),
        (8, "What was your major"),
        (2, "What school be you attending?"),
        (8, "What did you major in?"),
        (2, "What college did you go to?"),
    ]
    .into_iter()
    .map(|(intent, text)| Example::new(intent, text))
    .collect()
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
    /// Sentences to classify once training is done
    ask:    Vec<String>,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig, ask: Vec<String>) -> Self {
        Self { config, ask }
    }

    /// Run the pipeline; returns one prediction per `ask` sentence.
    pub fn execute(&self) -> Result<Vec<(String, Result<Prediction>)>> {
        let cfg = &self.config;

        // ── Step 1: Fail fast on bad hyperparameters ──────────────────────────
        cfg.validate()?;

        // ── Step 2: Word vectors ──────────────────────────────────────────────
        tracing::info!("Loading word vectors from '{}'", cfg.vectors_path);
        let vectors = WordVectors::load(&cfg.vectors_path)
            .with_context(|| format!("Cannot load word vectors from '{}'", cfg.vectors_path))?;

        // ── Step 3: Labelled questions ────────────────────────────────────────
        tracing::info!("Loading questions from '{}'", cfg.questions_path);
        let store = ExampleStore::load(&cfg.questions_path)
            .with_context(|| format!("Cannot load questions from '{}'", cfg.questions_path))?;
        store.validate_labels(cfg.intents.len())?;
        tracing::info!("Loaded {} training examples", store.total_count());

        // ── Step 4: Batcher ───────────────────────────────────────────────────
        let batcher = IntentBatcher::new(
            Arc::new(CommonTokenizer::new()),
            Arc::new(vectors),
            cfg.truncate_len,
            cfg.intents.len(),
        );

        // ── Step 5: Record exactly what this run used ─────────────────────────
        let metrics = MetricsLogger::new(&cfg.metrics_dir)?;
        save_config(cfg, std::path::Path::new(&cfg.metrics_dir).join("train_config.json"))?;

        // ── Step 6: Training loop (Layer 5) ───────────────────────────────────
        let TrainOutcome { classifier, report, epochs_run, converged, .. } =
            run_training(cfg, &store, batcher, &metrics)?;

        if converged {
            tracing::info!("Reached {:.1}% accuracy after {} epochs", report.accuracy() * 100.0, epochs_run);
        } else {
            tracing::warn!(
                "Stopped after {} epochs at {:.1}% accuracy (threshold {:.1}%)",
                epochs_run,
                report.accuracy() * 100.0,
                cfg.accuracy_threshold * 100.0
            );
        }

        // ── Step 7: Answer the ad-hoc questions ───────────────────────────────
        Ok(self
            .ask
            .iter()
            .map(|q| (q.clone(), classifier.classify(q).map_err(anyhow::Error::from)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = TrainConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.eval_set.len(), 20);
        assert_eq!(cfg.hidden_sizes, vec![40, 30, 20]);
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let cfg = TrainConfig { batch_size: 0, ..TrainConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_lengths_and_empty_layers() {
        let base = TrainConfig::default();
        let bad  = [
            TrainConfig { truncate_len: 0, ..base.clone() },
            TrainConfig { eval_max_len: 0, ..base.clone() },
            TrainConfig { intents: IntentLabels::new(Vec::<String>::new()), eval_set: Vec::new(), ..base.clone() },
            TrainConfig { hidden_sizes: Vec::new(), ..base.clone() },
            TrainConfig { hidden_sizes: vec![40, 0, 20], ..base.clone() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "accepted {cfg:?}");
        }
    }

    #[test]
    fn test_rejects_eval_intent_outside_label_set() {
        let mut cfg = TrainConfig::default();
        cfg.eval_set.push(Example::new(9, "out of range"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_missing_vectors_file_is_reported() {
        let cfg = TrainConfig {
            vectors_path: "/definitely/not/here.txt".to_string(),
            ..TrainConfig::default()
        };
        let err = TrainUseCase::new(cfg, Vec::new()).execute().unwrap_err();
        assert!(err.to_string().contains("word vectors"));
    }
}
