// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Classifies single sentences with a trained network and scores
// the network against a fixed labelled evaluation set.
//
// The prediction is read at the FINAL timestep of the output.
// Inference features are padded up to `max_len` steps, so for
// short sentences the network keeps running over zero vectors
// before the class is read off.
use burn::prelude::*;

use crate::data::batcher::IntentBatcher;
use crate::domain::error::{IntentError, Result};
use crate::domain::example::{Example, IntentLabels};
use crate::ml::model::IntentLstm;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub intent:     usize,
    pub label:      String,
    /// Softmax probability of `intent` at the final timestep
    pub confidence: f32,
}

/// Correct / total over an evaluation set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalReport {
    pub correct: usize,
    pub total:   usize,
}

impl EvalReport {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.correct as f64 / self.total as f64 }
    }
}

pub struct IntentClassifier<B: Backend> {
    model:   IntentLstm<B>,
    batcher: IntentBatcher,
    labels:  IntentLabels,
    max_len: usize,
    device:  B::Device,
}

impl<B: Backend> IntentClassifier<B> {
    pub fn new(
        model:   IntentLstm<B>,
        batcher: IntentBatcher,
        labels:  IntentLabels,
        max_len: usize,
        device:  B::Device,
    ) -> Self {
        Self { model, batcher, labels, max_len, device }
    }

    pub fn classify(&self, sentence: &str) -> Result<Prediction> {
        if self.batcher.tokenize_filtered(sentence).is_empty() {
            return Err(IntentError::NoKnownTokens(sentence.to_string()));
        }

        let features = self
            .batcher
            .build_inference_features::<B>(sentence, self.max_len, &self.device);
        let probs: Vec<f32> = self.model.predict_last(features).into_data().iter::<f32>().collect();

        // First index wins ties
        let (intent, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |best, (i, p)| if p > best.1 { (i, p) } else { best });

        let label = self.labels.name(intent).unwrap_or("<unnamed>").to_string();
        Ok(Prediction { intent, label, confidence })
    }

    /// Classify every sentence and count exact intent matches.
    /// Sentences with no known words count as misses.
    pub fn evaluate(&self, eval_set: &[Example]) -> EvalReport {
        let mut report = EvalReport { correct: 0, total: eval_set.len() };

        for example in eval_set {
            match self.classify(&example.text) {
                Ok(p) if p.intent == example.intent => report.correct += 1,
                Ok(p) => tracing::debug!(
                    "'{}' → {} ({:.3}), expected {}",
                    example.text, p.intent, p.confidence, example.intent
                ),
                Err(e) => tracing::debug!("Evaluation miss: {e}"),
            }
        }

        report
    }
}
