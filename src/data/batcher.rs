// ============================================================
// Layer 4 — Intent Batcher
// ============================================================
// Converts labelled questions into the padded, masked tensors
// the recurrent network trains on.
//
// Shapes (B = examples in the batch, D = vector dimension,
//         C = number of intents, T = max_len):
//
//   features      [B, D, T]  word vector of token j at [i, :, j]
//   labels        [B, C, T]  one-hot intent at the LAST real step
//   feature_mask  [B, T]     1 where row i has a real token
//   label_mask    [B, T]     1 only at row i's last real step
//
//   T = min(truncate_len, longest filtered sentence in the batch)
//
// Example with truncate_len = 15 and vocabulary
// {hello, how, are, you}:
//
//   0  "Hello"        → [hello]          (1 step)
//   1  "How are you"  → [how, are, you]  (3 steps)
//
//   T = 3
//   feature_mask = [[1, 0, 0],
//                   [1, 1, 1]]
//   label_mask   = [[1, 0, 0],
//                   [0, 0, 1]]
//   labels[0, 0, 0] = 1, labels[1, 1, 2] = 1
//
// A row whose sentence has no known words has no last step;
// it gets no label and no mask, and its index is reported in
// `empty_rows`. If EVERY row is empty then T = 0 and the
// batch is degenerate; the trainer skips it.
//
// Inference uses a different length policy (see
// `build_inference_features`) and the two are deliberately
// kept as separate functions.
//
// Reference: Burn Book §4 (Batcher)

use std::sync::Arc;

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::domain::example::Example;
use crate::domain::traits::{EmbeddingProvider, Tokenizer};

// ─── IntentBatch ──────────────────────────────────────────────────────────────
/// One mini-batch of masked sequence-classification tensors.
#[derive(Debug, Clone)]
pub struct IntentBatch<B: Backend> {
    /// [batch_size, vector_dim, max_len]
    pub features: Tensor<B, 3>,

    /// [batch_size, num_classes, max_len]
    pub labels: Tensor<B, 3>,

    /// [batch_size, max_len]
    pub feature_mask: Tensor<B, 2>,

    /// [batch_size, max_len]
    pub label_mask: Tensor<B, 2>,

    /// Rows whose sentence kept no tokens after filtering
    pub empty_rows: Vec<usize>,
}

impl<B: Backend> IntentBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.features.dims()[0]
    }

    pub fn max_len(&self) -> usize {
        self.features.dims()[2]
    }

    /// True when there is nothing to train on: no rows, or no timesteps.
    pub fn is_degenerate(&self) -> bool {
        self.batch_size() == 0 || self.max_len() == 0
    }
}

// ─── IntentBatcher ────────────────────────────────────────────────────────────
#[derive(Clone)]
pub struct IntentBatcher {
    tokenizer:    Arc<dyn Tokenizer>,
    embeddings:   Arc<dyn EmbeddingProvider>,
    truncate_len: usize,
    num_classes:  usize,
}

impl IntentBatcher {
    pub fn new(
        tokenizer:    Arc<dyn Tokenizer>,
        embeddings:   Arc<dyn EmbeddingProvider>,
        truncate_len: usize,
        num_classes:  usize,
    ) -> Self {
        Self { tokenizer, embeddings, truncate_len, num_classes }
    }

    pub fn vector_dim(&self) -> usize {
        self.embeddings.dimension()
    }

    /// Tokenize `text` and keep only the tokens that have a word vector.
    pub fn tokenize_filtered(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|t| self.embeddings.has_word(t))
            .collect()
    }

    /// Build the training tensors for `examples`.
    pub fn build_training_batch<B: Backend>(
        &self,
        examples: &[Example],
        device:   &B::Device,
    ) -> IntentBatch<B> {
        let batch_size  = examples.len();
        let dim         = self.vector_dim();
        let num_classes = self.num_classes;

        // ── Step 1: tokenize + filter, find the padded length ─────────────────
        let all_tokens: Vec<Vec<String>> = examples
            .iter()
            .map(|e| self.tokenize_filtered(&e.text))
            .collect();

        let longest = all_tokens.iter().map(Vec::len).max().unwrap_or(0);
        let max_len = longest.min(self.truncate_len);

        // ── Step 2: zero-filled row-major buffers ─────────────────────────────
        let mut features     = vec![0.0f32; batch_size * dim * max_len];
        let mut labels       = vec![0.0f32; batch_size * num_classes * max_len];
        let mut feature_mask = vec![0.0f32; batch_size * max_len];
        let mut label_mask   = vec![0.0f32; batch_size * max_len];
        let mut empty_rows   = Vec::new();

        for (i, (example, tokens)) in examples.iter().zip(&all_tokens).enumerate() {
            // ── Step 3: word vectors + feature mask ───────────────────────────
            for (j, token) in tokens.iter().take(max_len).enumerate() {
                if let Some(vector) = self.embeddings.vector(token) {
                    for (k, &value) in vector.iter().enumerate() {
                        features[(i * dim + k) * max_len + j] = value;
                    }
                }
                feature_mask[i * max_len + j] = 1.0;
            }

            // ── Step 4: one-hot label at the last real step ───────────────────
            let steps = tokens.len().min(max_len);
            let Some(last_idx) = steps.checked_sub(1) else {
                tracing::debug!("Row {} ('{}') has no known words, no label written", i, example.text);
                empty_rows.push(i);
                continue;
            };

            if example.intent >= num_classes {
                tracing::warn!(
                    "Row {} has intent {} but only {} intents exist, no label written",
                    i, example.intent, num_classes
                );
                continue;
            }

            labels[(i * num_classes + example.intent) * max_len + last_idx] = 1.0;
            label_mask[i * max_len + last_idx] = 1.0;
        }

        IntentBatch {
            features:     tensor3(features, [batch_size, dim, max_len], device),
            labels:       tensor3(labels, [batch_size, num_classes, max_len], device),
            feature_mask: tensor2(feature_mask, [batch_size, max_len], device),
            label_mask:   tensor2(label_mask, [batch_size, max_len], device),
            empty_rows,
        }
    }

    /// Build the features for classifying one sentence: [1, vector_dim, len]
    /// with `len = max(requested_len, number of known tokens)`.
    ///
    /// Unlike training batches this never truncates, and it pads up to
    /// `requested_len` even when the sentence is shorter.
    pub fn build_inference_features<B: Backend>(
        &self,
        sentence:      &str,
        requested_len: usize,
        device:        &B::Device,
    ) -> Tensor<B, 3> {
        let dim     = self.vector_dim();
        let tokens  = self.tokenize_filtered(sentence);
        let out_len = requested_len.max(tokens.len());

        let mut features = vec![0.0f32; dim * out_len];
        for (j, token) in tokens.iter().enumerate() {
            if let Some(vector) = self.embeddings.vector(token) {
                for (k, &value) in vector.iter().enumerate() {
                    features[k * out_len + j] = value;
                }
            }
        }

        tensor3(features, [1, dim, out_len], device)
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
impl<B: Backend> Batcher<B, Example, IntentBatch<B>> for IntentBatcher {
    fn batch(&self, items: Vec<Example>, device: &B::Device) -> IntentBatch<B> {
        self.build_training_batch(&items, device)
    }
}

fn tensor3<B: Backend>(values: Vec<f32>, shape: [usize; 3], device: &B::Device) -> Tensor<B, 3> {
    Tensor::from_data(TensorData::new(values, shape), device)
}

fn tensor2<B: Backend>(values: Vec<f32>, shape: [usize; 2], device: &B::Device) -> Tensor<B, 2> {
    Tensor::from_data(TensorData::new(values, shape), device)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::preprocessor::CommonTokenizer;
    use crate::infra::word_vectors::WordVectors;

    type TestBackend = burn::backend::NdArray;

    // hello=1, how=2, are=3, you=4 in the first component
    const VECTORS: &str = "\
hello 1.0 0.1
how 2.0 0.2
are 3.0 0.3
you 4.0 0.4
";

    fn batcher(truncate_len: usize, num_classes: usize) -> IntentBatcher {
        let vectors = WordVectors::from_reader(VECTORS.as_bytes()).unwrap();
        IntentBatcher::new(Arc::new(CommonTokenizer::new()), Arc::new(vectors), truncate_len, num_classes)
    }

    fn values<const D: usize>(t: Tensor<TestBackend, D>) -> Vec<f32> {
        t.into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_hello_how_are_you_scenario() {
        let b        = batcher(15, 9);
        let device   = Default::default();
        let examples = vec![Example::new(0, "Hello"), Example::new(1, "How are you")];
        let batch: IntentBatch<TestBackend> = b.build_training_batch(&examples, &device);

        assert_eq!(batch.features.dims(), [2, 2, 3]);
        assert_eq!(batch.labels.dims(), [2, 9, 3]);
        assert_eq!(batch.feature_mask.dims(), [2, 3]);
        assert_eq!(batch.label_mask.dims(), [2, 3]);
        assert!(batch.empty_rows.is_empty());

        // features[i, 0, j] holds the first vector component of token j
        let f = values(batch.features.clone());
        assert_eq!(&f[0..3], &[1.0, 0.0, 0.0]);  // row 0, dim 0
        assert_eq!(&f[3..6], &[0.1, 0.0, 0.0]);  // row 0, dim 1
        assert_eq!(&f[6..9], &[2.0, 3.0, 4.0]);  // row 1, dim 0

        assert_eq!(values(batch.feature_mask), vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(values(batch.label_mask), vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        let labels = values(batch.labels);
        let at = |i: usize, c: usize, t: usize| labels[(i * 9 + c) * 3 + t];
        assert_eq!(at(0, 0, 0), 1.0);
        assert_eq!(at(1, 1, 2), 1.0);
        assert_eq!(labels.iter().sum::<f32>(), 2.0);
    }

    #[test]
    fn test_unknown_words_are_dropped() {
        let b = batcher(15, 9);
        assert_eq!(b.tokenize_filtered("Hello, stranger! How are you?"), vec!["hello", "how", "are", "you"]);
        assert!(b.tokenize_filtered("xyzzy plugh").is_empty());
    }

    #[test]
    fn test_truncates_to_truncate_len() {
        let b        = batcher(2, 9);
        let device   = Default::default();
        let examples = vec![Example::new(3, "how are you hello")];
        let batch: IntentBatch<TestBackend> = b.build_training_batch(&examples, &device);

        assert_eq!(batch.max_len(), 2);
        assert_eq!(values(batch.feature_mask), vec![1.0, 1.0]);
        // Label sits at the last step that survived truncation
        assert_eq!(values(batch.label_mask), vec![0.0, 1.0]);
    }

    #[test]
    fn test_row_without_known_words_gets_no_label() {
        let b        = batcher(10, 9);
        let device   = Default::default();
        let examples = vec![Example::new(2, "xyzzy plugh"), Example::new(4, "how are you")];
        let batch: IntentBatch<TestBackend> = b.build_training_batch(&examples, &device);

        assert_eq!(batch.empty_rows, vec![0]);
        assert_eq!(batch.max_len(), 3);

        let label_mask = values(batch.label_mask);
        assert_eq!(&label_mask[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&label_mask[3..6], &[0.0, 0.0, 1.0]);

        let labels = values(batch.labels);
        assert_eq!(labels.iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn test_unknown_only_batch_is_degenerate() {
        let b        = batcher(10, 9);
        let device   = Default::default();
        let examples = vec![Example::new(0, "xyzzy plugh")];
        let batch: IntentBatch<TestBackend> = b.build_training_batch(&examples, &device);

        assert_eq!(batch.features.dims(), [1, 2, 0]);
        assert_eq!(batch.labels.dims(), [1, 9, 0]);
        assert_eq!(batch.label_mask.dims(), [1, 0]);
        assert_eq!(batch.empty_rows, vec![0]);
        assert!(batch.is_degenerate());
    }

    #[test]
    fn test_masks_match_token_counts() {
        let b        = batcher(4, 9);
        let device   = Default::default();
        let examples = vec![
            Example::new(0, "hello"),
            Example::new(1, "how are"),
            Example::new(2, "you you you you you you"),
            Example::new(3, "nothing known here"),
        ];
        let batch: IntentBatch<TestBackend> = b.build_training_batch(&examples, &device);
        let max_len = batch.max_len();
        assert_eq!(max_len, 4);

        let counts       = [1usize, 2, 6, 0];
        let feature_mask = values(batch.feature_mask);
        let label_mask   = values(batch.label_mask);

        for (i, &count) in counts.iter().enumerate() {
            for j in 0..max_len {
                let expected = if j < count && j < max_len { 1.0 } else { 0.0 };
                assert_eq!(feature_mask[i * max_len + j], expected, "feature_mask[{i},{j}]");
            }

            let row: &[f32] = &label_mask[i * max_len..(i + 1) * max_len];
            let ones = row.iter().filter(|&&v| v == 1.0).count();
            if count == 0 {
                assert_eq!(ones, 0);
            } else {
                assert_eq!(ones, 1);
                assert_eq!(row[count.min(max_len) - 1], 1.0);
            }
        }
    }

    #[test]
    fn test_out_of_range_intent_gets_no_label() {
        let b        = batcher(10, 2);
        let device   = Default::default();
        let examples = vec![Example::new(5, "hello")];
        let batch: IntentBatch<TestBackend> = b.build_training_batch(&examples, &device);

        assert!(values(batch.labels).iter().all(|&v| v == 0.0));
        assert!(values(batch.label_mask).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_batcher_trait_delegates_to_training_batch() {
        let b      = batcher(15, 9);
        let device = Default::default();
        let batch: IntentBatch<TestBackend> =
            Batcher::<TestBackend, _, _>::batch(&b, vec![Example::new(1, "how are you")], &device);
        assert_eq!(batch.features.dims(), [1, 2, 3]);
    }

    #[test]
    fn test_inference_pads_up_to_requested_len() {
        let b      = batcher(2, 9);
        let device = Default::default();
        let features: Tensor<TestBackend, 3> = b.build_inference_features("How are you?", 10, &device);

        assert_eq!(features.dims(), [1, 2, 10]);
        let f = values(features);
        assert_eq!(&f[0..4], &[2.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_inference_never_truncates() {
        // truncate_len only applies to training batches
        let b      = batcher(2, 9);
        let device = Default::default();
        let features: Tensor<TestBackend, 3> =
            b.build_inference_features("hello how are you", 1, &device);

        assert_eq!(features.dims(), [1, 2, 4]);
        let f = values(features);
        assert_eq!(&f[0..4], &[1.0, 2.0, 3.0, 4.0]);
    }
}
