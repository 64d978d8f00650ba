use burn::{
    nn::{
        lstm::{Lstm, LstmConfig},
        Initializer, Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{log_softmax, softmax},
};

use crate::data::batcher::IntentBatch;

// N(0, 1/fan_in)
const INIT: Initializer = Initializer::KaimingNormal { gain: 1.0, fan_out_only: false };

#[derive(Config, Debug)]
pub struct IntentLstmConfig {
    /// Word vector dimension
    pub input_size:   usize,
    /// One stacked LSTM layer per entry
    pub hidden_sizes: Vec<usize>,
    pub num_classes:  usize,
}

impl IntentLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> IntentLstm<B> {
        let mut d_input = self.input_size;
        let mut layers  = Vec::with_capacity(self.hidden_sizes.len());
        for &d_hidden in &self.hidden_sizes {
            layers.push(
                LstmConfig::new(d_input, d_hidden, true)
                    .with_initializer(INIT)
                    .init(device),
            );
            d_input = d_hidden;
        }

        let output = LinearConfig::new(d_input, self.num_classes)
            .with_initializer(INIT)
            .init(device);

        IntentLstm { layers, output }
    }
}

#[derive(Module, Debug)]
pub struct IntentLstm<B: Backend> {
    pub layers: Vec<Lstm<B>>,
    pub output: Linear<B>,
}

impl<B: Backend> IntentLstm<B> {
    /// features: [batch, vector_dim, seq_len] → logits: [batch, seq_len, num_classes]
    pub fn forward(&self, features: Tensor<B, 3>) -> Tensor<B, 3> {
        // burn's LSTM wants time on dim 1
        let mut x = features.swap_dims(1, 2);
        for layer in &self.layers {
            let (hidden, _state) = layer.forward(x, None);
            x = hidden;
        }
        self.output.forward(x)
    }

    /// Same as `forward`, but padded steps produce zero logits.
    pub fn forward_masked(&self, features: Tensor<B, 3>, feature_mask: Tensor<B, 2>) -> Tensor<B, 3> {
        self.forward(features) * feature_mask.unsqueeze_dim::<3>(2)
    }

    /// Masked cross-entropy: −log p(intent) at every label-mask step,
    /// averaged over the labelled steps in the batch.
    pub fn forward_loss(&self, batch: &IntentBatch<B>) -> Tensor<B, 1> {
        let logits    = self.forward_masked(batch.features.clone(), batch.feature_mask.clone());
        let log_probs = log_softmax(logits, 2);

        // labels: [batch, classes, seq] → [batch, seq, classes]
        let mask    = batch.label_mask.clone().unsqueeze_dim::<3>(2);
        let targets = batch.labels.clone().swap_dims(1, 2) * mask;

        let labelled = batch.label_mask.clone().sum().clamp_min(1.0);
        (log_probs * targets).sum().neg() / labelled
    }

    /// Class probabilities at the final timestep: [batch, num_classes]
    pub fn predict_last(&self, features: Tensor<B, 3>) -> Tensor<B, 2> {
        let logits = self.forward(features);
        let [batch, seq_len, classes] = logits.dims();
        let last = logits
            .slice([0..batch, seq_len - 1..seq_len, 0..classes])
            .reshape([batch, classes]);
        softmax(last, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::TensorData;

    type TestBackend = burn::backend::NdArray;

    fn model(device: &<TestBackend as Backend>::Device) -> IntentLstm<TestBackend> {
        IntentLstmConfig::new(4, vec![6, 5], 3).init(device)
    }

    #[test]
    fn test_forward_shape() {
        let device   = Default::default();
        let features = Tensor::<TestBackend, 3>::ones([2, 4, 7], &device);
        let logits   = model(&device).forward(features);
        assert_eq!(logits.dims(), [2, 7, 3]);
    }

    #[test]
    fn test_predict_last_is_a_distribution() {
        let device   = Default::default();
        let features = Tensor::<TestBackend, 3>::ones([1, 4, 5], &device);
        let probs    = model(&device).predict_last(features);
        assert_eq!(probs.dims(), [1, 3]);

        let total: f32 = probs.sum().into_scalar();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_loss_is_positive_and_finite() {
        let device = Default::default();
        let batch  = IntentBatch::<TestBackend> {
            features:     Tensor::ones([2, 4, 3], &device),
            labels:       Tensor::from_data(
                TensorData::new(
                    vec![
                        1.0f32, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
                        0.0, 0.0, 0.0,  0.0, 0.0, 1.0,  0.0, 0.0, 0.0,
                    ],
                    [2, 3, 3],
                ),
                &device,
            ),
            feature_mask: Tensor::from_data(TensorData::new(vec![1.0f32, 0.0, 0.0, 1.0, 1.0, 1.0], [2, 3]), &device),
            label_mask:   Tensor::from_data(TensorData::new(vec![1.0f32, 0.0, 0.0, 0.0, 0.0, 1.0], [2, 3]), &device),
            empty_rows:   Vec::new(),
        };

        let loss: f32 = model(&device).forward_loss(&batch).into_scalar();
        assert!(loss.is_finite());
        assert!(loss > 0.0);
    }
}
