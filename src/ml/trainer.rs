// ============================================================
// Layer 5 — Training Loop
// ============================================================
// One epoch:
//   1. Walk the example store in file order with a fresh Cursor,
//      `batch_size` examples at a time
//   2. Build the masked tensors, skip batches with no known words
//   3. Masked cross-entropy → backward → Adam step
//   4. Score the evaluation set with the current weights
//
// Training stops early once accuracy is strictly above
// `accuracy_threshold`, otherwise after `epochs` epochs.
//
// Adam is configured with L2 weight decay and element-wise
// gradient clipping.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    grad_clipping::GradientClippingConfig,
    module::AutodiffModule,
    optim::{decay::WeightDecayConfig, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::IntentBatcher, dataset::{Cursor, ExampleStore}};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::inferencer::{EvalReport, IntentClassifier};
use crate::ml::model::{IntentLstm, IntentLstmConfig};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

/// Result of a training run. The classifier holds the final weights.
pub struct TrainOutcome<B: Backend> {
    pub classifier: IntentClassifier<B>,
    /// Evaluation after the last epoch that ran
    pub report:     EvalReport,
    pub epochs_run: usize,
    /// Whether the accuracy threshold was exceeded
    pub converged:  bool,
    pub history:    Vec<EpochMetrics>,
}

pub fn run_training(
    cfg:     &TrainConfig,
    store:   &ExampleStore,
    batcher: IntentBatcher,
    metrics: &MetricsLogger,
) -> Result<TrainOutcome<MyInnerBackend>> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop::<MyBackend>(cfg, store, batcher, metrics, device)
}

pub fn train_loop<B: AutodiffBackend>(
    cfg:     &TrainConfig,
    store:   &ExampleStore,
    batcher: IntentBatcher,
    metrics: &MetricsLogger,
    device:  B::Device,
) -> Result<TrainOutcome<B::InnerBackend>> {
    B::seed(cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = IntentLstmConfig::new(
        batcher.vector_dim(),
        cfg.hidden_sizes.clone(),
        cfg.intents.len(),
    );
    let mut model: IntentLstm<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: input={} lstm={:?} classes={}",
        model_cfg.input_size, model_cfg.hidden_sizes, model_cfg.num_classes
    );

    let mut optim = AdamConfig::new()
        .with_weight_decay(Some(WeightDecayConfig::new(cfg.weight_decay)))
        .with_grad_clipping(Some(GradientClippingConfig::Value(cfg.grad_clip)))
        .init();

    let mut report     = EvalReport::default();
    let mut epochs_run = 0;
    let mut converged  = false;
    let mut history    = Vec::new();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut skipped  = 0usize;

        let mut cursor = Cursor::new();
        while store.has_next(&cursor) {
            let page  = store.next(&mut cursor, cfg.batch_size)?;
            let batch = batcher.build_training_batch::<B>(page.examples, &device);

            if batch.is_degenerate() {
                tracing::warn!(
                    "Skipping batch ending at example {}: no known words",
                    cursor.position()
                );
                skipped += 1;
                continue;
            }
            if !batch.empty_rows.is_empty() {
                tracing::debug!("{} rows without known words in batch", batch.empty_rows.len());
            }

            let loss = model.forward_loss(&batch);
            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };

        // ── Evaluation (inner backend, no autodiff) ───────────────────────────
        let classifier = IntentClassifier::new(
            model.valid(),
            batcher.clone(),
            cfg.intents.clone(),
            cfg.eval_max_len,
            device.clone(),
        );
        report     = classifier.evaluate(&cfg.eval_set);
        epochs_run = epoch;

        println!(
            "Epoch {:>4}/{} | loss={:.4} | {}/{} correct ({:.1}%)",
            epoch, cfg.epochs, train_loss, report.correct, report.total,
            report.accuracy() * 100.0,
        );

        let row = EpochMetrics {
            epoch,
            train_loss,
            accuracy: report.accuracy(),
            batches,
            skipped_batches: skipped,
        };
        metrics.log(&row)?;
        history.push(row);

        if report.accuracy() > cfg.accuracy_threshold {
            converged = true;
            break;
        }
    }

    let classifier = IntentClassifier::new(
        model.valid(),
        batcher,
        cfg.intents.clone(),
        cfg.eval_max_len,
        device,
    );

    Ok(TrainOutcome { classifier, report, epochs_run, converged, history })
}
