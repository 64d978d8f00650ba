// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands: `train` and `nearest`.
//
// `train` starts from TrainConfig::default(), applies the JSON
// file given with --config (if any), then applies any flags.
// Flags always win over the file.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::infra::config_file::load_config;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the intent classifier and report accuracy each epoch
    Train(TrainArgs),

    /// List the words closest to a word in the embedding file
    Nearest(NearestArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON config file; fields it omits keep their defaults
    #[arg(long)]
    pub config: Option<String>,

    /// Tab-separated `<intent>\t<question>` training file
    #[arg(long)]
    pub questions: Option<String>,

    /// Word vector file, one `word f1 ... fd` per line
    #[arg(long)]
    pub vectors: Option<String>,

    /// Directory for metrics.csv and the effective train_config.json
    #[arg(long)]
    pub metrics_dir: Option<String>,

    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Longer questions are cut to this many words during training
    #[arg(long)]
    pub truncate_len: Option<usize>,

    /// Maximum number of passes over the training file
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Stop once evaluation accuracy is above this fraction
    #[arg(long)]
    pub threshold: Option<f64>,

    #[arg(long)]
    pub lr: Option<f64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Question to classify after training (repeatable)
    #[arg(long = "ask")]
    pub ask: Vec<String>,
}

impl TrainArgs {
    /// Defaults → config file → flags.
    pub fn to_config(&self) -> Result<TrainConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None       => TrainConfig::default(),
        };

        if let Some(v) = &self.questions   { cfg.questions_path     = v.clone(); }
        if let Some(v) = &self.vectors     { cfg.vectors_path       = v.clone(); }
        if let Some(v) = &self.metrics_dir { cfg.metrics_dir        = v.clone(); }
        if let Some(v) = self.batch_size   { cfg.batch_size         = v; }
        if let Some(v) = self.truncate_len { cfg.truncate_len       = v; }
        if let Some(v) = self.epochs       { cfg.epochs             = v; }
        if let Some(v) = self.threshold    { cfg.accuracy_threshold = v; }
        if let Some(v) = self.lr           { cfg.lr                 = v; }
        if let Some(v) = self.seed         { cfg.seed               = v; }

        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct NearestArgs {
    #[arg(long, default_value = "data/word-vectors.txt")]
    pub vectors: String,

    #[arg(long)]
    pub word: String,

    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn train_args(argv: &[&str]) -> TrainArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Train(args) => args,
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = train_args(&[
            "intent-rnn", "train", "--epochs", "5", "--batch-size", "4",
            "--ask", "Hello", "--ask", "What is your major?",
        ]);
        let cfg = args.to_config().unwrap();
        assert_eq!(cfg.epochs, 5);
        assert_eq!(cfg.batch_size, 4);
        assert_eq!(cfg.truncate_len, 15);
        assert_eq!(args.ask, vec!["Hello", "What is your major?"]);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "epochs": 20, "lr": 0.01 }"#).unwrap();

        let path = path.to_string_lossy().to_string();
        let cfg  = train_args(&["intent-rnn", "train", "--config", &path, "--epochs", "2"])
            .to_config()
            .unwrap();
        assert_eq!(cfg.epochs, 2);
        assert_eq!(cfg.lr, 0.01);
    }

    #[test]
    fn test_nearest_defaults() {
        let cli = Cli::try_parse_from(["intent-rnn", "nearest", "--word", "college"]).unwrap();
        match cli.command {
            Commands::Nearest(args) => {
                assert_eq!(args.top, 5);
                assert_eq!(args.word, "college");
            }
            other => panic!("expected nearest, got {other:?}"),
        }
    }
}
