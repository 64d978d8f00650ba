// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to a use case.
// All printing to stdout happens here (and in the per-epoch
// progress line of the trainer); logs go through tracing.
//
//   1. `train`   — train on the questions file, then classify
//                  any --ask questions
//   2. `nearest` — closest words in the embedding file

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, NearestArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "intent-rnn",
    version,
    about = "Train an LSTM to recognise interview-question intents from word vectors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Nearest(args) => run_nearest(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let config = args.to_config()?;
    tracing::info!("Training on questions in: {}", config.questions_path);

    let answers = TrainUseCase::new(config, args.ask).execute()?;

    println!("Training complete.");
    for (question, prediction) in answers {
        match prediction {
            Ok(p)  => println!("\n{question}\n  → {} ({:.1}%)", p.label, p.confidence * 100.0),
            Err(e) => println!("\n{question}\n  → {e}"),
        }
    }
    Ok(())
}

fn run_nearest(args: NearestArgs) -> Result<()> {
    use crate::application::nearest_use_case::NearestUseCase;

    let nearest = NearestUseCase::new(args.vectors).execute(&args.word, args.top)?;
    for (word, similarity) in nearest {
        println!("{word:<20} {similarity:.4}");
    }
    Ok(())
}
