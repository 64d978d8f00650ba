// ============================================================
// Layer 6 — Config File
// ============================================================
// Reads and writes TrainConfig as pretty-printed JSON.
//
// Every field is optional in the file: missing fields fall back
// to TrainConfig::default(), so a config can be as small as
//
//   { "questions_path": "data/questions.txt", "epochs": 200 }

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::application::train_use_case::TrainConfig;

pub fn load_config(path: impl AsRef<Path>) -> Result<TrainConfig> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

    let cfg = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config JSON in '{}'", path.display()))?;

    tracing::debug!("Loaded training config from '{}'", path.display());
    Ok(cfg)
}

pub fn save_config(cfg: &TrainConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create config directory '{}'", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

    tracing::debug!("Saved training config to '{}'", path.display());
    Ok(())
}
