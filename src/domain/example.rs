// ============================================================
// Layer 3 — Example and IntentLabels Domain Types
// ============================================================
// An Example is one labelled question:
//   intent = index into the label set (the class id)
//   text   = the raw question, exactly as written in the file
//
// IntentLabels is the ordered list of human-readable intent
// names. The position of a name IS its numeric label, so the
// order must match the intent indices used in the data files.
//
//   0 → "Hello"
//   1 → "How are you"
//   ...
//   8 → "what is your major"
//
// Reference: Rust Book §5 (Structs), §8 (Vectors)

use serde::{Deserialize, Serialize};

/// One labelled training (or evaluation) question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Index of the intent class in the label set
    pub intent: usize,

    /// The raw, untokenised question text
    pub text: String,
}

impl Example {
    pub fn new(intent: usize, text: impl Into<String>) -> Self {
        Self { intent, text: text.into() }
    }
}

/// Ordered, fixed set of intent names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentLabels {
    names: Vec<String>,
}

impl IntentLabels {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    /// Number of output classes of the network
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, intent: usize) -> Option<&str> {
        self.names.get(intent).map(String::as_str)
    }
}

/// The nine interview-question intents the chatbot knows about.
impl Default for IntentLabels {
    fn default() -> Self {
        Self::new([
            "Hello",
            "How are you",
            "Where did you go to school",
            "Why programming",
            "what projects",
            "why should we hire you",
            "What are your strengths",
            "what are your weaknesses",
            "what is your major",
        ])
    }
}
