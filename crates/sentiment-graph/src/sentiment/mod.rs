//! Sentiment buckets and the classifier seam.
//!
//! The graph builder never loads a model itself. Callers construct a
//! [`SentimentClassifier`] once and hand it in, which keeps the builder
//! testable with [`FixedClassifier`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub mod lexicon;

pub use lexicon::{preprocess, LexiconClassifier};

/// One of the three fixed sentiment buckets every post lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Scaffold order: the order sentiment nodes are inserted into a graph.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Positive => "#28a745",
            Sentiment::Negative => "#dc3545",
            Sentiment::Neutral => "#ffc107",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label is not one of the three buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl FromStr for Sentiment {
    type Err = UnknownLabel;

    /// Accepts the bucket names in any case ("positive", "Positive").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// A pure text -> label function.
///
/// Implementations must be deterministic: the same text always yields the
/// same label. The label is validated by the caller, so a classifier wrapping
/// an external model can return whatever the model emits.
pub trait SentimentClassifier {
    fn classify(&self, text: &str) -> String;
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for &T {
    fn classify(&self, text: &str) -> String {
        (**self).classify(text)
    }
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for Box<T> {
    fn classify(&self, text: &str) -> String {
        (**self).classify(text)
    }
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for Arc<T> {
    fn classify(&self, text: &str) -> String {
        (**self).classify(text)
    }
}

/// Lookup-table classifier for tests and replayed datasets.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    labels: HashMap<String, String>,
    default_label: String,
}

impl Default for FixedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedClassifier {
    /// Unlisted text is classified as `Neutral`.
    pub fn new() -> Self {
        Self {
            labels: HashMap::new(),
            default_label: Sentiment::Neutral.label().to_string(),
        }
    }

    pub fn with(mut self, text: &str, label: &str) -> Self {
        self.labels.insert(text.to_string(), label.to_string());
        self
    }

    pub fn with_default(mut self, label: &str) -> Self {
        self.default_label = label.to_string();
        self
    }
}

impl SentimentClassifier for FixedClassifier {
    fn classify(&self, text: &str) -> String {
        self.labels
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_label.clone())
    }
}
