use serde::{Deserialize, Serialize};

/// Classification label returned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Capitalised label for headings ("Positive").
    pub fn title(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display bucket for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn of(confidence: f64) -> Self {
        if confidence > 0.7 {
            Self::High
        } else if confidence > 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A successful verdict from the classifier. This is also the wire format of
/// a 2xx response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub emoji: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

impl PredictionResult {
    /// Confidence as a whole percentage, rounded half up.
    pub fn percent(&self) -> u32 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u32
    }

    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::of(self.confidence)
    }
}

/// The result currently on display, with the word that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentResult {
    pub word: String,
    #[serde(flatten)]
    pub prediction: PredictionResult,
}

/// Holds the latest successful prediction, if any.
#[derive(Debug, Default)]
pub struct ResultStore {
    current: Option<CurrentResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was there.
    pub fn set(&mut self, word: impl Into<String>, prediction: PredictionResult) {
        self.current = Some(CurrentResult {
            word: word.into(),
            prediction,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&CurrentResult> {
        self.current.as_ref()
    }
}
