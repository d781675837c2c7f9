use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(label, score)` pair returned for one analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Label exactly as the model emitted it, e.g. `"Very Positive"`.
    pub label: String,
    /// Softmax probability of `label`, in `[0, 1]`.
    pub score: f32,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    pub fn category(&self) -> SentimentCategory {
        SentimentCategory::from_label(&self.label)
    }
}

/// Closed set of sentiment classes the multilingual model can emit.
///
/// `Unrecognized` is the single fallback for any label outside the five
/// canonical ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentCategory {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
    Unrecognized,
}

impl SentimentCategory {
    /// All recognised categories, from most negative to most positive.
    pub const ALL: [SentimentCategory; 5] = [
        SentimentCategory::VeryPositive,
        SentimentCategory::Positive,
        SentimentCategory::Neutral,
        SentimentCategory::Negative,
        SentimentCategory::VeryNegative,
    ];

    /// Matches a model label against the canonical names, ignoring case and
    /// surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(label))
            .unwrap_or(SentimentCategory::Unrecognized)
    }

    /// Canonical model label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::VeryNegative => "Very Negative",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Neutral => "Neutral",
            SentimentCategory::Positive => "Positive",
            SentimentCategory::VeryPositive => "Very Positive",
            SentimentCategory::Unrecognized => "Unrecognized",
        }
    }

    /// Spanish name used in the page legend.
    pub fn display_name(&self) -> &'static str {
        match self {
            SentimentCategory::VeryNegative => "Muy Negativo",
            SentimentCategory::Negative => "Negativo",
            SentimentCategory::Neutral => "Neutral",
            SentimentCategory::Positive => "Positivo",
            SentimentCategory::VeryPositive => "Muy Positivo",
            SentimentCategory::Unrecognized => "Desconocido",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_labels() {
        assert_eq!(
            SentimentCategory::from_label("Very Positive"),
            SentimentCategory::VeryPositive
        );
        assert_eq!(
            SentimentCategory::from_label("Positive"),
            SentimentCategory::Positive
        );
        assert_eq!(
            SentimentCategory::from_label("Neutral"),
            SentimentCategory::Neutral
        );
        assert_eq!(
            SentimentCategory::from_label("Negative"),
            SentimentCategory::Negative
        );
        assert_eq!(
            SentimentCategory::from_label("Very Negative"),
            SentimentCategory::VeryNegative
        );
    }

    #[test]
    fn label_matching_ignores_case_and_padding() {
        assert_eq!(
            SentimentCategory::from_label("  very negative "),
            SentimentCategory::VeryNegative
        );
        assert_eq!(
            SentimentCategory::from_label("POSITIVE"),
            SentimentCategory::Positive
        );
    }

    #[test]
    fn unknown_labels_fall_back() {
        assert_eq!(
            SentimentCategory::from_label("LABEL_3"),
            SentimentCategory::Unrecognized
        );
        assert_eq!(
            SentimentCategory::from_label(""),
            SentimentCategory::Unrecognized
        );
    }

    #[test]
    fn result_serializes_as_label_and_score() {
        let result = ClassificationResult::new("Positive", 0.5);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "label": "Positive", "score": 0.5 }));
        assert_eq!(result.category(), SentimentCategory::Positive);
    }
}
