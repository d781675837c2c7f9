//! Pure mappings from a classification to what the page shows.
//!
//! Very Positive and Very Negative have their own emoji but reuse the
//! Positive / Negative colours. Anything unrecognised gets 🤔 and the
//! Neutral colours.

use crate::core::SentimentCategory;
use serde::Serialize;
use std::fmt;

/// Background, border and text colour of the result box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentColors {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

const POSITIVE_COLORS: SentimentColors = SentimentColors {
    background: "#D4EDDA",
    border: "#C3E6CB",
    text: "#155724",
};

const NEGATIVE_COLORS: SentimentColors = SentimentColors {
    background: "#F8D7DA",
    border: "#F5C6CB",
    text: "#721C24",
};

const NEUTRAL_COLORS: SentimentColors = SentimentColors {
    background: "#D1ECF1",
    border: "#BEE5EB",
    text: "#0C5460",
};

pub fn sentiment_emoji(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::VeryPositive => "🤩",
        SentimentCategory::Positive => "😊",
        SentimentCategory::Neutral => "😐",
        SentimentCategory::Negative => "😞",
        SentimentCategory::VeryNegative => "😡",
        SentimentCategory::Unrecognized => "🤔",
    }
}

pub fn sentiment_colors(category: SentimentCategory) -> SentimentColors {
    match category {
        SentimentCategory::VeryPositive | SentimentCategory::Positive => POSITIVE_COLORS,
        SentimentCategory::VeryNegative | SentimentCategory::Negative => NEGATIVE_COLORS,
        SentimentCategory::Neutral | SentimentCategory::Unrecognized => NEUTRAL_COLORS,
    }
}

/// Bar colour in the confidence chart.
pub fn chart_color(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::VeryPositive | SentimentCategory::Positive => "#00CC96",
        SentimentCategory::VeryNegative | SentimentCategory::Negative => "#EF553B",
        SentimentCategory::Neutral | SentimentCategory::Unrecognized => "#636EFA",
    }
}

/// Qualitative reading of a score. Thresholds are strict: exactly 0.9 is `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBucket {
    VeryHigh,
    High,
    Moderate,
    Low,
    VeryLow,
}

impl ConfidenceBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBucket::VeryHigh => "Muy alta confianza",
            ConfidenceBucket::High => "Alta confianza",
            ConfidenceBucket::Moderate => "Confianza moderada",
            ConfidenceBucket::Low => "Baja confianza",
            ConfidenceBucket::VeryLow => "Muy baja confianza",
        }
    }
}

impl fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn interpret_confidence(score: f32) -> ConfidenceBucket {
    if score > 0.9 {
        ConfidenceBucket::VeryHigh
    } else if score > 0.8 {
        ConfidenceBucket::High
    } else if score > 0.6 {
        ConfidenceBucket::Moderate
    } else if score > 0.4 {
        ConfidenceBucket::Low
    } else {
        ConfidenceBucket::VeryLow
    }
}

/// Sentence shown in the interpretation panel (three levels: > 0.8, > 0.6, rest).
pub fn interpretation(score: f32) -> &'static str {
    if score > 0.8 {
        "Alta confianza - El modelo está muy seguro de su predicción."
    } else if score > 0.6 {
        "Confianza moderada - El modelo tiene buena certeza."
    } else {
        "Baja confianza - El sentimiento podría ser ambiguo."
    }
}

/// `0.8234` → `"82.34%"`.
pub fn format_percentage(value: f32) -> String {
    format!("{:.2}%", f64::from(value) * 100.0)
}
