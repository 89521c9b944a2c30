//! Sentiment scoring
//!
//! A [`PolarityAnalyzer`] turns text into a number in [-1, 1]; this module
//! turns that number into a three-way label and the text the model reads.

mod lexicon;

pub use lexicon::{LexiconAnalyzer, LexiconScore};

use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Polarity above this is positive, below its negation is negative
pub const LABEL_THRESHOLD: f64 = 0.1;

/// Maps text to a polarity in [-1, 1]
pub trait PolarityAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Thresholds are strict: exactly 0.1 or -0.1 is neutral
    pub fn classify(polarity: f64) -> Self {
        if polarity > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn text(self, locale: Locale) -> &'static str {
        match self {
            SentimentLabel::Positive => locale.positive(),
            SentimentLabel::Negative => locale.negative(),
            SentimentLabel::Neutral => locale.neutral(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    /// Out-of-range analyzer output is clamped, NaN counts as 0.0
    pub fn from_polarity(polarity: f64) -> Self {
        let polarity = if polarity.is_nan() {
            0.0
        } else {
            polarity.clamp(-1.0, 1.0)
        };

        Self {
            polarity,
            label: SentimentLabel::classify(polarity),
        }
    }

    pub fn score(analyzer: &dyn PolarityAnalyzer, text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::from_polarity(0.0);
        }
        Self::from_polarity(analyzer.polarity(text))
    }

    /// `<LABEL> (Score: 0.25)`
    pub fn render(&self, locale: Locale) -> String {
        format!("{} (Score: {:.2})", self.label.text(locale), self.polarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl PolarityAnalyzer for Fixed {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(SentimentLabel::classify(0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(-0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(0.1001), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify(-0.1001), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::classify(1.0), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify(-1.0), SentimentLabel::Negative);
    }

    #[test]
    fn test_render() {
        let result = SentimentResult::from_polarity(0.25);
        assert_eq!(result.render(Locale::Portuguese), "POSITIVO (Score: 0.25)");
        assert_eq!(result.render(Locale::English), "POSITIVE (Score: 0.25)");

        let result = SentimentResult::from_polarity(-0.5);
        assert_eq!(result.render(Locale::Portuguese), "NEGATIVO (Score: -0.50)");

        let result = SentimentResult::from_polarity(0.0);
        assert_eq!(result.render(Locale::Portuguese), "NEUTRO (Score: 0.00)");
    }

    #[test]
    fn test_blank_text_is_neutral() {
        let result = SentimentResult::score(&Fixed(0.9), "   \n");
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(SentimentResult::score(&Fixed(3.0), "x").polarity, 1.0);
        assert_eq!(SentimentResult::score(&Fixed(-3.0), "x").polarity, -1.0);
        assert_eq!(SentimentResult::score(&Fixed(f64::NAN), "x").polarity, 0.0);
    }
}
