use std::fmt;

use serde::{Deserialize, Serialize};

/// The six toxicity categories the classification service scores.
/// `ALL` fixes the canonical iteration order; every argmax/tie-break
/// downstream relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Toxic,
    SevereToxic,
    Obscene,
    Threat,
    Insult,
    IdentityHate,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Toxic,
        Category::SevereToxic,
        Category::Obscene,
        Category::Threat,
        Category::Insult,
        Category::IdentityHate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Toxic => "toxic",
            Category::SevereToxic => "severe_toxic",
            Category::Obscene => "obscene",
            Category::Threat => "threat",
            Category::Insult => "insult",
            Category::IdentityHate => "identity_hate",
        }
    }

    /// Human-readable label (underscores replaced with spaces).
    pub fn label(&self) -> &'static str {
        match self {
            Category::SevereToxic => "severe toxic",
            Category::IdentityHate => "identity hate",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-comment scores in [0, 1], one per category. Produced only by the
/// remote classifier; nothing in this crate computes scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ToxicityScores {
    #[serde(default)]
    pub toxic: f64,
    #[serde(default)]
    pub severe_toxic: f64,
    #[serde(default)]
    pub obscene: f64,
    #[serde(default)]
    pub threat: f64,
    #[serde(default)]
    pub insult: f64,
    #[serde(default)]
    pub identity_hate: f64,
}

impl ToxicityScores {
    pub fn score(&self, category: Category) -> f64 {
        match category {
            Category::Toxic => self.toxic,
            Category::SevereToxic => self.severe_toxic,
            Category::Obscene => self.obscene,
            Category::Threat => self.threat,
            Category::Insult => self.insult,
            Category::IdentityHate => self.identity_hate,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.score(c)))
    }

    /// Highest-scoring category. Ties resolve to the category that comes
    /// first in the canonical order.
    pub fn top_category(&self) -> (Category, f64) {
        let mut top = (Category::Toxic, self.toxic);
        for (category, score) in self.iter().skip(1) {
            if score > top.1 {
                top = (category, score);
            }
        }
        top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_category_returns_highest() {
        let scores = ToxicityScores {
            insult: 0.9,
            toxic: 0.4,
            ..Default::default()
        };
        assert_eq!(scores.top_category(), (Category::Insult, 0.9));
    }

    #[test]
    fn top_category_tie_breaks_on_canonical_order() {
        let scores = ToxicityScores {
            obscene: 0.7,
            threat: 0.7,
            ..Default::default()
        };
        // Obscene precedes Threat in Category::ALL.
        assert_eq!(scores.top_category().0, Category::Obscene);
    }

    #[test]
    fn top_category_of_all_zero_is_first() {
        let scores = ToxicityScores::default();
        assert_eq!(scores.top_category(), (Category::Toxic, 0.0));
    }

    #[test]
    fn deserializes_server_shape() {
        let json = r#"{"toxic":0.91,"severe_toxic":0.1,"obscene":0.5,"threat":0.0,"insult":0.88,"identity_hate":0.02}"#;
        let scores: ToxicityScores = serde_json::from_str(json).unwrap();
        assert_eq!(scores.toxic, 0.91);
        assert_eq!(scores.score(Category::IdentityHate), 0.02);
    }

    #[test]
    fn missing_keys_default_to_zero() {
        let scores: ToxicityScores = serde_json::from_str(r#"{"toxic":0.3}"#).unwrap();
        assert_eq!(scores.insult, 0.0);
    }
}
