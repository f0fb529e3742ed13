//! Journal sentiment scoring
//!
//! The pipeline only depends on the [`SentimentScorer`] trait. Any
//! `Fn(&str) -> f64` is a scorer, which keeps tests deterministic.
//! [`LexiconSentiment`] is a small rule-based scorer for the CLI and FFI.

use std::collections::HashMap;

/// Capability that maps journal text to a compound polarity in [-1, 1]
pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Normalization constant for the compound score
const COMPOUND_ALPHA: f64 = 15.0;

/// Scalar added (or subtracted) by intensifiers like "very"
const BOOSTER_INCR: f64 = 0.293;

/// Multiplier applied to a word preceded by a negation
const NEGATION_SCALAR: f64 = -0.74;

/// Emphasis added per exclamation mark (capped at four)
const EXCLAMATION_INCR: f64 = 0.292;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "cannot", "without",
    "hardly",
];

const BOOSTERS: &[&str] = &[
    "very", "really", "extremely", "so", "incredibly", "totally", "absolutely", "completely",
    "super", "deeply", "truly",
];

const DAMPENERS: &[&str] = &[
    "slightly", "somewhat", "kinda", "kind", "sort", "sorta", "barely", "little", "marginally",
];

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("glad", 2.0),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("wonderful", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("nice", 1.8),
    ("fun", 2.3),
    ("calm", 1.3),
    ("relaxed", 2.2),
    ("peaceful", 2.2),
    ("grateful", 2.0),
    ("thankful", 2.2),
    ("excited", 1.4),
    ("proud", 2.1),
    ("productive", 1.9),
    ("energized", 2.1),
    ("hopeful", 2.3),
    ("better", 1.9),
    ("best", 3.2),
    ("enjoyed", 2.3),
    ("smile", 1.5),
    ("laughed", 2.0),
    ("content", 1.6),
    ("rested", 1.3),
    ("win", 2.8),
    // negative
    ("bad", -2.5),
    ("awful", -2.0),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("miserable", -2.3),
    ("depressed", -2.3),
    ("lonely", -1.5),
    ("angry", -2.3),
    ("hate", -2.7),
    ("hated", -3.2),
    ("anxious", -1.0),
    ("anxiety", -0.7),
    ("worried", -1.2),
    ("stressed", -1.4),
    ("stress", -1.8),
    ("tired", -1.9),
    ("exhausted", -1.5),
    ("overwhelmed", -1.5),
    ("upset", -1.6),
    ("cry", -2.1),
    ("cried", -1.6),
    ("crying", -2.1),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("sick", -1.7),
    ("worst", -3.1),
    ("worse", -2.1),
    ("hopeless", -2.0),
    ("frustrated", -2.4),
    ("annoyed", -1.6),
    ("scared", -1.9),
    ("afraid", -2.0),
    ("lost", -1.3),
    ("fail", -2.5),
    ("failed", -2.3),
    ("broken", -2.2),
    ("disaster", -3.1),
];

/// Rule-based lexicon scorer producing a compound polarity
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    lexicon: HashMap<String, f64>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentiment {
    /// Create a scorer with the bundled lexicon
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON
                .iter()
                .map(|(word, valence)| (word.to_string(), *valence))
                .collect(),
        }
    }

    /// Add or override a word's valence (roughly -4 to 4)
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.lexicon.insert(word.to_lowercase(), valence);
        self
    }

    fn valences(&self, tokens: &[String]) -> Vec<f64> {
        let mut valences = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.lexicon.get(token.as_str()) else {
                valences.push(0.0);
                continue;
            };
            let mut valence = base;

            if let Some(prev) = i.checked_sub(1).map(|j| tokens[j].as_str()) {
                if BOOSTERS.contains(&prev) {
                    valence += BOOSTER_INCR * valence.signum();
                } else if DAMPENERS.contains(&prev) {
                    valence -= BOOSTER_INCR * valence.signum();
                }
            }

            let window_start = i.saturating_sub(3);
            if tokens[window_start..i].iter().any(|t| is_negation(t)) {
                valence *= NEGATION_SCALAR;
            }

            valences.push(valence);
        }

        // "but" shifts weight to the second clause
        if let Some(pivot) = tokens.iter().position(|t| t == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        valences
    }
}

impl SentimentScorer for LexiconSentiment {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut sum: f64 = self.valences(&tokens).iter().sum();

        if sum != 0.0 {
            let exclamations = text.matches('!').count().min(4) as f64;
            sum += exclamations * EXCLAMATION_INCR * sum.signum();
        }

        normalize(sum)
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Map an unbounded valence sum into [-1, 1]
fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_neutral_text() {
        let scorer = LexiconSentiment::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("went to the shop"), 0.0);
    }

    #[test]
    fn test_polarity() {
        let scorer = LexiconSentiment::new();
        assert!(scorer.score("Had a great day with friends") > 0.5);
        assert!(scorer.score("I feel awful and sad") < -0.5);
    }

    #[test]
    fn test_negation_flips() {
        let scorer = LexiconSentiment::new();
        assert!(scorer.score("happy") > 0.0);
        assert!(scorer.score("not happy") < 0.0);
        assert!(scorer.score("I don't feel good") < 0.0);
    }

    #[test]
    fn test_boosters_and_exclamations_intensify() {
        let scorer = LexiconSentiment::new();
        let plain = scorer.score("sad");
        assert!(scorer.score("very sad") < plain);
        assert!(scorer.score("sad!!") < plain);
    }

    #[test]
    fn test_barely_dampens_without_flipping() {
        let scorer = LexiconSentiment::new();
        let plain = scorer.score("happy");
        let barely = scorer.score("barely happy");
        assert!(barely > 0.0);
        assert!(barely < plain);
    }

    #[test]
    fn test_but_weights_second_clause() {
        let scorer = LexiconSentiment::new();
        assert!(scorer.score("the morning was good but the evening was terrible") < 0.0);
    }

    #[test]
    fn test_bounded() {
        let scorer = LexiconSentiment::new();
        let text = "worst awful terrible horrible miserable hopeless disaster!!!!";
        let score = scorer.score(text);
        assert!((-1.0..=1.0).contains(&score));
        assert!(score < -0.9);
    }

    #[test]
    fn test_custom_word() {
        let scorer = LexiconSentiment::new().with_word("Meh", -1.0);
        assert!(scorer.score("meh") < 0.0);
    }

    #[test]
    fn test_closure_is_scorer() {
        let stub = |text: &str| if text.contains("rain") { -0.8 } else { 0.1 };
        assert_eq!(stub.score("rain again"), -0.8);
        assert_eq!(SentimentScorer::score(&stub, "sun"), 0.1);
    }
}
