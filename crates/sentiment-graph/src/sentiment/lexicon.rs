//! Rule-based sentiment scoring for short social posts.

use super::{Sentiment, SentimentClassifier};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").expect("mention pattern"));
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").expect("url pattern"));

/// Cleans post text before scoring: drops @mentions and links, decodes the
/// common HTML entities and collapses whitespace.
pub fn preprocess(text: &str) -> String {
    let text = MENTION_RE.replace_all(text, "");
    let text = URL_RE.replace_all(&text, "");
    let text = text
        .replace("&amp;", "and")
        .replace("&gt;", ">")
        .replace("&lt;", "<");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mean lexicon score above which a post counts as positive (and below the
/// negation of which it counts as negative).
const NEUTRAL_BAND: f64 = 0.05;

/// Lexicon classifier with negation and intensifier handling.
pub struct LexiconClassifier {
    words: HashMap<String, f64>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let positive = [
            ("love", 0.8),
            ("loved", 0.8),
            ("loving", 0.7),
            ("like", 0.4),
            ("great", 0.7),
            ("good", 0.5),
            ("awesome", 0.8),
            ("amazing", 0.8),
            ("excellent", 0.8),
            ("fantastic", 0.8),
            ("wonderful", 0.8),
            ("best", 0.7),
            ("happy", 0.6),
            ("excited", 0.6),
            ("exciting", 0.6),
            ("hope", 0.4),
            ("hopeful", 0.5),
            ("win", 0.6),
            ("thanks", 0.4),
            ("thank", 0.4),
            ("beautiful", 0.7),
            ("brilliant", 0.7),
            ("helpful", 0.5),
            ("useful", 0.4),
            ("impressive", 0.6),
            ("inspiring", 0.6),
            ("fun", 0.5),
            ("cool", 0.4),
            ("nice", 0.5),
            ("support", 0.3),
            ("progress", 0.4),
            ("fair", 0.3),
            ("safe", 0.3),
        ];
        let negative = [
            ("hate", -0.8),
            ("hated", -0.8),
            ("bad", -0.6),
            ("terrible", -0.8),
            ("awful", -0.8),
            ("horrible", -0.8),
            ("worst", -0.8),
            ("scary", -0.6),
            ("scared", -0.6),
            ("fear", -0.6),
            ("afraid", -0.6),
            ("angry", -0.7),
            ("sad", -0.6),
            ("dangerous", -0.6),
            ("danger", -0.5),
            ("threat", -0.5),
            ("risk", -0.4),
            ("worried", -0.5),
            ("worry", -0.5),
            ("concern", -0.4),
            ("concerning", -0.5),
            ("problem", -0.4),
            ("fail", -0.6),
            ("failed", -0.6),
            ("broken", -0.5),
            ("useless", -0.6),
            ("annoying", -0.5),
            ("disappointing", -0.6),
            ("unfair", -0.5),
            ("biased", -0.5),
            ("scam", -0.8),
            ("fraud", -0.8),
            ("wrong", -0.4),
        ];

        let words = positive
            .into_iter()
            .chain(negative)
            .map(|(w, s)| (w.to_string(), s))
            .collect();

        let negations = [
            "not", "no", "never", "none", "nothing", "cannot", "cant", "can't", "don't", "dont",
            "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't", "isnt", "aren't",
            "arent", "wasn't", "wasnt", "hardly", "barely",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let intensifiers = [
            ("very", 1.5),
            ("really", 1.4),
            ("so", 1.3),
            ("extremely", 2.0),
            ("super", 1.6),
            ("totally", 1.5),
            ("slightly", 0.5),
            ("somewhat", 0.7),
            ("kinda", 0.7),
        ]
        .into_iter()
        .map(|(w, m)| (w.to_string(), m))
        .collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Adds or replaces a word's score.
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score);
    }

    /// Mean score of the sentiment-bearing words, clamped to [-1, 1].
    /// Text with no known words scores 0.
    pub fn score(&self, text: &str) -> f64 {
        let mut scores = Vec::new();
        let mut negate_next = false;
        let mut intensifier = 1.0;

        for raw in text.split_whitespace() {
            let word = raw
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase();
            if word.is_empty() {
                continue;
            }

            if self.negations.contains(&word) {
                negate_next = true;
                continue;
            }
            if let Some(&mult) = self.intensifiers.get(&word) {
                intensifier = mult;
                continue;
            }

            match self.words.get(&word) {
                Some(&score) => {
                    let score = if negate_next { -score } else { score };
                    scores.push(score * intensifier);
                    negate_next = false;
                    intensifier = 1.0;
                }
                None => {
                    negate_next = false;
                    intensifier = 1.0;
                }
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }

    pub fn sentiment(&self, text: &str) -> Sentiment {
        let cleaned = preprocess(text);
        if cleaned.is_empty() {
            return Sentiment::Neutral;
        }
        let score = self.score(&cleaned);
        if score > NEUTRAL_BAND {
            Sentiment::Positive
        } else if score < -NEUTRAL_BAND {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> String {
        self.sentiment(text).label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_strips_mentions_and_links() {
        let cleaned = preprocess("@bob   check https://t.co/xyz this &amp; that &gt; rest");
        assert_eq!(cleaned, "check this and that > rest");
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.classify(""), "Neutral");
        assert_eq!(classifier.classify("@someone https://example.com"), "Neutral");
    }

    #[test]
    fn test_polarity() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.classify("I love AI"), "Positive");
        assert_eq!(classifier.classify("AI is scary"), "Negative");
        assert_eq!(classifier.classify("meh"), "Neutral");
    }

    #[test]
    fn test_negation_flips_score() {
        let classifier = LexiconClassifier::new();
        assert!(classifier.score("good") > 0.0);
        assert!(classifier.score("not good") < 0.0);
        assert_eq!(classifier.sentiment("this is not good"), Sentiment::Negative);
    }

    #[test]
    fn test_intensifier_scales_score() {
        let classifier = LexiconClassifier::new();
        assert!(classifier.score("very good") > classifier.score("good"));
        assert!(classifier.score("slightly good") < classifier.score("good"));
    }

    #[test]
    fn test_punctuation_is_ignored() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.sentiment("Amazing!!!"), Sentiment::Positive);
    }

    #[test]
    fn test_custom_word() {
        let mut classifier = LexiconClassifier::new();
        assert_eq!(classifier.sentiment("meh"), Sentiment::Neutral);
        classifier.add_word("Meh", -0.3);
        assert_eq!(classifier.sentiment("meh"), Sentiment::Negative);
    }

    #[test]
    fn test_deterministic() {
        let classifier = LexiconClassifier::new();
        let text = "really worried about this, but hopeful";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }
}
