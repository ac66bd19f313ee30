//! Frequency- and sentiment-weighted word cloud generation.
//!
//! Tokens from the cleaned corpus are weighted by how often they appear in
//! sentiment-bearing comments, nudged by capitalization and length, merged
//! with meaningful bigrams and ranked. Fully deterministic: ties sort
//! lexicographically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::annotate::AnnotatedComment;
use crate::sentiment::Sentiment;
use crate::text;

pub const DEFAULT_MAX_WORDS: usize = 100;

const MIN_TOKEN_CHARS: usize = 3;
const MAX_TOKEN_CHARS: usize = 25;
// Words from positive/negative comments outweigh neutral ones.
const SENTIMENT_TEXT_WEIGHT: f64 = 1.5;
const NEUTRAL_TEXT_WEIGHT: f64 = 0.8;
const CAPITALIZED_BONUS: f64 = 1.3;
const CAPITALIZED_MIN_CHARS: usize = 4;
const MID_LENGTH_BONUS: f64 = 1.2;
const LONG_LENGTH_BONUS: f64 = 1.1;
const BIGRAM_OCCURRENCE_WEIGHT: f64 = 1.5;
const BIGRAM_MIN_WEIGHT: f64 = 2.0;

const CATEGORY_ORDER: [Sentiment; 3] =
    [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

/// One ranked word cloud token (unigram or bigram).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudEntry {
    pub text: String,
    pub value: u64,
    pub sentiment: Sentiment,
    /// Per-category count of comment texts containing this token.
    pub sentiment_distribution: BTreeMap<String, u64>,
}

/// Build the word cloud for a batch of annotated comments.
pub fn word_cloud(comments: &[AnnotatedComment], max_words: usize) -> Vec<WordCloudEntry> {
    if comments.is_empty() || max_words == 0 {
        return Vec::new();
    }

    // Lowercased raw texts per category, for containment counting.
    let mut category_texts: HashMap<Sentiment, Vec<String>> = HashMap::new();
    for comment in comments {
        category_texts
            .entry(comment.sentiment.category)
            .or_default()
            .push(comment.text.to_lowercase());
    }

    let all_text = comments
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned = text::clean_text(&all_text);

    // Tokens that ever appear with an uppercase first letter in the raw text;
    // the cleaned corpus is lowercased, so this is recorded up front.
    let capitalized: HashSet<String> = all_text
        .split_whitespace()
        .filter_map(|token| {
            let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
            let mut chars = trimmed.chars();
            match chars.next() {
                Some(first) if first.is_uppercase() => Some(trimmed.to_lowercase()),
                _ => None,
            }
        })
        .collect();

    let mut weights: HashMap<String, f64> = HashMap::new();
    for word in cleaned.split_whitespace() {
        let char_len = word.chars().count();
        if char_len < MIN_TOKEN_CHARS || char_len > MAX_TOKEN_CHARS {
            continue;
        }
        if text::is_extended_stopword(word) {
            continue;
        }
        if word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if !text::is_alphabetic_token(word) {
            continue;
        }

        let mut base_weight = 1.0;
        for category in CATEGORY_ORDER {
            let Some(texts) = category_texts.get(&category) else {
                continue;
            };
            let count = texts.iter().filter(|t| t.contains(word)).count() as f64;
            let per_text = if category == Sentiment::Neutral {
                NEUTRAL_TEXT_WEIGHT
            } else {
                SENTIMENT_TEXT_WEIGHT
            };
            base_weight += count * per_text;
        }

        if capitalized.contains(word) && char_len > CAPITALIZED_MIN_CHARS {
            base_weight *= CAPITALIZED_BONUS;
        }
        if (4..=8).contains(&char_len) {
            base_weight *= MID_LENGTH_BONUS;
        } else if (9..=12).contains(&char_len) {
            base_weight *= LONG_LENGTH_BONUS;
        }

        *weights.entry(word.to_owned()).or_insert(0.0) += base_weight;
    }

    // Dynamic minimum frequency: larger corpora demand more evidence.
    let min_frequency = std::cmp::max(1, comments.len() / 100) as f64;
    let mut merged: HashMap<String, f64> = weights
        .into_iter()
        .filter(|(_, weight)| *weight >= min_frequency)
        .collect();

    for (bigram, weight) in extract_bigrams(comments) {
        if weight >= BIGRAM_MIN_WEIGHT {
            merged.insert(bigram, weight);
        }
    }

    let mut ranked: Vec<(String, f64)> = merged.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(max_words);

    ranked
        .into_iter()
        .map(|(token, weight)| {
            let mut distribution = BTreeMap::new();
            let mut dominant = Sentiment::Neutral;
            let mut dominant_count = 0u64;
            for category in CATEGORY_ORDER {
                let count = category_texts
                    .get(&category)
                    .map(|texts| texts.iter().filter(|t| t.contains(&token)).count() as u64)
                    .unwrap_or(0);
                if count > 0 {
                    distribution.insert(category.as_str().to_owned(), count);
                    if count > dominant_count {
                        dominant = category;
                        dominant_count = count;
                    }
                }
            }

            WordCloudEntry {
                text: display_case(&token),
                value: weight as u64,
                sentiment: dominant,
                sentiment_distribution: distribution,
            }
        })
        .collect()
}

/// Adjacent word pairs where both sides are substantial, weighted per
/// occurrence inside a single comment.
fn extract_bigrams(comments: &[AnnotatedComment]) -> HashMap<String, f64> {
    let mut weights: HashMap<String, f64> = HashMap::new();
    for comment in comments {
        let cleaned = text::clean_text(&comment.text);
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        for pair in words.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            if first.chars().count() < MIN_TOKEN_CHARS || second.chars().count() < MIN_TOKEN_CHARS {
                continue;
            }
            if text::is_extended_stopword(first) || text::is_extended_stopword(second) {
                continue;
            }
            if first.chars().all(|c| c.is_ascii_digit())
                || second.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            *weights.entry(format!("{first} {second}")).or_insert(0.0) +=
                BIGRAM_OCCURRENCE_WEIGHT;
        }
    }
    weights
}

fn display_case(token: &str) -> String {
    if token.chars().any(|c| c.is_uppercase()) {
        return token.to_owned();
    }
    token
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::sentiment::{DetailedScores, SentimentResult, ThemeScoreMap};

    fn annotated(text: &str, category: Sentiment) -> AnnotatedComment {
        AnnotatedComment {
            id: "c".to_owned(),
            text: text.to_owned(),
            author: None,
            published_at: None,
            video_id: None,
            video_title: None,
            sentiment: SentimentResult {
                polarity: 0.0,
                category,
                confidence: 0.8,
                language: Language::En,
                sentence_judgments: Vec::new(),
                theme: ThemeScoreMap::new(),
                detailed_scores: DetailedScores::default(),
                error: None,
            },
            theme: ThemeScoreMap::new(),
        }
    }

    fn entry<'a>(cloud: &'a [WordCloudEntry], text: &str) -> Option<&'a WordCloudEntry> {
        cloud.iter().find(|e| e.text == text)
    }

    #[test]
    fn test_empty_input() {
        assert!(word_cloud(&[], 50).is_empty());
    }

    #[test]
    fn test_weight_composition_for_positive_token() {
        // "superb" appears once in each of three positive comments. Per
        // occurrence in the cleaned corpus: 1 + 3*1.5 = 5.5, then the 4..=8
        // length bonus: 5.5 * 1.2 = 6.6. Three occurrences total 19.8.
        let comments = vec![
            annotated("superb rhythm", Sentiment::Positive),
            annotated("superb footage", Sentiment::Positive),
            annotated("superb pacing", Sentiment::Positive),
        ];
        let cloud = word_cloud(&comments, 50);
        let entry = entry(&cloud, "Superb").expect("token present");
        assert_eq!(entry.value, 19);
        assert_eq!(entry.sentiment, Sentiment::Positive);
        assert_eq!(entry.sentiment_distribution["positive"], 3);
    }

    #[test]
    fn test_neutral_occurrences_weigh_less() {
        let positive = vec![
            annotated("gorgeous shot", Sentiment::Positive),
            annotated("gorgeous light", Sentiment::Positive),
        ];
        let neutral = vec![
            annotated("gorgeous shot", Sentiment::Neutral),
            annotated("gorgeous light", Sentiment::Neutral),
        ];
        let positive_value = entry(&word_cloud(&positive, 50), "Gorgeous").unwrap().value;
        let neutral_value = entry(&word_cloud(&neutral, 50), "Gorgeous").unwrap().value;
        assert!(positive_value > neutral_value);
    }

    #[test]
    fn test_capitalization_bonus() {
        // Same corpus, except one raw text capitalizes the token. The bonus
        // applies to every occurrence once the capitalized form is seen:
        // plain (1 + 2*1.5) * 1.2 * 2 = 9.6 vs capitalized * 1.3 = 12.48.
        let plain = vec![
            annotated("flawless edit", Sentiment::Positive),
            annotated("flawless cut", Sentiment::Positive),
        ];
        let capitalized = vec![
            annotated("Flawless edit", Sentiment::Positive),
            annotated("flawless cut", Sentiment::Positive),
        ];
        let plain_value = entry(&word_cloud(&plain, 50), "Flawless").unwrap().value;
        let capitalized_value = entry(&word_cloud(&capitalized, 50), "Flawless").unwrap().value;
        assert_eq!(plain_value, 9);
        assert_eq!(capitalized_value, 12);
    }

    #[test]
    fn test_short_and_digit_tokens_dropped() {
        let comments = vec![annotated("ok 99 at 1234 superb", Sentiment::Positive)];
        let cloud = word_cloud(&comments, 50);
        assert!(entry(&cloud, "Ok").is_none());
        assert!(entry(&cloud, "99").is_none());
        assert!(entry(&cloud, "1234").is_none());
        assert!(entry(&cloud, "Superb").is_some());
    }

    #[test]
    fn test_turkish_tokens_survive_alphabetic_check() {
        let comments = vec![annotated("öğretici bölüm olmuş", Sentiment::Positive)];
        let cloud = word_cloud(&comments, 50);
        assert!(entry(&cloud, "Öğretici").is_some());
    }

    #[test]
    fn test_bigrams_need_two_occurrences() {
        let once = vec![annotated("camera quality rocks", Sentiment::Positive)];
        let cloud = word_cloud(&once, 50);
        assert!(entry(&cloud, "Camera Quality").is_none());

        let twice = vec![
            annotated("camera quality rocks", Sentiment::Positive),
            annotated("camera quality impresses", Sentiment::Positive),
        ];
        let cloud = word_cloud(&twice, 50);
        let bigram = entry(&cloud, "Camera Quality").expect("bigram present");
        assert_eq!(bigram.value, 3);
    }

    #[test]
    fn test_max_words_cap_and_ordering() {
        let comments = vec![
            annotated("superb superb superb", Sentiment::Positive),
            annotated("decent pacing", Sentiment::Neutral),
        ];
        let cloud = word_cloud(&comments, 1);
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud[0].text, "Superb");
    }

    #[test]
    fn test_dominant_sentiment_tie_prefers_positive() {
        let comments = vec![
            annotated("stunning intro", Sentiment::Positive),
            annotated("stunning intro", Sentiment::Negative),
        ];
        let cloud = word_cloud(&comments, 50);
        let entry = entry(&cloud, "Stunning").unwrap();
        assert_eq!(entry.sentiment_distribution["positive"], 1);
        assert_eq!(entry.sentiment_distribution["negative"], 1);
        assert_eq!(entry.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_deterministic_ordering_on_weight_ties() {
        let comments = vec![annotated("zebra apple", Sentiment::Positive)];
        let first = word_cloud(&comments, 50);
        let second = word_cloud(&comments, 50);
        let first_texts: Vec<&str> = first.iter().map(|e| e.text.as_str()).collect();
        let second_texts: Vec<&str> = second.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(first_texts, second_texts);
        // Equal weights sort alphabetically.
        assert_eq!(first_texts, vec!["Apple", "Zebra"]);
    }
}
