//! Title tokenization and similarity helpers shared by the gap detector
//! and the feedback matcher.

use std::collections::HashSet;

/// Tokens shorter than this carry no topical signal and are dropped.
const MIN_TOKEN_LEN: usize = 3;

/// Stopwords excluded from topic n-grams. Kept deliberately small: titles
/// are short and aggressive filtering starves the 3-gram extractor.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "you", "your", "how", "what",
    "why", "are", "was", "our", "from", "have", "has", "not", "but", "all",
    "can", "get", "out", "about", "into", "more", "than", "when", "will",
];

/// Split a title into lowercased alphanumeric tokens, punctuation stripped,
/// keeping only tokens of length >= 3.
#[must_use]
pub fn tokenize(title: &str) -> Vec<String> {
    title
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| w.len() >= MIN_TOKEN_LEN)
        .collect()
}

/// Like [`tokenize`] but additionally drops stopwords; used for topic n-grams.
#[must_use]
pub fn topic_tokens(title: &str) -> Vec<String> {
    tokenize(title)
        .into_iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Jaccard similarity of the token sets of two titles.
///
/// Symmetric by construction; `1.0` for identical non-empty titles and `0.0`
/// when either side tokenizes to nothing.
#[must_use]
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = tokenize(a).into_iter().collect();
    let set_b: HashSet<String> = tokenize(b).into_iter().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    #[allow(clippy::cast_precision_loss)]
    let sim = intersection as f64 / union as f64;
    sim
}

/// Contiguous n-grams (joined with a single space) over a token slice.
#[must_use]
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

/// Normalized series prefix: the first three tokens of a title, joined.
///
/// Returns `None` for titles with fewer than three usable tokens, too short
/// to identify a recurring series.
#[must_use]
pub fn series_prefix(title: &str) -> Option<String> {
    let tokens = tokenize(title);
    if tokens.len() < 3 {
        return None;
    }
    Some(tokens[..3].join(" "))
}

/// Turn a topic phrase into a stable id fragment (`"video essays" -> "video_essays"`).
#[must_use]
pub fn slugify(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_punctuation_and_short_tokens() {
        let tokens = tokenize("I Tried MrBeast's $1,000,000 Challenge!");
        assert_eq!(tokens, vec!["tried", "mrbeasts", "1000000", "challenge"]);
    }

    #[test]
    fn tokenize_empty_title() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("a an I").is_empty());
    }

    #[test]
    fn topic_tokens_drop_stopwords() {
        let tokens = topic_tokens("How The Algorithm Works For You");
        assert_eq!(tokens, vec!["algorithm", "works"]);
    }

    #[test]
    fn jaccard_is_symmetric() {
        let a = "ultimate camera gear review 2026";
        let b = "camera gear tour and setup";
        let ab = jaccard_similarity(a, b);
        let ba = jaccard_similarity(b, a);
        assert!((ab - ba).abs() < f64::EPSILON);
        assert!(ab > 0.0 && ab < 1.0);
    }

    #[test]
    fn jaccard_identity_is_one() {
        let a = "editing tutorial for beginners";
        assert!((jaccard_similarity(a, a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_empty_is_zero() {
        assert_eq!(jaccard_similarity("", "camera review"), 0.0);
        assert_eq!(jaccard_similarity("", ""), 0.0);
    }

    #[test]
    fn ngrams_basic() {
        let tokens: Vec<String> = ["video", "essay", "structure"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ngrams(&tokens, 2), vec!["video essay", "essay structure"]);
        assert_eq!(ngrams(&tokens, 3), vec!["video essay structure"]);
        assert!(ngrams(&tokens, 4).is_empty());
        assert!(ngrams(&tokens, 0).is_empty());
    }

    #[test]
    fn series_prefix_first_three_tokens() {
        assert_eq!(
            series_prefix("Budget Builds Episode 12: The Finale").as_deref(),
            Some("budget builds episode")
        );
        assert!(series_prefix("Q&A #4").is_none());
    }

    #[test]
    fn slugify_joins_with_underscores() {
        assert_eq!(slugify("video essay"), "video_essay");
    }
}
