//! Pluggable title classification.
//!
//! The default implementations are keyword/regex heuristics; the traits
//! exist so a statistical or learned classifier can replace them without
//! touching the detection logic.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Content-format buckets recognized by the format-gap detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Tutorial,
    Review,
    Vlog,
    Comparison,
    Listicle,
    Challenge,
}

impl ContentFormat {
    pub const ALL: [ContentFormat; 6] = [
        ContentFormat::Tutorial,
        ContentFormat::Review,
        ContentFormat::Vlog,
        ContentFormat::Comparison,
        ContentFormat::Listicle,
        ContentFormat::Challenge,
    ];

    /// Lowercase id fragment, e.g. `format_tutorial`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            ContentFormat::Tutorial => "tutorial",
            ContentFormat::Review => "review",
            ContentFormat::Vlog => "vlog",
            ContentFormat::Comparison => "comparison",
            ContentFormat::Listicle => "listicle",
            ContentFormat::Challenge => "challenge",
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Classifies a title into at most one content-format bucket.
pub trait FormatClassifier {
    fn classify(&self, title: &str) -> Option<ContentFormat>;
}

/// Stylistic title markers recognized by the pattern-gap detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePattern {
    Question,
    Numbered,
    CapsEmphasis,
    Bracketed,
    FirstPerson,
    NegativeFraming,
    PowerWords,
}

impl TitlePattern {
    pub const ALL: [TitlePattern; 7] = [
        TitlePattern::Question,
        TitlePattern::Numbered,
        TitlePattern::CapsEmphasis,
        TitlePattern::Bracketed,
        TitlePattern::FirstPerson,
        TitlePattern::NegativeFraming,
        TitlePattern::PowerWords,
    ];

    /// Lowercase id fragment, e.g. `pattern_question`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            TitlePattern::Question => "question",
            TitlePattern::Numbered => "numbered",
            TitlePattern::CapsEmphasis => "caps_emphasis",
            TitlePattern::Bracketed => "bracketed",
            TitlePattern::FirstPerson => "first_person",
            TitlePattern::NegativeFraming => "negative_framing",
            TitlePattern::PowerWords => "power_words",
        }
    }

    /// Human-readable label used in gap copy.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TitlePattern::Question => "question titles",
            TitlePattern::Numbered => "numbered titles",
            TitlePattern::CapsEmphasis => "ALL-CAPS emphasis",
            TitlePattern::Bracketed => "bracketed qualifiers",
            TitlePattern::FirstPerson => "first-person framing",
            TitlePattern::NegativeFraming => "negative framing",
            TitlePattern::PowerWords => "power words",
        }
    }
}

/// Detects which stylistic markers a title carries.
pub trait PatternClassifier {
    fn patterns(&self, title: &str) -> Vec<TitlePattern>;
}

static TUTORIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(how to|tutorial|guide|learn|step by step|explained)\b").unwrap()
});
static REVIEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(review|unboxing|tested|hands.?on|worth it)\b").unwrap());
static VLOG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(vlog|day in the life|week in my|behind the scenes)\b").unwrap());
static COMPARISON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(vs\.?|versus|compared|comparison)\b").unwrap());
static LISTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(top \d+|\d+\s+(best|worst|things|ways|tips|mistakes|reasons))\b").unwrap()
});
static CHALLENGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(challenge|24 hours|i tried|i spent|survived)\b").unwrap()
});

/// Default keyword/regex format classifier. First matching bucket wins,
/// in the fixed order of [`ContentFormat::ALL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordFormatClassifier;

impl FormatClassifier for KeywordFormatClassifier {
    fn classify(&self, title: &str) -> Option<ContentFormat> {
        for format in ContentFormat::ALL {
            let re: &Regex = match format {
                ContentFormat::Tutorial => &TUTORIAL_RE,
                ContentFormat::Review => &REVIEW_RE,
                ContentFormat::Vlog => &VLOG_RE,
                ContentFormat::Comparison => &COMPARISON_RE,
                ContentFormat::Listicle => &LISTICLE_RE,
                ContentFormat::Challenge => &CHALLENGE_RE,
            };
            if re.is_match(title) {
                return Some(format);
            }
        }
        None
    }
}

static FIRST_PERSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(i|my|we|our)\b").unwrap());
static NEGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(never|stop|avoid|worst|mistakes?|wrong|don'?t|quit)\b").unwrap()
});
static POWER_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(ultimate|insane|secret|crazy|proven|instantly|shocking|genius)\b").unwrap()
});

/// Default heuristic pattern classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPatternClassifier;

impl PatternClassifier for HeuristicPatternClassifier {
    fn patterns(&self, title: &str) -> Vec<TitlePattern> {
        let mut found = Vec::new();
        if title.contains('?') {
            found.push(TitlePattern::Question);
        }
        if title.chars().any(|c| c.is_ascii_digit()) {
            found.push(TitlePattern::Numbered);
        }
        if has_caps_emphasis(title) {
            found.push(TitlePattern::CapsEmphasis);
        }
        if title.contains('[') || title.contains('(') {
            found.push(TitlePattern::Bracketed);
        }
        if FIRST_PERSON_RE.is_match(title) {
            found.push(TitlePattern::FirstPerson);
        }
        if NEGATIVE_RE.is_match(title) {
            found.push(TitlePattern::NegativeFraming);
        }
        if POWER_WORDS_RE.is_match(title) {
            found.push(TitlePattern::PowerWords);
        }
        found
    }
}

/// A word of three or more letters written fully uppercase.
fn has_caps_emphasis(title: &str) -> bool {
    title.split_whitespace().any(|w| {
        let letters: Vec<char> = w.chars().filter(|c| c.is_alphabetic()).collect();
        letters.len() >= 3 && letters.iter().all(|c| c.is_uppercase())
    })
}

/// Bundle of classifier implementations handed to the detector.
pub struct Classifiers {
    pub format: Box<dyn FormatClassifier>,
    pub pattern: Box<dyn PatternClassifier>,
}

impl Default for Classifiers {
    fn default() -> Self {
        Self {
            format: Box::new(KeywordFormatClassifier),
            pattern: Box::new(HeuristicPatternClassifier),
        }
    }
}
