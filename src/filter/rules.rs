// src/filter/rules.rs
// Deterministic reject rules evaluated before any LLM call

use crate::config::FilterSettings;
use crate::filter::{FilterResult, ReferenceType, TweetReference};
use crate::utils::utf16_len;
use chrono::{DateTime, TimeDelta, Utc};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::warn;

/// Minimum length of the text left after stripping mentions and URLs
pub const TWEET_MIN_LENGTH: usize = 20;
/// Maximum tweet age before it is considered stale
pub const TWEET_MAX_AGE_MINUTES: i64 = 120;

/// Promotional/spam patterns, matched case-insensitively in this order.
/// The first match names the rejection reason.
pub const DEFAULT_PROMO_PATTERNS: &[&str] = &[
    r"\bgiveaway\b",
    r"\bairdrop\b",
    r"\bwhitelist\b",
    r"\bWL spot",
    r"\bRT\s*[+&]\s*follow",
    r"\blike\s*[+&]\s*retweet",
    r"\bfree\s+mint\b",
    r"\btag\s+\d+\s+friends?\b",
    r"\bjoin\s+(our\s+)?discord",
    r"bit\.ly/",
    r"t\.me/",
];

#[allow(clippy::expect_used)]
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("valid regex"));

#[allow(clippy::expect_used)]
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

#[allow(clippy::expect_used)]
static EMOJI_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{Emoji}\s]+$").expect("valid regex"));

/// What the hard rules look at
#[derive(Debug, Clone, Copy)]
pub struct HardRuleInput<'a> {
    pub text: &'a str,
    pub referenced_tweets: &'a [TweetReference],
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct PromoPattern {
    source: String,
    regex: Regex,
}

/// Compiled hard-rule set. Cheap to share; holds no per-tweet state.
#[derive(Debug, Clone)]
pub struct HardRules {
    min_length: usize,
    max_age: TimeDelta,
    max_age_minutes: i64,
    promo_patterns: Vec<PromoPattern>,
}

impl Default for HardRules {
    fn default() -> Self {
        Self::new(TWEET_MIN_LENGTH, TWEET_MAX_AGE_MINUTES, DEFAULT_PROMO_PATTERNS)
    }
}

impl HardRules {
    /// Compile a rule set. Patterns that fail to compile are logged and skipped.
    pub fn new<S: AsRef<str>>(min_length: usize, max_age_minutes: i64, patterns: &[S]) -> Self {
        let promo_patterns = patterns
            .iter()
            .filter_map(|p| {
                let source = p.as_ref();
                match RegexBuilder::new(&ascii_word_boundaries(source))
                    .case_insensitive(true)
                    .build()
                {
                    Ok(regex) => Some(PromoPattern {
                        source: source.to_string(),
                        regex,
                    }),
                    Err(e) => {
                        warn!(pattern = source, error = %e, "Skipping invalid promo pattern");
                        None
                    }
                }
            })
            .collect();

        Self {
            min_length,
            max_age: TimeDelta::minutes(max_age_minutes),
            max_age_minutes,
            promo_patterns,
        }
    }

    pub fn from_settings(settings: &FilterSettings) -> Self {
        Self::new(
            settings.min_length,
            settings.max_age_minutes,
            settings.promo_patterns.as_slice(),
        )
    }

    /// Number of promotional patterns that compiled
    pub fn promo_pattern_count(&self) -> usize {
        self.promo_patterns.len()
    }

    /// Run the rules in order. `Some` is a final rejection; `None` means undecided.
    pub fn evaluate(&self, input: &HardRuleInput<'_>, now: DateTime<Utc>) -> Option<FilterResult> {
        if input
            .referenced_tweets
            .iter()
            .any(|t| t.kind == ReferenceType::Retweeted)
        {
            return Some(FilterResult::reject("pure retweet"));
        }

        let stripped = strip_mentions_and_urls(input.text);
        let stripped_len = utf16_len(&stripped);
        if stripped_len < self.min_length {
            return Some(FilterResult::reject(format!(
                "too short ({} chars after stripping mentions/URLs)",
                stripped_len
            )));
        }

        if EMOJI_ONLY_RE.is_match(&stripped) {
            return Some(FilterResult::reject("emoji-only content"));
        }

        if let Some(pattern) = self.promo_patterns.iter().find(|p| p.regex.is_match(input.text)) {
            return Some(FilterResult::reject(format!(
                "promotional/spam content (matched: {})",
                pattern.source
            )));
        }

        if let Some(created_at) = input.created_at {
            let age = now - created_at;
            if age > self.max_age {
                let age_minutes = (age.num_milliseconds() as f64 / 60_000.0).round() as i64;
                return Some(FilterResult::reject(format!(
                    "tweet too old ({} minutes ago, limit is {})",
                    age_minutes, self.max_age_minutes
                )));
            }
        }

        None
    }
}

/// Rewrite `\b` and `\B` as their ASCII forms so accented letters count as
/// non-word characters, as they do on the platform side.
fn ascii_word_boundaries(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(b @ ('b' | 'B')) => {
                out.push_str("(?-u:\\");
                out.push(b);
                out.push(')');
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Remove `@handle` tokens and http(s) URLs, then trim.
pub fn strip_mentions_and_urls(text: &str) -> String {
    let without_mentions = MENTION_RE.replace_all(text, "");
    URL_RE.replace_all(&without_mentions, "").trim().to_string()
}
