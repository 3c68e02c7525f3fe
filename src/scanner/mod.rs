//! Content pattern scanning.
//!
//! Two kinds of patterns cover the sweep checks: whole-word keywords for
//! cleartext secrets (`password`, `secret`, ...) and literal command
//! fragments for insecure invocations (`curl --insecure`, ...). Keyword
//! text is escaped before compilation, so user-supplied patterns from the
//! config file can never produce an invalid regex.

use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords treated as evidence of cleartext secrets. Matched as whole
/// words, case-insensitively, so `passwordless` does not count.
pub const SENSITIVE_KEYWORDS: [&str; 4] = ["password", "secret", "key", "token"];

/// Command fragments that disable transport security. Matched as exact
/// substrings.
pub const INSECURE_COMMANDS: [&str; 2] = ["curl --insecure", "wget --no-check-certificate"];

static BUILTIN_KEYWORDS: Lazy<PatternSet> = Lazy::new(|| keyword_set(&[]));

static BUILTIN_COMMANDS: Lazy<PatternSet> = Lazy::new(|| command_set(&[]));

static TODO_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bTODO\b").unwrap());

/// A single content pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Whole-word match, case-insensitive.
    Keyword(String),
    /// Exact substring match, case-sensitive.
    Literal(String),
}

impl Pattern {
    pub fn keyword(word: &str) -> Self {
        Self::Keyword(word.to_string())
    }

    pub fn literal(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

/// A compiled group of patterns checked together.
#[derive(Debug, Clone)]
pub struct PatternSet {
    keywords: Vec<Regex>,
    literals: Vec<String>,
}

impl PatternSet {
    /// Compile a pattern set. Keyword text goes through [`regex::escape`]
    /// first, so arbitrary input compiles.
    pub fn new(patterns: &[Pattern]) -> Self {
        let mut keywords = Vec::new();
        let mut literals = Vec::new();
        for pattern in patterns {
            match pattern {
                Pattern::Keyword(word) => {
                    let source = format!(r"(?i)\b{}\b", regex::escape(word));
                    keywords.push(Regex::new(&source).unwrap());
                }
                Pattern::Literal(text) => literals.push(text.clone()),
            }
        }
        Self { keywords, literals }
    }

    /// True if any pattern in the set matches `text`. Short-circuits on
    /// the first hit.
    pub fn is_match(&self, text: &str) -> bool {
        self.keywords.iter().any(|re| re.is_match(text))
            || self.literals.iter().any(|lit| text.contains(lit.as_str()))
    }

    pub fn len(&self) -> usize {
        self.keywords.len() + self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.literals.is_empty()
    }
}

/// The built-in sensitive keywords plus any configured extras.
pub fn keyword_set(extra: &[String]) -> PatternSet {
    let patterns: Vec<Pattern> = SENSITIVE_KEYWORDS
        .iter()
        .map(|word| Pattern::keyword(word))
        .chain(extra.iter().map(|word| Pattern::keyword(word)))
        .collect();
    PatternSet::new(&patterns)
}

/// The built-in insecure command fragments plus any configured extras.
pub fn command_set(extra: &[String]) -> PatternSet {
    let patterns: Vec<Pattern> = INSECURE_COMMANDS
        .iter()
        .map(|text| Pattern::literal(text))
        .chain(extra.iter().map(|text| Pattern::literal(text)))
        .collect();
    PatternSet::new(&patterns)
}

/// True if `text` mentions a sensitive keyword as a whole word.
pub fn has_sensitive_keyword(text: &str) -> bool {
    BUILTIN_KEYWORDS.is_match(text)
}

/// True if `text` contains an insecure command invocation.
pub fn has_insecure_command(text: &str) -> bool {
    BUILTIN_COMMANDS.is_match(text)
}

/// Number of `TODO` markers in `text` (whole word, case-sensitive).
pub fn todo_mentions(text: &str) -> usize {
    TODO_MENTION.find_iter(text).count()
}
