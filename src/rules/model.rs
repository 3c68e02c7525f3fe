use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single directive rule in a line-oriented catalogue.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Directive name shown in reports, unique within a catalogue.
    pub directive: String,
    detector: Regex,
    /// Check applied to the captured value.
    pub predicate: Predicate,
    /// What to do about it, shown for non-compliant rows.
    pub message: String,
    /// The config line that fixes it.
    pub remediation: String,
}

impl Rule {
    /// Compile a rule. `pattern` matches the directive and captures its
    /// value in group 1; the line-start anchor with optional leading
    /// whitespace is applied here so catalogue tables carry only the
    /// directive body.
    pub fn new(
        directive: &str,
        pattern: &str,
        predicate: Predicate,
        message: &str,
        remediation: &str,
    ) -> Result<Self, regex::Error> {
        let detector = Regex::new(&format!(r"^\s*{}", pattern))?;
        Ok(Self {
            directive: directive.to_string(),
            detector,
            predicate,
            message: message.to_string(),
            remediation: remediation.to_string(),
        })
    }

    /// Captured value from the first match on `line`, if the line matches
    /// this rule's detector. A detector without a capture group yields the
    /// empty string.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.detector
            .captures(line)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
    }
}

/// The closed predicate language applied to captured directive values.
///
/// Every variant is total over strings: values that fail numeric or
/// duration coercion evaluate to false, so a garbled value reads as
/// misconfigured instead of aborting the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Value equals the expected token, ASCII case-insensitive.
    EqualsIgnoreCase(&'static str),
    /// Value equals the expected token exactly.
    Equals(&'static str),
    /// Value differs from a forbidden token.
    NotEquals(&'static str),
    /// Value is non-empty after trimming.
    NonEmpty,
    /// Value contains a literal substring.
    Contains(&'static str),
    /// Value contains every listed substring.
    ContainsAll(&'static [&'static str]),
    /// Value contains none of the listed substrings.
    ExcludesAll(&'static [&'static str]),
    /// No whitespace-separated token of the value equals a listed token.
    /// Token equality, not substring: "TLSv1.2" never trips on "TLSv1".
    ForbidsTokens(&'static [&'static str]),
    /// Value parses as an integer no greater than the bound.
    IntAtMost(i64),
    /// Value parses as exactly this integer.
    IntEquals(i64),
    /// Value parses as a duration (optional s/m/h/d suffix) of at most
    /// this many seconds.
    SecondsAtMost(u64),
}

impl Predicate {
    /// Whether `value` satisfies this predicate.
    pub fn holds(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Self::EqualsIgnoreCase(want) => value.eq_ignore_ascii_case(want),
            Self::Equals(want) => value == *want,
            Self::NotEquals(reject) => value != *reject,
            Self::NonEmpty => !value.is_empty(),
            Self::Contains(needle) => value.contains(needle),
            Self::ContainsAll(needles) => needles.iter().all(|n| value.contains(n)),
            Self::ExcludesAll(needles) => needles.iter().all(|n| !value.contains(n)),
            Self::ForbidsTokens(tokens) => value
                .split_whitespace()
                .all(|tok| !tokens.iter().any(|t| tok.eq_ignore_ascii_case(t))),
            Self::IntAtMost(max) => value.parse::<i64>().map(|n| n <= *max).unwrap_or(false),
            Self::IntEquals(want) => value.parse::<i64>().map(|n| n == *want).unwrap_or(false),
            Self::SecondsAtMost(max) => parse_seconds(value).map(|s| s <= *max).unwrap_or(false),
        }
    }

    /// One-line description for `list-rules` output.
    pub fn describe(&self) -> String {
        match self {
            Self::EqualsIgnoreCase(want) => format!("equals '{}' (any case)", want),
            Self::Equals(want) => format!("equals '{}'", want),
            Self::NotEquals(reject) => format!("is not '{}'", reject),
            Self::NonEmpty => "has a value".to_string(),
            Self::Contains(needle) => format!("contains '{}'", needle),
            Self::ContainsAll(needles) => format!("contains all of {:?}", needles),
            Self::ExcludesAll(needles) => format!("contains none of {:?}", needles),
            Self::ForbidsTokens(tokens) => format!("lists no token from {:?}", tokens),
            Self::IntAtMost(max) => format!("is at most {}", max),
            Self::IntEquals(want) => format!("is exactly {}", want),
            Self::SecondsAtMost(max) => format!("is at most {} seconds", max),
        }
    }
}

/// Parse digits with an optional s/m/h/d suffix into seconds.
fn parse_seconds(value: &str) -> Option<u64> {
    let (digits, unit) = match value.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&value[..idx], Some(c.to_ascii_lowercase())),
        _ => (value, None),
    };
    let n: u64 = digits.parse().ok()?;
    let factor = match unit {
        None | Some('s') => 1,
        Some('m') => 60,
        Some('h') => 3600,
        Some('d') => 86_400,
        Some(_) => return None,
    };
    n.checked_mul(factor)
}

/// An ordered, immutable set of directive rules for one dialect.
///
/// Report rows come out in the order rules appear here.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub id: String,
    pub rules: Vec<Rule>,
}

impl Catalog {
    pub fn new(id: &str, rules: Vec<Rule>) -> Self {
        Self {
            id: id.to_string(),
            rules,
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rows for `list-rules`.
    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.rules
            .iter()
            .map(|rule| RuleSummary {
                dialect: self.id.clone(),
                directive: rule.directive.clone(),
                check: rule.predicate.describe(),
                remediation: rule.remediation.clone(),
            })
            .collect()
    }
}

/// A rule over structured documents: fires when its key is present in a
/// project's config block with a falsy value. An absent key is not a
/// violation.
#[derive(Debug, Clone)]
pub struct FlagRule {
    pub key: String,
    pub vulnerability: String,
    pub explanation: String,
    pub recommendation: String,
}

impl FlagRule {
    pub fn new(key: &str, vulnerability: &str, explanation: &str, recommendation: &str) -> Self {
        Self {
            key: key.to_string(),
            vulnerability: vulnerability.to_string(),
            explanation: explanation.to_string(),
            recommendation: recommendation.to_string(),
        }
    }
}

/// An ordered catalogue of flag rules.
#[derive(Debug, Clone)]
pub struct FlagCatalog {
    pub id: String,
    pub rules: Vec<FlagRule>,
}

impl FlagCatalog {
    pub fn new(id: &str, rules: Vec<FlagRule>) -> Self {
        Self {
            id: id.to_string(),
            rules,
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.rules
            .iter()
            .map(|rule| RuleSummary {
                dialect: self.id.clone(),
                directive: rule.key.clone(),
                check: "is not disabled or empty when set".to_string(),
                remediation: rule.recommendation.clone(),
            })
            .collect()
    }
}

/// Row for `list-rules` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSummary {
    pub dialect: String,
    pub directive: String,
    pub check: String,
    pub remediation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, predicate: Predicate) -> Rule {
        Rule::new("Test", pattern, predicate, "msg", "fix").unwrap()
    }

    #[test]
    fn detector_anchors_at_line_start() {
        let r = rule(r"PermitRootLogin\s+(\w+)", Predicate::EqualsIgnoreCase("no"));
        assert_eq!(r.capture("PermitRootLogin no"), Some("no"));
        assert_eq!(r.capture("   PermitRootLogin yes"), Some("yes"));
        assert_eq!(r.capture("\tPermitRootLogin yes"), Some("yes"));
        assert_eq!(r.capture("# PermitRootLogin no"), None);
        assert_eq!(r.capture("UsePermitRootLogin no"), None);
    }

    #[test]
    fn capture_without_group_yields_empty_string() {
        let r = rule(r"UseDNS\s+\w+", Predicate::NonEmpty);
        assert_eq!(r.capture("UseDNS yes"), Some(""));
    }

    #[test]
    fn equals_ignore_case() {
        let p = Predicate::EqualsIgnoreCase("no");
        assert!(p.holds("no"));
        assert!(p.holds("No"));
        assert!(p.holds(" NO "));
        assert!(!p.holds("yes"));
        assert!(!p.holds(""));
    }

    #[test]
    fn exact_and_negated_equality() {
        assert!(Predicate::Equals("2").holds("2"));
        assert!(!Predicate::Equals("2").holds("1"));
        assert!(Predicate::NotEquals("root").holds("www-data"));
        assert!(!Predicate::NotEquals("root").holds("root"));
    }

    #[test]
    fn substring_predicates() {
        assert!(Predicate::Contains("-Indexes").holds("-Indexes +FollowSymLinks"));
        assert!(!Predicate::Contains("-Indexes").holds("+Indexes"));

        let both = Predicate::ContainsAll(&["-ALL", "+TLSv1.2"]);
        assert!(both.holds("-ALL +TLSv1.2"));
        assert!(!both.holds("+TLSv1.2"));

        let none = Predicate::ExcludesAll(&["RC4", "DES", "MD5"]);
        assert!(none.holds("EECDH+AESGCM:EDH+AESGCM"));
        assert!(!none.holds("HIGH:!MD5"));
    }

    #[test]
    fn forbid_tokens_matches_whole_tokens_only() {
        let p = Predicate::ForbidsTokens(&["SSLv2", "SSLv3", "TLSv1", "TLSv1.1"]);
        assert!(p.holds("TLSv1.2 TLSv1.3"));
        assert!(!p.holds("TLSv1 TLSv1.2"));
        assert!(!p.holds("sslv3"));
    }

    #[test]
    fn numeric_predicates_fail_closed() {
        assert!(Predicate::IntAtMost(3).holds("3"));
        assert!(!Predicate::IntAtMost(3).holds("4"));
        assert!(!Predicate::IntAtMost(3).holds("many"));
        assert!(Predicate::IntEquals(100).holds("100"));
        assert!(!Predicate::IntEquals(100).holds("10"));
        assert!(!Predicate::IntEquals(100).holds(""));
    }

    #[test]
    fn duration_predicate_understands_suffixes() {
        let p = Predicate::SecondsAtMost(60);
        assert!(p.holds("60"));
        assert!(p.holds("60s"));
        assert!(p.holds("1m"));
        assert!(!p.holds("2m"));
        assert!(!p.holds("1h"));
        assert!(!p.holds("soon"));
    }

    #[test]
    fn seconds_parser_units() {
        assert_eq!(parse_seconds("45"), Some(45));
        assert_eq!(parse_seconds("45s"), Some(45));
        assert_eq!(parse_seconds("2M"), Some(120));
        assert_eq!(parse_seconds("1h"), Some(3600));
        assert_eq!(parse_seconds("1d"), Some(86_400));
        assert_eq!(parse_seconds("1w"), None);
        assert_eq!(parse_seconds(""), None);
    }

    #[test]
    fn catalog_summaries_carry_dialect_and_order() {
        let catalog = Catalog::new(
            "demo",
            vec![
                rule(r"First\s+(\w+)", Predicate::NonEmpty),
                rule(r"Second\s+(\w+)", Predicate::NonEmpty),
            ],
        );
        let rows = catalog.summaries();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.dialect == "demo"));
    }
}
