//! Configuration document loading.
//!
//! All matchers consume one of two crate-owned shapes: line-oriented files
//! become a `ConfigDocument` (ordered raw lines), structured YAML becomes a
//! `TreeNode`. This decouples rule evaluation from any parser's value type.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A line-oriented configuration file, loaded once and then immutable.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    /// Where the document came from, if it came from disk.
    pub path: Option<PathBuf>,
    lines: Vec<String>,
}

impl ConfigDocument {
    /// Build a document from raw text, preserving line order and content.
    pub fn from_text(text: &str) -> Self {
        Self {
            path: None,
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// Read a document from disk. An unreadable file aborts this document
    /// only; callers scanning several documents keep going.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut doc = Self::from_text(&text);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Scalar leaf of a structured document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Structured documents as a closed tree.
///
/// Mappings preserve insertion order; lookup on a duplicate key returns the
/// first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Scalar(Scalar),
    Sequence(Vec<TreeNode>),
    Mapping(Vec<(String, TreeNode)>),
}

impl TreeNode {
    /// First value stored under `key`, if this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, TreeNode)]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[TreeNode]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Falsiness as the flag matcher sees it: null, false, numeric zero,
    /// the empty string, and empty containers.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Scalar(Scalar::Null) => true,
            Self::Scalar(Scalar::Bool(b)) => !b,
            Self::Scalar(Scalar::Int(n)) => *n == 0,
            Self::Scalar(Scalar::Float(x)) => *x == 0.0,
            Self::Scalar(Scalar::Str(s)) => s.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Mapping(entries) => entries.is_empty(),
        }
    }
}

impl From<serde_yaml::Value> for TreeNode {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Scalar(Scalar::Int(i))
                } else {
                    Self::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Self::Scalar(Scalar::Str(s)),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (mapping_key(&k), v.into()))
                    .collect(),
            ),
            Value::Tagged(tagged) => tagged.value.into(),
        }
    }
}

/// Non-string mapping keys are stringified rather than rejected, so odd but
/// valid YAML (`true:`, `1:`) still produces a traversable tree.
fn mapping_key(key: &serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "~".into(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Parse YAML text into the closed tree.
pub fn parse_yaml(text: &str) -> Result<TreeNode> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(TreeNode::from(value))
}

/// Read and parse a YAML file.
pub fn read_yaml(path: &Path) -> Result<TreeNode> {
    let text = fs::read_to_string(path)?;
    parse_yaml(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_preserves_line_order() {
        let doc = ConfigDocument::from_text("first\nsecond\n\nthird");
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines, vec!["first", "second", "", "third"]);
        assert_eq!(doc.line_count(), 4);
    }

    #[test]
    fn empty_document_has_no_lines() {
        let doc = ConfigDocument::from_text("");
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn falsy_covers_all_empty_shapes() {
        assert!(TreeNode::Scalar(Scalar::Null).is_falsy());
        assert!(TreeNode::Scalar(Scalar::Bool(false)).is_falsy());
        assert!(TreeNode::Scalar(Scalar::Int(0)).is_falsy());
        assert!(TreeNode::Scalar(Scalar::Float(0.0)).is_falsy());
        assert!(TreeNode::Scalar(Scalar::Str(String::new())).is_falsy());
        assert!(TreeNode::Sequence(vec![]).is_falsy());
        assert!(TreeNode::Mapping(vec![]).is_falsy());
    }

    #[test]
    fn truthy_values_are_not_falsy() {
        assert!(!TreeNode::Scalar(Scalar::Bool(true)).is_falsy());
        assert!(!TreeNode::Scalar(Scalar::Int(3)).is_falsy());
        assert!(!TreeNode::Scalar(Scalar::Str("enabled".into())).is_falsy());
        assert!(!TreeNode::Sequence(vec![TreeNode::Scalar(Scalar::Null)]).is_falsy());
    }

    #[test]
    fn mapping_lookup_returns_first_occurrence() {
        let node = TreeNode::Mapping(vec![
            ("key".into(), TreeNode::Scalar(Scalar::Int(1))),
            ("key".into(), TreeNode::Scalar(Scalar::Int(2))),
        ]);
        assert_eq!(node.get("key"), Some(&TreeNode::Scalar(Scalar::Int(1))));
        assert_eq!(node.get("missing"), None);
    }

    #[test]
    fn yaml_round_trips_into_tree() {
        let tree = parse_yaml("projects:\n  - demo:\n      password: false\n      depth: 2\n")
            .expect("valid yaml");
        let projects = tree.get("projects").and_then(TreeNode::as_sequence);
        let project = projects.and_then(|p| p.first());
        let config = project.and_then(|p| p.get("demo"));
        let password = config.and_then(|c| c.get("password"));
        assert_eq!(password, Some(&TreeNode::Scalar(Scalar::Bool(false))));
        let depth = config.and_then(|c| c.get("depth"));
        assert_eq!(depth, Some(&TreeNode::Scalar(Scalar::Int(2))));
    }

    #[test]
    fn yaml_mapping_preserves_document_order() {
        let tree = parse_yaml("zeta: 1\nalpha: 2\nmid: 3\n").expect("valid yaml");
        let keys: Vec<&str> = tree
            .as_mapping()
            .map(|entries| entries.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn non_string_keys_are_stringified() {
        let tree = parse_yaml("1: one\ntrue: yes\n").expect("valid yaml");
        assert!(tree.get("1").is_some());
        assert!(tree.get("true").is_some());
    }
}
