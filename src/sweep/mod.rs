//! Directory sweep.
//!
//! Walks a tree, counts what lives there, scans file content for
//! cleartext secrets and insecure commands, and runs the project-settings
//! catalogue over every YAML document found. Hidden and git-ignored
//! entries are skipped. Files are visited in sorted path order so two
//! sweeps of the same tree produce identical reports.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::Digest;

use crate::document;
use crate::error::Result;
use crate::rules::{self, builtin, Finding, FlagCatalog};
use crate::scanner::{self, PatternSet};

/// Files above this size are counted but not read.
const MAX_FILE_SIZE: u64 = 1_048_576;

const SECRET_ADVICE: &str =
    "Move secrets out of the repository; load them from a vault or environment at deploy time.";
const COMMAND_ADVICE: &str =
    "Use secured commands only; never disable TLS certificate verification.";

/// Pattern sets applied to file content during a sweep.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    pub keywords: PatternSet,
    pub commands: PatternSet,
    /// Flag catalogue evaluated against every YAML file.
    pub flag_catalog: &'static FlagCatalog,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            keywords: scanner::keyword_set(&[]),
            commands: scanner::command_set(&[]),
            flag_catalog: builtin::flag_catalog(),
        }
    }
}

/// One scanned configuration file.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub content_hash: String,
    pub has_secrets: bool,
    pub has_insecure_commands: bool,
    /// Advice for this file; insecure commands outrank secrets when both
    /// are present.
    pub recommendation: Option<String>,
}

/// Aggregate result of sweeping a directory tree.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub root: PathBuf,
    /// Every regular file seen, including ones skipped as oversized.
    pub total_files: usize,
    /// Files with a configuration extension (yaml, yml, json, toml).
    pub config_files: usize,
    /// `TODO` markers across all readable files.
    pub todo_mentions: usize,
    pub files_with_secrets: usize,
    pub files_with_insecure_commands: usize,
    pub records: Vec<FileRecord>,
    /// Disabled protections from YAML project settings, in file order.
    pub findings: Vec<Finding>,
}

/// Sweep the tree rooted at `root`.
///
/// Unreadable or oversized files are skipped with a debug log rather than
/// aborting the sweep; the report always covers everything that could be
/// read.
pub fn sweep(root: &Path, options: &SweepOptions) -> Result<SweepReport> {
    // Fail up front on a missing root instead of returning an empty report.
    std::fs::metadata(root)?;

    let mut paths: Vec<PathBuf> = Vec::new();
    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .build();
    for entry in walker.flatten() {
        let path = entry.path();
        if path.is_file() {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();

    let mut report = SweepReport {
        root: root.to_path_buf(),
        total_files: 0,
        config_files: 0,
        todo_mentions: 0,
        files_with_secrets: 0,
        files_with_insecure_commands: 0,
        records: Vec::new(),
        findings: Vec::new(),
    };

    for path in paths {
        report.total_files += 1;

        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "skipping unreadable file");
                continue;
            }
        };
        if metadata.len() > MAX_FILE_SIZE {
            tracing::debug!(path = %path.display(), size = metadata.len(), "skipping oversized file");
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "skipping unreadable file");
                continue;
            }
        };

        report.todo_mentions += scanner::todo_mentions(&content);

        if !is_config_file(&path) {
            continue;
        }
        report.config_files += 1;

        let has_secrets = options.keywords.is_match(&content);
        let has_insecure_commands = options.commands.is_match(&content);
        if has_secrets {
            report.files_with_secrets += 1;
        }
        if has_insecure_commands {
            report.files_with_insecure_commands += 1;
        }
        let recommendation = if has_insecure_commands {
            Some(COMMAND_ADVICE.to_string())
        } else if has_secrets {
            Some(SECRET_ADVICE.to_string())
        } else {
            None
        };

        if is_yaml_file(&path) {
            match document::parse_yaml(&content) {
                Ok(tree) => report
                    .findings
                    .extend(rules::evaluate_flags(options.flag_catalog, &tree)),
                Err(error) => {
                    tracing::debug!(path = %path.display(), %error, "skipping unparseable YAML")
                }
            }
        }

        let content_hash = format!(
            "{:x}",
            sha2::Digest::finalize(sha2::Sha256::new().chain_update(content.as_bytes()))
        );
        report.records.push(FileRecord {
            path: path.clone(),
            size_bytes: metadata.len(),
            content_hash,
            has_secrets,
            has_insecure_commands,
            recommendation,
        });
    }

    Ok(report)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

fn is_config_file(path: &Path) -> bool {
    matches!(
        extension_of(path).as_deref(),
        Some("yaml" | "yml" | "json" | "toml")
    )
}

fn is_yaml_file(path: &Path) -> bool {
    matches!(extension_of(path).as_deref(), Some("yaml" | "yml"))
}
