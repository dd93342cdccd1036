//! Category rules for file classification.
//!
//! A rule maps a matcher (file extension or filename keyword) to a target
//! subdirectory. Rules are evaluated in insertion order and the first
//! match wins, so precedence is fixed by table construction: scientific
//! families come before the generic categories, and config-supplied extras
//! are appended last.

use std::collections::BTreeMap;

/// What a rule matches against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Case-insensitive file extension (without the dot)
    Extension(String),
    /// Case-insensitive substring of the file name
    Keyword(String),
}

/// A single classification rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub matcher: Matcher,
    /// Subdirectory (under the organize root) receiving matched files
    pub target: String,
}

/// Scientific format families, highest precedence
const SCIENCE_CATEGORIES: &[(&str, &[&str])] = &[
    ("sequences", &["fastq", "fq", "fasta", "fa", "fna", "faa"]),
    ("alignments", &["sam", "bam", "cram", "maf"]),
    ("variants", &["vcf", "bcf", "gff", "gff3", "bed"]),
    ("arrays", &["h5", "hdf5", "nc", "fits", "npy"]),
];

/// Generic categories used by `--all`, after the science set
const GENERAL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "images",
        &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "svg", "webp", "heic"],
    ),
    ("videos", &["mp4", "mov", "avi", "mkv", "wmv", "webm"]),
    (
        "documents",
        &[
            "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "md", "csv", "tsv", "rtf",
        ],
    ),
    (
        "archives",
        &["zip", "tar", "gz", "tgz", "bz2", "xz", "rar", "dmg"],
    ),
];

/// An ordered rule table; first match wins
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    fn push_extension_table(&mut self, table: &[(&str, &[&str])]) {
        for (category, extensions) in table {
            for ext in *extensions {
                self.rules.push(CategoryRule {
                    matcher: Matcher::Extension(ext.to_string()),
                    target: category.to_string(),
                });
            }
        }
    }

    /// Rules for the scientific format families only
    pub fn science() -> Self {
        let mut set = RuleSet::default();
        set.push_extension_table(SCIENCE_CATEGORIES);
        set
    }

    /// Science families plus the generic categories
    pub fn general() -> Self {
        let mut set = Self::science();
        set.push_extension_table(GENERAL_CATEGORIES);
        set
    }

    /// A single keyword rule; matched files land in a directory named
    /// after the (sanitized) keyword.
    pub fn keyword(keyword: &str) -> Self {
        let target = crate::name::sanitize_name(keyword);
        RuleSet {
            rules: vec![CategoryRule {
                matcher: Matcher::Keyword(keyword.to_lowercase()),
                target,
            }],
        }
    }

    /// Append extension rules from configuration, lowest precedence.
    pub fn with_extra(mut self, extra: &BTreeMap<String, String>) -> Self {
        for (ext, category) in extra {
            self.rules.push(CategoryRule {
                matcher: Matcher::Extension(ext.to_lowercase()),
                target: category.clone(),
            });
        }
        self
    }

    /// Category names this rule set can produce.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.target.as_str())
    }

    /// Find the target subdirectory for a file name, if any rule matches.
    pub fn target_for(&self, file_name: &str) -> Option<&str> {
        let lower = file_name.to_lowercase();
        let extension = lower.rsplit_once('.').map(|(_, ext)| ext);

        self.rules
            .iter()
            .find(|rule| match &rule.matcher {
                Matcher::Extension(ext) => extension == Some(ext.as_str()),
                Matcher::Keyword(kw) => lower.contains(kw.as_str()),
            })
            .map(|rule| rule.target.as_str())
    }
}
