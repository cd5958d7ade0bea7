//! Source tree scanning
//!
//! A [`ScanTarget`] names a root directory plus include/exclude patterns.
//! [`ScanTarget::files`] walks the tree lazily and yields the matching files
//! in a stable, name-sorted order so generated tables are reproducible.
//!
//! Patterns are matched against the path relative to the root, written with
//! `/` separators (`ui/Button.test.tsx`). They are regular expressions by
//! default; a `glob:` prefix switches to glob syntax (`glob:**/*.stories.tsx`)
//! and an explicit `re:` prefix is accepted for symmetry.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{DocGenError, ParseCause, Result};
use crate::fs_utils::to_slash;

/// A compiled include or exclude rule
#[derive(Clone)]
pub enum Pattern {
    Regex(Regex),
    Glob { source: String, matcher: GlobMatcher },
}

impl Pattern {
    /// Compile a pattern string (`re:` / `glob:` prefix, regex by default)
    pub fn parse(pattern: &str) -> Result<Self> {
        if let Some(glob) = pattern.strip_prefix("glob:") {
            let matcher = Glob::new(glob)
                .map_err(|e| DocGenError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?
                .compile_matcher();
            return Ok(Self::Glob {
                source: glob.to_string(),
                matcher,
            });
        }

        let expr = pattern.strip_prefix("re:").unwrap_or(pattern);
        Regex::new(expr)
            .map(Self::Regex)
            .map_err(|e| DocGenError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Check a root-relative, slash-separated path against the pattern
    pub fn is_match(&self, relative: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(relative),
            Self::Glob { matcher, .. } => matcher.is_match(relative),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex(re) => write!(f, "re:{}", re.as_str()),
            Self::Glob { source, .. } => write!(f, "glob:{}", source),
        }
    }
}

/// One documentation generation unit: a root directory and its file rules
#[derive(Debug, Clone)]
pub struct ScanTarget {
    pub root: PathBuf,
    pub include: Pattern,
    pub exclude: Option<Pattern>,
    /// Honour `.gitignore` files while walking
    pub respect_gitignore: bool,
}

impl ScanTarget {
    pub fn new(root: impl Into<PathBuf>, include: &str, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            include: Pattern::parse(include)?,
            exclude: exclude.map(Pattern::parse).transpose()?,
            respect_gitignore: false,
        })
    }

    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Check whether a root-relative path passes the include/exclude rules
    pub fn accepts(&self, relative: &str) -> bool {
        self.include.is_match(relative)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(relative))
    }

    /// Start a walk over the matching files.
    ///
    /// Fails with [`DocGenError::NotFound`] when the root is missing or is not
    /// a directory. Each call starts a fresh walk.
    pub fn files(&self) -> Result<SourceFiles<'_>> {
        if !self.root.is_dir() {
            return Err(DocGenError::NotFound {
                path: self.root.display().to_string(),
            });
        }

        let mut builder = WalkBuilder::new(&self.root);
        builder.standard_filters(false);
        builder.git_ignore(self.respect_gitignore);
        builder.git_global(self.respect_gitignore);
        builder.git_exclude(self.respect_gitignore);
        builder.require_git(false);
        builder.hidden(true);
        builder.follow_links(false);
        builder.sort_by_file_name(|a, b| a.cmp(b));

        Ok(SourceFiles {
            target: self,
            walk: builder.build(),
        })
    }

    /// Collect the matching files eagerly
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.files()?.collect())
    }
}

/// Lazy iterator over the files selected by a [`ScanTarget`]
pub struct SourceFiles<'a> {
    target: &'a ScanTarget,
    walk: ignore::Walk,
}

impl Iterator for SourceFiles<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        for entry in self.walk.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.target.root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.into_path();
            let relative = path.strip_prefix(&self.target.root).unwrap_or(&path);
            let relative = to_slash(relative);

            if self.target.accepts(&relative) {
                return Some(path);
            }
            debug!("Filtered out: {}", relative);
        }
        None
    }
}

/// Read-only snapshot of one source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub raw_text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, raw_text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Read a file from disk. Read failures are per-file parse errors.
    pub fn read(path: &Path) -> Result<Self> {
        let raw_text = fs::read_to_string(path).map_err(|e| DocGenError::ParseError {
            path: path.display().to_string(),
            cause: ParseCause::Unreadable {
                message: e.to_string(),
            },
        })?;
        Ok(Self::new(path, raw_text))
    }
}
