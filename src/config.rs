//! pony-docgen configuration
//!
//! Read from `pony-docgen.toml`. Every key is optional; the defaults reproduce
//! the documentation build of the Storybook Pony app:
//!
//! ```toml
//! [components]
//! root = "./src/components"
//! include = '\.(tsx|ts)$'
//! exclude = '\.test\.'
//!
//! [api_routes]
//! root = "./src/app/api"
//! include = 'route\.ts$'
//!
//! [extraction]
//! timeout_ms = 5000          # 0 disables the limit
//! parallel = true
//! route_methods = "syntax"
//! respect_gitignore = false
//! ```
//!
//! Relative roots in a config file are resolved against the file's directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DocGenError, Result};
use crate::extract::RouteMethodStrategy;
use crate::parsing::ParseOptions;
use crate::pipeline::Target;
use crate::scanner::ScanTarget;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pony-docgen.toml";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    #[serde(default)]
    pub components: TargetConfig,

    #[serde(default)]
    pub api_routes: TargetConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Per-target scan settings; unset keys fall back to the target's defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub include: Option<String>,

    /// An empty string disables the default exclusion
    #[serde(default)]
    pub exclude: Option<String>,
}

/// Extraction settings shared by all targets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Per-file parse budget in milliseconds; 0 means no limit
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extract files on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    #[serde(default)]
    pub route_methods: RouteMethodStrategy,

    #[serde(default)]
    pub respect_gitignore: bool,

    /// Dump every syntax tree to stderr
    #[serde(default)]
    pub print_ast: bool,
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_parallel() -> bool {
    true
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            parallel: default_parallel(),
            route_methods: RouteMethodStrategy::default(),
            respect_gitignore: false,
            print_ast: false,
        }
    }
}

impl ExtractionConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            timeout: Duration::from_millis(self.timeout_ms),
            print_ast: self.print_ast,
        }
    }
}

impl DocsConfig {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DocGenError::Config {
            message: e.to_string(),
        })
    }

    /// Load a config file, resolving relative roots against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DocGenError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let mut config = Self::from_toml(&text).map_err(|e| match e {
            DocGenError::Config { message } => DocGenError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            for target in [&mut config.components, &mut config.api_routes] {
                if let Some(root) = target.root.as_mut() {
                    if root.is_relative() {
                        *root = base.join(&*root);
                    }
                }
            }
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given, else `pony-docgen.toml` in `dir` if present,
    /// else the defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    pub fn target(&self, target: Target) -> &TargetConfig {
        match target {
            Target::Components => &self.components,
            Target::ApiRoutes => &self.api_routes,
        }
    }

    pub fn target_mut(&mut self, target: Target) -> &mut TargetConfig {
        match target {
            Target::Components => &mut self.components,
            Target::ApiRoutes => &mut self.api_routes,
        }
    }

    /// Effective root directory for a target
    pub fn root(&self, target: Target) -> PathBuf {
        self.target(target)
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(target.default_root()))
    }

    /// Compile the scan rules of a target
    pub fn scan_target(&self, target: Target) -> Result<ScanTarget> {
        let settings = self.target(target);
        let include = settings
            .include
            .as_deref()
            .unwrap_or(target.default_include());
        let exclude = match settings.exclude.as_deref() {
            Some("") => None,
            Some(pattern) => Some(pattern),
            None => target.default_exclude(),
        };

        Ok(ScanTarget::new(self.root(target), include, exclude)?
            .with_gitignore(self.extraction.respect_gitignore))
    }
}
