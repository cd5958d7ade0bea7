//! Command modules for the pony-docgen CLI
//!
//! Each command module implements a single top-level command:
//! - `generate` - Render one target to stdout or a file
//! - `inject` - Refresh marker blocks in existing markdown files
//!
//! Handlers take their `Args` struct from `cli.rs` and a shared
//! `CommandContext`, and return the text to print on stdout.

pub mod generate;
pub mod inject;

pub use generate::run_generate;
pub use inject::run_inject;

use std::env;

use crate::cli::Cli;
use crate::config::DocsConfig;
use crate::error::{DocGenError, Result};
use crate::pipeline::GeneratedDocs;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Config after global flags are applied
    pub config: DocsConfig,
    /// Skipped files fail the command
    pub strict: bool,
}

impl CommandContext {
    /// Load the config named by `--config`, or `pony-docgen.toml` in the
    /// working directory, and apply the global flags to it
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = env::current_dir()?;
        let mut config = DocsConfig::discover(cli.config.as_deref(), &cwd)?;
        if cli.serial {
            config.extraction.parallel = false;
        }
        if cli.print_ast {
            config.extraction.print_ast = true;
        }

        Ok(Self {
            config,
            strict: cli.strict,
        })
    }

    pub fn with_config(config: DocsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Under `--strict`, any skipped file fails the run
    pub fn check_warnings(&self, docs: &GeneratedDocs) -> Result<()> {
        if self.strict && !docs.warnings.is_empty() {
            return Err(DocGenError::Warnings {
                count: docs.warnings.len(),
            });
        }
        Ok(())
    }
}
