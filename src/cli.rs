//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::pipeline::Target;

/// Component and API route documentation generator
#[derive(Parser, Debug)]
#[command(name = "pony-docgen")]
#[command(about = "Generates markdown documentation for components and API routes")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./pony-docgen.toml when present)
    #[arg(short, long, global = true, value_name = "FILE", env = "PONY_DOCGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extract files one at a time instead of on the thread pool
    #[arg(long, global = true)]
    pub serial: bool,

    /// Fail when any file had to be skipped
    #[arg(long, global = true)]
    pub strict: bool,

    /// Print each file's syntax tree to stderr
    #[arg(long, global = true, hide = true)]
    pub print_ast: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the documentation of one target (COMPONENTS or API_ROUTES)
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Refresh AUTO-GENERATED-CONTENT blocks in markdown files
    Inject(InjectArgs),
}

/// Output format for generated documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Markdown document
    #[default]
    Markdown,
    /// Document, records and warnings as JSON
    Json,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Target to generate: COMPONENTS or API_ROUTES
    #[arg(value_name = "TARGET")]
    pub target: Target,

    /// Directory to scan (overrides the config file)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Include pattern (regex, or glob with a `glob:` prefix)
    #[arg(long, value_name = "PATTERN")]
    pub include: Option<String>,

    /// Exclude pattern; pass an empty string to disable the default
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Option<String>,

    /// Per-file parse timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Detect route methods by searching the raw text instead of parsing
    #[arg(long)]
    pub text_routes: bool,

    /// Output format
    #[arg(short, long, default_value = "markdown", value_enum)]
    pub format: OutputFormat,

    /// Write the document to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the inject command
#[derive(Args, Debug)]
pub struct InjectArgs {
    /// Markdown files containing AUTO-GENERATED-CONTENT markers
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Report stale files without rewriting them
    #[arg(long)]
    pub check: bool,
}
