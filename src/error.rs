//! Error types and exit codes for pony-docgen

use std::fmt;
use std::process::ExitCode;
use thiserror::Error;

/// Why a single source file could not be turned into declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCause {
    /// The file extension has no grammar
    UnsupportedLanguage { extension: String },
    /// The grammar could not be loaded into the parser
    Grammar { message: String },
    /// Parsing did not finish within the per-file budget
    Timeout { millis: u64 },
    /// The syntax tree contains error nodes
    Syntax { line: usize, column: usize },
    /// The file could not be read as UTF-8 text
    Unreadable { message: String },
}

impl fmt::Display for ParseCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLanguage { extension } => {
                write!(f, "unsupported file extension '{}'", extension)
            }
            Self::Grammar { message } => write!(f, "grammar error: {}", message),
            Self::Timeout { millis } => write!(f, "parse timed out after {}ms", millis),
            Self::Syntax { line, column } => {
                write!(f, "syntax error at line {}, column {}", line, column)
            }
            Self::Unreadable { message } => write!(f, "unreadable: {}", message),
        }
    }
}

/// Main error type for pony-docgen operations
#[derive(Error, Debug)]
pub enum DocGenError {
    #[error("Scan root not found: {path}")]
    NotFound { path: String },

    #[error("Failed to parse {path}: {cause}")]
    ParseError { path: String, cause: ParseCause },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown documentation target: {name}")]
    UnknownTarget { name: String },

    #[error("Malformed marker block in {path}: {message}")]
    MarkerMismatch { path: String, message: String },

    #[error("Generated documentation is out of date: {}", .paths.join(", "))]
    StaleDocs { paths: Vec<String> },

    #[error("Documentation generated with {count} warning(s)")]
    Warnings { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocGenError {
    /// Convert error to the process exit code:
    /// - 0: Success
    /// - 1: Scan root missing / IO error
    /// - 2: Invalid configuration, pattern or target name
    /// - 3: Parse failure (only surfaced with `--strict`)
    /// - 4: Malformed marker block
    /// - 6: Stale documentation (`inject --check`)
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Numeric form of [`DocGenError::exit_code`]
    pub fn code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 1,
            Self::Io(_) => 1,
            Self::InvalidPattern { .. } => 2,
            Self::Config { .. } => 2,
            Self::UnknownTarget { .. } => 2,
            Self::ParseError { .. } => 3,
            Self::Warnings { .. } => 3,
            Self::MarkerMismatch { .. } => 4,
            Self::StaleDocs { .. } => 6,
        }
    }
}

/// Result type alias for pony-docgen operations
pub type Result<T> = std::result::Result<T, DocGenError>;
