//! Unified parsing entry point.
//!
//! Wraps tree-sitter so every caller gets the same grammar selection,
//! per-file timeout, and syntax-error policy.
//!
//! # Example
//!
//! ```ignore
//! use pony_docgen::parsing::{parse_source, ParseOptions};
//! use pony_docgen::scanner::SourceFile;
//!
//! let file = SourceFile::new("Button.tsx", "export function Button() { return <button/> }");
//! let parsed = parse_source(&file, &ParseOptions::default())?;
//! println!("{}", parsed.tree.root_node().to_sexp());
//! ```

use std::time::Duration;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{DocGenError, ParseCause, Result};
use crate::lang::Lang;
use crate::scanner::SourceFile;

/// Default per-file parse budget
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Knobs applied to every parse
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Abort parsing a single file after this long; zero means no limit
    pub timeout: Duration,
    /// Print the syntax tree to stderr (debugging aid)
    pub print_ast: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            print_ast: false,
        }
    }
}

/// A successfully parsed file
#[derive(Debug)]
pub struct ParsedFile<'a> {
    pub file: &'a SourceFile,
    pub lang: Lang,
    pub tree: Tree,
}

impl ParsedFile<'_> {
    pub fn source(&self) -> &str {
        &self.file.raw_text
    }
}

/// Parse a source file into a syntax tree.
///
/// # Errors
///
/// Returns `DocGenError::ParseError` when:
/// - the extension has no grammar
/// - the grammar cannot be loaded
/// - parsing exceeds `options.timeout`
/// - a declaration header or type body contains syntax errors
pub fn parse_source<'a>(file: &'a SourceFile, options: &ParseOptions) -> Result<ParsedFile<'a>> {
    let path = file.path.display().to_string();
    let fail = |cause: ParseCause| DocGenError::ParseError {
        path: path.clone(),
        cause,
    };

    let lang = Lang::from_path(&file.path).map_err(fail)?;

    let mut parser = Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| {
            fail(ParseCause::Grammar {
                message: format!("{:?}", e),
            })
        })?;

    if !options.timeout.is_zero() {
        let micros = u64::try_from(options.timeout.as_micros()).unwrap_or(u64::MAX);
        #[allow(deprecated)]
        parser.set_timeout_micros(micros.max(1));
    }

    let tree = parser.parse(&file.raw_text, None).ok_or_else(|| {
        fail(ParseCause::Timeout {
            millis: u64::try_from(options.timeout.as_millis()).unwrap_or(u64::MAX),
        })
    })?;

    if options.print_ast {
        eprintln!("=== AST for {} ===", path);
        eprintln!("{}", tree.root_node().to_sexp());
        eprintln!("=================");
    }

    if let Some(error) = first_structural_error(tree.root_node()) {
        let pos = error.start_position();
        return Err(fail(ParseCause::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
        }));
    }

    Ok(ParsedFile { file, lang, tree })
}

/// Node kinds the extractor never looks inside. Error recovery within them
/// (a bare `&` in JSX text, a half-written statement) does not reject a file.
const OPAQUE_KINDS: &[&str] = &[
    "statement_block",
    "class_body",
    "jsx_element",
    "jsx_self_closing_element",
    "object",
    "array",
    "template_string",
    "arguments",
];

/// First ERROR or MISSING node in the parts of the tree that declarations are
/// read from: top-level statements, export and declaration headers, type
/// bodies. Opaque nodes only count when they are left unterminated.
fn first_structural_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }

        let mut cursor = node.walk();
        if OPAQUE_KINDS.contains(&node.kind()) {
            let unterminated = node.children(&mut cursor).last().filter(|c| c.is_missing());
            if unterminated.is_some() {
                return unterminated;
            }
            continue;
        }

        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    None
}
