//! Marker block injection
//!
//! Generated documents are spliced into hand-written markdown between
//! comment markers:
//!
//! ```markdown
//! <!-- AUTO-GENERATED-CONTENT:START (COMPONENTS) -->
//! ...replaced on every run...
//! <!-- AUTO-GENERATED-CONTENT:END -->
//! ```
//!
//! Options after a colon (`(COMPONENTS:depth=2)`) are accepted and ignored.
//! Blocks whose name has no generator are left as they are.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DocGenError, Result};

static START_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--\s*AUTO-GENERATED-CONTENT:START\s*\(\s*([A-Za-z_][\w-]*)(?::[^)]*)?\s*\)\s*-->")
        .expect("valid regex")
});
static END_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*AUTO-GENERATED-CONTENT:END\s*-->").expect("valid regex"));

/// A START/END pair and the byte range of the content between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBlock {
    pub name: String,
    pub content_start: usize,
    pub content_end: usize,
}

/// Locate every marker block in `text`
///
/// `path` is only used in error messages.
pub fn find_blocks(text: &str, path: &str) -> Result<Vec<MarkerBlock>> {
    let mut blocks = Vec::new();
    let mut offset = 0;

    while let Some(start) = START_MARKER.captures_at(text, offset) {
        let whole = start.get(0).map(|m| (m.start(), m.end())).unwrap_or((offset, offset));
        let name = start[1].to_string();
        let content_start = whole.1;

        let Some(end) = END_MARKER.find_at(text, content_start) else {
            return Err(mismatch(path, text, whole.0, format!("block '{}' has no END marker", name)));
        };

        if let Some(nested) = START_MARKER.find_at(text, content_start) {
            if nested.start() < end.start() {
                return Err(mismatch(
                    path,
                    text,
                    nested.start(),
                    format!("block '{}' opens before '{}' is closed", &text[nested.range()], name),
                ));
            }
        }

        blocks.push(MarkerBlock {
            name,
            content_start,
            content_end: end.start(),
        });
        offset = end.end();
    }

    if let Some(stray) = END_MARKER.find_at(text, offset) {
        return Err(mismatch(path, text, stray.start(), "END marker without START".to_string()));
    }

    Ok(blocks)
}

/// Replace the content of every block for which `render` returns `Some`.
///
/// Returns the new text and the number of blocks that were rewritten.
pub fn replace_blocks<F>(text: &str, path: &str, mut render: F) -> Result<(String, usize)>
where
    F: FnMut(&str) -> Result<Option<String>>,
{
    let blocks = find_blocks(text, path)?;
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut replaced = 0;

    for block in &blocks {
        let Some(content) = render(&block.name)? else {
            continue;
        };
        out.push_str(&text[cursor..block.content_start]);
        out.push('\n');
        out.push_str(content.trim_end_matches('\n'));
        out.push('\n');
        cursor = block.content_end;
        replaced += 1;
    }
    out.push_str(&text[cursor..]);

    Ok((out, replaced))
}

fn mismatch(path: &str, text: &str, at: usize, message: String) -> DocGenError {
    let line = text[..at].matches('\n').count() + 1;
    DocGenError::MarkerMismatch {
        path: path.to_string(),
        message: format!("line {}: {}", line, message),
    }
}
