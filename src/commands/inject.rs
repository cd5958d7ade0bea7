//! Inject command handler

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;

use tracing::{debug, info};

use crate::cli::InjectArgs;
use crate::commands::CommandContext;
use crate::error::{DocGenError, Result};
use crate::fs_utils::write_atomic;
use crate::inject::replace_blocks;
use crate::pipeline::{generate, Target};

/// Run the inject command
///
/// Each target is generated at most once, on the first block that names it.
pub fn run_inject(args: &InjectArgs, ctx: &CommandContext) -> Result<String> {
    let mut rendered: HashMap<Target, String> = HashMap::new();
    let mut stale = Vec::new();
    let mut output = String::new();

    for path in &args.files {
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DocGenError::NotFound {
                path: shown.clone(),
            },
            _ => DocGenError::Io(e),
        })?;

        let (updated, blocks) = replace_blocks(&text, &shown, |name| {
            let Ok(target) = Target::from_name(name) else {
                debug!("{}: leaving block '{}' untouched", shown, name);
                return Ok(None);
            };
            if let Some(markdown) = rendered.get(&target) {
                return Ok(Some(markdown.clone()));
            }
            let docs = generate(target, &ctx.config)?;
            ctx.check_warnings(&docs)?;
            let markdown = docs.markdown();
            rendered.insert(target, markdown.clone());
            Ok(Some(markdown))
        })?;

        let status = if updated == text {
            "unchanged"
        } else if args.check {
            stale.push(shown.clone());
            "stale"
        } else {
            write_atomic(path, &updated)?;
            info!("Updated {} block(s) in {}", blocks, shown);
            "updated"
        };
        let _ = writeln!(output, "{} {} ({} block(s))", status, shown, blocks);
    }

    if !stale.is_empty() {
        return Err(DocGenError::StaleDocs { paths: stale });
    }

    Ok(output)
}
