//! Generate command handler

use tracing::info;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::commands::CommandContext;
use crate::config::DocsConfig;
use crate::error::{DocGenError, Result};
use crate::extract::RouteMethodStrategy;
use crate::fs_utils::write_atomic;
use crate::pipeline::generate;

/// Run the generate command
pub fn run_generate(args: &GenerateArgs, ctx: &CommandContext) -> Result<String> {
    let config = apply_overrides(&ctx.config, args);
    let docs = generate(args.target, &config)?;
    ctx.check_warnings(&docs)?;

    let output = match args.format {
        OutputFormat::Markdown => docs.markdown(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&docs)
                .map_err(|e| DocGenError::Io(e.into()))?;
            json.push('\n');
            json
        }
    };

    match &args.output {
        Some(path) => {
            write_atomic(path, &output)?;
            info!("Wrote {} to {}", args.target, path.display());
            Ok(String::new())
        }
        None => Ok(output),
    }
}

fn apply_overrides(base: &DocsConfig, args: &GenerateArgs) -> DocsConfig {
    let mut config = base.clone();

    let target = config.target_mut(args.target);
    if let Some(root) = &args.root {
        target.root = Some(root.clone());
    }
    if let Some(include) = &args.include {
        target.include = Some(include.clone());
    }
    if let Some(exclude) = &args.exclude {
        target.exclude = Some(exclude.clone());
    }

    if let Some(timeout_ms) = args.timeout_ms {
        config.extraction.timeout_ms = timeout_ms;
    }
    if args.text_routes {
        config.extraction.route_methods = RouteMethodStrategy::Text;
    }

    config
}
