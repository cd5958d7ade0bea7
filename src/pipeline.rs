//! Documentation pipelines
//!
//! Each [`Target`] runs the same composition independently:
//!
//! 1. scan the target's root for candidate files
//! 2. extract declarations from every file (per-file failures become warnings)
//! 3. normalise route paths (API routes only)
//! 4. render the records into a [`Document`]
//!
//! Nothing is written to disk here; callers decide where the markdown goes.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DocsConfig;
use crate::error::{DocGenError, Result};
use crate::extract::{extract_component, extract_route_methods, DeclarationRecord};
use crate::fs_utils::to_slash;
use crate::render::{render_components, render_routes, Document, API_ROUTES_TITLE, COMPONENTS_TITLE};
use crate::routes::{normalize_route_path, RouteRecord};
use crate::scanner::SourceFile;

/// A documentation generation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Target {
    Components,
    ApiRoutes,
}

impl Target {
    pub const ALL: [Target; 2] = [Self::Components, Self::ApiRoutes];

    /// Invocation name used by build steps and marker blocks
    pub fn name(&self) -> &'static str {
        match self {
            Self::Components => "COMPONENTS",
            Self::ApiRoutes => "API_ROUTES",
        }
    }

    /// Accepts `COMPONENTS` / `API_ROUTES` and the kebab/snake lower-case forms
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "COMPONENTS" => Ok(Self::Components),
            "API_ROUTES" => Ok(Self::ApiRoutes),
            _ => Err(DocGenError::UnknownTarget {
                name: name.to_string(),
            }),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Components => COMPONENTS_TITLE,
            Self::ApiRoutes => API_ROUTES_TITLE,
        }
    }

    pub fn default_root(&self) -> &'static str {
        match self {
            Self::Components => "./src/components",
            Self::ApiRoutes => "./src/app/api",
        }
    }

    pub fn default_include(&self) -> &'static str {
        match self {
            Self::Components => r"\.(tsx|ts)$",
            Self::ApiRoutes => r"route\.ts$",
        }
    }

    pub fn default_exclude(&self) -> Option<&'static str> {
        match self {
            Self::Components => Some(r"\.test\."),
            Self::ApiRoutes => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = DocGenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// A file that was skipped while generating documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub path: String,
    pub message: String,
}

impl Warning {
    fn from_error(path: &Path, error: &DocGenError) -> Self {
        let message = match error {
            DocGenError::ParseError { cause, .. } => cause.to_string(),
            other => other.to_string(),
        };
        Self {
            path: path.display().to_string(),
            message,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Records a document was rendered from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Records {
    Components(Vec<DeclarationRecord>),
    Routes(Vec<RouteRecord>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Self::Components(records) => records.len(),
            Self::Routes(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one target run
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocs {
    pub target: Target,
    pub document: Document,
    pub records: Records,
    pub warnings: Vec<Warning>,
}

impl GeneratedDocs {
    pub fn markdown(&self) -> String {
        self.document.to_markdown()
    }
}

/// Run the pipeline of the given target
pub fn generate(target: Target, config: &DocsConfig) -> Result<GeneratedDocs> {
    match target {
        Target::Components => generate_component_docs(config),
        Target::ApiRoutes => generate_api_route_docs(config),
    }
}

/// `COMPONENTS`: one section per component with its props table
pub fn generate_component_docs(config: &DocsConfig) -> Result<GeneratedDocs> {
    let target = Target::Components;
    let scan = config.scan_target(target)?;
    let files = scan.collect_files()?;
    let options = config.extraction.parse_options();

    debug!("{}: {} candidate files under {}", target, files.len(), scan.root.display());

    let outcomes = extract_all(&files, config.extraction.parallel, |path| {
        let file = SourceFile::read(path)?;
        extract_component(&file, &options)
    });

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut first_seen: HashMap<String, String> = HashMap::new();

    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(Some(record)) => {
                if let Some(existing) = first_seen.get(&record.name) {
                    let warning = Warning {
                        path: path.display().to_string(),
                        message: format!(
                            "duplicate component name '{}' (first defined in {})",
                            record.name, existing
                        ),
                    };
                    warn!("Skipping {}", warning);
                    warnings.push(warning);
                    continue;
                }
                first_seen.insert(record.name.clone(), record.source_path.clone());
                records.push(record);
            }
            Ok(None) => debug!("{}: no exported component", path.display()),
            Err(e) => {
                let warning = Warning::from_error(path, &e);
                warn!("Skipping {}", warning);
                warnings.push(warning);
            }
        }
    }

    let document = render_components(target.title(), &records);
    info!(
        "{}: documented {} components from {} files ({} warnings)",
        target,
        records.len(),
        files.len(),
        warnings.len()
    );

    Ok(GeneratedDocs {
        target,
        document,
        records: Records::Components(records),
        warnings,
    })
}

/// `API_ROUTES`: one table row per route file
pub fn generate_api_route_docs(config: &DocsConfig) -> Result<GeneratedDocs> {
    let target = Target::ApiRoutes;
    let scan = config.scan_target(target)?;
    let files = scan.collect_files()?;
    let options = config.extraction.parse_options();
    let strategy = config.extraction.route_methods;
    let api_root = to_slash(&scan.root);

    debug!("{}: {} candidate files under {}", target, files.len(), api_root);

    let outcomes = extract_all(&files, config.extraction.parallel, |path| {
        let file = SourceFile::read(path)?;
        let methods = extract_route_methods(&file, strategy, &options)?;
        Ok(RouteRecord {
            url_path: normalize_route_path(&to_slash(path), &api_root),
            methods,
            source_path: path.display().to_string(),
        })
    });

    let mut routes = Vec::new();
    let mut warnings = Vec::new();

    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(route) => {
                if route.methods.is_empty() {
                    debug!("{}: no HTTP handlers found", path.display());
                }
                routes.push(route);
            }
            Err(e) => {
                let warning = Warning::from_error(path, &e);
                warn!("Skipping {}", warning);
                warnings.push(warning);
            }
        }
    }

    let document = render_routes(target.title(), &routes);
    info!(
        "{}: documented {} routes ({} warnings)",
        target,
        routes.len(),
        warnings.len()
    );

    Ok(GeneratedDocs {
        target,
        document,
        records: Records::Routes(routes),
        warnings,
    })
}

/// Run `extract` over every file, keeping results in scan order
fn extract_all<T, F>(files: &[PathBuf], parallel: bool, extract: F) -> Vec<Result<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
{
    if parallel {
        files.par_iter().map(|path| extract(path.as_path())).collect()
    } else {
        files.iter().map(|path| extract(path.as_path())).collect()
    }
}
