//! pony-docgen: component and API route documentation for Storybook Pony
//!
//! This library scans a Next.js source tree, extracts exported component
//! declarations and HTTP route handlers with tree-sitter, and renders them as
//! markdown reference documents.
//!
//! # Targets
//!
//! - `COMPONENTS` - one section per component under `src/components`, with
//!   a props table when the component has a `<Name>Props` shape
//! - `API_ROUTES` - one table row per `route.ts` under `src/app/api`, with
//!   the URL path and the HTTP methods the file exports
//!
//! # Example
//!
//! ```no_run
//! use pony_docgen::{generate, DocsConfig, Target};
//!
//! let config = DocsConfig::default();
//! let docs = generate(Target::ApiRoutes, &config)?;
//! for warning in &docs.warnings {
//!     eprintln!("skipped {}", warning);
//! }
//! print!("{}", docs.markdown());
//! # Ok::<(), pony_docgen::DocGenError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod fs_utils;
pub mod inject;
pub mod lang;
pub mod parsing;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod scanner;
pub mod syntax;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use config::DocsConfig;
pub use error::{DocGenError, ParseCause, Result};
pub use extract::{
    DeclarationKind, DeclarationRecord, FieldDescriptor, HttpMethod, RouteMethodStrategy,
};
pub use lang::Lang;
pub use pipeline::{generate, GeneratedDocs, Records, Target, Warning};
pub use render::{render_components, render_routes, Document};
pub use routes::{normalize_route_path, RouteRecord};
pub use scanner::{ScanTarget, SourceFile};
