//! Declaration extraction
//!
//! Turns the lowered items of one file into [`DeclarationRecord`]s:
//!
//! - exported value bindings named after an HTTP verb become `RouteHandler`s
//! - every other exported value binding becomes a `Component` candidate
//! - interfaces become `Interface`s and object-type aliases `TypeAlias`es,
//!   both with their fields
//!
//! The documentation targets then pick what they need:
//! [`component_record`] pairs the first component with the first `*Props`
//! interface (a `*Props` type alias only when no interface matches), and
//! [`route_methods`] lists the handlers in discovery order.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::parsing::{parse_source, ParseOptions};
use crate::scanner::SourceFile;
use crate::syntax::{lower, Item, ItemKind, Member};

/// Marker searched for in interface names when picking a component's props
pub const PROPS_MARKER: &str = "Props";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Component,
    Interface,
    TypeAlias,
    RouteHandler,
}

impl DeclarationKind {
    /// Heading used above the field table of this kind of declaration
    pub fn fields_heading(&self) -> &'static str {
        match self {
            Self::Component => "Props",
            Self::Interface | Self::TypeAlias => "Fields",
            Self::RouteHandler => "Parameters",
        }
    }
}

/// One documented field of a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Textual type annotation; empty when the member has none
    pub type_expression: String,
    pub required: bool,
}

impl From<&Member> for FieldDescriptor {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            type_expression: member.type_text.clone().unwrap_or_default(),
            required: !member.optional,
        }
    }
}

/// A named declaration pulled out of a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationRecord {
    pub name: String,
    pub kind: DeclarationKind,
    pub fields: Vec<FieldDescriptor>,
    pub source_path: String,
}

/// HTTP methods a route file can export handlers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    /// Exact, case-sensitive match: route handlers must be named `GET`, not `get`
    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or(())
    }
}

/// How route files are searched for handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMethodStrategy {
    /// Inspect the parsed top-level exports
    #[default]
    Syntax,
    /// Search the raw text for `export async function <VERB>`
    Text,
}

// ============================================================================
// Extraction
// ============================================================================

/// Parse a file and extract all declaration records in source order
pub fn extract_declarations(
    file: &SourceFile,
    options: &ParseOptions,
) -> Result<Vec<DeclarationRecord>> {
    let parsed = parse_source(file, options)?;
    let items = lower(&parsed);
    let records = records_from_items(&items, &file.path);

    debug!(
        "{}: {} items, {} records ({})",
        file.path.display(),
        items.len(),
        records.len(),
        parsed.lang.name()
    );

    Ok(records)
}

/// Build declaration records from lowered items
pub fn records_from_items(items: &[Item], path: &Path) -> Vec<DeclarationRecord> {
    let source_path = path.display().to_string();
    let mut records = Vec::new();

    for item in items {
        if let Some((name, members)) = item.shape() {
            let kind = match item.kind {
                ItemKind::Interface { .. } => DeclarationKind::Interface,
                _ => DeclarationKind::TypeAlias,
            };
            records.push(DeclarationRecord {
                name: name.to_string(),
                kind,
                fields: members.iter().map(FieldDescriptor::from).collect(),
                source_path: source_path.clone(),
            });
            continue;
        }

        if !item.is_exported() || !item.is_value() {
            continue;
        }

        let handlers: Vec<&str> = item
            .exported_names()
            .into_iter()
            .filter(|name| name.parse::<HttpMethod>().is_ok())
            .collect();

        if handlers.is_empty() {
            if let Some(name) = item.name() {
                records.push(DeclarationRecord {
                    name: name.to_string(),
                    kind: DeclarationKind::Component,
                    fields: Vec::new(),
                    source_path: source_path.clone(),
                });
            }
            continue;
        }

        for name in handlers {
            records.push(DeclarationRecord {
                name: name.to_string(),
                kind: DeclarationKind::RouteHandler,
                fields: Vec::new(),
                source_path: source_path.clone(),
            });
        }
    }

    records
}

/// Pick the component of a file: the first exported value declaration,
/// documented with the fields of the first interface whose name contains
/// `Props`, or of the first such type alias when no interface matches.
pub fn component_record(records: &[DeclarationRecord]) -> Option<DeclarationRecord> {
    let component = records
        .iter()
        .find(|r| r.kind == DeclarationKind::Component && !r.name.is_empty())?;

    let props_of = move |kind: DeclarationKind| {
        records
            .iter()
            .find(|r| r.kind == kind && r.name.contains(PROPS_MARKER))
    };
    let fields = props_of(DeclarationKind::Interface)
        .or_else(|| props_of(DeclarationKind::TypeAlias))
        .map(|r| r.fields.clone())
        .unwrap_or_default();

    Some(DeclarationRecord {
        fields,
        ..component.clone()
    })
}

/// HTTP methods handled by a file, deduplicated, in discovery order
pub fn route_methods(records: &[DeclarationRecord]) -> Vec<HttpMethod> {
    let mut methods = Vec::new();
    for record in records {
        if record.kind != DeclarationKind::RouteHandler {
            continue;
        }
        if let Ok(method) = record.name.parse::<HttpMethod>() {
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
    }
    methods
}

/// Fast path: literal search for `export async function <VERB>`.
///
/// Does not parse the file, so a verb mentioned in a comment or string also
/// counts. Methods are reported in [`HttpMethod::ALL`] order.
pub fn scan_route_methods_text(source: &str) -> Vec<HttpMethod> {
    HttpMethod::ALL
        .into_iter()
        .filter(|method| source.contains(&format!("export async function {}", method)))
        .collect()
}

/// Extract the component documented by one file, if any
pub fn extract_component(
    file: &SourceFile,
    options: &ParseOptions,
) -> Result<Option<DeclarationRecord>> {
    let records = extract_declarations(file, options)?;
    Ok(component_record(&records))
}

/// Extract the HTTP methods exported by one route file
pub fn extract_route_methods(
    file: &SourceFile,
    strategy: RouteMethodStrategy,
    options: &ParseOptions,
) -> Result<Vec<HttpMethod>> {
    match strategy {
        RouteMethodStrategy::Text => Ok(scan_route_methods_text(&file.raw_text)),
        RouteMethodStrategy::Syntax => {
            let records = extract_declarations(file, options)?;
            Ok(route_methods(&records))
        }
    }
}
