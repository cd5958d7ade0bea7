//! Top-level declaration model for JavaScript/TypeScript files
//!
//! The tree-sitter tree is lowered into a flat list of [`Item`]s, one per
//! top-level statement. Every item kind has a well-defined
//! [`Item::name`] accessor; a declaration without a resolvable name (an
//! anonymous default export, a destructuring binding) simply reports `None`.

use serde::Serialize;
use tree_sitter::Node;

use crate::parsing::ParsedFile;

// ============================================================================
// Text Extraction
// ============================================================================

/// Get text content of a node
pub fn get_node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

/// Get text content of a node, normalized to single line (collapse whitespace)
pub fn get_node_text_normalized(node: &Node, source: &str) -> String {
    normalize_whitespace(&get_node_text(node, source))
}

/// Normalize whitespace: collapse multiple spaces/newlines to single space
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Item model
// ============================================================================

/// How a top-level item is exposed to importers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Local,
    Exported,
    DefaultExport,
}

/// A member of an interface or object type literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    /// Type annotation text, `None` when the member is unannotated
    pub type_text: Option<String>,
    pub optional: bool,
}

/// One `name as alias` entry of an `export { ... }` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Function {
        name: Option<String>,
        is_async: bool,
    },
    Class {
        name: Option<String>,
    },
    /// `const` / `let` / `var`; only plain identifier bindings are kept
    Variable {
        names: Vec<String>,
    },
    Interface {
        name: Option<String>,
        members: Vec<Member>,
    },
    /// `type X = ...`; members are present when the alias is an object type
    TypeAlias {
        name: Option<String>,
        members: Option<Vec<Member>>,
    },
    /// `export { a, b as c }`, with or without a `from` clause
    ExportList {
        specifiers: Vec<ExportSpecifier>,
    },
    /// `export default <expression>`
    DefaultValue {
        name: Option<String>,
    },
    Other,
}

/// A lowered top-level statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub kind: ItemKind,
    pub visibility: Visibility,
    /// 1-based start line
    pub line: usize,
}

impl Item {
    /// The identifier this item introduces, if it has one
    pub fn name(&self) -> Option<&str> {
        let name = match &self.kind {
            ItemKind::Function { name, .. }
            | ItemKind::Class { name }
            | ItemKind::Interface { name, .. }
            | ItemKind::TypeAlias { name, .. }
            | ItemKind::DefaultValue { name } => name.as_deref(),
            ItemKind::Variable { names } => names.first().map(String::as_str),
            ItemKind::ExportList { specifiers } => specifiers.first().map(|s| {
                if s.exported == "default" {
                    s.local.as_str()
                } else {
                    s.exported.as_str()
                }
            }),
            ItemKind::Other => None,
        };
        name.filter(|name| !name.is_empty())
    }

    /// Names importers can use with a named import (`import { X }`)
    pub fn exported_names(&self) -> Vec<&str> {
        match (&self.kind, self.visibility) {
            (ItemKind::ExportList { specifiers }, _) => specifiers
                .iter()
                .map(|s| s.exported.as_str())
                .filter(|name| *name != "default")
                .collect(),
            (ItemKind::Variable { names }, Visibility::Exported) => {
                names.iter().map(String::as_str).collect()
            }
            (_, Visibility::Exported) => self.name().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_exported(&self) -> bool {
        self.visibility != Visibility::Local
    }

    /// Runtime values (as opposed to type-only declarations)
    pub fn is_value(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Function { .. }
                | ItemKind::Class { .. }
                | ItemKind::Variable { .. }
                | ItemKind::ExportList { .. }
                | ItemKind::DefaultValue { .. }
        )
    }

    /// Name and members of an interface or object-type alias
    pub fn shape(&self) -> Option<(&str, &[Member])> {
        match &self.kind {
            ItemKind::Interface {
                name: Some(name),
                members,
            } => Some((name.as_str(), members.as_slice())),
            ItemKind::TypeAlias {
                name: Some(name),
                members: Some(members),
            } => Some((name.as_str(), members.as_slice())),
            _ => None,
        }
    }
}

// ============================================================================
// Lowering
// ============================================================================

/// Lower the top-level statements of a parsed file into items
pub fn lower(parsed: &ParsedFile) -> Vec<Item> {
    let root = parsed.tree.root_node();
    let source = parsed.source();
    let mut items = Vec::new();

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let item = match child.kind() {
            "export_statement" => lower_export(&child, source),
            "comment" => continue,
            _ => Item {
                kind: lower_declaration(&child, source),
                visibility: Visibility::Local,
                line: child.start_position().row + 1,
            },
        };
        items.push(item);
    }

    items
}

fn lower_export(node: &Node, source: &str) -> Item {
    let line = node.start_position().row + 1;
    let visibility = if has_token(node, "default") {
        Visibility::DefaultExport
    } else {
        Visibility::Exported
    };

    if let Some(decl) = node.child_by_field_name("declaration") {
        return Item {
            kind: lower_declaration(&decl, source),
            visibility,
            line,
        };
    }

    if let Some(value) = node.child_by_field_name("value") {
        return Item {
            kind: ItemKind::DefaultValue {
                name: default_value_name(&value, source),
            },
            visibility: Visibility::DefaultExport,
            line,
        };
    }

    let mut cursor = node.walk();
    let clause = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "export_clause");
    let kind = match clause {
        Some(clause) => ItemKind::ExportList {
            specifiers: export_specifiers(&clause, source),
        },
        None => ItemKind::Other,
    };

    Item {
        kind,
        visibility: Visibility::Exported,
        line,
    }
}

fn lower_declaration(node: &Node, source: &str) -> ItemKind {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            ItemKind::Function {
                name: field_text(node, "name", source),
                is_async: has_token(node, "async"),
            }
        }
        "class_declaration" | "abstract_class_declaration" => ItemKind::Class {
            name: field_text(node, "name", source),
        },
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            let names = node
                .named_children(&mut cursor)
                .filter(|c| c.kind() == "variable_declarator")
                .filter_map(|d| d.child_by_field_name("name"))
                .filter(|n| n.kind() == "identifier")
                .map(|n| get_node_text(&n, source))
                .collect();
            ItemKind::Variable { names }
        }
        "interface_declaration" => ItemKind::Interface {
            name: field_text(node, "name", source),
            members: node
                .child_by_field_name("body")
                .map(|body| collect_members(&body, source))
                .unwrap_or_default(),
        },
        "type_alias_declaration" => ItemKind::TypeAlias {
            name: field_text(node, "name", source),
            members: node
                .child_by_field_name("value")
                .filter(|v| v.kind() == "object_type")
                .map(|v| collect_members(&v, source)),
        },
        _ => ItemKind::Other,
    }
}

/// Name carried by `export default <expr>`
///
/// Handles `export default Button`, named function/class expressions, and
/// component wrappers such as `memo(Button)` or `forwardRef(function Input() {})`.
fn default_value_name(value: &Node, source: &str) -> Option<String> {
    match value.kind() {
        "identifier" => Some(get_node_text(value, source)),
        "function_expression" | "function" | "class" | "generator_function" => {
            field_text(value, "name", source)
        }
        "call_expression" => {
            let func = value.child_by_field_name("function")?;
            let func_text = get_node_text(&func, source);
            let is_component_wrapper = func_text == "forwardRef"
                || func_text == "memo"
                || func_text.ends_with(".forwardRef")
                || func_text.ends_with(".memo");
            if !is_component_wrapper {
                return None;
            }
            let args = value.child_by_field_name("arguments")?;
            let mut cursor = args.walk();
            let found = args
                .named_children(&mut cursor)
                .find_map(|arg| default_value_name(&arg, source));
            found
        }
        _ => None,
    }
}

fn export_specifiers(clause: &Node, source: &str) -> Vec<ExportSpecifier> {
    let mut cursor = clause.walk();
    clause
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "export_specifier")
        .filter_map(|specifier| {
            let local = field_text(&specifier, "name", source)?;
            let exported = field_text(&specifier, "alias", source).unwrap_or_else(|| local.clone());
            Some(ExportSpecifier { local, exported })
        })
        .collect()
}

/// Collect property and method members of an interface body or object type
fn collect_members(body: &Node, source: &str) -> Vec<Member> {
    let mut members = Vec::new();
    let mut cursor = body.walk();

    for child in body.named_children(&mut cursor) {
        match child.kind() {
            "property_signature" => {
                let Some(name) = field_text(&child, "name", source) else {
                    continue;
                };
                let type_text = child
                    .child_by_field_name("type")
                    .and_then(|annotation| annotation.named_child(0))
                    .map(|t| get_node_text_normalized(&t, source));
                members.push(Member {
                    name,
                    type_text,
                    optional: has_token(&child, "?"),
                });
            }
            "method_signature" => {
                let Some(name) = field_text(&child, "name", source) else {
                    continue;
                };
                let params = child
                    .child_by_field_name("parameters")
                    .map(|p| get_node_text_normalized(&p, source))
                    .unwrap_or_else(|| "()".to_string());
                let ret = child
                    .child_by_field_name("return_type")
                    .and_then(|annotation| annotation.named_child(0))
                    .map(|t| get_node_text_normalized(&t, source))
                    .unwrap_or_else(|| "any".to_string());
                members.push(Member {
                    name,
                    type_text: Some(format!("{} => {}", params, ret)),
                    optional: has_token(&child, "?"),
                });
            }
            _ => {}
        }
    }

    members
}

fn field_text(node: &Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| get_node_text(&n, source))
        .filter(|text| !text.is_empty())
}

/// Check for an anonymous keyword/punctuation child such as `async`, `default`, `?`
fn has_token(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| !c.is_named() && c.kind() == token);
    found
}
