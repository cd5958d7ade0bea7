//! Markdown document model and rendering
//!
//! A [`Document`] is an ordered list of sections, each a heading with an
//! optional table. Rendering is pure: the same records always produce the
//! same bytes.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::extract::DeclarationRecord;
use crate::routes::RouteRecord;

pub const COMPONENTS_TITLE: &str = "Components";
pub const API_ROUTES_TITLE: &str = "API Routes";

/// A table cell. `Blank` renders as a bare `| |` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Blank,
}

impl Cell {
    /// Plain cell text, made safe for a table row
    pub fn text(value: &str) -> Self {
        Self::Text(escape_cell(value))
    }

    /// Cell text wrapped in backticks
    pub fn code(value: &str) -> Self {
        Self::Text(format!("`{}`", escape_cell(value)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Emit an empty line after the last row
    pub pad_after: bool,
}

impl Table {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            pad_after: false,
        }
    }

    pub fn padded(mut self) -> Self {
        self.pad_after = true;
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    fn write_markdown(&self, out: &mut String) {
        out.push('|');
        for column in &self.columns {
            out.push_str(&format!(" {} |", column));
        }
        out.push('\n');

        out.push('|');
        for column in &self.columns {
            out.push_str(&"-".repeat(column.chars().count() + 2));
            out.push('|');
        }
        out.push('\n');

        for row in &self.rows {
            out.push('|');
            for cell in row {
                match cell {
                    Cell::Text(text) => out.push_str(&format!(" {} |", text)),
                    Cell::Blank => out.push_str(" |"),
                }
            }
            out.push('\n');
        }

        if self.pad_after {
            out.push('\n');
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading level, 1 for `#`
    pub level: u8,
    pub heading: String,
    pub table: Option<Table>,
}

/// A rendered documentation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    /// Start a document with its `#` title
    pub fn titled(title: &str) -> Self {
        Self {
            sections: vec![Section {
                level: 1,
                heading: title.to_string(),
                table: None,
            }],
        }
    }

    pub fn push(&mut self, level: u8, heading: &str, table: Option<Table>) {
        self.sections.push(Section {
            level,
            heading: heading.to_string(),
            table,
        });
    }

    /// Attach a table to the most recent section
    fn attach(&mut self, table: Table) {
        if let Some(last) = self.sections.last_mut() {
            last.table = Some(table);
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&"#".repeat(usize::from(section.level.max(1))));
            out.push(' ');
            out.push_str(&section.heading);
            out.push_str("\n\n");
            if let Some(table) = &section.table {
                table.write_markdown(&mut out);
            }
        }
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

/// One `##` section per distinct declaration name, with a field table when
/// the declaration has fields. Records without a name are skipped.
pub fn render_components(title: &str, records: &[DeclarationRecord]) -> Document {
    let mut doc = Document::titled(title);
    let mut seen = HashSet::new();

    for record in records {
        if record.name.is_empty() || !seen.insert(record.name.as_str()) {
            continue;
        }

        doc.push(2, &escape_heading(&record.name), None);

        if record.fields.is_empty() {
            continue;
        }

        let mut table = Table::new(&["Name", "Type", "Required", "Description"]).padded();
        for field in &record.fields {
            table.push_row(vec![
                Cell::text(&field.name),
                Cell::code(&field.type_expression),
                Cell::Text(field.required.to_string()),
                Cell::Blank,
            ]);
        }
        doc.push(3, record.kind.fields_heading(), Some(table));
    }

    doc
}

/// A single route table, one row per route in the given order
pub fn render_routes(title: &str, routes: &[RouteRecord]) -> Document {
    let mut doc = Document::titled(title);
    let mut table = Table::new(&["Route", "Methods", "Description"]);

    for route in routes {
        let methods: Vec<&str> = route.methods.iter().map(|m| m.as_str()).collect();
        table.push_row(vec![
            Cell::code(&route.url_path),
            Cell::Text(methods.join(", ")),
            Cell::Blank,
        ]);
    }

    doc.attach(table);
    doc
}

/// Keep a value on one table row and away from the column separators
fn escape_cell(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn escape_heading(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
