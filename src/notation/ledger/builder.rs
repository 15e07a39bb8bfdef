//! Canonical renderer for the ledger notation.
//!
//! One destructured table per list-of-objects field, columns padded to
//! equal widths.

use std::io::{self, Write};

use crate::document::{DataItem, Object, Reference, Root};
use crate::format::Builder;
use crate::notation::quote;

pub(super) struct LedgerBuilder;

impl Builder for LedgerBuilder {
    fn build(&self, root: &Root, output: &mut dyn Write) -> io::Result<()> {
        let mut out = String::new();
        if let Some(scope) = &root.scope {
            out.push_str("scope ");
            out.push_str(scope);
            out.push('\n');
        }
        out.push_str(&root.doc_type);
        out.push(' ');
        out.push_str(&root.name);
        out.push('\n');

        for (key, value) in &root.fields {
            let objects = match value {
                DataItem::List(items) => items
                    .iter()
                    .filter_map(|item| match item {
                        DataItem::Object(o) => Some(o),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
                _ => continue,
            };
            out.push('\n');
            render_table(&mut out, key, &objects);
        }
        output.write_all(out.as_bytes())
    }
}

fn render_table(out: &mut String, key: &str, objects: &[&Object]) {
    // Header: the field key, then every object key in first appearance
    // order.
    let mut columns: Vec<String> = vec![key.to_string()];
    for object in objects {
        for field_key in object.fields.keys() {
            if !columns.iter().any(|c| c == field_key.as_str()) {
                columns.push(field_key.to_string());
            }
        }
    }

    let mut grid: Vec<Vec<String>> = vec![columns.clone()];
    for object in objects {
        let mut row = Vec::with_capacity(columns.len());
        row.push(object.name.to_string());
        for column in &columns[1..] {
            row.push(match object.field(column) {
                Some(value) => render_cell(value),
                None => String::new(),
            });
        }
        grid.push(row);
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| grid.iter().map(|row| row[i].chars().count()).max().unwrap_or(0))
        .collect();

    for row in &grid {
        out.push('|');
        for (i, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            for _ in cell.chars().count()..widths[i] {
                out.push(' ');
            }
            out.push_str(" |");
        }
        out.push('\n');
    }
}

fn render_cell(value: &DataItem) -> String {
    match value {
        DataItem::String(s) => quote(s),
        DataItem::Enum(name) => name.to_string(),
        DataItem::Reference(r) => render_reference(r),
        DataItem::List(items) => items
            .iter()
            .map(render_cell)
            .collect::<Vec<_>>()
            .join(" "),
        // Nested objects are not expressible in a cell.
        DataItem::Object(_) => String::new(),
    }
}

fn render_reference(reference: &Reference) -> String {
    match &reference.target_type {
        Some(target_type) => format!("@{}:{}", target_type, reference.id),
        None => format!("@{}", reference.id),
    }
}
