//! Canonical renderer for the story notation.
//!
//! Renders the two-space-indented form the grammar documents; parsing
//! the output reproduces the input document structurally.

use std::io::{self, Write};

use crate::document::{DataItem, Object, Reference, Root};
use crate::format::Builder;
use crate::notation::quote;

pub(super) struct StoryBuilder;

impl Builder for StoryBuilder {
    fn build(&self, root: &Root, output: &mut dyn Write) -> io::Result<()> {
        let mut out = String::new();
        if let Some(scope) = &root.scope {
            out.push_str("scope ");
            out.push_str(scope);
            out.push_str("\n\n");
        }
        out.push_str(&root.doc_type);
        out.push(' ');
        out.push_str(&root.name);
        out.push_str(" {\n");
        for (key, value) in &root.fields {
            render_property(&mut out, 1, key, value);
        }
        out.push_str("}\n");
        output.write_all(out.as_bytes())
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn render_property(out: &mut String, depth: usize, key: &str, value: &DataItem) {
    indent(out, depth);
    out.push_str(key);
    out.push(' ');
    render_value(out, depth, value);
    out.push('\n');
}

fn render_value(out: &mut String, depth: usize, value: &DataItem) {
    match value {
        DataItem::String(s) => out.push_str(&quote(s)),
        DataItem::Enum(name) => out.push_str(name),
        DataItem::Reference(r) => render_reference(out, r),
        DataItem::List(items) => {
            out.push_str("[ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(out, depth, item);
            }
            out.push_str(" ]");
        }
        DataItem::Object(object) => render_object(out, depth, object),
    }
}

fn render_object(out: &mut String, depth: usize, object: &Object) {
    out.push_str(&object.name);
    out.push_str(" {\n");
    for (key, value) in &object.fields {
        render_property(out, depth + 1, key, value);
    }
    indent(out, depth);
    out.push('}');
}

fn render_reference(out: &mut String, reference: &Reference) {
    out.push('@');
    if let Some(target_type) = &reference.target_type {
        out.push_str(target_type);
        out.push(':');
    }
    out.push_str(&reference.id);
    if !reference.attributes.is_empty() {
        out.push('(');
        for (i, (key, refs)) in reference.attributes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(key);
            out.push(' ');
            match refs.as_slice() {
                [single] => render_reference(out, single),
                many => {
                    out.push_str("[ ");
                    for (j, r) in many.iter().enumerate() {
                        if j > 0 {
                            out.push_str(", ");
                        }
                        render_reference(out, r);
                    }
                    out.push_str(" ]");
                }
            }
        }
        out.push(')');
    }
}
