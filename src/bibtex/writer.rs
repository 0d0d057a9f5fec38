//! BibTeX rendering for standardized and deduplicated collections.
//!
//! Output is round-trippable through [`super::reader::parse_collection`]:
//! two-space indent, one `name = {value},` line per field, one blank line
//! between entries.

use std::fmt::Write as _;

use super::entry::{Collection, Entry};

/// Renders a collection as BibTeX text.
#[must_use]
pub fn render_collection(collection: &Collection) -> String {
    let mut out = String::new();
    for (index, entry) in collection.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_entry(&mut out, entry);
    }
    out
}

fn render_entry(out: &mut String, entry: &Entry) {
    // writeln! to a String cannot fail.
    let _ = writeln!(out, "@{}{{{},", entry.entry_type, entry.key);
    for field in entry.fields() {
        let _ = writeln!(out, "  {} = {},", field.name, delimit(&field.value));
    }
    out.push_str("}\n");
}

/// Wraps a value in braces, falling back to quotes when the value itself
/// carries unbalanced braces (possible for values parsed from quoted
/// fields). Either delimiter reparses to the same value.
fn delimit(value: &str) -> String {
    if braces_balanced(value) {
        format!("{{{value}}}")
    } else {
        format!("\"{}\"", value.replace('"', "\\\""))
    }
}

fn braces_balanced(value: &str) -> bool {
    let mut depth = 0i64;
    for ch in value.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
