//! BibTeX reading: entry segmentation and field parsing.

use tracing::{debug, trace};

use super::entry::{Collection, Entry, Field};
use super::error::ParseError;

const IGNORED_BLOCK_TYPES: [&str; 3] = ["comment", "preamble", "string"];

/// Parses BibTeX text into a [`Collection`].
///
/// Accepts any alphabetic entry type tag. `@comment`, `@preamble`, and
/// `@string` blocks are skipped without expansion. Text between entries is
/// ignored, matching common export-file conventions. Any malformed entry
/// (unbalanced braces, missing key, bad field assignment) fails the whole
/// parse: a reference file is either usable or it is not.
///
/// # Errors
///
/// Returns [`ParseError`] describing the first malformed entry encountered.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_collection(input: &str) -> Result<Collection, ParseError> {
    let mut collection = Collection::new();

    for raw_entry in segment_entries(input) {
        if let Some(entry) = parse_entry(&raw_entry)? {
            trace!(key = %entry.key, entry_type = %entry.entry_type, "parsed entry");
            collection.push(entry);
        }
    }

    debug!(entries = collection.len(), "collection parsed");
    Ok(collection)
}

/// Splits input into `@type{...}` segments using quote- and brace-aware
/// scanning. A segment whose braces never close runs to the next `@` at a
/// line start (or end of input) and is left for [`parse_entry`] to reject.
fn segment_entries(input: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut entries = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i].1 != '@' {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && chars[j].1.is_ascii_alphabetic() {
            j += 1;
        }
        while j < chars.len() && chars[j].1.is_whitespace() {
            j += 1;
        }

        if j >= chars.len() || chars[j].1 != '{' {
            i += 1;
            continue;
        }

        let start = chars[i].0;
        let mut depth = 0usize;
        let mut in_quotes = false;
        let mut escape = false;
        let mut found_end = None;

        for (k, (_, ch)) in chars.iter().enumerate().skip(j) {
            if escape {
                escape = false;
                continue;
            }
            if *ch == '\\' {
                escape = true;
                continue;
            }
            if *ch == '"' {
                in_quotes = !in_quotes;
                continue;
            }
            if in_quotes {
                continue;
            }
            if *ch == '{' {
                depth += 1;
                continue;
            }
            if *ch == '}' {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                if depth == 0 {
                    found_end = Some(k);
                    break;
                }
            }
        }

        if let Some(end_index) = found_end {
            let end_exclusive = if end_index + 1 < chars.len() {
                chars[end_index + 1].0
            } else {
                input.len()
            };
            entries.push(input[start..end_exclusive].trim().to_string());
            i = end_index + 1;
        } else {
            // Braces never closed: capture until the next likely entry start
            // so the error names only the broken entry.
            let mut boundary = i + 1;
            while boundary < chars.len() {
                if chars[boundary].1 == '@'
                    && (boundary == 0 || matches!(chars[boundary - 1].1, '\n' | '\r'))
                {
                    break;
                }
                boundary += 1;
            }

            if boundary < chars.len() {
                let end_exclusive = chars[boundary].0;
                entries.push(input[start..end_exclusive].trim().to_string());
                i = boundary;
            } else {
                entries.push(input[start..].trim().to_string());
                break;
            }
        }
    }

    entries
}

/// Parses one segment into an [`Entry`]; returns `Ok(None)` for ignored
/// block types.
fn parse_entry(raw_entry: &str) -> Result<Option<Entry>, ParseError> {
    let trimmed = raw_entry.trim();
    let after_at = trimmed
        .strip_prefix('@')
        .ok_or_else(|| ParseError::missing_type(trimmed))?;
    let brace_pos = after_at
        .find('{')
        .ok_or_else(|| ParseError::missing_brace(trimmed))?;

    let entry_type = after_at[..brace_pos].trim().to_ascii_lowercase();
    if entry_type.is_empty() {
        return Err(ParseError::missing_type(trimmed));
    }
    if IGNORED_BLOCK_TYPES.contains(&entry_type.as_str()) {
        return Ok(None);
    }

    if !trimmed.ends_with('}') {
        return Err(ParseError::unbalanced(trimmed));
    }
    let body = &after_at[brace_pos + 1..];
    let body = &body[..body.len().saturating_sub(1)];

    let (key_raw, fields_raw) = match body.split_once(',') {
        Some((key, fields)) => (key, Some(fields)),
        None => (body, None),
    };

    let key = key_raw.trim();
    if key.is_empty() {
        return Err(ParseError::empty_key(trimmed));
    }

    let mut entry = Entry::new(key, entry_type);
    if let Some(fields_raw) = fields_raw {
        for field in
            parse_fields(fields_raw).map_err(|reason| ParseError::bad_field(trimmed, reason))?
        {
            if entry.has_field(&field.name) {
                // First-value-wins per standard BibTeX convention.
                debug!(key = %entry.key, field = %field.name, "duplicate field dropped");
                continue;
            }
            entry.set_field(field.name, field.value);
        }
    }

    Ok(Some(entry))
}

/// Splits a field list on depth-zero commas and parses each `name = value`
/// pair, preserving source order and name casing.
fn parse_fields(input: &str) -> Result<Vec<Field>, String> {
    let mut pairs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escape = false;

    for ch in input.chars() {
        if escape {
            current.push(ch);
            escape = false;
            continue;
        }
        if ch == '\\' {
            current.push(ch);
            escape = true;
            continue;
        }
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
            continue;
        }
        if !in_quotes {
            if ch == '{' {
                depth += 1;
            } else if ch == '}' {
                if depth == 0 {
                    return Err("closing brace without matching opening brace".to_string());
                }
                depth -= 1;
            } else if ch == ',' && depth == 0 {
                let segment = current.trim();
                if !segment.is_empty() {
                    pairs.push(segment.to_string());
                }
                current.clear();
                continue;
            }
        }
        current.push(ch);
    }

    if in_quotes {
        return Err("unterminated quoted value".to_string());
    }
    if depth != 0 {
        return Err("unbalanced braces in field values".to_string());
    }

    let tail = current.trim();
    if !tail.is_empty() {
        pairs.push(tail.to_string());
    }

    let mut fields = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Some((name, value_raw)) = pair.split_once('=') else {
            return Err(format!("missing '=' in field segment `{pair}`"));
        };
        let field_name = name.trim();
        if field_name.is_empty() {
            return Err("empty field name".to_string());
        }
        fields.push(Field {
            name: field_name.to_string(),
            value: strip_field_value(value_raw),
        });
    }

    Ok(fields)
}

/// Removes the outer `{...}` or `"..."` delimiters from a field value.
/// Bare values (numbers, month macros) pass through trimmed; an absent
/// value yields the empty string.
fn strip_field_value(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches(',').trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.starts_with('{') && trimmed.ends_with('}') && trimmed.len() >= 2 {
        return trimmed[1..trimmed.len() - 1].trim().to_string();
    }
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        let inner = &trimmed[1..trimmed.len() - 1];
        return inner.replace("\\\"", "\"").trim().to_string();
    }

    trimmed.to_string()
}
