//! Document transport: the generic JSON tree and its text form.
//!
//! The document tree is `serde_json::Value` built with two features enabled
//! workspace-wide:
//!
//! - `preserve_order` keeps object keys in insertion order;
//! - `arbitrary_precision` keeps every number as its original literal text, so
//!   `1.0` stays `1.0` instead of collapsing into the integer `1`. The decoder's
//!   width policy depends on this.
//!
//! `arbitrary_precision` carries numbers through serde as a one-entry object keyed by
//! [`NUMBER_TOKEN`]. A real object using that key would be read back as a number, so
//! documents may not contain it: [`parse`] rejects it and the encoder refuses to write it.

use crate::error::DecodeError;
use serde_json::Value;

/// A parsed JSON document node. Numbers carry their raw literal text.
pub type DocumentNode = Value;

/// Object key `serde_json` uses internally for raw number literals.
pub const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Parse document text into a node tree.
pub fn parse(text: &str) -> Result<DocumentNode, DecodeError> {
    reject_number_token_keys(text)?;
    Ok(serde_json::from_str(text)?)
}

/// Print a node tree as compact JSON.
pub fn to_text(node: &DocumentNode) -> String {
    node.to_string()
}

/// Print a node tree as two-space indented JSON.
pub fn to_text_pretty(node: &DocumentNode) -> String {
    format!("{node:#}")
}

/// Name of a node's kind as it appears in error messages.
pub fn node_kind(node: &DocumentNode) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Scan the string literals of `text` and fail on any object key equal to
/// [`NUMBER_TOKEN`], escaped spellings included. Malformed text is left to the parser.
fn reject_number_token_keys(text: &str) -> Result<(), DecodeError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'"' {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'"' {
            i += if bytes[i] == b'\\' { 2 } else { 1 };
        }
        let end = (i + 1).min(bytes.len());
        i = end;
        let is_key = bytes[end..]
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b':');
        if is_key && is_number_token(&text[start..end]) {
            return Err(DecodeError::ReservedKey(NUMBER_TOKEN));
        }
    }
    Ok(())
}

fn is_number_token(literal: &str) -> bool {
    if literal.contains('\\') {
        serde_json::from_str::<String>(literal).is_ok_and(|key| key == NUMBER_TOKEN)
    } else {
        literal.strip_prefix('"').and_then(|s| s.strip_suffix('"')) == Some(NUMBER_TOKEN)
    }
}
