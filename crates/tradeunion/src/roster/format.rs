//! On-disk format of the backing file.
//!
//! The file is a JSON array of member objects, pretty-printed with two-space
//! indentation and keys in `member_id, name, email, join_date` order.

use serde_json::Value;

use crate::error::Result;
use crate::member::Member;

/// Render members as the backing file contents.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(members: &[Member]) -> Result<String> {
    let array: Vec<Value> = members.iter().map(|m| Value::Object(m.to_map())).collect();
    Ok(serde_json::to_string_pretty(&array)?)
}

/// Parse backing file contents into members, preserving order.
///
/// A single malformed entry fails the whole decode.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of objects, or if any
/// object is missing a required key.
pub fn decode(text: &str) -> Result<Vec<Member>> {
    let entries: Vec<serde_json::Map<String, Value>> = serde_json::from_str(text)?;
    entries.iter().map(Member::from_map).collect()
}
