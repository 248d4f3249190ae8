//! Small helpers shared by the model, the renderers and the binary.
//!
//! - Optional-string normalization for setters
//! - Content identifiers (MD5 of the canonical URL)
//! - Truncation and slugification for logs and file names

use md5::{Digest, Md5};
use std::collections::HashSet;

/// Treat an empty string as "not set".
pub fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Lowercase hex MD5 digest of `input`.
///
/// Used as the default feed item GUID, computed over the canonical URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes()))
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary before `max` bytes
/// and get a `"…(+N bytes)"` marker.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Convert an identifier into a file-name friendly slug.
///
/// Lowercases, keeps alphanumerics and `-`, maps spaces to `-` and drops
/// everything else.
pub fn slugify(id: &str) -> String {
    id.to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-")
}

/// One distinct file name per id, in order.
///
/// A slug that is already taken (or empty) gets the id's position appended.
pub fn unique_file_names<'a>(ids: impl IntoIterator<Item = &'a str>, ext: &str) -> Vec<String> {
    let mut taken = HashSet::new();
    ids.into_iter()
        .enumerate()
        .map(|(i, id)| {
            let slug = slugify(id);
            let mut name = if slug.is_empty() {
                i.to_string()
            } else {
                slug.clone()
            };
            let mut n = i;
            while !taken.insert(name.clone()) {
                name = format!("{slug}-{n}");
                n += 1;
            }
            format!("{name}.{ext}")
        })
        .collect()
}
