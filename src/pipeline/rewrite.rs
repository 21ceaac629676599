//! Image-link rewriting: local converter paths → hosted URLs.
//!
//! The rewrite is deliberately two-phase. [`scan_local_images`] finds the
//! local paths; the parser then uploads and opens each one; finally
//! [`rewrite_image_links`] applies the collected `path → url` mapping as a
//! pure text transform. Keeping the side effects out of the substitution
//! callback means a skipped or failed image leaves every other reference
//! intact, and both halves are testable without touching the filesystem.
//!
//! Remote references (`http://`, `https://`) already point somewhere
//! reachable and are never collected or rewritten.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// `![alt](path)` captured as prefix / path / suffix so a replacement only
// ever touches the path. The path group stops at whitespace, which also
// excludes `![alt](path "title")` forms from rewriting.
static RE_IMAGE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!\[[^\]]*\]\()([^)\s]+)(\))").unwrap());

/// True when the reference is an absolute remote URL passed through from the
/// source document rather than a file the converter wrote.
pub fn is_remote_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Collect the distinct local image paths referenced in `markdown`, in
/// first-appearance order.
///
/// A path referenced twice is returned once; the parser uploads each file a
/// single time and every marker pointing at it gets the same URL.
pub fn scan_local_images(markdown: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for caps in RE_IMAGE_REF.captures_iter(markdown) {
        let path = &caps[2];
        if is_remote_url(path) {
            continue;
        }
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }
    paths
}

/// Pure text transform: replace each local image path with its URL from
/// `replacements`.
///
/// Markers whose path has no entry — remote URLs, or files the parser
/// skipped — come through byte-for-byte unchanged.
pub fn rewrite_image_links(markdown: &str, replacements: &HashMap<String, String>) -> String {
    RE_IMAGE_REF
        .replace_all(markdown, |caps: &regex::Captures<'_>| {
            match replacements.get(&caps[2]) {
                Some(url) => format!("{}{}{}", &caps[1], url, &caps[3]),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}
