//! Resolves Reddit submission URLs into post ids.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static COMMENTS_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/comments/([^/]+)").expect("invalid comments regex"));

/// Indicates that a URL does not point to a Reddit submission.
#[derive(Debug, Error, PartialEq)]
#[error("Invalid Reddit post URL. Could not extract post ID.")]
pub struct InvalidUrl;

/// Extracts the post id from a Reddit submission URL.
///
/// The id is whatever appears between `/comments/` and the next `/` (or
/// the end of the string). It is returned exactly as written: no
/// validation, normalization, or percent-decoding is performed.
///
/// # Examples
///
/// ```
/// use mcp_reddit::resolve::resolve_post_id;
/// let url = "https://www.reddit.com/r/learnpython/comments/12345ab/my_first_post/";
/// assert_eq!(resolve_post_id(url), Ok(String::from("12345ab")));
/// ```
///
/// ```
/// use mcp_reddit::resolve::{InvalidUrl, resolve_post_id};
/// assert_eq!(resolve_post_id("https://reddit.com/nope"), Err(InvalidUrl));
/// ```
pub fn resolve_post_id(url: &str) -> Result<String, InvalidUrl> {
    COMMENTS_SEGMENT
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or(InvalidUrl)
}
