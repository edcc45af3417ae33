//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as is inside one path segment (RFC 3986 unreserved)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single URL path segment
///
/// # Examples
/// ```
/// use inked_rs::helpers::encode_path_segment;
/// assert_eq!(encode_path_segment("c# tips"), "c%23%20tips");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Path of an article page below `prefix`, which ends with a slash
pub fn article_path(prefix: &str, slug: &str) -> String {
    format!("{}{}/", prefix, encode_path_segment(slug))
}
