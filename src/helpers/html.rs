//! HTML helper functions

/// Simple HTML escaping for text and attribute values.
///
/// Slashes are left alone so paths and dates stay readable in the output.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
