//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that accepts any YAML scalar and keeps it as a string.
///
/// Unquoted values such as `date: 2024` or `title: 42` arrive as numbers;
/// they are stringified instead of failing the whole block.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or another scalar value")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    /// Raw value; see [`FrontMatter::is_hidden`] for how it is read
    pub is_hidden: Option<serde_yaml::Value>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start();

        let Some((yaml_content, remaining)) = split_yaml_block(content) else {
            return (FrontMatter::default(), content);
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A `---` thematic break followed by prose is body text, not metadata
        if !looks_like_yaml(yaml_content) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// Whether the article is excluded from public listings.
    ///
    /// A native boolean is taken as is. Strings count only when they read
    /// `true` or `false` after trimming, ignoring case. Everything else,
    /// `"1"` and `"yes"` included, is `false`.
    pub fn is_hidden(&self) -> bool {
        match &self.is_hidden {
            Some(serde_yaml::Value::Bool(hidden)) => *hidden,
            Some(serde_yaml::Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its yaml and body parts.
fn split_yaml_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let (opening, rest) = rest.split_once('\n')?;
    if !opening.trim().is_empty() {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// At least one `key: value` line with a plain identifier key.
fn looks_like_yaml(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Avoid using UserDefaults.standard
date: 2023-04-02
description: Do not use the standard instance.
---

UserDefaults is a great way to store simple data.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(
            fm.title.as_deref(),
            Some("Avoid using UserDefaults.standard")
        );
        assert_eq!(fm.date.as_deref(), Some("2023-04-02"));
        assert_eq!(
            fm.description.as_deref(),
            Some("Do not use the standard instance.")
        );
        assert!(!fm.is_hidden());
        assert!(remaining.starts_with("UserDefaults is a great way"));
    }

    #[test]
    fn test_numeric_scalars_are_stringified() {
        let content = "---\ntitle: 1984\ndate: 2024\n---\nBody";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("1984"));
        assert_eq!(fm.date.as_deref(), Some("2024"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_hidden_flag_coercion() {
        let cases = [
            ("is_hidden: true", true),
            ("is_hidden: false", false),
            ("is_hidden: \"true\"", true),
            ("is_hidden: \"  TRUE \"", true),
            ("is_hidden: \"False\"", false),
            ("is_hidden: \"yes\"", false),
            ("is_hidden: \"1\"", false),
            ("is_hidden: 1", false),
            ("is_hidden:", false),
            ("title: No flag", false),
        ];

        for (line, expected) in cases {
            let content = format!("---\n{}\n---\nBody", line);
            let (fm, _) = FrontMatter::parse(&content);
            assert_eq!(fm.is_hidden(), expected, "case: {}", line);
        }
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, remaining) = FrontMatter::parse(content);
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody text");
        assert!(fm.title.is_none());
        assert_eq!(remaining, "Body text");
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let content = "---\ntitle: Dangling\n\nBody";
        let (fm, remaining) = FrontMatter::parse(content);
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_malformed_yaml_falls_back_to_default() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let (fm, remaining) = FrontMatter::parse(content);
        assert!(fm.title.is_none());
        assert!(!fm.is_hidden());
        assert!(remaining.contains("Body"));
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert!(fm.title.is_none());
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let content = "---\ntitle: T\ncategory: Swift\n---\nBody";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(
            fm.extra.get("category").and_then(|v| v.as_str()),
            Some("Swift")
        );
    }
}
