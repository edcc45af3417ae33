//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::escape_html;

/// Fence names mapped onto a syntax the default syntect set ships
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("typescript", "js"),
    ("ts", "js"),
    ("jsx", "js"),
    ("tsx", "js"),
    ("javascript", "js"),
    ("shell", "bash"),
    ("sh", "bash"),
    ("zsh", "bash"),
];

/// Markdown renderer with syntax highlighting.
///
/// Content is assumed to come from the site owner. Raw HTML is escaped and
/// script-capable link targets are dropped, which is enough for that threat
/// model but not for rendering third-party input.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    languages: Vec<String>,
    enabled: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with the default language set
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom highlight settings
    pub fn with_options(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            languages: config
                .languages
                .iter()
                .map(|l| l.trim().to_ascii_lowercase())
                .collect(),
            enabled: config.enable,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is stripped by FrontMatter::parse, so no metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(info) => fence_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                // Raw HTML is shown as text, never passed through
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    events.push(Event::Text(raw));
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: sanitize_url(dest_url, false),
                        title,
                        id,
                    }));
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    events.push(Event::Start(Tag::Image {
                        link_type,
                        dest_url: sanitize_url(dest_url, true),
                        title,
                        id,
                    }));
                }
                _ => {
                    if !in_code_block {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        html_output
    }

    /// Whether fenced blocks in `lang` get highlighted
    pub fn is_highlighted(&self, lang: &str) -> bool {
        let lang = lang.to_ascii_lowercase();
        self.enabled && self.languages.iter().any(|l| *l == lang)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let Some(lang) = lang.filter(|l| self.is_highlighted(l)) else {
            return plain_code_block(code, lang);
        };

        let token = LANGUAGE_ALIASES
            .iter()
            .find(|(alias, _)| lang.eq_ignore_ascii_case(alias))
            .map(|(_, target)| *target)
            .unwrap_or(lang);

        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
        else {
            tracing::debug!("No syntax definition for '{}', rendering plain", lang);
            return plain_code_block(code, Some(lang));
        };

        let Some(theme) = self.theme_set.themes.get(&self.theme_name) else {
            tracing::warn!("Unknown highlight theme '{}'", self.theme_name);
            return plain_code_block(code, Some(lang));
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ),
            Err(e) => {
                tracing::warn!("Highlighting failed for '{}': {}", lang, e);
                plain_code_block(code, Some(lang))
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// First word of a fence info string, restricted to characters safe in a class name
fn fence_language(info: &str) -> Option<String> {
    let lang: String = info
        .split_whitespace()
        .next()?
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#' | '.'))
        .collect();
    if lang.is_empty() {
        None
    } else {
        Some(lang.to_ascii_lowercase())
    }
}

fn plain_code_block(code: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) => format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            lang,
            escape_html(code)
        ),
        None => format!("<pre><code>{}</code></pre>", escape_html(code)),
    }
}

/// Replace script-capable URLs with `#`. Images may still use `data:image/`.
fn sanitize_url(url: CowStr<'_>, is_image: bool) -> CowStr<'_> {
    // Browsers ignore whitespace and control characters inside the scheme
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();

    let blocked = normalized.starts_with("javascript:")
        || normalized.starts_with("vbscript:")
        || (normalized.starts_with("data:") && !(is_image && normalized.starts_with("data:image/")));

    if blocked {
        tracing::warn!("Dropping unsafe link target in markdown");
        CowStr::from("#")
    } else {
        url
    }
}
