//! Built-in insights templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping stays on for every
//! `.html` template; only the rendered article body is marked safe.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Article, ArticleMetadata, Talk};
use crate::helpers::{article_path, escape_html, format_date};

/// URL prefix of the insights section
pub const INSIGHTS_PATH: &str = "/insights/";

/// Template renderer with the embedded insights pages
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.set_escape_fn(escape_html);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("insights/layout.html")),
            ("insights.html", include_str!("insights/insights.html")),
            ("article.html", include_str!("insights/article.html")),
            ("not_found.html", include_str!("insights/not_found.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the insights index with both the articles and the talks.
    ///
    /// `tab` picks which list comes first and is marked current.
    pub fn render_index(
        &self,
        config: &SiteConfig,
        articles: &[ArticleMetadata],
        talks: &[Talk],
        tab: IndexTab,
    ) -> Result<String> {
        let cards: Vec<ArticleCard> = articles.iter().map(ArticleCard::from).collect();
        let talks: Vec<TalkCard> = talks.iter().map(TalkCard::from).collect();

        let mut context = base_context(config, INSIGHTS_PATH);
        context.insert("articles", &cards);
        context.insert("talks", &talks);
        context.insert("tab", &tab);
        context.insert("sections", &tab.section_order());
        self.render("insights.html", &context)
    }

    /// Render an article detail page around already converted HTML
    pub fn render_article(
        &self,
        config: &SiteConfig,
        article: &Article,
        content_html: &str,
    ) -> Result<String> {
        let card = ArticleCard::from(&article.metadata());

        let mut context = base_context(config, &card.path);
        context.insert("article", &card);
        context.insert("content", content_html);
        self.render("article.html", &context)
    }

    /// Render the not-found page, optionally naming the missing slug
    pub fn render_not_found(&self, config: &SiteConfig, slug: Option<&str>) -> Result<String> {
        let mut context = base_context(config, "");
        context.insert("slug", &slug);
        self.render("not_found.html", &context)
    }
}

fn base_context(config: &SiteConfig, current_path: &str) -> Context {
    let mut context = Context::new();
    context.insert(
        "site",
        &SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            url: config.url.clone(),
        },
    );
    context.insert("date_format", &config.date_format);
    context.insert("current_path", current_path);
    context.insert("current_year", &chrono::Local::now().format("%Y").to_string());
    context
}

/// Tera filter: format a front-matter date string for display
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "DD/MM/YY".to_string(),
    };

    Ok(tera::Value::String(format_date(&s, &format)))
}

/// Which list of the insights index is selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexTab {
    #[default]
    Articles,
    Talks,
}

impl IndexTab {
    /// Parse a `?tab=` value; anything unrecognised selects the articles
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("talks") => IndexTab::Talks,
            _ => IndexTab::Articles,
        }
    }

    fn section_order(self) -> [IndexTab; 2] {
        match self {
            IndexTab::Articles => [IndexTab::Articles, IndexTab::Talks],
            IndexTab::Talks => [IndexTab::Talks, IndexTab::Articles],
        }
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleCard {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub read_time: String,
    pub path: String,
}

impl From<&ArticleMetadata> for ArticleCard {
    fn from(article: &ArticleMetadata) -> Self {
        Self {
            slug: article.slug.clone(),
            title: article.title.clone(),
            date: article.date.clone(),
            description: article.description.clone(),
            read_time: article.read_time.clone(),
            path: article_path(INSIGHTS_PATH, &article.slug),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TalkCard {
    pub title: String,
    pub event: String,
    pub description: String,
    pub video_url: String,
}

impl From<&Talk> for TalkCard {
    fn from(talk: &Talk) -> Self {
        Self {
            title: talk.title.clone(),
            event: talk.event.clone(),
            description: talk.description.clone(),
            video_url: talk.video_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(slug: &str, title: &str, date: &str) -> ArticleMetadata {
        ArticleMetadata {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            description: "A <short> summary".to_string(),
            read_time: "3 min read".to_string(),
        }
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = renderer
            .render_index(
                &config,
                &[
                    metadata("bridging", "Bridging CoreLocation", "2024-10-01"),
                    metadata("userdefaults", "Avoid UserDefaults", ""),
                ],
                &[],
                IndexTab::Articles,
            )
            .unwrap();

        assert!(html.contains(r#"href="/insights/bridging/""#));
        assert!(html.contains("Bridging CoreLocation"));
        assert!(html.contains(">01/10/24</time>"));
        assert!(html.contains("3 min read"));
        assert!(html.contains("A &lt;short&gt; summary"));
    }

    #[test]
    fn test_render_empty_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_index(&SiteConfig::default(), &[], &[], IndexTab::Articles)
            .unwrap();
        assert!(html.contains("Nothing published yet."));
        assert!(html.contains("No talks yet."));
    }

    #[test]
    fn test_render_index_encodes_article_links() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_index(
                &SiteConfig::default(),
                &[metadata("c# tips?v=2", "C# Tips", "2024-01-01")],
                &[],
                IndexTab::Articles,
            )
            .unwrap();

        assert!(html.contains(r#"href="/insights/c%23%20tips%3Fv%3D2/""#));
        assert!(!html.contains("/insights/c# tips"));
    }

    fn talk(title: &str, video_id: &str) -> Talk {
        Talk {
            title: title.to_string(),
            event: "Swift Heroes".to_string(),
            description: "Live <demo> included".to_string(),
            video_id: video_id.to_string(),
        }
    }

    #[test]
    fn test_render_index_talks() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let articles = [metadata("bridging", "Bridging CoreLocation", "2024-10-01")];
        let talks = [talk("Structured Concurrency", "xyz789")];

        let html = renderer
            .render_index(&config, &articles, &talks, IndexTab::Talks)
            .unwrap();
        assert!(html.contains("Structured Concurrency"));
        assert!(html.contains("Swift Heroes"));
        assert!(html.contains("Live &lt;demo&gt; included"));
        assert!(html.contains(r#"href="https://www.youtube.com/watch?v=xyz789""#));
        assert!(html.contains(r#"href="?tab=talks" aria-current="page""#));

        // Both lists are present; the selected one comes first
        let talks_at = html.find(r#"id="talks""#).unwrap();
        let articles_at = html.find(r#"id="articles""#).unwrap();
        assert!(talks_at < articles_at);

        let html = renderer
            .render_index(&config, &articles, &talks, IndexTab::Articles)
            .unwrap();
        let talks_at = html.find(r#"id="talks""#).unwrap();
        let articles_at = html.find(r#"id="articles""#).unwrap();
        assert!(articles_at < talks_at);
        assert!(html.contains(r#"href="?tab=articles" aria-current="page""#));
    }

    #[test]
    fn test_index_tab_from_query() {
        assert_eq!(IndexTab::from_query(None), IndexTab::Articles);
        assert_eq!(IndexTab::from_query(Some("talks")), IndexTab::Talks);
        assert_eq!(IndexTab::from_query(Some(" Talks ")), IndexTab::Talks);
        assert_eq!(IndexTab::from_query(Some("articles")), IndexTab::Articles);
        assert_eq!(IndexTab::from_query(Some("videos")), IndexTab::Articles);
    }

    #[test]
    fn test_render_article_keeps_body_html() {
        let renderer = TemplateRenderer::new().unwrap();
        let article = Article {
            slug: "hello".to_string(),
            title: "Hello & welcome".to_string(),
            date: "2024-03".to_string(),
            description: String::new(),
            read_time: "1 min read".to_string(),
            content: "# Hello".to_string(),
        };
        let html = renderer
            .render_article(&SiteConfig::default(), &article, "<h1>Hello</h1>")
            .unwrap();

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("Hello &amp; welcome"));
        assert!(html.contains(">03/24</time>"));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();

        let html = renderer.render_not_found(&config, Some("missing")).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("<code>missing</code>"));

        let html = renderer.render_not_found(&config, None).unwrap();
        assert!(!html.contains("<code>"));
    }
}
