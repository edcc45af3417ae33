//! Show a single article

use anyhow::Result;

use crate::content::{Article, MarkdownRenderer};
use crate::Site;

/// Print one article's metadata and body, or its rendered HTML
pub fn run(site: &Site, slug: &str, html: bool) -> Result<()> {
    let Some(article) = site.loader().get_article(slug) else {
        anyhow::bail!("No article found for slug: {}", slug);
    };

    if html {
        let renderer = MarkdownRenderer::with_options(&site.config.highlight);
        print!("{}", renderer.render(&article.content));
    } else {
        print!("{}", describe(&article));
    }

    Ok(())
}

/// Plain-text view of an article
pub fn describe(article: &Article) -> String {
    let mut out = String::new();
    out.push_str(&format!("slug:        {}\n", article.slug));
    out.push_str(&format!("title:       {}\n", article.title));
    out.push_str(&format!("date:        {}\n", article.date));
    out.push_str(&format!("description: {}\n", article.description));
    out.push_str(&format!("read time:   {}\n", article.read_time));
    out.push('\n');
    out.push_str(&article.content);
    if !article.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_describe() {
        let article = Article {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            date: "2024-01-01".to_string(),
            description: "Greeting".to_string(),
            read_time: "1 min read".to_string(),
            content: "Hi there".to_string(),
        };
        let out = describe(&article);
        assert!(out.contains("slug:        hello\n"));
        assert!(out.contains("read time:   1 min read\n"));
        assert!(out.ends_with("\nHi there\n"));
    }

    #[test]
    fn test_show_unknown_slug_fails() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        std::fs::create_dir_all(&site.content_dir).unwrap();

        let err = run(&site, "missing", false).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
