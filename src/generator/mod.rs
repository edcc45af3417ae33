//! Generator module - writes the insights pages as static HTML files

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{ArticleMetadata, MarkdownRenderer};
use crate::templates::{IndexTab, TemplateRenderer};
use crate::Site;

/// Static insights generator using the built-in Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(&site.config.highlight),
        })
    }

    /// Generate the index, one page per visible article, and the 404 page.
    ///
    /// Returns the number of article pages written.
    pub fn generate(&self) -> Result<usize> {
        let loader = self.site.loader();
        let articles = loader.list_articles()?;

        fs::create_dir_all(&self.site.public_dir)?;

        self.generate_index(&articles)?;
        let written = self.generate_article_pages(&articles)?;
        self.generate_not_found()?;

        Ok(written)
    }

    /// Generate insights/index.html
    fn generate_index(&self, articles: &[ArticleMetadata]) -> Result<()> {
        let talks = self.site.talks()?;
        let html = self.renderer.render_index(
            &self.site.config,
            articles,
            &talks,
            IndexTab::default(),
        )?;
        let output_path = self.site.public_dir.join("insights").join("index.html");
        write_page(&output_path, &html)
    }

    /// Generate insights/<slug>/index.html for every listed article
    fn generate_article_pages(&self, articles: &[ArticleMetadata]) -> Result<usize> {
        let loader = self.site.loader();
        let mut written = 0;

        for meta in articles {
            // The file may have disappeared since the listing was read
            let Some(article) = loader.get_article(&meta.slug) else {
                tracing::warn!("Article '{}' vanished during generation", meta.slug);
                continue;
            };

            let content_html = self.markdown.render(&article.content);
            let html = self
                .renderer
                .render_article(&self.site.config, &article, &content_html)?;

            let output_path = self
                .site
                .public_dir
                .join("insights")
                .join(&article.slug)
                .join("index.html");
            write_page(&output_path, &html)?;
            written += 1;
        }

        Ok(written)
    }

    /// Generate 404.html
    fn generate_not_found(&self) -> Result<()> {
        let html = self.renderer.render_not_found(&self.site.config, None)?;
        write_page(&self.site.public_dir.join("404.html"), &html)
    }
}

fn write_page(output_path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(output_path, html)
        .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
    tracing::debug!("Generated: {:?}", output_path);
    Ok(())
}
