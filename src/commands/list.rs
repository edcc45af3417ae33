//! List site content

use anyhow::Result;

use crate::content::ArticleMetadata;
use crate::Site;

/// List visible content by type
pub fn run(site: &Site, content_type: &str, json: bool) -> Result<()> {
    let loader = site.loader();

    match content_type {
        "article" | "articles" => {
            let articles = loader.list_articles()?;
            print!("{}", format_articles(&articles, json)?);
        }
        "slug" | "slugs" => {
            let slugs = loader.article_slugs()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&slugs)?);
            } else {
                for slug in slugs {
                    println!("{}", slug);
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: article, slug",
                content_type
            );
        }
    }

    Ok(())
}

/// Render the article listing as a table or as JSON
pub fn format_articles(articles: &[ArticleMetadata], json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(articles)?));
    }

    let mut out = format!("Articles ({}):\n", articles.len());
    for article in articles {
        let date = if article.date.is_empty() {
            "----------"
        } else {
            article.date.as_str()
        };
        out.push_str(&format!(
            "  {} - {} ({}) [{}]\n",
            date, article.title, article.read_time, article.slug
        ));
    }
    Ok(out)
}
