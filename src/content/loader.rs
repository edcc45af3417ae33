//! Content loader - loads articles from the content directory

use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{read_time, Article, ArticleMetadata, ContentError, FrontMatter, WORDS_PER_MINUTE};
use crate::helpers::parse_date;
use crate::Site;

/// Article file extension; `<slug>.md` is the only accepted name
const ARTICLE_EXT: &str = "md";

/// Title used when front-matter has none
const UNTITLED: &str = "Untitled";

/// Loads articles from a flat directory of markdown files.
///
/// Every call reads the directory again; nothing is cached.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    words_per_minute: usize,
}

impl ContentLoader {
    /// Create a loader over `content_dir`
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            words_per_minute: WORDS_PER_MINUTE,
        }
    }

    /// Create a loader for a site's configured content directory
    pub fn for_site(site: &Site) -> Self {
        Self::new(&site.content_dir).with_words_per_minute(site.config.words_per_minute)
    }

    /// Override the reading speed used for read-time labels
    pub fn with_words_per_minute(mut self, words_per_minute: usize) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// All visible articles, newest first
    pub fn list_articles(&self) -> Result<Vec<ArticleMetadata>, ContentError> {
        let mut articles = Vec::new();

        for (article, hidden) in self.load_all()? {
            if hidden {
                tracing::debug!("Skipping hidden article: {}", article.slug);
                continue;
            }
            articles.push(article.metadata());
        }

        // Stable: equal or unparseable dates keep file-name order, undated last
        articles.sort_by_cached_key(|a| Reverse(parse_date(&a.date)));

        Ok(articles)
    }

    /// Slugs of all visible articles, in listing order
    pub fn article_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self
            .list_articles()?
            .into_iter()
            .map(|article| article.slug)
            .collect())
    }

    /// Fetch one article by slug, hidden ones included.
    ///
    /// Any read failure is reported as not found.
    pub fn get_article(&self, slug: &str) -> Option<Article> {
        match self.try_get_article(slug) {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!("Treating unreadable article '{}' as not found: {}", slug, e);
                None
            }
        }
    }

    /// Fetch one article by slug, separating "missing" from "unreadable".
    ///
    /// `Ok(None)` means no `<slug>.md` exists (or the slug cannot name one).
    pub fn try_get_article(&self, slug: &str) -> Result<Option<Article>, ContentError> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejecting slug {:?}", slug);
            return Ok(None);
        }

        let path = self.content_dir.join(format!("{}.{}", slug, ARTICLE_EXT));
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(self.parse_article(slug, &raw).0)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ContentError::ReadFile { path, source }),
        }
    }

    /// Read and parse every article file, paired with its hidden flag
    fn load_all(&self) -> Result<Vec<(Article, bool)>, ContentError> {
        let metadata =
            fs::metadata(&self.content_dir).map_err(|source| ContentError::ReadDir {
                path: self.content_dir.clone(),
                source,
            })?;
        if !metadata.is_dir() {
            return Err(ContentError::NotADirectory(self.content_dir.clone()));
        }

        let mut articles = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(slug) = article_slug(path) else {
                continue;
            };

            let raw = fs::read_to_string(path).map_err(|source| ContentError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!("Loaded article: {:?}", path);
            articles.push(self.parse_article(slug, &raw));
        }

        Ok(articles)
    }

    /// Build the article and its hidden flag from a raw file.
    ///
    /// A missing or empty title falls back to "Untitled". Whitespace-only
    /// titles deliberately count as missing as well, which is stricter than
    /// an empty-string check.
    fn parse_article(&self, slug: &str, raw: &str) -> (Article, bool) {
        let (fm, body) = FrontMatter::parse(raw);
        let hidden = fm.is_hidden();

        let article = Article {
            slug: slug.to_string(),
            title: fm
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            date: fm.date.unwrap_or_default(),
            description: fm.description.unwrap_or_default(),
            read_time: read_time(body, self.words_per_minute),
            content: body.to_string(),
        };

        (article, hidden)
    }
}

/// Slug of an article file, `None` for anything that is not `<slug>.md`
fn article_slug(path: &Path) -> Option<&str> {
    if path.extension().and_then(|e| e.to_str()) != Some(ARTICLE_EXT) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| is_valid_slug(s))
}

/// A slug must name a file directly inside the content directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}
