//! Article models

use serde::{Deserialize, Serialize};

/// Default reading speed used for read-time labels
pub const WORDS_PER_MINUTE: usize = 200;

/// Listing view of an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    /// File stem of the source file
    pub slug: String,
    pub title: String,
    /// Publish date as written in front-matter, may be empty
    pub date: String,
    pub description: String,
    /// Read-time label, e.g. "3 min read"
    pub read_time: String,
}

/// Detail view of an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub read_time: String,
    /// Raw markdown body, front-matter stripped
    pub content: String,
}

impl Article {
    /// Listing view of this article
    pub fn metadata(&self) -> ArticleMetadata {
        ArticleMetadata {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            read_time: self.read_time.clone(),
        }
    }
}

/// Estimate reading time of a markdown body.
///
/// Words are whitespace-separated runs; minutes are rounded up. An empty
/// body reads "0 min read".
pub fn read_time(body: &str, words_per_minute: usize) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1));
    format!("{} min read", minutes)
}
