//! Content module - handles articles and content processing

mod article;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod talks;

pub use article::{read_time, Article, ArticleMetadata, WORDS_PER_MINUTE};
pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use talks::{load_talks, Talk};
