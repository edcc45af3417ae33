//! Create a new article

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::Site;

/// Front-matter written into new articles
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    description: &'a str,
    is_hidden: bool,
}

/// Create `<slug>.md` in the content directory and return its path
pub fn create_article(
    site: &Site,
    title: &str,
    slug: Option<&str>,
    hidden: bool,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.trim().to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
        anyhow::bail!("Invalid slug: {:?}", slug);
    }

    fs::create_dir_all(&site.content_dir)?;

    let file_path = site.content_dir.join(format!("{}.md", slug));

    let scaffold = Scaffold {
        title,
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        description: "",
        is_hidden: hidden,
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&scaffold)?);

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&file_path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            anyhow::bail!("File already exists: {:?}", file_path)
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(content.as_bytes())?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, title: &str, slug: Option<&str>, hidden: bool) -> Result<()> {
    let path = create_article(site, title, slug, hidden)?;
    println!("Created: {:?}", path);
    Ok(())
}
