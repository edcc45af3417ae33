//! Generate static files

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::fs;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use crate::generator::Generator;
use crate::Site;

/// Quiet period after the last change before a rebuild starts
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static insights pages
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let written = Generator::new(site)?.generate()?;
    tracing::info!("Generated {} article pages", written);

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch the content directory and config, regenerating on change
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();
    let _debouncer = watch_site(site, tx)?;

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let site = site.clone();
    tokio::task::spawn_blocking(move || rebuild_on_change(&site, rx)).await?;

    Ok(())
}

/// Start a debounced watcher over the content directory, `_config.yml` and
/// the talks file.
///
/// A missing content directory is created so articles added later are seen.
/// Events stop when the returned debouncer is dropped.
pub fn watch_site(
    site: &Site,
    tx: Sender<DebounceEventResult>,
) -> Result<Debouncer<RecommendedWatcher>> {
    fs::create_dir_all(&site.content_dir)?;

    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;
    debouncer
        .watcher()
        .watch(&site.content_dir, RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", site.content_dir);

    let config_path = site.base_dir.join("_config.yml");
    for path in [&config_path, &site.talks_path] {
        if path.exists() {
            debouncer
                .watcher()
                .watch(path, RecursiveMode::NonRecursive)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    Ok(debouncer)
}

/// Rebuild once per debounced batch that touches an article or the config.
///
/// Returns when the sending side of the channel is gone.
pub fn rebuild_on_change(site: &Site, rx: Receiver<DebounceEventResult>) {
    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits apply on the next rebuild
                match Site::new(&site.base_dir).and_then(|site| run(&site)) {
                    Ok(()) => tracing::info!("Regenerated successfully"),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }
}

/// Articles, talks and the config trigger rebuilds; editor swap and dot files do not
fn is_relevant(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    name == "_config.yml" || path.extension().is_some_and(|ext| ext == "md" || ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;
    use tempfile::TempDir;

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("/site/content/insights/post.md")));
        assert!(is_relevant(Path::new("/site/_config.yml")));
        assert!(is_relevant(Path::new("/site/json-data/talks.json")));
        assert!(!is_relevant(Path::new("/site/content/insights/.post.md.swp")));
        assert!(!is_relevant(Path::new("/site/content/insights/.DS_Store")));
        assert!(!is_relevant(Path::new("/site/content/insights/post.md~")));
        assert!(!is_relevant(Path::new("/site/content/insights/notes.txt")));
    }

    #[test]
    fn test_watch_regenerates_after_last_save() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(!site.content_dir.exists());

        let (tx, rx) = channel();
        let debouncer = watch_site(&site, tx).unwrap();
        assert!(site.content_dir.exists());

        let worker_site = site.clone();
        thread::spawn(move || rebuild_on_change(&worker_site, rx));

        // Two quick saves; the second one must end up in the output
        let path = site.content_dir.join("fresh.md");
        fs::write(&path, "---\ntitle: Draft\n---\nFirst").unwrap();
        thread::sleep(Duration::from_millis(100));
        fs::write(&path, "---\ntitle: Fresh Take\n---\nSecond").unwrap();

        let page = site.public_dir.join("insights/fresh/index.html");
        let deadline = Instant::now() + Duration::from_secs(15);
        let mut html = String::new();
        while Instant::now() < deadline {
            html = fs::read_to_string(&page).unwrap_or_default();
            if html.contains("Second") {
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }
        assert!(html.contains("Fresh Take"), "page was: {}", html);
        assert!(html.contains("Second"));

        drop(debouncer);
    }
}
