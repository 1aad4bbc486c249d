//! Generate static files for the days open today

use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::fs;
use std::time::Duration;

use crate::calendar::{Day, DayParam};
use crate::resolver::ResolutionResult;
use crate::templates::TemplateRenderer;
use crate::view::{ArticleView, DoorView};
use crate::Advent;

/// Write `index.html` and one `<day>/index.html` per open day with content.
/// Returns the number of articles written.
pub async fn run(advent: &Advent, today: Option<u32>) -> Result<usize> {
    let start = std::time::Instant::now();

    let resolver = advent.resolver(today)?;
    let renderer = TemplateRenderer::new()?;
    let current_day = resolver.current_day();

    fs::create_dir_all(&advent.public_dir)?;

    let mut titles = Vec::new();
    for day in Day::all() {
        let day_dir = advent.public_dir.join(day.to_string());

        match resolver
            .resolve_param(&DayParam::Number(i64::from(day.get())))
            .await
        {
            ResolutionResult::Available(payload) => {
                let article = ArticleView::new(day, &payload, current_day);
                fs::create_dir_all(&day_dir)?;
                fs::write(
                    day_dir.join("index.html"),
                    renderer.render_article(&advent.config, &article)?,
                )?;
                titles.push((day, payload.title.clone()));
            }
            ResolutionResult::Unavailable | ResolutionResult::NotFound => {
                // A previous run may have published a day that is gone now
                if day_dir.exists() {
                    fs::remove_dir_all(&day_dir)?;
                    tracing::debug!("Removed stale {:?}", day_dir);
                }
            }
        }
    }

    let doors = DoorView::all(current_day, resolver.bypass(), &titles);
    fs::write(
        advent.public_dir.join("index.html"),
        renderer.render_index(&advent.config, &doors)?,
    )?;

    tracing::info!(
        "Generated {} article(s) in {:.2}s",
        titles.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(titles.len())
}

/// Quiet period after a change before regenerating
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Regenerate whenever the content directory changes
pub async fn watch(advent: &Advent, today: Option<u32>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            let _ = tx.send(event);
        }
        Err(e) => tracing::error!("Watch error: {:?}", e),
    })?;

    fs::create_dir_all(&advent.content_dir)?;
    watcher.watch(&advent.content_dir, RecursiveMode::Recursive)?;
    tracing::info!("Watching {:?}. Press Ctrl+C to stop.", advent.content_dir);

    while let Some(event) = rx.recv().await {
        if !triggers_rebuild(&event) {
            continue;
        }

        // Let a burst of saves settle, then rebuild once
        tokio::time::sleep(DEBOUNCE).await;
        while rx.try_recv().is_ok() {}

        tracing::info!("Content changed, regenerating...");
        if let Err(e) = run(advent, today).await {
            tracing::error!("Generation failed: {:#}", e);
        }
    }

    Ok(())
}

/// Whether a file system event should cause a rebuild
fn triggers_rebuild(event: &Event) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }

    event.paths.iter().any(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| !name.starts_with('.') && !name.ends_with('~'))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_generate_only_open_days() {
        let dir = TempDir::new().unwrap();
        let advent = Advent::with_config(dir.path(), Default::default());
        fs::create_dir_all(&advent.content_dir).unwrap();
        for n in [1, 2, 5] {
            fs::write(
                advent.content_dir.join(format!("{}.md", n)),
                format!("---\ntitle: Day number {}\n---\nBody {}", n, n),
            )
            .unwrap();
        }
        fs::create_dir_all(advent.public_dir.join("7")).unwrap();

        let written = run(&advent, Some(3)).await.unwrap();
        assert_eq!(written, 2);

        assert!(advent.public_dir.join("1/index.html").exists());
        assert!(advent.public_dir.join("2/index.html").exists());
        assert!(!advent.public_dir.join("3").exists());
        assert!(!advent.public_dir.join("5").exists());
        assert!(!advent.public_dir.join("7").exists());

        let index = fs::read_to_string(advent.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Day number 2"));
        assert!(!index.contains("Day number 5"));
    }

    #[test]
    fn test_triggers_rebuild() {
        let edit = |name: &str| {
            Event::new(EventKind::Modify(ModifyKind::Any))
                .add_path(PathBuf::from("posts").join(name))
        };
        assert!(triggers_rebuild(&edit("3.md")));
        assert!(triggers_rebuild(
            &Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("posts/4.md"))
        ));
        assert!(!triggers_rebuild(&edit(".3.md.swp")));
        assert!(!triggers_rebuild(&edit("3.md~")));
        assert!(!triggers_rebuild(
            &Event::new(EventKind::Access(AccessKind::Any)).add_path(PathBuf::from("posts/3.md"))
        ));
        assert!(!triggers_rebuild(&Event::new(EventKind::Any)));
    }
}
