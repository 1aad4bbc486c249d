//! Content loader - reads per-day Markdown files from the content directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentPayload, FrontMatter, MarkdownRenderer, StoreError};
use crate::calendar::Day;

/// Turns `posts/<day>.md` files into payloads
pub struct ContentLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(content_dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            renderer,
        }
    }

    /// Directory the loader reads from
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Canonical path of a day's source file
    pub fn day_file(&self, day: Day) -> PathBuf {
        self.content_dir.join(format!("{}.md", day))
    }

    /// File names a day may use, in lookup order: `7.md` then `07.md`
    pub fn candidate_files(&self, day: Day) -> [PathBuf; 2] {
        let padded = self.content_dir.join(format!("{:02}.md", day.get()));
        [self.day_file(day), padded]
    }

    /// Locate the source file of a day, accepting a zero-padded name too
    pub fn find_day_file(&self, day: Day) -> Option<PathBuf> {
        self.candidate_files(day)
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Load a day synchronously
    pub fn load(&self, day: Day) -> Result<ContentPayload, StoreError> {
        let path = self.find_day_file(day).ok_or(StoreError::Missing(day))?;
        let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        self.parse(day, &path, &raw)
    }

    /// Build a payload from the raw text of a day's source file
    pub fn parse(&self, day: Day, path: &Path, raw: &str) -> Result<ContentPayload, StoreError> {
        let (fm, body) = FrontMatter::parse(raw).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        let title = fm
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Day {}", day));
        let lead = fm.normalized_lead();
        let body = self.renderer.render(body);

        tracing::debug!("Loaded day {} from {:?}", day, path);

        Ok(ContentPayload::new(title, lead, body, fm.resources))
    }

    /// Days that have a source file, in calendar order
    pub fn scan(&self) -> Vec<Day> {
        if !self.content_dir.exists() {
            return Vec::new();
        }

        let mut days: Vec<Day> = WalkDir::new(&self.content_dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse::<Day>().ok())
            })
            .collect();

        days.sort();
        days.dedup();
        days
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "md" | "markdown"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn day(n: i64) -> Day {
        Day::new(n).unwrap()
    }

    fn loader(dir: &TempDir) -> ContentLoader {
        ContentLoader::new(dir.path(), MarkdownRenderer::new())
    }

    #[test]
    fn test_load_day() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("3.md"),
            "---\ntitle: Hooks\nlead: |\n  Hooks are\n  neat.\nresources:\n  - title: Docs\n    link: https://reactjs.org\n    body: Official docs\n---\n\n## Why\n\nBecause.\n",
        )
        .unwrap();

        let payload = loader(&dir).load(day(3)).unwrap();
        assert_eq!(payload.title, "Hooks");
        assert_eq!(payload.lead, "Hooks are neat.");
        assert!(payload.body.contains("<h2>Why</h2>"));
        assert_eq!(payload.resources.len(), 1);
        assert_eq!(payload.resources[0].link, "https://reactjs.org");
    }

    #[test]
    fn test_missing_day() {
        let dir = TempDir::new().unwrap();
        let err = loader(&dir).load(day(9)).unwrap_err();
        assert!(matches!(err, StoreError::Missing(d) if d == day(9)));
    }

    #[test]
    fn test_zero_padded_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("07.md"), "Plain body").unwrap();

        let payload = loader(&dir).load(day(7)).unwrap();
        assert_eq!(payload.title, "Day 7");
        assert_eq!(payload.lead, "");
        assert!(payload.body.contains("Plain body"));
    }

    #[test]
    fn test_malformed_front_matter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2.md"), "---\ntitle: [unclosed\n---\n").unwrap();

        let err = loader(&dir).load(day(2)).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_scan() {
        let dir = TempDir::new().unwrap();
        for name in ["1.md", "02.md", "2.md", "24.md", "25.md", "notes.md", "3.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("4.md.d")).unwrap();

        let days: Vec<u32> = loader(&dir).scan().into_iter().map(Day::get).collect();
        assert_eq!(days, vec![1, 2, 24]);
    }

    #[test]
    fn test_scan_missing_dir() {
        let loader = ContentLoader::new("/definitely/not/here", MarkdownRenderer::new());
        assert!(loader.scan().is_empty());
    }
}
