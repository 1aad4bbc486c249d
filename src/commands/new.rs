//! Create the article for a day

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::calendar::Day;
use crate::Advent;

/// Create `posts/<day>.md` from the scaffold
pub fn create_post(advent: &Advent, day: &str, title: Option<&str>) -> Result<PathBuf> {
    let day: Day = day
        .parse()
        .map_err(|e| anyhow::anyhow!("Cannot create post: {}", e))?;

    let loader = advent.loader();
    if let Some(existing) = loader.find_day_file(day) {
        anyhow::bail!("File already exists: {:?}", existing);
    }

    fs::create_dir_all(&advent.content_dir)?;
    let file_path = loader.day_file(day);

    // Load scaffold template
    let scaffold_path = advent.base_dir.join("scaffolds").join("post.md");
    let scaffold_content = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        "---\ntitle: {{ title }}\nlead: ''\nresources: []\n---\n".to_string()
    };

    let default_title = format!("Day {}", day);
    let content = scaffold_content
        .replace("{{ title }}", &yaml_scalar(title.unwrap_or(&default_title)))
        .replace("{{ day }}", &day.to_string());

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a title so that colons and the like survive YAML
fn yaml_scalar(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
