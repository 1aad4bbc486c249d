//! Initialize a new advent calendar site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Advent calendar configuration

# Site
title: Advent Calendar
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: posts
public_dir: public

# Calendar
## IANA timezone deciding when a new day starts (empty = local time)
timezone: ''
## Anything other than production opens every door
environment: production
preview: false

# Writing
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
lead: >
  One or two sentences that sell the article.
resources:
  - title: Further reading
    link: https://example.com
    body: Why this link is worth a click.
---

Write the article for day {{ day }} here.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;

    let sample_post = r#"---
title: Welcome to the calendar
lead: >
  Behind every door is a new article. This one opens on the first of
  December.
resources:
  - title: CommonMark
    link: https://commonmark.org/help/
    body: A quick reference for the Markdown syntax used by the articles.
---

Articles live in `posts/<day>.md`. Create the next one with:

```bash
$ advent-rs new 2 --title "Day two"
```

Preview every door, even those still locked:

```bash
$ ADVENT_ENV=development advent-rs server
```
"#;

    fs::write(target_dir.join("posts/1.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Day;
    use crate::Advent;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let advent = Advent::new(dir.path()).unwrap();
        assert_eq!(advent.config.title, "Advent Calendar");
        assert!(advent.content_dir.join("1.md").exists());

        let payload = advent.loader().load(Day::new(1).unwrap()).unwrap();
        assert_eq!(payload.title, "Welcome to the calendar");
        assert_eq!(payload.resources.len(), 1);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
