//! Built-in HTML templates using the Tera template engine
//!
//! Templates are embedded in the binary. Only pre-rendered article bodies
//! and URLs built by `helpers` are inserted unescaped.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{day_path, home_path};
use crate::view::{ArticleView, DoorView, RenderMode};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("article.html", include_str!("site/article.html")),
            ("index.html", include_str!("site/index.html")),
            ("loading.html", include_str!("site/loading.html")),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render an article page
    pub fn render_article(&self, config: &SiteConfig, article: &ArticleView) -> Result<String> {
        let mut context = base_context(config);
        context.insert("article", article);
        context.insert(
            "previous_url",
            &article.previous.map(|day| day_path(config, day)),
        );
        context.insert(
            "next_url",
            &article
                .next
                .filter(|_| article.has_next)
                .map(|day| day_path(config, day)),
        );
        self.render("article.html", &context)
    }

    /// Render the calendar index
    pub fn render_index(&self, config: &SiteConfig, doors: &[DoorView]) -> Result<String> {
        let doors: Vec<DoorData> = doors
            .iter()
            .map(|door| DoorData {
                day: door.day.get(),
                open: door.open,
                title: door.title.clone(),
                url: day_path(config, door.day),
            })
            .collect();

        let mut context = base_context(config);
        context.insert("doors", &doors);
        self.render("index.html", &context)
    }

    /// Render the loading indicator
    pub fn render_loading(&self, config: &SiteConfig) -> Result<String> {
        self.render("loading.html", &base_context(config))
    }

    /// Render a page for a render mode. Redirects have no body.
    pub fn render_mode(&self, config: &SiteConfig, mode: &RenderMode) -> Result<Option<String>> {
        match mode {
            RenderMode::Loading => self.render_loading(config).map(Some),
            RenderMode::Article(article) => self.render_article(config, article).map(Some),
            RenderMode::Redirect { .. } => Ok(None),
        }
    }
}

fn base_context(config: &SiteConfig) -> Context {
    let mut context = Context::new();
    context.insert(
        "site",
        &SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
        },
    );
    context.insert("home", &home_path(config));
    context
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
struct SiteData {
    title: String,
    description: String,
    language: String,
}

#[derive(Debug, Clone, Serialize)]
struct DoorData {
    day: u32,
    open: bool,
    title: Option<String>,
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Day;
    use crate::content::{ContentPayload, Resource};

    fn article(day: i64, current_day: u32) -> ArticleView {
        let payload = ContentPayload::new(
            "Hooks <3",
            "Lead text",
            "<p>Rendered <em>body</em></p>",
            vec![Resource {
                title: "Docs".to_string(),
                link: "https://reactjs.org".to_string(),
                body: "Official".to_string(),
            }],
        );
        ArticleView::new(Day::new(day).unwrap(), &payload, current_day)
    }

    #[test]
    fn test_render_article() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = renderer.render_article(&config, &article(5, 10)).unwrap();

        assert!(html.contains("<title>Hooks &lt;3 - Advent Calendar</title>"));
        assert!(html.contains("<p>Rendered <em>body</em></p>"));
        // Resource links come from front-matter, so Tera escapes them
        assert!(html.contains(r#"href="https:&#x2F;&#x2F;reactjs.org""#));
        assert!(html.contains(r#"href="/4""#));
        assert!(html.contains(r#"href="/6""#));
    }

    #[test]
    fn test_next_link_hidden_for_today() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = renderer.render_article(&config, &article(1, 1)).unwrap();

        assert!(!html.contains(r#"class="next""#));
        assert!(!html.contains(r#"class="previous""#));
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut config = SiteConfig::default();
        config.root = "/advent/".to_string();
        let doors = DoorView::all(2, false, &[(Day::new(1).unwrap(), "First".to_string())]);
        let html = renderer.render_index(&config, &doors).unwrap();

        assert!(html.contains(r#"href="/advent/1""#));
        assert!(html.contains("First"));
        assert!(!html.contains(r#"href="/advent/3""#));
        assert_eq!(html.matches("door locked").count(), 22);
    }

    #[test]
    fn test_render_mode_redirect_has_no_body() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let mode = RenderMode::Redirect {
            to: "/".to_string(),
        };
        assert!(renderer.render_mode(&config, &mode).unwrap().is_none());
        assert!(renderer
            .render_mode(&config, &RenderMode::Loading)
            .unwrap()
            .unwrap()
            .contains("Loading"));
    }
}
