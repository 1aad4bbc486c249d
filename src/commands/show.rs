//! Resolve one day from the command line

use anyhow::Result;
use std::sync::Arc;

use crate::calendar::{Clock, DayParam};
use crate::content::ContentStore;
use crate::helpers::home_path;
use crate::resolver::ArticleSession;
use crate::view::RenderMode;
use crate::Advent;

/// Resolve a day the way the server would and describe the outcome
pub async fn describe(advent: &Advent, segment: &str, today: Option<u32>) -> Result<RenderMode> {
    let session = ArticleSession::new(Arc::new(advent.resolver(today)?));
    Ok(describe_with(&session, segment, &home_path(&advent.config)).await)
}

/// Navigate `session` to `segment`, with a single store lookup at most
pub async fn describe_with<S: ContentStore, C: Clock>(
    session: &ArticleSession<S, C>,
    segment: &str,
    home: &str,
) -> RenderMode {
    // Locked and malformed days are known before any lookup; a failed
    // load is reported by the resolver itself
    if let Err(e) = session.resolver().classify(&DayParam::parse(segment)) {
        tracing::info!("{}", e);
    }

    session.navigate(segment).await;
    session.render_mode(home)
}

/// Print the outcome of resolving a day
pub async fn run(advent: &Advent, segment: &str, today: Option<u32>, json: bool) -> Result<()> {
    let mode = describe(advent, segment, today).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&mode)?);
        return Ok(());
    }

    match mode {
        RenderMode::Article(article) => {
            println!("Day {}: {}", article.day, article.title);
            if !article.lead.is_empty() {
                println!("  {}", article.lead);
            }
            for resource in &article.resources {
                println!("  - {} <{}>", resource.title, resource.link);
            }
            let previous = article.previous.map(|d| d.to_string());
            let next = article
                .next
                .filter(|_| article.has_next)
                .map(|d| d.to_string());
            println!(
                "  previous: {}, next: {}",
                previous.as_deref().unwrap_or("-"),
                next.as_deref().unwrap_or("-")
            );
        }
        RenderMode::Redirect { to } => println!("Redirect to {}", to),
        RenderMode::Loading => println!("Loading"),
    }

    Ok(())
}
