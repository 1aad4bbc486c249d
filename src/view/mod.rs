//! What the renderer is asked to draw

use serde::Serialize;

use crate::calendar::{self, Day, DayParam};
use crate::content::{ContentPayload, Resource};
use crate::resolver::{Phase, ResolutionResult, ResolutionState};

/// Fully populated article page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleView {
    pub day: Day,
    pub title: String,
    pub lead: String,
    pub body: String,
    pub resources: Vec<Resource>,
    pub previous: Option<Day>,
    pub next: Option<Day>,
    /// Whether the next door is already open today
    pub has_next: bool,
}

impl ArticleView {
    /// `current_day` is the real calendar day: preview mode does not unlock
    /// the link to tomorrow.
    pub fn new(day: Day, payload: &ContentPayload, current_day: u32) -> Self {
        let next = day.next();
        Self {
            day,
            title: payload.title.clone(),
            lead: payload.lead.clone(),
            body: payload.body.clone(),
            resources: payload.resources.clone(),
            previous: day.previous(),
            next,
            has_next: next.is_some() && day.get() < current_day,
        }
    }
}

/// One of the three things a page can be
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderMode {
    Loading,
    Redirect { to: String },
    Article(ArticleView),
}

impl RenderMode {
    /// Map a finished resolution to a render mode.
    ///
    /// Locked and missing days both send the reader home.
    pub fn from_result(
        param: &DayParam,
        result: &ResolutionResult,
        current_day: u32,
        home: &str,
    ) -> Self {
        match (result, param.to_day()) {
            (ResolutionResult::Available(payload), Ok(day)) => {
                RenderMode::Article(ArticleView::new(day, payload, current_day))
            }
            _ => RenderMode::Redirect {
                to: home.to_string(),
            },
        }
    }

    /// Map a session slot to a render mode
    pub fn from_state(state: &ResolutionState, current_day: u32, home: &str) -> Self {
        let redirect = || RenderMode::Redirect {
            to: home.to_string(),
        };
        match (&state.phase, &state.param) {
            (Phase::Idle | Phase::Loading, _) => RenderMode::Loading,
            (Phase::Available(payload), Some(param)) => match param.to_day() {
                Ok(day) => RenderMode::Article(ArticleView::new(day, payload, current_day)),
                Err(_) => redirect(),
            },
            _ => redirect(),
        }
    }
}

/// A door on the index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoorView {
    pub day: Day,
    pub open: bool,
    /// Title of the article, when the door is open and content exists
    pub title: Option<String>,
}

impl DoorView {
    /// Build all doors. `titles` lists the days that have content.
    pub fn all(current_day: u32, bypass: bool, titles: &[(Day, String)]) -> Vec<DoorView> {
        Day::all()
            .map(|day| {
                let open = calendar::validate(i64::from(day.get()), current_day, bypass);
                let title = titles
                    .iter()
                    .find(|(d, _)| *d == day)
                    .filter(|_| open)
                    .map(|(_, t)| t.clone());
                DoorView { day, open, title }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{reduce, Event};
    use std::sync::Arc;

    fn day(n: i64) -> Day {
        Day::new(n).unwrap()
    }

    fn payload() -> Arc<ContentPayload> {
        Arc::new(ContentPayload::new(
            "Title",
            "Lead",
            "<p>Body</p>",
            vec![Resource {
                title: "Docs".to_string(),
                link: "https://reactjs.org".to_string(),
                body: String::new(),
            }],
        ))
    }

    #[test]
    fn test_article_navigation() {
        let view = ArticleView::new(day(5), &payload(), 10);
        assert_eq!(view.previous, Some(day(4)));
        assert_eq!(view.next, Some(day(6)));
        assert!(view.has_next);

        let view = ArticleView::new(day(10), &payload(), 10);
        assert!(!view.has_next);
    }

    #[test]
    fn test_article_navigation_edges() {
        let first = ArticleView::new(day(1), &payload(), 24);
        assert_eq!(first.previous, None);
        assert!(first.has_next);

        let last = ArticleView::new(day(24), &payload(), 31);
        assert_eq!(last.next, None);
        assert!(!last.has_next);
    }

    #[test]
    fn test_from_result() {
        let home = "/";
        let param = DayParam::Number(3);

        let mode = RenderMode::from_result(
            &param,
            &ResolutionResult::Available(payload()),
            3,
            home,
        );
        assert!(matches!(mode, RenderMode::Article(ref v) if v.day == day(3) && !v.has_next));

        for result in [ResolutionResult::Unavailable, ResolutionResult::NotFound] {
            assert_eq!(
                RenderMode::from_result(&param, &result, 3, home),
                RenderMode::Redirect {
                    to: "/".to_string()
                }
            );
        }
    }

    #[test]
    fn test_from_state() {
        let state = ResolutionState::default();
        assert_eq!(RenderMode::from_state(&state, 1, "/"), RenderMode::Loading);

        let state = reduce(
            state,
            Event::Requested {
                seq: 1,
                param: DayParam::Number(2),
            },
        );
        assert_eq!(RenderMode::from_state(&state, 1, "/"), RenderMode::Loading);

        let state = reduce(
            state,
            Event::Settled {
                seq: 1,
                result: ResolutionResult::NotFound,
            },
        );
        assert_eq!(
            RenderMode::from_state(&state, 1, "/advent/"),
            RenderMode::Redirect {
                to: "/advent/".to_string()
            }
        );
    }

    #[test]
    fn test_doors() {
        let titles = vec![(day(1), "One".to_string()), (day(5), "Five".to_string())];
        let doors = DoorView::all(3, false, &titles);
        assert_eq!(doors.len(), 24);
        assert!(doors[0].open);
        assert_eq!(doors[0].title.as_deref(), Some("One"));
        assert!(doors[2].open);
        assert_eq!(doors[2].title, None);
        assert!(!doors[4].open);
        assert_eq!(doors[4].title, None);

        let doors = DoorView::all(3, true, &titles);
        assert!(doors.iter().all(|d| d.open));
        assert_eq!(doors[4].title.as_deref(), Some("Five"));
    }

    #[test]
    fn test_render_mode_serializes_with_tag() {
        let json = serde_json::to_value(RenderMode::Redirect {
            to: "/".to_string(),
        })
        .unwrap();
        assert_eq!(json["mode"], "redirect");
        assert_eq!(json["to"], "/");
    }
}
