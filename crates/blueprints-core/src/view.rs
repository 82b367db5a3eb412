//! Immutable view state for the blueprint viewer.
//!
//! Every event produces a fresh [`ViewState`]; nothing is patched in place.
//! Lookups replace the candidate list, selections pick one candidate for
//! display, and surface events drive the render trigger.

use crate::blueprint::{Blueprint, total_points};
use crate::directory::{DirectoryError, DirectoryResult};
use crate::display::{DisplayEvent, DisplayPhase, DisplayState};

/// Message shown when an author has no blueprints.
pub const NO_RESULTS_MESSAGE: &str = "No blueprints found for the given author";

/// Status line shown above the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Informational: the lookup succeeded but found nothing.
    NoResults(String),
    /// The lookup failed; carries the failure's own message.
    Failure(String),
}

impl StatusMessage {
    /// Text to display.
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::NoResults(text) | StatusMessage::Failure(text) => text,
        }
    }

    /// Whether this reports a failure rather than an empty result.
    pub fn is_failure(&self) -> bool {
        matches!(self, StatusMessage::Failure(_))
    }
}

/// Inputs to the view state.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// A directory lookup finished.
    LookupCompleted {
        author: String,
        result: DirectoryResult<Vec<Blueprint>>,
    },
    /// The user picked a blueprint by name and asked to see it.
    Select(String),
    /// The display surface is visible and can be drawn on.
    SurfaceReady,
    /// The display was closed.
    SurfaceClosed,
}

/// Result of applying an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    /// The replacement state.
    pub state: ViewState,
    /// Whether the selected blueprint must be drawn now.
    pub render: bool,
}

/// Everything the shell needs to draw its widgets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    author: String,
    blueprints: Vec<Blueprint>,
    total_points: usize,
    status: Option<StatusMessage>,
    selected: Option<Blueprint>,
    display_open: bool,
    display: DisplayState,
}

impl ViewState {
    /// Empty initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Author of the current candidate list.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Current candidates.
    pub fn blueprints(&self) -> &[Blueprint] {
        &self.blueprints
    }

    /// Sum of the candidates' point counts.
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    /// Status line, if any.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Blueprint chosen for display.
    pub fn selected(&self) -> Option<&Blueprint> {
        self.selected.as_ref()
    }

    /// Whether the display dialog should be shown.
    pub fn is_display_open(&self) -> bool {
        self.display_open
    }

    /// Phase of the render trigger.
    pub fn display_phase(&self) -> DisplayPhase {
        self.display.phase()
    }

    /// Apply an event, producing the next state.
    pub fn apply(&self, event: ViewEvent) -> ViewUpdate {
        match event {
            ViewEvent::LookupCompleted { author, result } => self.with_lookup(author, result),
            ViewEvent::Select(name) => self.with_selection(&name),
            ViewEvent::SurfaceReady => self.with_display_event(DisplayEvent::SurfaceReady, true),
            ViewEvent::SurfaceClosed => self.with_display_event(DisplayEvent::SurfaceClosed, false),
        }
    }

    fn with_lookup(&self, author: String, result: DirectoryResult<Vec<Blueprint>>) -> ViewUpdate {
        let (display, _) = self.display.handle(DisplayEvent::SelectionCleared);
        let (display, _) = display.handle(DisplayEvent::SurfaceClosed);

        let (blueprints, status) = match result {
            Ok(list) if list.is_empty() => {
                (Vec::new(), Some(StatusMessage::NoResults(NO_RESULTS_MESSAGE.to_string())))
            }
            Ok(list) => (list, None),
            Err(DirectoryError::NotFound(_)) => {
                (Vec::new(), Some(StatusMessage::NoResults(NO_RESULTS_MESSAGE.to_string())))
            }
            Err(e) => (Vec::new(), Some(StatusMessage::Failure(e.to_string()))),
        };

        let state = ViewState {
            author,
            total_points: total_points(&blueprints),
            blueprints,
            status,
            selected: None,
            display_open: false,
            display,
        };
        ViewUpdate { state, render: false }
    }

    fn with_selection(&self, name: &str) -> ViewUpdate {
        let Some(blueprint) = self.blueprints.iter().find(|b| b.name == name) else {
            log::warn!("Ignoring selection of unknown blueprint {}", name);
            return ViewUpdate { state: self.clone(), render: false };
        };

        let (display, render) = self.display.handle(DisplayEvent::Selected);
        let state = ViewState {
            selected: Some(blueprint.clone()),
            display_open: true,
            display,
            ..self.clone()
        };
        ViewUpdate { state, render }
    }

    fn with_display_event(&self, event: DisplayEvent, display_open: bool) -> ViewUpdate {
        let (display, render) = self.display.handle(event);
        let state = ViewState {
            display_open: display_open && self.selected.is_some(),
            display,
            ..self.clone()
        };
        ViewUpdate { state, render }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn blueprint(name: &str, n: usize) -> Blueprint {
        Blueprint::new("john", name, vec![Point::new(1.0, 2.0); n])
    }

    fn loaded() -> ViewState {
        ViewState::new()
            .apply(ViewEvent::LookupCompleted {
                author: "john".to_string(),
                result: Ok(vec![blueprint("a", 4), blueprint("b", 0), blueprint("c", 7)]),
            })
            .state
    }

    #[test]
    fn test_lookup_success_populates_candidates() {
        let state = loaded();
        assert_eq!(state.author(), "john");
        assert_eq!(state.blueprints().len(), 3);
        assert_eq!(state.total_points(), 11);
        assert!(state.status().is_none());
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_lookup_not_found() {
        let update = loaded().apply(ViewEvent::LookupCompleted {
            author: "ghost".to_string(),
            result: Err(DirectoryError::NotFound("ghost".to_string())),
        });
        let state = update.state;
        assert!(state.blueprints().is_empty());
        assert_eq!(state.total_points(), 0);
        let status = state.status().unwrap();
        assert!(!status.is_failure());
        assert_eq!(status.text(), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_lookup_failure_surfaces_message() {
        let error = DirectoryError::Transport("connection refused".to_string());
        let expected = error.to_string();
        let state = loaded()
            .apply(ViewEvent::LookupCompleted {
                author: "john".to_string(),
                result: Err(error),
            })
            .state;
        assert!(state.blueprints().is_empty());
        assert_eq!(state.total_points(), 0);
        let status = state.status().unwrap();
        assert!(status.is_failure());
        assert_eq!(status.text(), expected);
    }

    #[test]
    fn test_successful_lookup_clears_previous_error() {
        let failed = ViewState::new()
            .apply(ViewEvent::LookupCompleted {
                author: "john".to_string(),
                result: Err(DirectoryError::Status { code: 500, reason: "Internal Server Error".into() }),
            })
            .state;
        assert!(failed.status().is_some());
        let ok = failed
            .apply(ViewEvent::LookupCompleted {
                author: "john".to_string(),
                result: Ok(vec![blueprint("a", 1)]),
            })
            .state;
        assert!(ok.status().is_none());
    }

    #[test]
    fn test_select_then_surface_ready_renders_once_ready() {
        let selected = loaded().apply(ViewEvent::Select("c".to_string()));
        assert!(!selected.render);
        assert!(selected.state.is_display_open());
        assert_eq!(selected.state.selected().unwrap().name, "c");
        assert_eq!(selected.state.display_phase(), DisplayPhase::AwaitingSurface);

        let ready = selected.state.apply(ViewEvent::SurfaceReady);
        assert!(ready.render);
        assert_eq!(ready.state.display_phase(), DisplayPhase::Rendered);
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let state = loaded();
        let update = state.apply(ViewEvent::Select("nope".to_string()));
        assert!(!update.render);
        assert_eq!(update.state, state);
    }

    #[test]
    fn test_close_keeps_selection_but_hides_display() {
        let state = loaded()
            .apply(ViewEvent::Select("a".to_string()))
            .state
            .apply(ViewEvent::SurfaceReady)
            .state
            .apply(ViewEvent::SurfaceClosed)
            .state;
        assert!(!state.is_display_open());
        assert_eq!(state.selected().unwrap().name, "a");
        assert_eq!(state.display_phase(), DisplayPhase::AwaitingSurface);
    }

    #[test]
    fn test_new_lookup_drops_selection() {
        let state = loaded()
            .apply(ViewEvent::Select("a".to_string()))
            .state
            .apply(ViewEvent::SurfaceReady)
            .state;
        let state = state
            .apply(ViewEvent::LookupCompleted {
                author: "john".to_string(),
                result: Ok(vec![blueprint("z", 2)]),
            })
            .state;
        assert!(state.selected().is_none());
        assert!(!state.is_display_open());
        assert_eq!(state.display_phase(), DisplayPhase::NoSelection);
    }

    #[test]
    fn test_empty_success_reports_no_results() {
        let state = ViewState::new()
            .apply(ViewEvent::LookupCompleted { author: "x".to_string(), result: Ok(Vec::new()) })
            .state;
        assert_eq!(state.status().map(StatusMessage::text), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_events_do_not_mutate_previous_state() {
        let before = loaded();
        let snapshot = before.clone();
        let _ = before.apply(ViewEvent::Select("a".to_string()));
        assert_eq!(before, snapshot);
    }
}
