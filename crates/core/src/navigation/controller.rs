use serde::Serialize;
use tracing::debug;

use super::history::History;
use super::location::Location;
use super::view::{Section, StaticPage, ViewState};
use crate::media::MediaKey;

/// What a navigation call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationOutcome {
    /// A history entry was added.
    pub pushed: bool,
    /// The active view changed.
    pub changed: bool,
    /// The page should scroll to the top.
    pub scroll_to_top: bool,
}

/// Keeps the active [`ViewState`] in step with a [`History`].
///
/// The view is always the parse of the current location. Programmatic
/// navigation only pushes when the canonical target differs from the current
/// location, so repeating a call adds no entries.
///
/// Logical back uses an explicit trail of previously active views: every
/// transition to a new view records the one it replaced, and a transition
/// back to the top of the trail pops it.
pub struct NavigationController<H: History> {
    history: H,
    view: ViewState,
    trail: Vec<ViewState>,
}

impl<H: History> NavigationController<H> {
    pub fn new(history: H) -> Self {
        let view = ViewState::from_location(&history.current());
        debug!(?view, "Navigation initialized");
        Self {
            history,
            view,
            trail: Vec::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn location(&self) -> Location {
        self.history.current()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Previously active views, oldest first.
    pub fn trail(&self) -> &[ViewState] {
        &self.trail
    }

    /// Whether [`back`](Self::back) returns to a recorded view.
    pub fn can_go_back(&self) -> bool {
        !self.trail.is_empty()
    }

    /// Re-read the location after an external history change.
    ///
    /// Returns whether the active view changed.
    pub fn sync(&mut self) -> bool {
        let next = ViewState::from_location(&self.history.current());
        if next == self.view {
            return false;
        }

        let returning = self.trail.last() == Some(&next);
        let previous = std::mem::replace(&mut self.view, next);
        if returning {
            self.trail.pop();
        } else {
            self.trail.push(previous);
        }
        debug!(view = ?self.view, returning, "View changed");
        true
    }

    /// Open the detail view of a title.
    pub fn select_media(&mut self, media: MediaKey) -> NavigationOutcome {
        self.go(ViewState::Details { media }.location(), true)
    }

    /// Open one of the header sections.
    pub fn navigate(&mut self, section: Section) -> NavigationOutcome {
        self.go(section.view().location(), true)
    }

    pub fn navigate_static(&mut self, page: StaticPage) -> NavigationOutcome {
        self.go(ViewState::Static { page }.location(), true)
    }

    /// Show results for a (settled) search input.
    ///
    /// Blank input on the search page returns home; blank input elsewhere
    /// changes nothing.
    pub fn search(&mut self, query: &str) -> NavigationOutcome {
        let query = query.trim();
        if !query.is_empty() {
            return self.go(Location::search(query), false);
        }
        if self.history.current().path() == "/search" {
            return self.go(Location::root(), false);
        }
        NavigationOutcome {
            pushed: false,
            changed: self.sync(),
            scroll_to_top: false,
        }
    }

    /// Return to the previous view.
    ///
    /// With no recorded view (deep link) this navigates home instead of
    /// leaving the app.
    pub fn back(&mut self) -> NavigationOutcome {
        let Some(target) = self.trail.last().cloned() else {
            debug!("No previous view, going home");
            return self.navigate(Section::Home);
        };

        if self.history.back() {
            if ViewState::from_location(&self.history.current()) == target {
                return NavigationOutcome {
                    pushed: false,
                    changed: self.sync(),
                    scroll_to_top: false,
                };
            }
            // A collapsed revisit left a different entry behind this one.
            self.history.forward();
        }

        self.go(target.location(), false)
    }

    fn go(&mut self, target: Location, scroll_to_top: bool) -> NavigationOutcome {
        let pushed = if self.history.current() != target {
            debug!("Pushing {}", target);
            self.history.push(target);
            true
        } else {
            false
        };

        NavigationOutcome {
            pushed,
            changed: self.sync(),
            scroll_to_top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryHistory;

    fn controller(start: &str) -> NavigationController<MemoryHistory> {
        NavigationController::new(MemoryHistory::starting_at(start))
    }

    #[test]
    fn test_new_parses_current_location() {
        let nav = controller("/tv/1399");
        assert_eq!(
            nav.view(),
            &ViewState::Details {
                media: MediaKey::tv(1399)
            }
        );
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_navigate_twice_pushes_once() {
        let mut nav = controller("/");
        let first = nav.navigate(Section::MyList);
        let second = nav.navigate(Section::MyList);

        assert!(first.pushed && first.changed && first.scroll_to_top);
        assert!(!second.pushed && !second.changed);
        assert!(second.scroll_to_top);
        assert_eq!(nav.history().len(), 2);
        assert_eq!(nav.view(), &ViewState::MyList);
    }

    #[test]
    fn test_select_media_then_back_returns_to_grid() {
        let mut nav = controller("/");
        nav.navigate(Section::Movies);
        nav.select_media(MediaKey::movie(603));
        assert_eq!(nav.location().to_string(), "/movie/603");

        let outcome = nav.back();
        assert!(outcome.changed);
        assert_eq!(nav.view(), &ViewState::Movies);
        assert_eq!(nav.trail(), &[ViewState::Home]);
    }

    #[test]
    fn test_back_after_revisit_follows_trail() {
        let mut nav = controller("/");
        nav.navigate(Section::Movies);
        nav.select_media(MediaKey::movie(1));
        nav.navigate(Section::Movies);
        assert_eq!(nav.trail(), &[ViewState::Home]);

        let outcome = nav.back();
        assert!(outcome.changed);
        assert_eq!(nav.view(), &ViewState::Home);
        assert_eq!(nav.location().to_string(), "/");
        assert!(nav.trail().is_empty());
    }

    #[test]
    fn test_back_from_deep_link_goes_home() {
        let mut nav = controller("/movie/11");
        let outcome = nav.back();
        assert!(outcome.pushed);
        assert_eq!(nav.view(), &ViewState::Home);
        assert_eq!(nav.location().to_string(), "/");
    }

    #[test]
    fn test_search_does_not_scroll_and_is_idempotent() {
        let mut nav = controller("/movies");
        let first = nav.search("  blade runner ");
        let second = nav.search("blade runner");

        assert!(first.pushed && !first.scroll_to_top);
        assert!(!second.pushed);
        assert_eq!(
            nav.view(),
            &ViewState::Search {
                query: "blade runner".to_string()
            }
        );
    }

    #[test]
    fn test_empty_search_on_search_page_goes_home() {
        let mut nav = controller("/search?q=alien");
        let outcome = nav.search("   ");
        assert!(outcome.pushed);
        assert_eq!(nav.view(), &ViewState::Home);
    }

    #[test]
    fn test_empty_search_elsewhere_does_nothing() {
        let mut nav = controller("/genres");
        let outcome = nav.search("");
        assert_eq!(outcome, NavigationOutcome::default());
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_sync_follows_external_back_and_forward() {
        let mut nav = controller("/");
        nav.navigate(Section::Genres);
        nav.select_media(MediaKey::tv(5));

        nav.history.back();
        assert!(nav.sync());
        assert_eq!(nav.view(), &ViewState::Genres);
        assert_eq!(nav.trail(), &[ViewState::Home]);

        nav.history.forward();
        assert!(nav.sync());
        assert_eq!(
            nav.view(),
            &ViewState::Details {
                media: MediaKey::tv(5)
            }
        );
        assert_eq!(nav.trail().last(), Some(&ViewState::Genres));
    }

    #[test]
    fn test_static_navigation() {
        let mut nav = controller("/");
        let outcome = nav.navigate_static(StaticPage::Faq);
        assert!(outcome.pushed && outcome.scroll_to_top);
        assert_eq!(nav.location().to_string(), "/faq");
    }
}
