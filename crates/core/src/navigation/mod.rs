//! Address-bar routing.
//!
//! Locations map to exactly one [`ViewState`] through a pure parse; the
//! [`NavigationController`] pushes canonical locations onto a [`History`]
//! and re-parses after every change.

mod controller;
mod debounce;
mod history;
mod location;
mod view;

pub use controller::{NavigationController, NavigationOutcome};
pub use debounce::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use history::{History, MemoryHistory};
pub use location::Location;
pub use view::{Section, StaticPage, ViewState};
