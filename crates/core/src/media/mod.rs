//! Normalized media model.
//!
//! Every record coming out of the catalog is turned into a [`MediaItem`]
//! before anything else sees it. Movies and shows carry different field
//! names upstream (`title`/`release_date` vs `name`/`first_air_date`), so the
//! item is a tagged variant with a shared projection for the common fields.

mod details;
mod types;

pub use details::*;
pub use types::*;
