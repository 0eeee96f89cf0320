use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::DiscoverQuery;

/// Oldest year offered by the year filter.
pub const MIN_YEAR: i32 = 1950;

/// Grid ordering, serialized as the upstream `sort_by` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "popularity.asc")]
    PopularityAsc,
    #[serde(rename = "vote_average.desc")]
    RatingDesc,
    #[serde(rename = "vote_average.asc")]
    RatingAsc,
    #[serde(rename = "primary_release_date.desc")]
    ReleaseDateDesc,
    #[serde(rename = "primary_release_date.asc")]
    ReleaseDateAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::PopularityDesc,
        SortKey::PopularityAsc,
        SortKey::RatingDesc,
        SortKey::RatingAsc,
        SortKey::ReleaseDateDesc,
        SortKey::ReleaseDateAsc,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::PopularityAsc => "popularity.asc",
            SortKey::RatingDesc => "vote_average.desc",
            SortKey::RatingAsc => "vote_average.asc",
            SortKey::ReleaseDateDesc => "primary_release_date.desc",
            SortKey::ReleaseDateAsc => "primary_release_date.asc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "Popularity Descending",
            SortKey::PopularityAsc => "Popularity Ascending",
            SortKey::RatingDesc => "Rating Descending",
            SortKey::RatingAsc => "Rating Ascending",
            SortKey::ReleaseDateDesc => "Release Date Descending",
            SortKey::ReleaseDateAsc => "Release Date Ascending",
        }
    }

    /// Rating sorts need a vote floor to keep obscure titles out.
    pub fn is_rating(&self) -> bool {
        matches!(self, SortKey::RatingDesc | SortKey::RatingAsc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_param() == s)
            .ok_or_else(|| format!("unknown sort order: {}", s))
    }
}

/// A genre tab of the genres grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenreTab {
    pub genre_id: u32,
    pub label: &'static str,
}

const fn tab(genre_id: u32, label: &'static str) -> GenreTab {
    GenreTab { genre_id, label }
}

/// Tabs of the genres grid, first one selected by default.
pub const GENRE_TABS: [GenreTab; 9] = [
    tab(28, "Action"),
    tab(35, "Comedy"),
    tab(27, "Horror"),
    tab(53, "Thriller"),
    tab(878, "Sci-Fi"),
    tab(10749, "Romance"),
    tab(99, "Documentary"),
    tab(80, "Crime"),
    tab(18, "Drama"),
];

/// Years offered by the year filter, newest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (MIN_YEAR..=current_year).rev().collect()
}

/// Filter and sort state of a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFilters {
    /// Selected genre tab, `None` for grids without tabs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<u32>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl GridFilters {
    /// Discovery parameters for these filters.
    pub fn discover_query(&self) -> DiscoverQuery {
        let mut query = DiscoverQuery::new().with("sort_by", self.sort.as_param());
        if let Some(year) = self.year {
            query.set("primary_release_year", year);
        }
        if let Some(genre) = self.genre {
            query.set("with_genres", genre);
        }
        query
    }
}
