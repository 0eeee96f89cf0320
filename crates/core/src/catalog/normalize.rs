//! Raw upstream records and their normalization into [`MediaItem`]s.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::media::{
    CastMember, CatalogPage, Genre, MediaDetails, MediaItem, MediaType, Movie, Show, Video,
};

// ============================================================================
// Raw API Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<RawMediaRecord>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMediaRecord {
    pub id: Option<u32>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub media_type: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f32>,
    pub overview: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDetails {
    #[serde(flatten)]
    pub record: RawMediaRecord,
    #[serde(default)]
    pub genres: Vec<RawGenre>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    pub tagline: Option<String>,
    pub credits: Option<RawCredits>,
    pub videos: Option<RawVideos>,
    pub recommendations: Option<RawPage>,
    pub similar: Option<RawPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCredits {
    #[serde(default)]
    pub cast: Vec<RawCastMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCastMember {
    pub id: u32,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVideos {
    #[serde(default)]
    pub results: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVideo {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// Normalization
// ============================================================================

/// Decide the media type of a raw record.
///
/// A request-level hint wins; otherwise the record's own field; otherwise a
/// record with a `title` is a movie. Records explicitly typed as something
/// else (people in mixed trending lists) are rejected.
fn resolve_media_type(raw: &RawMediaRecord, hint: Option<MediaType>) -> Option<MediaType> {
    let explicit = match raw.media_type.as_deref() {
        Some(s) => Some(s.parse::<MediaType>().ok()?),
        None => None,
    };
    Some(hint.or(explicit).unwrap_or(if raw.title.is_some() {
        MediaType::Movie
    } else {
        MediaType::Tv
    }))
}

/// Whether a record is worth displaying.
fn is_displayable(raw: &RawMediaRecord) -> bool {
    let has_id = raw.id.is_some_and(|id| id > 0);
    let has_poster = raw.poster_path.as_deref().is_some_and(|p| !p.is_empty());
    let rated = raw.vote_average.is_some_and(|v| v > 0.0);
    has_id && has_poster && rated
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Build an item without the display filter. Only the id is mandatory.
pub(crate) fn build_item(raw: RawMediaRecord, media_type: MediaType) -> Option<MediaItem> {
    let id = raw.id.filter(|id| *id > 0)?;
    let poster_path = raw.poster_path.filter(|p| !p.is_empty());
    let backdrop_path = raw.backdrop_path.filter(|p| !p.is_empty());
    let vote_average = raw.vote_average.unwrap_or(0.0).clamp(0.0, 10.0);
    let overview = raw.overview.unwrap_or_default();

    let item = match media_type {
        MediaType::Movie => MediaItem::Movie(Movie {
            id,
            title: raw.title.or(raw.name).unwrap_or_default(),
            release_date: parse_date(raw.release_date.as_deref()),
            poster_path,
            backdrop_path,
            vote_average,
            overview,
            genre_ids: raw.genre_ids,
        }),
        MediaType::Tv => MediaItem::Show(Show {
            id,
            name: raw.name.or(raw.title).unwrap_or_default(),
            first_air_date: parse_date(raw.first_air_date.as_deref()),
            poster_path,
            backdrop_path,
            vote_average,
            overview,
            genre_ids: raw.genre_ids,
        }),
    };
    Some(item)
}

/// Normalize one listing record, dropping it if it should not be shown.
pub(crate) fn normalize_record(raw: RawMediaRecord, hint: Option<MediaType>) -> Option<MediaItem> {
    if !is_displayable(&raw) {
        return None;
    }
    let media_type = resolve_media_type(&raw, hint)?;
    build_item(raw, media_type)
}

/// Normalize a listing page, keeping the upstream pagination counters.
pub(crate) fn normalize_page(raw: RawPage, hint: Option<MediaType>) -> CatalogPage {
    CatalogPage {
        page: raw.page,
        results: raw
            .results
            .into_iter()
            .filter_map(|r| normalize_record(r, hint))
            .collect(),
        total_pages: raw.total_pages,
        total_results: raw.total_results,
    }
}

/// Normalize a details payload.
///
/// Recommendations fall back to similar titles when the recommendation list
/// is empty after filtering.
pub(crate) fn normalize_details(raw: RawDetails, media_type: MediaType) -> Option<MediaDetails> {
    let genres: Vec<Genre> = raw
        .genres
        .into_iter()
        .map(|g| Genre {
            id: g.id,
            name: g.name,
        })
        .collect();

    let mut record = raw.record;
    if record.genre_ids.is_empty() {
        record.genre_ids = genres.iter().map(|g| g.id).collect();
    }
    let item = build_item(record, media_type)?;

    let mut recommendations = raw
        .recommendations
        .map(|p| normalize_page(p, Some(media_type)).results)
        .unwrap_or_default();
    if recommendations.is_empty() {
        recommendations = raw
            .similar
            .map(|p| normalize_page(p, Some(media_type)).results)
            .unwrap_or_default();
    }

    let runtime_minutes = raw
        .runtime
        .filter(|r| *r > 0)
        .or_else(|| raw.episode_run_time.first().copied());

    Some(MediaDetails {
        item,
        genres,
        runtime_minutes,
        tagline: raw.tagline.unwrap_or_default(),
        cast: raw
            .credits
            .map(|c| {
                c.cast
                    .into_iter()
                    .map(|m| CastMember {
                        id: m.id,
                        name: m.name,
                        role: m.character.unwrap_or_default(),
                        portrait_path: m.profile_path.filter(|p| !p.is_empty()),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        videos: raw
            .videos
            .map(|v| {
                v.results
                    .into_iter()
                    .map(|v| Video {
                        key: v.key,
                        name: v.name,
                        site: v.site,
                        kind: v.kind,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        recommendations,
    })
}
