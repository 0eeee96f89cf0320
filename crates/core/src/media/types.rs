use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of title in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Name used in URLs and upstream endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("unknown media type: {}", other)),
        }
    }
}

/// Primary key of a title.
///
/// Upstream ids are only unique per media type, so the pair is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaKey {
    pub id: u32,
    pub media_type: MediaType,
}

impl MediaKey {
    pub fn new(id: u32, media_type: MediaType) -> Self {
        Self { id, media_type }
    }

    pub fn movie(id: u32) -> Self {
        Self::new(id, MediaType::Movie)
    }

    pub fn tv(id: u32) -> Self {
        Self::new(id, MediaType::Tv)
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.media_type, self.id)
    }
}

/// A feature film.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    /// Average vote (0-10).
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// A TV series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    /// Average vote (0-10).
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// A normalized catalog entry.
///
/// Serialized with an internal `media_type` tag, which is also the shape
/// persisted in the watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type")]
pub enum MediaItem {
    #[serde(rename = "movie")]
    Movie(Movie),
    #[serde(rename = "tv")]
    Show(Show),
}

impl MediaItem {
    pub fn id(&self) -> u32 {
        match self {
            MediaItem::Movie(m) => m.id,
            MediaItem::Show(s) => s.id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            MediaItem::Movie(_) => MediaType::Movie,
            MediaItem::Show(_) => MediaType::Tv,
        }
    }

    pub fn key(&self) -> MediaKey {
        MediaKey::new(self.id(), self.media_type())
    }

    /// Movie title or show name.
    pub fn display_title(&self) -> &str {
        match self {
            MediaItem::Movie(m) => &m.title,
            MediaItem::Show(s) => &s.name,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.poster_path.as_deref(),
            MediaItem::Show(s) => s.poster_path.as_deref(),
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.backdrop_path.as_deref(),
            MediaItem::Show(s) => s.backdrop_path.as_deref(),
        }
    }

    pub fn rating(&self) -> f32 {
        match self {
            MediaItem::Movie(m) => m.vote_average,
            MediaItem::Show(s) => s.vote_average,
        }
    }

    pub fn synopsis(&self) -> &str {
        match self {
            MediaItem::Movie(m) => &m.overview,
            MediaItem::Show(s) => &s.overview,
        }
    }

    pub fn genre_ids(&self) -> &[u32] {
        match self {
            MediaItem::Movie(m) => &m.genre_ids,
            MediaItem::Show(s) => &s.genre_ids,
        }
    }

    /// Theatrical release date for movies, first air date for shows.
    pub fn release_date(&self) -> Option<NaiveDate> {
        match self {
            MediaItem::Movie(m) => m.release_date,
            MediaItem::Show(s) => s.first_air_date,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date().map(|d| d.year())
    }
}

/// One page of a paginated catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub page: u32,
    pub results: Vec<MediaItem>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl CatalogPage {
    /// Page with no results, used when a listing could not be fetched.
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    /// Whether no further page exists after this one.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32) -> MediaItem {
        MediaItem::Movie(Movie {
            id,
            title: "Arrival".to_string(),
            release_date: NaiveDate::from_ymd_opt(2016, 11, 10),
            poster_path: Some("/arrival.jpg".to_string()),
            backdrop_path: None,
            vote_average: 7.6,
            overview: "Linguist meets heptapods.".to_string(),
            genre_ids: vec![18, 878],
        })
    }

    #[test]
    fn test_projection_of_movie() {
        let item = movie(329865);
        assert_eq!(item.key(), MediaKey::movie(329865));
        assert_eq!(item.display_title(), "Arrival");
        assert_eq!(item.year(), Some(2016));
        assert_eq!(item.genre_ids(), &[18, 878]);
    }

    #[test]
    fn test_same_id_different_type_is_different_key() {
        assert_ne!(MediaKey::movie(1399), MediaKey::tv(1399));
    }

    #[test]
    fn test_serialized_shape_uses_media_type_tag() {
        let json = serde_json::to_value(movie(1)).unwrap();
        assert_eq!(json["media_type"], "movie");
        assert_eq!(json["title"], "Arrival");
        assert_eq!(json["release_date"], "2016-11-10");

        let back: MediaItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, movie(1));
    }

    #[test]
    fn test_show_deserializes_from_tv_tag() {
        let item: MediaItem = serde_json::from_str(
            r#"{"media_type":"tv","id":1396,"name":"Breaking Bad","vote_average":8.9}"#,
        )
        .unwrap();
        assert_eq!(item.key(), MediaKey::tv(1396));
        assert_eq!(item.display_title(), "Breaking Bad");
        assert!(item.release_date().is_none());
    }

    #[test]
    fn test_media_type_parse() {
        assert_eq!("movie".parse::<MediaType>(), Ok(MediaType::Movie));
        assert_eq!("tv".parse::<MediaType>(), Ok(MediaType::Tv));
        assert!("person".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_empty_page_is_last() {
        assert!(CatalogPage::empty(1).is_last());
    }
}
