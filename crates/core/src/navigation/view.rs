use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::location::Location;
use crate::media::{MediaKey, MediaType};

/// Informational pages reachable from the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaticPage {
    Faq,
    AboutUs,
    ContactUs,
    Account,
    TermsOfService,
    PrivacyPolicy,
    Legal,
    CookiePolicy,
    Dmca,
}

impl StaticPage {
    pub const ALL: [StaticPage; 9] = [
        StaticPage::Faq,
        StaticPage::AboutUs,
        StaticPage::ContactUs,
        StaticPage::Account,
        StaticPage::TermsOfService,
        StaticPage::PrivacyPolicy,
        StaticPage::Legal,
        StaticPage::CookiePolicy,
        StaticPage::Dmca,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            StaticPage::Faq => "faq",
            StaticPage::AboutUs => "about-us",
            StaticPage::ContactUs => "contact-us",
            StaticPage::Account => "account",
            StaticPage::TermsOfService => "terms-of-service",
            StaticPage::PrivacyPolicy => "privacy-policy",
            StaticPage::Legal => "legal",
            StaticPage::CookiePolicy => "cookie-policy",
            StaticPage::Dmca => "dmca",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StaticPage::Faq => "Frequently Asked Questions",
            StaticPage::AboutUs => "About CineFlix",
            StaticPage::ContactUs => "Contact Us",
            StaticPage::Account => "Account",
            StaticPage::TermsOfService => "Terms of Service",
            StaticPage::PrivacyPolicy => "Privacy Policy",
            StaticPage::Legal => "Legal Notices",
            StaticPage::CookiePolicy => "Cookie Policy",
            StaticPage::Dmca => "DMCA Takedown Policy",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }
}

impl fmt::Display for StaticPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for StaticPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| format!("unknown page: {}", s))
    }
}

/// Top-level destinations in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Home,
    MyList,
    Movies,
    Genres,
}

impl Section {
    pub fn view(&self) -> ViewState {
        match self {
            Section::Home => ViewState::Home,
            Section::MyList => ViewState::MyList,
            Section::Movies => ViewState::Movies,
            Section::Genres => ViewState::Genres,
        }
    }
}

/// The single active view, derived from the current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    Home,
    Details { media: MediaKey },
    MyList,
    Search { query: String },
    Movies,
    Genres,
    Static { page: StaticPage },
}

impl ViewState {
    /// Resolve a location. Never fails: anything unrecognized is `Home`.
    ///
    /// Precedence: static slug, `/movie/<id>` or `/tv/<id>`, any `/search*`
    /// path, the fixed section paths, then `Home`.
    pub fn from_location(location: &Location) -> Self {
        let path = location.path();

        if let Some(page) = path.strip_prefix('/').and_then(StaticPage::from_slug) {
            return ViewState::Static { page };
        }

        if let Some(media) = parse_details(path) {
            return ViewState::Details { media };
        }

        if path.starts_with("/search") {
            return ViewState::Search {
                query: location.param("q").unwrap_or_default().to_string(),
            };
        }

        match path {
            "/my-list" => ViewState::MyList,
            "/movies" => ViewState::Movies,
            "/genres" => ViewState::Genres,
            _ => ViewState::Home,
        }
    }

    /// Canonical location for this view.
    pub fn location(&self) -> Location {
        match self {
            ViewState::Home => Location::root(),
            ViewState::Details { media } => {
                Location::new(format!("/{}/{}", media.media_type, media.id))
            }
            ViewState::MyList => Location::new("/my-list"),
            ViewState::Search { query } => Location::search(query),
            ViewState::Movies => Location::new("/movies"),
            ViewState::Genres => Location::new("/genres"),
            ViewState::Static { page } => Location::new(format!("/{}", page.slug())),
        }
    }
}

/// `/movie/<digits>` or `/tv/<digits>`, one optional trailing slash.
fn parse_details(path: &str) -> Option<MediaKey> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let rest = trimmed.strip_prefix('/')?;
    let (kind, id) = rest.split_once('/')?;

    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let media_type: MediaType = kind.parse().ok()?;
    let id: u32 = id.parse().ok()?;
    Some(MediaKey::new(id, media_type))
}
