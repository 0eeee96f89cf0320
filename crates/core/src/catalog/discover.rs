//! Parameters for the movie discovery endpoint.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

const SORT_BY: &str = "sort_by";
const RELEASE_DATE_LTE: &str = "primary_release_date.lte";
const RELEASE_DATE_GTE: &str = "primary_release_date.gte";

/// A discovery query: caller parameters layered over the defaults.
///
/// Defaults are `sort_by=popularity.desc` and an upper release-date bound of
/// "today", so unreleased titles stay out of listings unless a caller
/// overrides the bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverQuery {
    params: BTreeMap<String, String>,
}

impl DiscoverQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.params.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Caller parameters in key order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Caller parameters as `k=v&k=v`, in key order.
    pub fn to_query_string(&self) -> String {
        self.params()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Movies with any of the given genres (comma separated ids).
    pub fn genres(ids: &str) -> Self {
        Self::new().with("with_genres", ids)
    }

    /// Movies produced in a country (ISO 3166-1 code).
    pub fn origin_country(code: &str) -> Self {
        Self::new().with("with_origin_country", code)
    }

    /// Movies released during the month before `today`.
    pub fn recent_releases(today: NaiveDate) -> Self {
        let month_ago = today.checked_sub_months(Months::new(1)).unwrap_or(today);
        Self::new()
            .with(RELEASE_DATE_GTE, month_ago.format("%Y-%m-%d"))
            .with(RELEASE_DATE_LTE, today.format("%Y-%m-%d"))
            .with(SORT_BY, "popularity.desc")
    }

    /// Final parameter list for a request, defaults first.
    pub fn resolve(&self, today: NaiveDate, page: u32) -> Vec<(String, String)> {
        let mut merged = BTreeMap::new();
        merged.insert("page".to_string(), page.to_string());
        merged.insert(SORT_BY.to_string(), "popularity.desc".to_string());
        merged.insert(
            RELEASE_DATE_LTE.to_string(),
            today.format("%Y-%m-%d").to_string(),
        );
        for (key, value) in &self.params {
            merged.insert(key.clone(), value.clone());
        }
        merged.into_iter().collect()
    }
}
