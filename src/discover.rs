//! Multi-criteria TV discovery on top of `/discover/tv`.
//!
//! Genre names, keyword texts and the exact first-air year are not understood by
//! TMDB directly; they are translated here before the single discover call, and the
//! year is enforced again on the returned page.
use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::genres::resolve_genre;
use crate::models::{first_air_year, ShowList, ShowSummary};
use crate::resolve::{resolve_keyword, Resolution};
use crate::tmdb::{DiscoverQuery, RawShow, TmdbApi};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscoverFilter {
    /// Genre names in English or Chinese.
    pub with_genres: Option<Vec<String>>,
    /// Exact first-air year.
    pub first_air_date_year: Option<i32>,
    pub vote_average_gte: Option<f64>,
    pub with_networks: Option<Vec<u64>>,
    /// Keyword texts, resolved to keyword ids.
    pub with_keywords: Option<Vec<String>>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub with_original_language: Option<String>,
    pub include_adult: Option<bool>,
    pub include_null_first_air_dates: Option<bool>,
    pub with_origin_country: Option<String>,
    pub with_status: Option<String>,
    pub screened_theatrically: Option<bool>,
    pub timezone: Option<String>,
    pub watch_region: Option<String>,
    pub with_companies: Option<String>,
    pub with_watch_providers: Option<String>,
    pub with_watch_monetization_types: Option<String>,
}

pub async fn discover_shows(
    tmdb: &dyn TmdbApi,
    filter: DiscoverFilter,
) -> Result<ShowList, ToolError> {
    let requested_year = filter.first_air_date_year;
    let query = build_query(tmdb, filter).await?;

    let response = tmdb
        .discover_tv(&query)
        .await
        .map_err(|e| ToolError::upstream("高级剧集发现失败", e))?;

    let mut total_results = response.total_results;
    let mut shows = response.results;
    if let Some(year) = requested_year {
        let before = shows.len();
        shows = retain_first_air_year(shows, year);
        info!(
            "Year filter {}: {} -> {} shows on page {}",
            year,
            before,
            shows.len(),
            response.page
        );
        // Only this page is filtered, so the remote total no longer applies.
        total_results = shows.len() as u32;
    }

    Ok(ShowList {
        page: response.page,
        results: shows.into_iter().map(ShowSummary::from).collect(),
        total_pages: response.total_pages,
        total_results,
    })
}

/// Translates the filter into the remote query, resolving names to ids.
pub async fn build_query(
    tmdb: &dyn TmdbApi,
    filter: DiscoverFilter,
) -> Result<DiscoverQuery, ToolError> {
    let mut query = DiscoverQuery::default();

    if let Some(genres) = filter.with_genres.filter(|g| !g.is_empty()) {
        query.with_genres = Some(genre_ids(&genres)?);
    }

    if let Some(keywords) = filter.with_keywords.filter(|k| !k.is_empty()) {
        query.with_keywords = Some(keyword_ids(tmdb, &keywords).await?);
    }

    if let Some(year) = filter.first_air_date_year {
        query.first_air_date_gte = Some(format!("{year}-01-01"));
        query.first_air_date_lte = Some(format!("{year}-12-31"));
    }

    query.vote_average_gte = filter.vote_average_gte;
    query.with_networks = filter
        .with_networks
        .filter(|n| !n.is_empty())
        .map(|n| join_ids(n.iter()));
    if let Some(sort_by) = non_blank(filter.sort_by) {
        query.sort_by = sort_by;
    }
    query.page = filter.page.filter(|p| *p > 0).unwrap_or(1);
    query.with_original_language = non_blank(filter.with_original_language);
    query.include_adult = filter.include_adult;
    query.include_null_first_air_dates = filter.include_null_first_air_dates;
    query.with_origin_country = non_blank(filter.with_origin_country);
    query.with_status = non_blank(filter.with_status);
    query.screened_theatrically = filter.screened_theatrically;
    query.timezone = non_blank(filter.timezone);
    query.watch_region = non_blank(filter.watch_region);
    query.with_companies = non_blank(filter.with_companies);
    query.with_watch_providers = non_blank(filter.with_watch_providers);
    query.with_watch_monetization_types = non_blank(filter.with_watch_monetization_types);

    debug!(?query, "Built discover query");
    Ok(query)
}

/// Resolved subset of the genre names; fails only when none resolve.
fn genre_ids(names: &[String]) -> Result<String, ToolError> {
    let mut ids = Vec::new();
    for name in names {
        match resolve_genre(name) {
            Some(id) => ids.push(id),
            None => warn!("Unrecognized genre '{}', dropping it from the filter", name),
        }
    }
    if ids.is_empty() {
        return Err(ToolError::Validation(format!(
            "无法识别提供的类型: {}",
            names.join(", ")
        )));
    }
    Ok(join_ids(ids.iter()))
}

/// Resolves keywords concurrently; unresolved ones are dropped as long as one resolves.
async fn keyword_ids(tmdb: &dyn TmdbApi, keywords: &[String]) -> Result<String, ToolError> {
    let outcomes = join_all(keywords.iter().map(|k| resolve_keyword(tmdb, k))).await;

    let mut ids = Vec::new();
    let mut failure = None;
    for (keyword, outcome) in keywords.iter().zip(outcomes) {
        match outcome {
            Resolution::Found(resolved) => ids.push(resolved.id),
            Resolution::NotFound => warn!("No keyword found for '{}'", keyword),
            Resolution::Failed(e) => {
                warn!("Keyword lookup for '{}' failed: {:#}", keyword, e);
                failure.get_or_insert(e);
            }
        }
    }

    if ids.is_empty() {
        return Err(match failure {
            Some(e) => ToolError::upstream("高级剧集发现失败", e),
            None => ToolError::Validation(format!("无法找到关键词: {}", keywords.join(", "))),
        });
    }
    Ok(join_ids(ids.iter()))
}

/// Drops shows without a first-air date or whose first-air year differs.
pub fn retain_first_air_year(shows: Vec<RawShow>, year: i32) -> Vec<RawShow> {
    shows
        .into_iter()
        .filter(|show| match show.first_air_date.as_deref().and_then(first_air_year) {
            Some(aired) if aired == year => true,
            Some(aired) => {
                debug!(
                    "Dropping show {} ({}): first aired {} not {}",
                    show.id,
                    show.name.as_deref().unwrap_or_default(),
                    aired,
                    year
                );
                false
            }
            None => {
                debug!("Dropping show {}: no first-air date", show.id);
                false
            }
        })
        .collect()
}

fn join_ids<T: ToString>(ids: impl Iterator<Item = T>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
