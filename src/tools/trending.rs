use serde::Deserialize;
use tracing::info;

use crate::error::ToolError;
use crate::models::{ShowList, ShowSummary};
use crate::tmdb::{Paged, RawShow, TimeWindow, TmdbApi};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PopularParams {
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingParams {
    pub time_window: TimeWindow,
    #[serde(default)]
    pub page: Option<u32>,
}

pub async fn get_popular_shows(
    tmdb: &dyn TmdbApi,
    params: PopularParams,
) -> Result<ShowList, ToolError> {
    let page = normalize_page(params.page);
    let shows = tmdb.popular_tv(page).await?;
    Ok(show_list(shows))
}

pub async fn get_trending_shows(
    tmdb: &dyn TmdbApi,
    params: TrendingParams,
) -> Result<ShowList, ToolError> {
    let page = normalize_page(params.page);
    let shows = tmdb.trending_tv(params.time_window, page).await?;
    info!(
        "Trending ({}) page {}: {} shows",
        params.time_window.label(),
        shows.page,
        shows.results.len()
    );
    Ok(show_list(shows))
}

fn normalize_page(page: Option<u32>) -> u32 {
    page.filter(|p| *p > 0).unwrap_or(1)
}

/// Remote paging totals pass through unchanged.
fn show_list(page: Paged<RawShow>) -> ShowList {
    ShowList {
        page: page.page,
        results: page.results.into_iter().map(ShowSummary::from).collect(),
        total_pages: page.total_pages,
        total_results: page.total_results,
    }
}
