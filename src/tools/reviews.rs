use serde::Deserialize;

use crate::error::ToolError;
use crate::models::{ReviewItem, ShowReviews};
use crate::resolve::resolve_show;
use crate::tmdb::TmdbApi;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewsParams {
    pub show_title: String,
    pub page: Option<u32>,
}

pub async fn get_show_reviews(
    tmdb: &dyn TmdbApi,
    params: ReviewsParams,
) -> Result<ShowReviews, ToolError> {
    let title = params.show_title.trim();
    if title.is_empty() {
        return Err(ToolError::missing_param("show_title"));
    }
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);

    let show = resolve_show(tmdb, title, "获取剧集评论失败").await?;
    let reviews = tmdb.tv_reviews(show.id, page).await?;

    Ok(ShowReviews {
        show_id: show.id,
        page: reviews.page,
        results: reviews.results.into_iter().map(ReviewItem::from).collect(),
        total_pages: reviews.total_pages,
        total_results: reviews.total_results,
    })
}
