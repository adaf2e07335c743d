use serde::Deserialize;

use crate::error::ToolError;
use crate::models::ShowDetails;
use crate::resolve::resolve_show;
use crate::tmdb::TmdbApi;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowTitleParams {
    pub show_title: String,
}

/// Title, year, rating, genres, top cast, seasons and a localised status for the first match.
pub async fn get_show_details(
    tmdb: &dyn TmdbApi,
    params: ShowTitleParams,
) -> Result<ShowDetails, ToolError> {
    let title = params.show_title.trim();
    if title.is_empty() {
        return Err(ToolError::missing_param("show_title"));
    }

    let show = resolve_show(tmdb, title, "获取剧集详情失败").await?;
    let details = tmdb.tv_details(show.id).await?;
    Ok(ShowDetails::from(details))
}
