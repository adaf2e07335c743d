//! Text-formatted recommendation tools.
use serde::Deserialize;
use tracing::info;

use crate::error::ToolError;
use crate::genres::{genre_name_by_id, resolve_genre};
use crate::models::{render_recommendations, ShowRecommendation};
use crate::tmdb::{TmdbApi, DEFAULT_LIST_LIMIT};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenreParams {
    pub genre: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimilarShowsParams {
    pub show_title: String,
}

/// Top-rated shows for a genre name, rendered as a numbered list.
///
/// An unrecognised genre is not an error: the reply asks the user to try another one.
pub async fn get_recommendations_by_genre(
    tmdb: &dyn TmdbApi,
    params: GenreParams,
) -> Result<String, ToolError> {
    let genre = params.genre.trim();
    if genre.is_empty() {
        return Err(ToolError::missing_param("genre"));
    }

    let Some(genre_id) = resolve_genre(genre) else {
        info!("Unrecognized genre '{}'", genre);
        return Ok(format!(
            "抱歉，无法识别您提供的类型\"{}\"，请尝试其他类型如\"喜剧\"、\"科幻\"等。",
            genre
        ));
    };
    let label = genre_name_by_id(genre_id).unwrap_or(genre);

    let page = tmdb
        .recommendations_by_genre(genre_id, DEFAULT_LIST_LIMIT)
        .await
        .map_err(|e| ToolError::upstream("获取推荐时发生错误", e))?;
    let shows: Vec<ShowRecommendation> = page.results.into_iter().map(Into::into).collect();
    if shows.is_empty() {
        return Ok(format!("抱歉，在\"{}\"类型下没有找到推荐剧集。", label));
    }

    Ok(render_recommendations(
        &format!("根据您选择的{}，为您推荐以下剧集：", label),
        &shows,
    ))
}

pub async fn get_similar_shows(
    tmdb: &dyn TmdbApi,
    params: SimilarShowsParams,
) -> Result<String, ToolError> {
    let title = params.show_title.trim();
    if title.is_empty() {
        return Err(ToolError::missing_param("show_title"));
    }

    let search = tmdb
        .search_tv(title)
        .await
        .map_err(|e| ToolError::upstream("获取相似剧集时发生错误", e))?;
    let Some(show) = search.results.into_iter().next() else {
        return Ok(format!("抱歉，未能找到您提供的剧集\"{}\"。", title));
    };

    let similar = tmdb
        .similar_tv(show.id, DEFAULT_LIST_LIMIT)
        .await
        .map_err(|e| ToolError::upstream("获取相似剧集时发生错误", e))?;
    let shows: Vec<ShowRecommendation> = similar.results.into_iter().map(Into::into).collect();
    if shows.is_empty() {
        return Ok(format!("抱歉，未能找到与\"{}\"相似的剧集。", title));
    }

    let matched = ShowRecommendation::from(show).title;
    Ok(render_recommendations(
        &format!("与 {} 相似的剧集推荐：", matched),
        &shows,
    ))
}
