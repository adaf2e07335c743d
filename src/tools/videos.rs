use crate::error::ToolError;
use crate::models::{sort_videos, ShowVideos, VideoInfo};
use crate::resolve::resolve_show;
use crate::tmdb::TmdbApi;

use super::details::ShowTitleParams;

/// Trailers and other clips, official first, each with a playable URL.
pub async fn get_show_videos(
    tmdb: &dyn TmdbApi,
    params: ShowTitleParams,
) -> Result<ShowVideos, ToolError> {
    let title = params.show_title.trim();
    if title.is_empty() {
        return Err(ToolError::missing_param("show_title"));
    }

    let show = resolve_show(tmdb, title, "获取剧集视频失败").await?;
    let mut videos: Vec<VideoInfo> = tmdb
        .tv_videos(show.id)
        .await?
        .into_iter()
        .map(VideoInfo::from)
        .collect();
    sort_videos(&mut videos);

    Ok(ShowVideos {
        show_id: show.id,
        videos,
    })
}
