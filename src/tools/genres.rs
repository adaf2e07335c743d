use crate::error::ToolError;
use crate::tmdb::{RawGenre, TmdbApi};

/// The remote TV genre list in the configured language.
pub async fn list_tv_genres(tmdb: &dyn TmdbApi) -> Result<Vec<RawGenre>, ToolError> {
    Ok(tmdb.tv_genres().await?)
}
