use serde::Deserialize;

use crate::error::ToolError;
use crate::models::WatchProvidersInfo;
use crate::resolve::resolve_show;
use crate::tmdb::TmdbApi;

pub const DEFAULT_COUNTRY: &str = "US";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WatchProvidersParams {
    pub show_title: String,
    /// ISO 3166-1 region code.
    pub country_code: Option<String>,
}

/// Streaming, rent and buy providers for one region. A region TMDB knows nothing
/// about yields empty lists rather than an error.
pub async fn get_watch_providers(
    tmdb: &dyn TmdbApi,
    params: WatchProvidersParams,
) -> Result<WatchProvidersInfo, ToolError> {
    let title = params.show_title.trim();
    if title.is_empty() {
        return Err(ToolError::missing_param("show_title"));
    }
    let country = params
        .country_code
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

    let show = resolve_show(tmdb, title, "获取观看平台失败").await?;
    let providers = tmdb.tv_watch_providers(show.id, &country).await?;
    Ok(WatchProvidersInfo::from_region(&country, providers))
}
