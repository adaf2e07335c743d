//! Tool entry points. Each tool is a straight-line composition of resolvers,
//! gateway calls and formatters; `Toolbox::call` routes a named call to it.
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::discover::{self, DiscoverFilter};
use crate::error::ToolError;
use crate::tmdb::{TmdbApi, TmdbClient};

pub mod actor;
pub mod details;
pub mod genres;
pub mod recommendations;
pub mod reviews;
pub mod trending;
pub mod videos;
pub mod watch_providers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    RecommendationsByGenre,
    SimilarShows,
    ShowDetails,
    ShowReviews,
    ShowVideos,
    WatchProviders,
    ActorInfo,
    ShowsByPerson,
    RecommendationsByActor,
    PopularShows,
    TrendingShows,
    DiscoverShows,
    TvGenres,
}

impl ToolName {
    pub const ALL: [ToolName; 13] = [
        ToolName::RecommendationsByGenre,
        ToolName::SimilarShows,
        ToolName::ShowDetails,
        ToolName::ShowReviews,
        ToolName::ShowVideos,
        ToolName::WatchProviders,
        ToolName::ActorInfo,
        ToolName::ShowsByPerson,
        ToolName::RecommendationsByActor,
        ToolName::PopularShows,
        ToolName::TrendingShows,
        ToolName::DiscoverShows,
        ToolName::TvGenres,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::RecommendationsByGenre => "get_recommendations_by_genre",
            ToolName::SimilarShows => "get_similar_shows",
            ToolName::ShowDetails => "get_show_details",
            ToolName::ShowReviews => "get_show_reviews",
            ToolName::ShowVideos => "get_show_videos",
            ToolName::WatchProviders => "get_watch_providers",
            ToolName::ActorInfo => "get_actor_info",
            ToolName::ShowsByPerson => "find_shows_by_person",
            ToolName::RecommendationsByActor => "get_recommendations_by_actor",
            ToolName::PopularShows => "get_popular_shows",
            ToolName::TrendingShows => "get_trending_shows",
            ToolName::DiscoverShows => "discover_shows",
            ToolName::TvGenres => "list_tv_genres",
        }
    }
}

impl FromStr for ToolName {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// A tool result: either a pre-formatted display string or a structured object.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Json(Value),
}

impl ToolOutput {
    fn json<T: Serialize>(value: &T) -> std::result::Result<Self, ToolError> {
        serde_json::to_value(value)
            .map(ToolOutput::Json)
            .map_err(|e| ToolError::Upstream(format!("序列化结果失败: {}", e)))
    }

    pub fn into_text(self) -> String {
        match self {
            ToolOutput::Text(text) => text,
            ToolOutput::Json(value) => value.to_string(),
        }
    }
}

/// Holds the gateway shared by every tool call. Without an API key the toolbox
/// still answers protocol requests; only tool calls fail.
#[derive(Clone)]
pub struct Toolbox {
    tmdb: Option<Arc<dyn TmdbApi>>,
}

impl Toolbox {
    pub fn new(tmdb: Arc<dyn TmdbApi>) -> Self {
        Self { tmdb: Some(tmdb) }
    }

    pub fn without_gateway() -> Self {
        Self { tmdb: None }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        if config.tmdb_api_key.is_none() {
            warn!("TMDB_API_KEY is not set; tool calls will fail until it is configured");
            return Ok(Self::without_gateway());
        }
        let client = TmdbClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    fn tmdb(&self) -> std::result::Result<&dyn TmdbApi, ToolError> {
        self.tmdb
            .as_deref()
            .ok_or_else(|| ToolError::Config("缺少必要的环境变量: TMDB_API_KEY".to_string()))
    }

    pub async fn call(&self, tool: ToolName, args: Value) -> std::result::Result<ToolOutput, ToolError> {
        info!(tool = tool.as_str(), "Tool call");
        let tmdb = self.tmdb()?;
        match tool {
            ToolName::RecommendationsByGenre => {
                recommendations::get_recommendations_by_genre(tmdb, parse_args(args)?)
                    .await
                    .map(ToolOutput::Text)
            }
            ToolName::SimilarShows => recommendations::get_similar_shows(tmdb, parse_args(args)?)
                .await
                .map(ToolOutput::Text),
            ToolName::ShowDetails => {
                ToolOutput::json(&details::get_show_details(tmdb, parse_args(args)?).await?)
            }
            ToolName::ShowReviews => {
                ToolOutput::json(&reviews::get_show_reviews(tmdb, parse_args(args)?).await?)
            }
            ToolName::ShowVideos => {
                ToolOutput::json(&videos::get_show_videos(tmdb, parse_args(args)?).await?)
            }
            ToolName::WatchProviders => ToolOutput::json(
                &watch_providers::get_watch_providers(tmdb, parse_args(args)?).await?,
            ),
            ToolName::ActorInfo => ToolOutput::json(
                &actor::get_actor_details_and_credits(tmdb, parse_args(args)?).await?,
            ),
            ToolName::ShowsByPerson => {
                let params: actor::PersonParams = parse_args(args)?;
                ToolOutput::json(&actor::find_shows_by_person_name(tmdb, &params.person_name).await?)
            }
            ToolName::RecommendationsByActor => {
                let params: actor::ActorRecommendationsParams = parse_args(args)?;
                let limit = params.limit.unwrap_or(actor::DEFAULT_ACTOR_LIMIT);
                ToolOutput::json(
                    &actor::get_recommendations_by_actor(tmdb, &params.actor_name, limit).await?,
                )
            }
            ToolName::PopularShows => {
                ToolOutput::json(&trending::get_popular_shows(tmdb, parse_args(args)?).await?)
            }
            ToolName::TrendingShows => {
                ToolOutput::json(&trending::get_trending_shows(tmdb, parse_args(args)?).await?)
            }
            ToolName::DiscoverShows => {
                let filter: DiscoverFilter = parse_args(args)?;
                ToolOutput::json(&discover::discover_shows(tmdb, filter).await?)
            }
            ToolName::TvGenres => ToolOutput::json(&genres::list_tv_genres(tmdb).await?),
        }
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> std::result::Result<T, ToolError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ToolError::Validation(format!("参数无效: {}", e)))
}
