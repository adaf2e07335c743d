use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::models::{GenreList, Videos, WatchProviders};
use super::{
    DiscoverQuery, Paged, RawCountryProviders, RawGenre, RawPersonDetails, RawReview, RawShow,
    RawShowDetails, RawTvCredits, RawVideo, SearchHit, TimeWindow, TmdbApi,
};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self> {
        let user_agent = format!("tvrec/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: language.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .tmdb_api_key
            .clone()
            .ok_or_else(|| anyhow!("TMDB_API_KEY not set"))?;
        Self::new(api_key, &config.tmdb_base_url, &config.language)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path = %path, params = ?params, "TMDB request");
        let res = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| anyhow!("request failed: {}", e.without_url()))?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            // The URL carries the API key, so only the path is reported.
            return Err(anyhow!("{} -> {}: {}", path, status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_tv(&self, query: &str) -> Result<Paged<RawShow>> {
        self.get_json(
            "/search/tv",
            &[("query", query.to_string()), ("page", "1".to_string())],
        )
        .await
        .with_context(|| format!("搜索剧集\"{}\"失败", query))
    }

    async fn search_person(&self, query: &str) -> Result<Paged<SearchHit>> {
        self.get_json("/search/person", &[("query", query.to_string())])
            .await
            .with_context(|| format!("搜索人物\"{}\"失败", query))
    }

    async fn search_keyword(&self, query: &str) -> Result<Paged<SearchHit>> {
        self.get_json("/search/keyword", &[("query", query.to_string())])
            .await
            .with_context(|| format!("搜索关键词\"{}\"失败", query))
    }

    async fn discover_tv(&self, query: &DiscoverQuery) -> Result<Paged<RawShow>> {
        self.get_json("/discover/tv", &query.to_params())
            .await
            .context("发现剧集失败")
    }

    async fn recommendations_by_genre(
        &self,
        genre_id: u32,
        limit: usize,
    ) -> Result<Paged<RawShow>> {
        let page: Paged<RawShow> = self
            .get_json(
                "/discover/tv",
                &[
                    ("with_genres", genre_id.to_string()),
                    ("sort_by", "vote_average.desc".to_string()),
                    // keeps barely-rated shows out of the top of the list
                    ("vote_count.gte", "100".to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await
            .with_context(|| format!("获取类型ID {} 的推荐失败", genre_id))?;
        Ok(page.truncate(limit))
    }

    async fn similar_tv(&self, tv_id: u64, limit: usize) -> Result<Paged<RawShow>> {
        let page: Paged<RawShow> = self
            .get_json(&format!("/tv/{tv_id}/similar"), &[])
            .await
            .with_context(|| format!("获取剧集ID {} 的相似剧集失败", tv_id))?;
        Ok(page.truncate(limit))
    }

    async fn tv_details(&self, tv_id: u64) -> Result<RawShowDetails> {
        self.get_json(
            &format!("/tv/{tv_id}"),
            &[("append_to_response", "credits".to_string())],
        )
        .await
        .with_context(|| format!("获取剧集ID {} 的详情失败", tv_id))
    }

    async fn tv_reviews(&self, tv_id: u64, page: u32) -> Result<Paged<RawReview>> {
        self.get_json(
            &format!("/tv/{tv_id}/reviews"),
            &[("page", page.to_string())],
        )
        .await
        .with_context(|| format!("获取剧集ID {} 的用户评论失败", tv_id))
    }

    async fn tv_videos(&self, tv_id: u64) -> Result<Vec<RawVideo>> {
        let videos: Videos = self
            .get_json(&format!("/tv/{tv_id}/videos"), &[])
            .await
            .with_context(|| format!("获取剧集ID {} 的预告片和视频失败", tv_id))?;
        Ok(videos.results)
    }

    async fn tv_watch_providers(
        &self,
        tv_id: u64,
        country: &str,
    ) -> Result<Option<RawCountryProviders>> {
        let mut providers: WatchProviders = self
            .get_json(&format!("/tv/{tv_id}/watch/providers"), &[])
            .await
            .with_context(|| format!("获取剧集ID {} 的观看渠道失败", tv_id))?;
        Ok(providers.results.remove(country))
    }

    async fn person_details(&self, person_id: u64) -> Result<RawPersonDetails> {
        self.get_json(&format!("/person/{person_id}"), &[])
            .await
            .with_context(|| format!("获取人物ID {} 的详细信息失败", person_id))
    }

    async fn person_tv_credits(&self, person_id: u64) -> Result<RawTvCredits> {
        self.get_json(&format!("/person/{person_id}/tv_credits"), &[])
            .await
            .with_context(|| format!("获取人物ID {} 的电视剧作品失败", person_id))
    }

    async fn popular_tv(&self, page: u32) -> Result<Paged<RawShow>> {
        self.get_json("/tv/popular", &[("page", page.to_string())])
            .await
            .context("获取热门剧集失败")
    }

    async fn trending_tv(&self, window: TimeWindow, page: u32) -> Result<Paged<RawShow>> {
        self.get_json(
            &format!("/trending/tv/{}", window.as_path()),
            &[("page", page.to_string())],
        )
        .await
        .with_context(|| format!("获取{}趋势剧集失败", window.label()))
    }

    async fn tv_genres(&self) -> Result<Vec<RawGenre>> {
        let list: GenreList = self
            .get_json("/genre/tv/list", &[])
            .await
            .context("获取TV类型列表失败")?;
        Ok(list.genres)
    }
}
