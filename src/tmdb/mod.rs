use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

mod client;
mod models;

pub use client::TmdbClient;
pub use models::{
    Paged, RawAuthorDetails, RawCastMember, RawCountryProviders, RawCredit, RawCredits, RawGenre,
    RawPersonDetails, RawProvider, RawReview, RawShow, RawShowDetails, RawTvCredits, RawVideo,
    SearchHit,
};

/// Default cap for list endpoints that can return more rows than a caller wants.
pub const DEFAULT_LIST_LIMIT: usize = 10;
pub const DEFAULT_SORT: &str = "popularity.desc";

/// Outbound TMDB calls. One method per remote endpoint; no retries.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_tv(&self, query: &str) -> Result<Paged<RawShow>>;
    async fn search_person(&self, query: &str) -> Result<Paged<SearchHit>>;
    async fn search_keyword(&self, query: &str) -> Result<Paged<SearchHit>>;
    async fn discover_tv(&self, query: &DiscoverQuery) -> Result<Paged<RawShow>>;
    async fn recommendations_by_genre(&self, genre_id: u32, limit: usize)
        -> Result<Paged<RawShow>>;
    async fn similar_tv(&self, tv_id: u64, limit: usize) -> Result<Paged<RawShow>>;
    async fn tv_details(&self, tv_id: u64) -> Result<RawShowDetails>;
    async fn tv_reviews(&self, tv_id: u64, page: u32) -> Result<Paged<RawReview>>;
    async fn tv_videos(&self, tv_id: u64) -> Result<Vec<RawVideo>>;
    /// Providers for a single region; `None` when TMDB has nothing for it.
    async fn tv_watch_providers(
        &self,
        tv_id: u64,
        country: &str,
    ) -> Result<Option<RawCountryProviders>>;
    async fn person_details(&self, person_id: u64) -> Result<RawPersonDetails>;
    async fn person_tv_credits(&self, person_id: u64) -> Result<RawTvCredits>;
    async fn popular_tv(&self, page: u32) -> Result<Paged<RawShow>>;
    async fn trending_tv(&self, window: TimeWindow, page: u32) -> Result<Paged<RawShow>>;
    async fn tv_genres(&self) -> Result<Vec<RawGenre>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_path(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Day => "日",
            TimeWindow::Week => "周",
        }
    }
}

/// The composite `/discover/tv` query. Absent fields produce no query key.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub with_genres: Option<String>,
    pub first_air_date_gte: Option<String>,
    pub first_air_date_lte: Option<String>,
    pub vote_average_gte: Option<f64>,
    pub with_networks: Option<String>,
    pub with_keywords: Option<String>,
    pub sort_by: String,
    pub page: u32,
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

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            with_genres: None,
            first_air_date_gte: None,
            first_air_date_lte: None,
            vote_average_gte: None,
            with_networks: None,
            with_keywords: None,
            sort_by: DEFAULT_SORT.to_string(),
            page: 1,
            with_original_language: None,
            include_adult: None,
            include_null_first_air_dates: None,
            with_origin_country: None,
            with_status: None,
            screened_theatrically: None,
            timezone: None,
            watch_region: None,
            with_companies: None,
            with_watch_providers: None,
            with_watch_monetization_types: None,
        }
    }
}

impl DiscoverQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(v) = value {
                params.push((key, v));
            }
        };

        push("with_genres", self.with_genres.clone());
        push("first_air_date.gte", self.first_air_date_gte.clone());
        push("first_air_date.lte", self.first_air_date_lte.clone());
        push("vote_average.gte", self.vote_average_gte.map(|v| v.to_string()));
        push("with_networks", self.with_networks.clone());
        push("with_keywords", self.with_keywords.clone());
        push("sort_by", Some(self.sort_by.clone()));
        push("page", Some(self.page.to_string()));
        push("with_original_language", self.with_original_language.clone());
        push("include_adult", self.include_adult.map(|v| v.to_string()));
        push(
            "include_null_first_air_dates",
            self.include_null_first_air_dates.map(|v| v.to_string()),
        );
        push("with_origin_country", self.with_origin_country.clone());
        push("with_status", self.with_status.clone());
        push(
            "screened_theatrically",
            self.screened_theatrically.map(|v| v.to_string()),
        );
        push("timezone", self.timezone.clone());
        push("watch_region", self.watch_region.clone());
        push("with_companies", self.with_companies.clone());
        push("with_watch_providers", self.with_watch_providers.clone());
        push(
            "with_watch_monetization_types",
            self.with_watch_monetization_types.clone(),
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_only_sorts_and_pages() {
        let params = DiscoverQuery::default().to_params();
        assert_eq!(
            params,
            vec![
                ("sort_by", "popularity.desc".to_string()),
                ("page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn uses_dotted_keys_for_ranges() {
        let query = DiscoverQuery {
            first_air_date_gte: Some("2022-01-01".into()),
            first_air_date_lte: Some("2022-12-31".into()),
            vote_average_gte: Some(7.5),
            include_adult: Some(false),
            ..Default::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("first_air_date.gte", "2022-01-01".to_string())));
        assert!(params.contains(&("first_air_date.lte", "2022-12-31".to_string())));
        assert!(params.contains(&("vote_average.gte", "7.5".to_string())));
        assert!(params.contains(&("include_adult", "false".to_string())));
    }

    #[test]
    fn time_window_paths() {
        assert_eq!(TimeWindow::Day.as_path(), "day");
        assert_eq!(TimeWindow::Week.as_path(), "week");
        let parsed: TimeWindow = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(parsed, TimeWindow::Week);
    }
}
