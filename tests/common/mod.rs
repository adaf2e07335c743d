#![allow(dead_code)]

use anyhow::anyhow;
use std::collections::HashMap;
use std::sync::Mutex;
use tvrec::tmdb::{
    DiscoverQuery, Paged, RawCountryProviders, RawCredit, RawGenre, RawPersonDetails, RawReview,
    RawShow, RawShowDetails, RawTvCredits, RawVideo, SearchHit, TimeWindow, TmdbApi,
};

pub fn paged<T>(results: Vec<T>) -> Paged<T> {
    let total = results.len() as u32;
    Paged {
        page: 1,
        results,
        total_pages: 1,
        total_results: total,
    }
}

pub fn show(id: u64, name: &str, rating: f64, first_air_date: Option<&str>) -> RawShow {
    RawShow {
        id,
        name: Some(name.to_string()),
        overview: Some(format!("{name} 简介")),
        vote_average: Some(rating),
        first_air_date: first_air_date.map(str::to_string),
        ..Default::default()
    }
}

pub fn credit(id: u64, name: &str, rating: f64, character: &str) -> RawCredit {
    RawCredit {
        show: show(id, name, rating, Some("2015-01-01")),
        character: Some(character.to_string()),
    }
}

/// In-memory gateway. Lookups are keyed by query text; anything not configured is
/// "no match", and every call is recorded.
#[derive(Default)]
pub struct FakeTmdb {
    pub shows: HashMap<String, RawShow>,
    pub people: HashMap<String, u64>,
    pub failing_people: Vec<String>,
    pub keywords: HashMap<String, u64>,
    pub failing_keywords: Vec<String>,
    pub fail_discover: bool,
    pub discover_results: Vec<RawShow>,
    pub discover_total_results: u32,
    pub genre_results: Vec<RawShow>,
    pub similar: Vec<RawShow>,
    pub details: Option<RawShowDetails>,
    pub reviews: Vec<RawReview>,
    pub videos: Vec<RawVideo>,
    pub providers: HashMap<String, RawCountryProviders>,
    pub person: Option<RawPersonDetails>,
    pub credits: Vec<RawCredit>,
    pub feed: Vec<RawShow>,
    pub genres: Vec<RawGenre>,
    pub discover_queries: Mutex<Vec<DiscoverQuery>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeTmdb {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_discover_query(&self) -> Option<DiscoverQuery> {
        self.discover_queries.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl TmdbApi for FakeTmdb {
    async fn search_tv(&self, query: &str) -> anyhow::Result<Paged<RawShow>> {
        self.record(format!("search_tv:{query}"));
        Ok(paged(self.shows.get(query).cloned().into_iter().collect()))
    }

    async fn search_person(&self, query: &str) -> anyhow::Result<Paged<SearchHit>> {
        self.record(format!("search_person:{query}"));
        if self.failing_people.iter().any(|p| p == query) {
            return Err(anyhow!("connection reset").context(format!("搜索人物\"{query}\"失败")));
        }
        Ok(paged(
            self.people
                .get(query)
                .map(|id| SearchHit {
                    id: *id,
                    name: Some(query.to_string()),
                })
                .into_iter()
                .collect(),
        ))
    }

    async fn search_keyword(&self, query: &str) -> anyhow::Result<Paged<SearchHit>> {
        self.record(format!("search_keyword:{query}"));
        if self.failing_keywords.iter().any(|k| k == query) {
            return Err(anyhow!("connection reset").context(format!("搜索关键词\"{query}\"失败")));
        }
        Ok(paged(
            self.keywords
                .get(query)
                .map(|id| SearchHit {
                    id: *id,
                    name: Some(query.to_string()),
                })
                .into_iter()
                .collect(),
        ))
    }

    async fn discover_tv(&self, query: &DiscoverQuery) -> anyhow::Result<Paged<RawShow>> {
        self.record("discover_tv".to_string());
        self.discover_queries.lock().unwrap().push(query.clone());
        if self.fail_discover {
            return Err(anyhow!("503 Service Unavailable").context("发现剧集失败"));
        }
        Ok(Paged {
            page: query.page,
            results: self.discover_results.clone(),
            total_pages: 5,
            total_results: self.discover_total_results,
        })
    }

    async fn recommendations_by_genre(
        &self,
        genre_id: u32,
        limit: usize,
    ) -> anyhow::Result<Paged<RawShow>> {
        self.record(format!("recommendations_by_genre:{genre_id}"));
        Ok(paged(self.genre_results.clone()).truncate(limit))
    }

    async fn similar_tv(&self, tv_id: u64, limit: usize) -> anyhow::Result<Paged<RawShow>> {
        self.record(format!("similar_tv:{tv_id}"));
        Ok(paged(self.similar.clone()).truncate(limit))
    }

    async fn tv_details(&self, tv_id: u64) -> anyhow::Result<RawShowDetails> {
        self.record(format!("tv_details:{tv_id}"));
        self.details
            .clone()
            .ok_or_else(|| anyhow!("no details configured"))
    }

    async fn tv_reviews(&self, tv_id: u64, page: u32) -> anyhow::Result<Paged<RawReview>> {
        self.record(format!("tv_reviews:{tv_id}:{page}"));
        let mut reviews = paged(self.reviews.clone());
        reviews.page = page;
        Ok(reviews)
    }

    async fn tv_videos(&self, tv_id: u64) -> anyhow::Result<Vec<RawVideo>> {
        self.record(format!("tv_videos:{tv_id}"));
        Ok(self.videos.clone())
    }

    async fn tv_watch_providers(
        &self,
        tv_id: u64,
        country: &str,
    ) -> anyhow::Result<Option<RawCountryProviders>> {
        self.record(format!("tv_watch_providers:{tv_id}:{country}"));
        Ok(self.providers.get(country).cloned())
    }

    async fn person_details(&self, person_id: u64) -> anyhow::Result<RawPersonDetails> {
        self.record(format!("person_details:{person_id}"));
        self.person
            .clone()
            .ok_or_else(|| anyhow!("no person configured"))
    }

    async fn person_tv_credits(&self, person_id: u64) -> anyhow::Result<RawTvCredits> {
        self.record(format!("person_tv_credits:{person_id}"));
        Ok(RawTvCredits {
            cast: self.credits.clone(),
        })
    }

    async fn popular_tv(&self, page: u32) -> anyhow::Result<Paged<RawShow>> {
        self.record(format!("popular_tv:{page}"));
        Ok(Paged {
            page,
            results: self.feed.clone(),
            total_pages: 500,
            total_results: 10_000,
        })
    }

    async fn trending_tv(&self, window: TimeWindow, page: u32) -> anyhow::Result<Paged<RawShow>> {
        self.record(format!("trending_tv:{}:{page}", window.as_path()));
        Ok(Paged {
            page,
            results: self.feed.clone(),
            total_pages: 50,
            total_results: 1_000,
        })
    }

    async fn tv_genres(&self) -> anyhow::Result<Vec<RawGenre>> {
        self.record("tv_genres".to_string());
        Ok(self.genres.clone())
    }
}
