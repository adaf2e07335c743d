use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tvrec::tmdb::{DiscoverQuery, TimeWindow, TmdbApi, TmdbClient};

const API_KEY: &str = "fixture-key";

type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

fn shows(count: u64) -> Vec<Value> {
    (1..=count)
        .map(|id| json!({ "id": id, "name": format!("剧集{id}"), "vote_average": 7.0 }))
        .collect()
}

async fn search_tv(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.lock().unwrap().push(("/search/tv".into(), params));
    Json(json!({ "page": 1, "results": shows(1), "total_pages": 1, "total_results": 1 }))
}

async fn discover(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.lock().unwrap().push(("/discover/tv".into(), params));
    Json(json!({ "page": 1, "results": shows(20), "total_pages": 3, "total_results": 60 }))
}

async fn similar(Path(_id): Path<u64>) -> Json<Value> {
    Json(json!({ "page": 1, "results": shows(15), "total_pages": 1, "total_results": 15 }))
}

async fn details(Path(_id): Path<u64>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status_code": 7, "status_message": "Invalid API key" })),
    )
}

async fn providers(Path(_id): Path<u64>) -> Json<Value> {
    Json(json!({
        "id": 1,
        "results": {
            "US": { "link": "https://example.org/us", "flatrate": [{ "provider_id": 8, "provider_name": "Netflix" }] }
        }
    }))
}

async fn trending(Path(window): Path<String>) -> Json<Value> {
    Json(json!({ "page": 1, "results": shows(2), "total_pages": 9, "total_results": window.len() }))
}

async fn genres() -> Json<Value> {
    Json(json!({ "genres": [{ "id": 35, "name": "喜剧" }] }))
}

async fn spawn_fixture() -> (TmdbClient, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/3/search/tv", get(search_tv))
        .route("/3/discover/tv", get(discover))
        .route("/3/tv/:id/similar", get(similar))
        .route("/3/tv/:id", get(details))
        .route("/3/tv/:id/watch/providers", get(providers))
        .route("/3/trending/tv/:window", get(trending))
        .route("/3/genre/tv/list", get(genres))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = TmdbClient::new(API_KEY, format!("http://{addr}/3/"), "zh-CN").unwrap();
    (client, seen)
}

#[tokio::test]
async fn sends_key_language_and_query() {
    let (client, seen) = spawn_fixture().await;
    let page = client.search_tv("绝命毒师").await.unwrap();
    assert_eq!(page.results.len(), 1);

    let seen = seen.lock().unwrap();
    let (path, params) = &seen[0];
    assert_eq!(path, "/search/tv");
    assert_eq!(params["api_key"], API_KEY);
    assert_eq!(params["language"], "zh-CN");
    assert_eq!(params["query"], "绝命毒师");
}

#[tokio::test]
async fn discover_sends_only_present_keys() {
    let (client, seen) = spawn_fixture().await;
    let query = DiscoverQuery {
        with_genres: Some("35".into()),
        first_air_date_gte: Some("2022-01-01".into()),
        ..Default::default()
    };
    let page = client.discover_tv(&query).await.unwrap();
    assert_eq!(page.total_results, 60);

    let seen = seen.lock().unwrap();
    let (_, params) = &seen[0];
    assert_eq!(params["with_genres"], "35");
    assert_eq!(params["first_air_date.gte"], "2022-01-01");
    assert_eq!(params["sort_by"], "popularity.desc");
    assert_eq!(params["page"], "1");
    assert!(!params.contains_key("with_keywords"));
    assert!(!params.contains_key("first_air_date.lte"));
}

#[tokio::test]
async fn list_endpoints_are_truncated() {
    let (client, _) = spawn_fixture().await;
    let similar = client.similar_tv(1396, 10).await.unwrap();
    assert_eq!(similar.results.len(), 10);

    let by_genre = client.recommendations_by_genre(35, 5).await.unwrap();
    assert_eq!(by_genre.results.len(), 5);
}

#[tokio::test]
async fn non_success_status_carries_operation_without_key() {
    let (client, _) = spawn_fixture().await;
    let err = client.tv_details(9).await.unwrap_err();
    let rendered = format!("{:#}", err);
    assert!(rendered.starts_with("获取剧集ID 9 的详情失败"));
    assert!(rendered.contains("401"));
    assert!(rendered.contains("Invalid API key"));
    assert!(!rendered.contains(API_KEY));
}

#[tokio::test]
async fn watch_providers_pick_one_region() {
    let (client, _) = spawn_fixture().await;
    let us = client.tv_watch_providers(1, "US").await.unwrap().unwrap();
    assert_eq!(us.flatrate[0].provider_name, "Netflix");
    assert!(us.rent.is_empty());
    assert!(client.tv_watch_providers(1, "JP").await.unwrap().is_none());
}

#[tokio::test]
async fn trending_and_genres_parse() {
    let (client, _) = spawn_fixture().await;
    let trending = client.trending_tv(TimeWindow::Day, 1).await.unwrap();
    assert_eq!(trending.total_pages, 9);
    assert_eq!(trending.results.len(), 2);

    let genres = client.tv_genres().await.unwrap();
    assert_eq!(genres[0].id, 35);
}

#[tokio::test]
async fn unreachable_server_is_a_request_failure() {
    let client = TmdbClient::new(API_KEY, "http://127.0.0.1:9/3", "zh-CN").unwrap();
    let err = client.popular_tv(1).await.unwrap_err();
    let rendered = format!("{:#}", err);
    assert!(rendered.starts_with("获取热门剧集失败"));
    assert!(rendered.contains("request failed"));
    assert!(!rendered.contains(API_KEY));
}
