//! Output shapes returned by the tools, built from raw TMDB records.
//!
//! Every conversion here is total: missing fields fall back to defaults instead of failing.
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::cmp::Reverse;

use crate::tmdb::{
    RawAuthorDetails, RawCountryProviders, RawCredit, RawPersonDetails, RawProvider, RawReview,
    RawShow, RawShowDetails, RawVideo,
};

pub const PLACEHOLDER_OVERVIEW: &str = "暂无简介";
pub const UNKNOWN_CHARACTER: &str = "未知角色";
pub const UNKNOWN_STATUS: &str = "未知状态";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowSummary {
    pub id: u64,
    pub name: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
}

impl From<RawShow> for ShowSummary {
    fn from(raw: RawShow) -> Self {
        Self {
            id: raw.id,
            name: display_name(raw.name, raw.original_name),
            overview: overview_or_placeholder(raw.overview),
            poster_path: raw.poster_path.filter(|p| !p.is_empty()),
            vote_average: raw.vote_average.unwrap_or(0.0),
            first_air_date: raw.first_air_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowList {
    pub page: u32,
    pub results: Vec<ShowSummary>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditInfo {
    pub show_id: u64,
    pub show_title: String,
    pub character: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
}

impl From<RawCredit> for CreditInfo {
    fn from(raw: RawCredit) -> Self {
        let RawCredit { show, character } = raw;
        Self {
            show_id: show.id,
            show_title: display_name(show.name, show.original_name),
            character: character
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_CHARACTER.to_string()),
            poster_path: show.poster_path.filter(|p| !p.is_empty()),
            vote_average: show.vote_average.unwrap_or(0.0),
            first_air_date: show.first_air_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorInfo {
    pub id: u64,
    pub name: String,
    pub biography: String,
    pub profile_path: Option<String>,
    pub popularity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_known_as: Option<Vec<String>>,
}

impl From<RawPersonDetails> for ActorInfo {
    fn from(raw: RawPersonDetails) -> Self {
        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            biography: overview_or_placeholder(raw.biography),
            profile_path: raw.profile_path,
            popularity: raw.popularity.unwrap_or(0.0),
            birthday: raw.birthday,
            place_of_birth: raw.place_of_birth,
            homepage: raw.homepage,
            also_known_as: raw.also_known_as,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorProfile {
    pub actor: ActorInfo,
    pub credits: Vec<CreditInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub name: String,
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub official: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<RawVideo> for VideoInfo {
    fn from(raw: RawVideo) -> Self {
        let url = build_video_url(&raw.site, &raw.key);
        Self {
            name: raw.name,
            key: raw.key,
            site: raw.site,
            video_type: raw.video_type,
            official: raw.official,
            url,
            published_at: raw.published_at,
            id: raw.id,
        }
    }
}

impl VideoInfo {
    fn type_rank(&self) -> u8 {
        match self.video_type.as_str() {
            "Trailer" => 0,
            "Teaser" => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowVideos {
    pub show_id: u64,
    pub videos: Vec<VideoInfo>,
}

pub fn build_video_url(site: &str, key: &str) -> String {
    let site = site.to_lowercase();
    let key = urlencoding::encode(key);
    match site.as_str() {
        "youtube" => format!("https://www.youtube.com/watch?v={key}"),
        "vimeo" => format!("https://vimeo.com/{key}"),
        _ => format!("https://{site}.com/video/{key}"),
    }
}

/// Official first, then Trailer, Teaser, everything else, then newest publish date.
///
/// Publish dates are fixed-width ISO-8601 strings, so string order is time order.
pub fn sort_videos(videos: &mut [VideoInfo]) {
    videos.sort_by_cached_key(|v| {
        (
            !v.official,
            v.type_rank(),
            Reverse(v.published_at.clone().unwrap_or_default()),
        )
    });
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub id: String,
    pub author: String,
    pub author_details: RawAuthorDetails,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub url: String,
}

impl From<RawReview> for ReviewItem {
    fn from(raw: RawReview) -> Self {
        Self {
            id: raw.id,
            author: raw.author,
            author_details: raw.author_details,
            content: raw.content,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            url: raw.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowReviews {
    pub show_id: u64,
    pub page: u32,
    pub results: Vec<ReviewItem>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchProvidersInfo {
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub streaming: Vec<RawProvider>,
    pub rent: Vec<RawProvider>,
    pub buy: Vec<RawProvider>,
}

impl WatchProvidersInfo {
    pub fn from_region(country: &str, providers: Option<RawCountryProviders>) -> Self {
        let providers = providers.unwrap_or_default();
        Self {
            country: country.to_string(),
            link: providers.link,
            streaming: providers.flatrate,
            rent: providers.rent,
            buy: providers.buy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDetails {
    pub title: String,
    pub year: Option<i32>,
    pub rating: f64,
    pub genres: Vec<String>,
    pub overview: String,
    pub cast: Vec<String>,
    pub number_of_seasons: u32,
    pub status: String,
}

const TOP_CAST: usize = 5;

impl From<RawShowDetails> for ShowDetails {
    fn from(raw: RawShowDetails) -> Self {
        let mut cast = raw.credits.map(|c| c.cast).unwrap_or_default();
        cast.sort_by_key(|c| c.order.unwrap_or(i32::MAX));
        Self {
            title: display_name(raw.name, raw.original_name),
            year: raw.first_air_date.as_deref().and_then(first_air_year),
            rating: raw.vote_average.unwrap_or(0.0),
            genres: raw.genres.into_iter().map(|g| g.name).collect(),
            overview: overview_or_placeholder(raw.overview),
            cast: cast.into_iter().take(TOP_CAST).map(|c| c.name).collect(),
            number_of_seasons: raw.number_of_seasons.unwrap_or(0),
            status: status_label(raw.status.as_deref()).to_string(),
        }
    }
}

pub fn status_label(status: Option<&str>) -> &'static str {
    match status {
        Some("Ended") => "已完结",
        Some("Returning Series") => "连载中",
        Some("Canceled") => "已取消",
        Some("In Production") => "制作中",
        _ => UNKNOWN_STATUS,
    }
}

/// One line of a text recommendation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowRecommendation {
    pub title: String,
    /// 0 when the first-air date is unknown.
    pub year: i32,
    pub rating: f64,
    pub overview: String,
}

impl From<RawShow> for ShowRecommendation {
    fn from(raw: RawShow) -> Self {
        Self {
            title: display_name(raw.name, raw.original_name),
            year: raw
                .first_air_date
                .as_deref()
                .and_then(first_air_year)
                .unwrap_or(0),
            rating: raw.vote_average.unwrap_or(0.0),
            overview: overview_or_placeholder(raw.overview),
        }
    }
}

pub fn render_recommendations(header: &str, shows: &[ShowRecommendation]) -> String {
    let mut out = format!("{header}\n");
    for (idx, show) in shows.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}): {:.1} - {}\n",
            idx + 1,
            show.title,
            show.year,
            show.rating,
            show.overview
        ));
    }
    out
}

/// Year of a `YYYY-MM-DD` first-air date; `None` for empty or malformed dates.
pub fn first_air_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

fn display_name(name: Option<String>, original_name: Option<String>) -> String {
    name.filter(|n| !n.is_empty())
        .or(original_name)
        .unwrap_or_default()
}

fn overview_or_placeholder(text: Option<String>) -> String {
    text.filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER_OVERVIEW.to_string())
}
