use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Paged<T> {
    pub fn truncate(mut self, limit: usize) -> Self {
        self.results.truncate(limit);
        self
    }
}

/// A show row as it appears in search, discover, similar, popular and trending feeds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShow {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub first_air_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCredit {
    #[serde(flatten)]
    pub show: RawShow,
    pub character: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTvCredits {
    #[serde(default)]
    pub cast: Vec<RawCredit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPersonDetails {
    pub id: u64,
    pub name: Option<String>,
    pub biography: Option<String>,
    pub profile_path: Option<String>,
    pub popularity: Option<f64>,
    pub birthday: Option<String>,
    pub place_of_birth: Option<String>,
    pub homepage: Option<String>,
    pub also_known_as: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawAuthorDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub avatar_path: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_details: RawAuthorDetails,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideo {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Videos {
    #[serde(default)]
    pub(crate) results: Vec<RawVideo>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RawProvider {
    pub provider_id: u64,
    pub provider_name: String,
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountryProviders {
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<RawProvider>,
    #[serde(default)]
    pub rent: Vec<RawProvider>,
    #[serde(default)]
    pub buy: Vec<RawProvider>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WatchProviders {
    #[serde(default)]
    pub(crate) results: HashMap<String, RawCountryProviders>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RawGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default)]
    pub(crate) genres: Vec<RawGenre>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCastMember {
    #[serde(default)]
    pub name: String,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCredits {
    #[serde(default)]
    pub cast: Vec<RawCastMember>,
}

/// `/tv/{id}` with `append_to_response=credits`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShowDetails {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<RawGenre>,
    pub credits: Option<RawCredits>,
    pub number_of_seasons: Option<u32>,
    pub status: Option<String>,
}
