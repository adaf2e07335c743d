//! Person-centred tools: profile with credits, credited shows, and best-rated credits.
use serde::Deserialize;
use tracing::info;

use crate::error::ToolError;
use crate::models::{ActorInfo, ActorProfile, CreditInfo, ShowList, ShowSummary};
use crate::resolve::{resolve_person, ResolvedId};
use crate::tmdb::{RawCredit, TmdbApi};

pub const DEFAULT_ACTOR_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActorParams {
    pub actor_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonParams {
    pub person_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActorRecommendationsParams {
    pub actor_name: String,
    pub limit: Option<usize>,
}

pub async fn get_actor_details_and_credits(
    tmdb: &dyn TmdbApi,
    params: ActorParams,
) -> Result<ActorProfile, ToolError> {
    let name = required(&params.actor_name, "actor_name")?;
    let person = find_person(tmdb, name, |n| format!("未找到名为\"{}\"的演员", n)).await?;

    let (details, credits) =
        tokio::try_join!(tmdb.person_details(person.id), tmdb.person_tv_credits(person.id))
            .map_err(|e| ToolError::upstream(format!("获取演员\"{}\"的信息失败", name), e))?;

    let mut credits: Vec<CreditInfo> = credits.cast.into_iter().map(CreditInfo::from).collect();
    credits.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));

    Ok(ActorProfile {
        actor: ActorInfo::from(details),
        credits,
    })
}

/// Every show the person has an acting credit in, as a single page.
pub async fn find_shows_by_person_name(
    tmdb: &dyn TmdbApi,
    person_name: &str,
) -> Result<ShowList, ToolError> {
    let name = required(person_name, "person_name")?;
    let person = find_person(tmdb, name, |n| format!("未找到人物: {}", n)).await?;

    let results: Vec<ShowSummary> = tmdb
        .person_tv_credits(person.id)
        .await?
        .cast
        .into_iter()
        .map(|credit| ShowSummary::from(credit.show))
        .collect();
    info!("Person '{}' has {} credited shows", name, results.len());

    Ok(ShowList {
        page: 1,
        total_pages: 1,
        total_results: results.len() as u32,
        results,
    })
}

/// The person's credited shows, best rated first, at most `limit` of them.
pub async fn get_recommendations_by_actor(
    tmdb: &dyn TmdbApi,
    actor_name: &str,
    limit: usize,
) -> Result<ShowList, ToolError> {
    let name = required(actor_name, "actor_name")?;
    let person = find_person(tmdb, name, |n| format!("未找到演员: {}", n)).await?;

    let mut credits: Vec<RawCredit> = tmdb.person_tv_credits(person.id).await?.cast;
    credits.sort_by(|a, b| {
        b.show
            .vote_average
            .unwrap_or(0.0)
            .total_cmp(&a.show.vote_average.unwrap_or(0.0))
    });
    credits.truncate(limit);

    let results: Vec<ShowSummary> = credits
        .into_iter()
        .map(|credit| ShowSummary::from(credit.show))
        .collect();
    Ok(ShowList {
        page: 1,
        total_pages: 1,
        total_results: results.len() as u32,
        results,
    })
}

fn required<'a>(value: &'a str, name: &str) -> Result<&'a str, ToolError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolError::missing_param(name));
    }
    Ok(value)
}

async fn find_person(
    tmdb: &dyn TmdbApi,
    name: &str,
    not_found: impl FnOnce(&str) -> String,
) -> Result<ResolvedId, ToolError> {
    resolve_person(tmdb, name)
        .await
        .into_result(&format!("搜索人物\"{}\"失败", name))?
        .ok_or_else(|| ToolError::NotFound(not_found(name)))
}
