//! Name → TMDB id lookups. Each resolver issues exactly one search and takes the first hit.
use anyhow::Error;
use tracing::debug;

use crate::error::ToolError;
use crate::tmdb::{RawShow, TmdbApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    pub id: u64,
    pub query: String,
}

/// Outcome of a lookup. Callers decide whether `Failed` degrades to "no match".
#[derive(Debug)]
pub enum Resolution {
    Found(ResolvedId),
    NotFound,
    Failed(Error),
}

impl Resolution {
    fn from_first_hit(query: &str, outcome: anyhow::Result<Option<u64>>) -> Self {
        match outcome {
            Ok(Some(id)) => {
                debug!(query = %query, id, "Resolved");
                Resolution::Found(ResolvedId {
                    id,
                    query: query.to_string(),
                })
            }
            Ok(None) => Resolution::NotFound,
            Err(e) => Resolution::Failed(e),
        }
    }

    /// Keeps "not found" as `None` but surfaces transport failures as upstream errors.
    pub fn into_result(self, operation: &str) -> Result<Option<ResolvedId>, ToolError> {
        match self {
            Resolution::Found(r) => Ok(Some(r)),
            Resolution::NotFound => Ok(None),
            Resolution::Failed(e) => Err(ToolError::upstream(operation, e)),
        }
    }
}

pub async fn resolve_person(tmdb: &dyn TmdbApi, name: &str) -> Resolution {
    let outcome = tmdb
        .search_person(name)
        .await
        .map(|page| page.results.first().map(|hit| hit.id));
    Resolution::from_first_hit(name, outcome)
}

pub async fn resolve_keyword(tmdb: &dyn TmdbApi, keyword: &str) -> Resolution {
    let outcome = tmdb
        .search_keyword(keyword)
        .await
        .map(|page| page.results.first().map(|hit| hit.id));
    Resolution::from_first_hit(keyword, outcome)
}

/// First TV search hit for `title`, or a not-found error naming it.
pub async fn resolve_show(
    tmdb: &dyn TmdbApi,
    title: &str,
    operation: &str,
) -> Result<RawShow, ToolError> {
    let page = tmdb
        .search_tv(title)
        .await
        .map_err(|e| ToolError::upstream(operation, e))?;
    page.results
        .into_iter()
        .next()
        .ok_or_else(|| ToolError::NotFound(format!("未找到名为\"{}\"的剧集", title)))
}
