use serde::Serialize;
use std::collections::HashSet;

use crate::services::{
    bgg::{BggClient, Filters},
    similarity::similarity,
};

/// Outcome of comparing two users' top games
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub score: f64,
    pub first_games: usize,
    pub second_games: usize,
    pub common_games: usize,
}

/// Owned and rated games only
pub fn collection_filters() -> Filters {
    Filters::new().with("own", 1).with("rated", 1)
}

/// Names of the first `limit` games in the user's collection, in BGG's order.
///
/// A failed fetch is logged and counted as an empty collection, so one bad
/// username scores 0 instead of failing the comparison.
pub async fn top_games(client: &BggClient, username: &str, limit: usize) -> HashSet<String> {
    match client.fetch_collection(username, &collection_filters()).await {
        Ok(items) => items.into_iter().take(limit).map(|item| item.name).collect(),
        Err(e) => {
            tracing::warn!(
                username = %username,
                error = %e,
                "Collection fetch failed, treating as empty"
            );
            HashSet::new()
        }
    }
}

/// Fetches both collections concurrently and scores their overlap
pub async fn compare_users(
    client: &BggClient,
    first: &str,
    second: &str,
    limit: usize,
) -> ComparisonReport {
    let (first_set, second_set) = tokio::join!(
        top_games(client, first, limit),
        top_games(client, second, limit)
    );

    let common_games = first_set.intersection(&second_set).count();
    let total_games = first_set.union(&second_set).count();
    let score = similarity(&first_set, &second_set);

    tracing::info!(
        first = %first,
        second = %second,
        common_games = common_games,
        total_games = total_games,
        score = score,
        "Common games: {} out of {}",
        common_games,
        total_games
    );

    ComparisonReport {
        score,
        first_games: first_set.len(),
        second_games: second_set.len(),
        common_games,
    }
}
