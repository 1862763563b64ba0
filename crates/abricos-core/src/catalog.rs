//! Search, genre filtering and ranking over the catalog.

use crate::models::AnimeSummary;

/// Entries whose title contains `query` (case-insensitive) and, when a genre
/// is selected, that carry it. Input order is kept.
pub fn filter(entries: &[AnimeSummary], query: &str, genre: Option<&str>) -> Vec<AnimeSummary> {
    let needle = query.to_lowercase();
    let results: Vec<AnimeSummary> = entries
        .iter()
        .filter(|anime| anime.title.to_lowercase().contains(&needle))
        .filter(|anime| genre.map_or(true, |g| anime.has_genre(g)))
        .cloned()
        .collect();
    tracing::debug!(query, genre = ?genre, matched = results.len(), "Catalog filtered");
    results
}

/// The `n` highest-rated entries, best first. Equal ratings keep input order.
pub fn most_popular(entries: &[AnimeSummary], n: usize) -> Vec<AnimeSummary> {
    let mut ranked = entries.to_vec();
    // `sort_by` is stable, which is what keeps ties in catalog order.
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ranked.truncate(n);
    ranked
}

/// Every genre tag once, in order of first appearance.
pub fn distinct_genres(entries: &[AnimeSummary]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in entries.iter().flat_map(|a| a.genres.iter()) {
        if !genres.contains(genre) {
            genres.push(genre.clone());
        }
    }
    genres
}

/// Genres offered as filter chips next to "All".
pub fn genre_chips(entries: &[AnimeSummary], limit: usize) -> Vec<String> {
    let mut genres = distinct_genres(entries);
    genres.truncate(limit);
    genres
}
