use serde::{Deserialize, Serialize};

use super::Review;

/// One row of the catalog, as shown on the home view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeSummary {
    pub id: u32,
    pub title: String,
    /// 0–10 with one decimal.
    pub rating: f32,
    pub year: u16,
    /// Ordered genre tags; the first ones are shown on compact cards.
    pub genres: Vec<String>,
    pub episodes: u32,
    /// Free-form airing status ("Завершён", "Продолжается", ...).
    pub status: String,
    pub description: String,
    /// Display color used in place of cover art.
    pub color: String,
}

impl AnimeSummary {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// Full record for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    #[serde(flatten)]
    pub summary: AnimeSummary,
    pub full_description: String,
    pub studio: String,
    pub source: String,
    pub duration: String,
    pub aired: String,
    /// Popularity rank, 1 is the most popular.
    pub popularity: u32,
    pub members: u64,
    pub characters: Vec<Character>,
    /// Seed reviews bundled with the dataset. Never mutated.
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub voice_actor: String,
    pub color: String,
}

/// A headline on the home view's news tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub date: String,
}
