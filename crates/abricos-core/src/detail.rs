//! Detail record lookup, session reviews and the derived stats panel values.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;

use crate::dataset;
use crate::error::{AbricosError, ValidationError};
use crate::format;
use crate::ids::TimeIds;
use crate::models::{AnimeDetail, Review, ReviewDraft};

/// Detail records keyed by anime id, with the record shown for unknown ids.
#[derive(Debug, Clone)]
pub struct DetailTable {
    records: BTreeMap<u32, AnimeDetail>,
    fallback_id: u32,
}

impl DetailTable {
    /// Build a table. The fallback record must be present.
    pub fn new(records: Vec<AnimeDetail>, fallback_id: u32) -> Result<Self, AbricosError> {
        let records: BTreeMap<u32, AnimeDetail> =
            records.into_iter().map(|r| (r.summary.id, r)).collect();
        if !records.contains_key(&fallback_id) {
            return Err(AbricosError::Dataset(format!(
                "fallback anime {fallback_id} has no detail record"
            )));
        }
        Ok(Self {
            records,
            fallback_id,
        })
    }

    /// The table built from the bundled dataset.
    pub fn bundled(fallback_id: u32) -> Result<Self, AbricosError> {
        Self::new(dataset::details(), fallback_id)
    }

    /// Record for a route id such as `"2"`. Unknown or malformed ids resolve
    /// to the fallback record.
    pub fn lookup(&self, id: &str) -> &AnimeDetail {
        let found = id
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|id| self.records.get(&id));
        if found.is_none() {
            tracing::debug!(id, fallback = self.fallback_id, "Unknown anime id, using fallback");
        }
        found
            .or_else(|| self.records.get(&self.fallback_id))
            .expect("fallback presence checked in DetailTable::new")
    }
}

/// Validate a draft and return `existing` with the new review in front.
///
/// Checks run in form order: author, score, text. `existing` is not touched
/// on rejection.
pub fn submit_review(
    existing: &[Review],
    draft: &ReviewDraft,
    id: i64,
    today: NaiveDate,
) -> Result<Vec<Review>, ValidationError> {
    if draft.author.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    match draft.rating {
        0 => return Err(ValidationError::MissingFields),
        1..=10 => {}
        _ => return Err(ValidationError::RatingOutOfRange),
    }
    if draft.text.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let review = Review {
        id,
        author: draft.author.clone(),
        rating: draft.rating,
        date: format::long_date(today),
        text: draft.text.clone(),
        helpful: 0,
    };
    let mut reviews = Vec::with_capacity(existing.len() + 1);
    reviews.push(review);
    reviews.extend_from_slice(existing);
    Ok(reviews)
}

/// Reviews written during this session for one anime. Lost on reload.
#[derive(Debug, Clone, Default)]
pub struct SessionReviews {
    reviews: Vec<Review>,
    ids: TimeIds,
}

impl SessionReviews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, draft: &ReviewDraft) -> Result<&Review, ValidationError> {
        self.submit_at(draft, Local::now())
    }

    pub fn submit_at(
        &mut self,
        draft: &ReviewDraft,
        now: DateTime<Local>,
    ) -> Result<&Review, ValidationError> {
        let id = self.ids.next_at(now.with_timezone(&Utc));
        self.reviews = submit_review(&self.reviews, draft, id, now.date_naive())?;
        Ok(&self.reviews[0])
    }

    /// Newest first.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Seed reviews followed by this session's reviews.
    pub fn combined<'a>(&'a self, seed: &'a [Review]) -> Vec<&'a Review> {
        seed.iter().chain(self.reviews.iter()).collect()
    }

    /// Review count shown on the reviews tab.
    pub fn total(&self, seed: &[Review]) -> usize {
        seed.len() + self.reviews.len()
    }
}

/// Scores shown in the distribution panel, highest first.
pub const DISTRIBUTION_SCORES: [u8; 5] = [10, 9, 8, 7, 6];

/// Lowest share any score is drawn with.
pub const MIN_SHARE_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingShare {
    pub score: u8,
    pub percentage: f64,
}

/// Placeholder statistic for the score distribution panel.
///
/// The shares are random on every call and are not computed from reviews;
/// each lies in `[MIN_SHARE_PERCENT, 100)`.
pub fn placeholder_rating_distribution() -> Vec<RatingShare> {
    let mut rng = rand::rng();
    DISTRIBUTION_SCORES
        .iter()
        .map(|&score| RatingShare {
            score,
            percentage: rng.random_range(0.0..100.0_f64).max(MIN_SHARE_PERCENT),
        })
        .collect()
}

/// Viewer counts by list status, estimated from the member count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudienceBreakdown {
    pub watched: u64,
    pub watching: u64,
    pub planned: u64,
    pub dropped: u64,
}

/// Fixed shares of `members`: 60% watched, 20% watching, 15% planned,
/// 5% dropped, each rounded down.
pub fn audience_breakdown(members: u64) -> AudienceBreakdown {
    let share = |percent: u128| (members as u128 * percent / 100) as u64;
    AudienceBreakdown {
        watched: share(60),
        watching: share(20),
        planned: share(15),
        dropped: share(5),
    }
}

/// Filled stars out of five for a 0–10 rating.
pub fn star_count(rating: f32) -> u8 {
    (rating / 2.0).round().clamp(0.0, 5.0) as u8
}
