use serde::{Deserialize, Serialize};

use abricos_core::detail::{self, AudienceBreakdown, DetailTable, RatingShare, SessionReviews};
use abricos_core::format;
use abricos_core::models::{AnimeDetail, Review, ReviewDraft};
use abricos_core::notice::{FormKind, Notice};

use super::{Action, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailTab {
    #[default]
    Overview,
    Characters,
    Reviews,
    Stats,
}

/// Detail page state. Created fresh every time the page is opened, so the
/// list toggle and session reviews do not outlive the visit.
#[derive(Debug, Clone)]
pub struct Detail {
    pub anime_id: String,
    pub tab: DetailTab,
    pub in_list: bool,
    pub draft: ReviewDraft,
    reviews: SessionReviews,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    TabChanged(DetailTab),
    ListToggled,
    AuthorChanged(String),
    RatingChanged(u8),
    TextChanged(String),
    ReviewSubmitted,
    BackPressed,
}

/// Everything the detail page displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView<'a> {
    pub anime: &'a AnimeDetail,
    pub tab: DetailTab,
    pub in_list: bool,
    pub rating_label: String,
    /// Filled stars out of five.
    pub stars: u8,
    /// Member count with digit grouping.
    pub members: String,
    pub review_count: usize,
    pub review_tab_label: String,
    /// Seed reviews followed by this visit's reviews.
    pub reviews: Vec<&'a Review>,
    pub draft: &'a ReviewDraft,
    pub rating_distribution: Vec<RatingShare>,
    pub audience: AudienceBreakdown,
}

impl Detail {
    pub fn new(anime_id: impl Into<String>) -> Self {
        Self {
            anime_id: anime_id.into(),
            tab: DetailTab::default(),
            in_list: false,
            draft: ReviewDraft::default(),
            reviews: SessionReviews::new(),
        }
    }

    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::TabChanged(tab) => {
                self.tab = tab;
                Action::None
            }
            Message::ListToggled => {
                self.in_list = !self.in_list;
                Action::None
            }
            Message::AuthorChanged(author) => {
                self.draft.author = author;
                Action::None
            }
            Message::RatingChanged(rating) => {
                self.draft.rating = rating;
                Action::None
            }
            Message::TextChanged(text) => {
                self.draft.text = text;
                Action::None
            }
            Message::ReviewSubmitted => match self.reviews.submit(&self.draft) {
                Ok(review) => {
                    tracing::info!(anime = %self.anime_id, review = review.id, "Review added");
                    self.draft = ReviewDraft::default();
                    Action::Notify(Notice::review_published())
                }
                Err(e) => {
                    tracing::warn!(anime = %self.anime_id, reason = %e, "Review rejected");
                    Action::Notify(Notice::rejected(e, FormKind::Review))
                }
            },
            Message::BackPressed => Action::NavigateTo(Page::Home),
        }
    }

    /// Reviews written during this visit, newest first.
    pub fn session_reviews(&self) -> &[Review] {
        self.reviews.reviews()
    }

    pub fn view<'a>(&'a self, table: &'a DetailTable) -> DetailView<'a> {
        let anime = table.lookup(&self.anime_id);
        let review_count = self.reviews.total(&anime.reviews);
        DetailView {
            anime,
            tab: self.tab,
            in_list: self.in_list,
            rating_label: format::rating(anime.summary.rating),
            stars: detail::star_count(anime.summary.rating),
            members: format::count(anime.members),
            review_count,
            review_tab_label: format!("Рецензии ({review_count})"),
            reviews: self.reviews.combined(&anime.reviews),
            draft: &self.draft,
            rating_distribution: detail::placeholder_rating_distribution(),
            audience: detail::audience_breakdown(anime.members),
        }
    }
}
