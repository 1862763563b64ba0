use serde::{Deserialize, Serialize};

use abricos_core::catalog;
use abricos_core::config::CatalogConfig;
use abricos_core::format;
use abricos_core::models::{AnimeSummary, NewsItem};

use super::{Action, Page};

/// Genres shown on a compact popular card.
const CARD_GENRE_LIMIT: usize = 3;
/// Counters printed on review teaser cards.
const TEASER_HELPFUL: u32 = 245;
const TEASER_COMMENTS: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeTab {
    #[default]
    Catalog,
    News,
    Reviews,
}

/// Home page state: search box, genre chip and tab.
#[derive(Debug, Clone, Default)]
pub struct Home {
    pub tab: HomeTab,
    pub query: String,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    QueryChanged(String),
    /// `None` is the "All" chip.
    GenreSelected(Option<String>),
    TabChanged(HomeTab),
    AnimeOpened(u32),
    SignUpPressed,
}

/// A card in the "popular" strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularCard {
    pub id: u32,
    pub title: String,
    pub rating: f32,
    /// Rating as printed on the badge ("9", "8.9").
    pub rating_label: String,
    pub color: String,
    pub genres: Vec<String>,
}

/// A teaser on the reviews tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTeaser {
    pub anime_id: u32,
    pub title: String,
    pub rating: f32,
    pub description: String,
    pub author: String,
    pub helpful: u32,
    pub comments: u32,
}

/// Everything the home page displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub tab: HomeTab,
    pub query: String,
    pub selected_genre: Option<String>,
    pub genre_chips: Vec<String>,
    pub popular: Vec<PopularCard>,
    pub results: Vec<AnimeSummary>,
    pub news: Vec<NewsItem>,
    pub teasers: Vec<ReviewTeaser>,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::QueryChanged(query) => {
                self.query = query;
                Action::None
            }
            Message::GenreSelected(genre) => {
                self.genre = genre;
                Action::None
            }
            Message::TabChanged(tab) => {
                self.tab = tab;
                Action::None
            }
            Message::AnimeOpened(id) => Action::NavigateTo(Page::Detail { id: id.to_string() }),
            Message::SignUpPressed => Action::NavigateTo(Page::Auth),
        }
    }

    pub fn view(&self, entries: &[AnimeSummary], news: &[NewsItem], cfg: &CatalogConfig) -> HomeView {
        let popular = catalog::most_popular(entries, cfg.popular_count)
            .into_iter()
            .map(|a| PopularCard {
                id: a.id,
                title: a.title,
                rating: a.rating,
                rating_label: format::rating(a.rating),
                color: a.color,
                genres: a.genres.into_iter().take(CARD_GENRE_LIMIT).collect(),
            })
            .collect();

        let teasers = entries
            .iter()
            .take(cfg.teaser_count)
            .map(|a| ReviewTeaser {
                anime_id: a.id,
                title: a.title.clone(),
                rating: a.rating,
                description: a.description.clone(),
                author: format!("Пользователь {}", a.id),
                helpful: TEASER_HELPFUL,
                comments: TEASER_COMMENTS,
            })
            .collect();

        HomeView {
            tab: self.tab,
            query: self.query.clone(),
            selected_genre: self.genre.clone(),
            genre_chips: catalog::genre_chips(entries, cfg.genre_chip_limit),
            popular,
            results: catalog::filter(entries, &self.query, self.genre.as_deref()),
            news: news.to_vec(),
            teasers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abricos_core::config::AppConfig;
    use abricos_core::dataset;

    fn view(home: &Home) -> HomeView {
        home.view(&dataset::catalog(), &dataset::news(), &AppConfig::default().catalog)
    }

    #[test]
    fn test_initial_view() {
        let v = view(&Home::new());
        assert_eq!(v.tab, HomeTab::Catalog);
        assert_eq!(v.results.len(), 6);
        assert_eq!(v.genre_chips.len(), 5);
        assert_eq!(v.news.len(), 3);
        assert_eq!(v.teasers.len(), 4);
        assert_eq!(v.teasers[0].author, "Пользователь 1");

        let ids: Vec<u32> = v.popular.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(v.popular.iter().all(|c| c.genres.len() <= 3));
        let labels: Vec<&str> = v.popular.iter().map(|c| c.rating_label.as_str()).collect();
        assert_eq!(labels, vec!["9.1", "9", "8.9"]);
    }

    #[test]
    fn test_query_and_genre_narrow_results() {
        let mut home = Home::new();
        home.update(Message::GenreSelected(Some("Приключения".into())));
        let v = view(&home);
        let ids: Vec<u32> = v.results.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);

        home.update(Message::QueryChanged("НАРУ".into()));
        let ids: Vec<u32> = view(&home).results.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5]);

        // Back to "All".
        home.update(Message::GenreSelected(None));
        home.update(Message::QueryChanged(String::new()));
        assert_eq!(view(&home).results.len(), 6);
    }

    #[test]
    fn test_popular_ignores_filters() {
        let mut home = Home::new();
        home.update(Message::QueryChanged("ванпанч".into()));
        let v = view(&home);
        assert_eq!(v.results.len(), 1);
        assert_eq!(v.popular.len(), 3);
    }

    #[test]
    fn test_navigation_actions() {
        let mut home = Home::new();
        assert_eq!(
            home.update(Message::AnimeOpened(4)),
            Action::NavigateTo(Page::Detail { id: "4".into() })
        );
        assert_eq!(home.update(Message::SignUpPressed), Action::NavigateTo(Page::Auth));
        assert_eq!(home.update(Message::TabChanged(HomeTab::News)), Action::None);
        assert_eq!(home.tab, HomeTab::News);
    }
}
