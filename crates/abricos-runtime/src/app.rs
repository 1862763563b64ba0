use std::time::Duration;

use serde::{Deserialize, Serialize};

use abricos_core::config::AppConfig;
use abricos_core::credentials::CredentialStore;
use abricos_core::dataset;
use abricos_core::detail::DetailTable;
use abricos_core::models::{AnimeSummary, NewsItem, SessionUser};
use abricos_core::notice::Notice;
use abricos_core::storage::KeyValueStore;

use crate::screen::auth::{self, Auth};
use crate::screen::detail::{self, Detail, DetailView};
use crate::screen::home::{self, Home, HomeView};
use crate::screen::{Action, Page};
use crate::RuntimeError;

/// Top-level input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Navigate(Page),
    /// The "go back" arrow on the detail and auth pages.
    Back,
    Home(home::Message),
    Detail(detail::Message),
    Auth(auth::Message),
    /// The host's timer for [`ScheduledNavigation`] ran out.
    ScheduledNavigationDue,
}

/// A navigation the host should perform once `after_ms` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNavigation {
    pub to: Page,
    pub after_ms: u64,
}

/// All page state plus the services the pages call into.
pub struct App<S> {
    config: AppConfig,
    catalog: Vec<AnimeSummary>,
    news: Vec<NewsItem>,
    details: DetailTable,
    credentials: CredentialStore<S>,
    page: Page,
    home: Home,
    detail: Option<Detail>,
    auth: Auth,
    notices: Vec<Notice>,
    scheduled: Option<ScheduledNavigation>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(config: AppConfig, store: S) -> Result<Self, RuntimeError> {
        let details = DetailTable::bundled(config.detail.fallback_anime_id)?;
        Ok(Self {
            config,
            catalog: dataset::catalog(),
            news: dataset::news(),
            details,
            credentials: CredentialStore::new(store),
            page: Page::Home,
            home: Home::new(),
            detail: None,
            auth: Auth::new(),
            notices: Vec::new(),
            scheduled: None,
        })
    }

    pub fn update(&mut self, msg: Message) {
        let action = match msg {
            Message::Navigate(page) => Action::NavigateTo(page),
            Message::Back => Action::NavigateTo(Page::Home),
            Message::Home(msg) => self.home.update(msg),
            Message::Detail(msg) => match self.detail.as_mut() {
                Some(detail) => detail.update(msg),
                None => {
                    tracing::debug!(?msg, "Detail message with no detail page open");
                    Action::None
                }
            },
            Message::Auth(msg) => {
                let delay = Duration::from_millis(self.config.auth.redirect_delay_ms);
                self.auth.update(msg, &mut self.credentials, delay)
            }
            Message::ScheduledNavigationDue => match self.scheduled.take() {
                Some(scheduled) => Action::NavigateTo(scheduled.to),
                None => Action::None,
            },
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::NavigateTo(page) => self.navigate(page),
            Action::NavigateAfter(page, delay) => {
                self.scheduled = Some(ScheduledNavigation {
                    to: page,
                    after_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                });
            }
            Action::Notify(notice) => self.notices.push(notice),
            Action::Batch(actions) => {
                for action in actions {
                    self.apply(action);
                }
            }
        }
    }

    /// Switch pages. Every page starts from fresh state, as a remount would.
    fn navigate(&mut self, page: Page) {
        tracing::debug!(from = ?self.page, to = ?page, "Navigate");
        self.scheduled = None;
        self.detail = None;
        match &page {
            Page::Home => self.home = Home::new(),
            Page::Detail { id } => self.detail = Some(Detail::new(id.clone())),
            Page::Auth => self.auth = Auth::new(),
        }
        self.page = page;
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn home_view(&self) -> HomeView {
        self.home.view(&self.catalog, &self.news, &self.config.catalog)
    }

    /// `None` unless the detail page is open.
    pub fn detail_view(&self) -> Option<DetailView<'_>> {
        self.detail.as_ref().map(|d| d.view(&self.details))
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Notices raised since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn scheduled_navigation(&self) -> Option<&ScheduledNavigation> {
        self.scheduled.as_ref()
    }

    pub fn current_user(&self) -> Result<Option<SessionUser>, RuntimeError> {
        Ok(self.credentials.current_user()?)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(feature = "native")]
impl App<abricos_core::storage::SqliteStore> {
    /// Load the user config, start logging and open the on-disk store.
    pub fn open_native() -> Result<Self, RuntimeError> {
        let config = AppConfig::load().map_err(|e| RuntimeError::Config(e.to_string()))?;
        crate::logging::init(&config.general.log_filter);
        let db_path = config
            .ensure_db_path()
            .map_err(|e| RuntimeError::Config(e.to_string()))?;
        let store = abricos_core::storage::SqliteStore::open(&db_path)
            .map_err(|e| RuntimeError::Storage(e.to_string()))?;
        tracing::info!(path = %db_path.display(), "Opened key-value store");
        Self::new(config, store)
    }
}
