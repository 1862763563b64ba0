pub mod auth;
pub mod detail;
pub mod home;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use abricos_core::notice::Notice;

/// Which page is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    /// Detail page for a route id. Unknown ids show the fallback record.
    Detail { id: String },
    Auth,
}

/// Actions that a screen can request from the app.
///
/// Screens return these from `update()` instead of touching shared state;
/// the app interprets them in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No side-effect.
    None,
    /// Navigate to a different page.
    NavigateTo(Page),
    /// Navigate after a delay, unless something else navigates first.
    NavigateAfter(Page, Duration),
    /// Show a notice.
    Notify(Notice),
    /// Several of the above, applied in order.
    Batch(Vec<Action>),
}
