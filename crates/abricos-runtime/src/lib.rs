//! View state for the three pages: home catalog, anime detail and auth.
//!
//! Hosts feed user input in as [`Message`]s and read back per-page view
//! models, notices and pending navigation. Nothing here renders.

mod app;
#[cfg(feature = "native")]
pub mod logging;
pub mod screen;

pub use app::{App, Message, ScheduledNavigation};
pub use screen::{Action, Page};

use abricos_core::error::AbricosError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Core(#[from] AbricosError),
}
