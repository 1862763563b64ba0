mod anime;
mod review;
mod user;

pub use anime::{AnimeDetail, AnimeSummary, Character, NewsItem};
pub use review::{Review, ReviewDraft};
pub use user::{LoginForm, RegisterForm, SessionUser, UserAccount};
