use serde::{Deserialize, Serialize};

/// A user review, either seeded with the dataset or written in this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Millisecond timestamp for session reviews, small integers for seeds.
    pub id: i64,
    pub author: String,
    /// 1–10.
    pub rating: u8,
    /// Localized long date, e.g. "20 ноября 2024".
    pub date: String,
    pub text: String,
    pub helpful: u32,
}

/// In-progress review form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub author: String,
    /// 0 means no score has been picked yet.
    pub rating: u8,
    pub text: String,
}
