pub mod catalog;
pub mod config;
pub mod credentials;
pub mod dataset;
pub mod detail;
pub mod error;
pub mod format;
pub mod ids;
pub mod models;
pub mod notice;
pub mod storage;
