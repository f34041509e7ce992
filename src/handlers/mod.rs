//! HTTP handlers.

pub mod bookmarks;
