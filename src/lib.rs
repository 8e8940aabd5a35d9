//! Personal workout log and daily to-do tracker.
//!
//! - [`db`]: storage traits and the SQLite backend
//! - [`api`]: the axum JSON API and the embedded page

pub mod api;
pub mod db;
pub mod paths;
