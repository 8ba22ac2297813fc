//! Content-based movie recommendations over a fixed catalog.
//!
//! Titles and genres are embedded with TF-IDF once at startup; recommendations
//! are the nearest catalog neighbors by cosine similarity.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
