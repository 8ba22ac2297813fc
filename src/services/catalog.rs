use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{MovieRecord, MovieRow};

/// Error types for catalog lookups
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Title not found: {0}")]
    NotFound(String),
}

/// Fixed collection of movies with an exact-match title index
///
/// When the source contains the same title more than once, the index points at
/// the last occurrence. Every record still keeps its own position.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds an immutable catalog from raw source rows
    pub fn load(rows: Vec<MovieRow>) -> Self {
        let movies: Vec<MovieRecord> = rows.into_iter().map(MovieRecord::from).collect();

        let mut index = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            if let Some(previous) = index.insert(movie.title.clone(), position) {
                tracing::debug!(
                    title = %movie.title,
                    previous,
                    position,
                    "Duplicate title, keeping last occurrence"
                );
            }
        }

        Self { movies, index }
    }

    /// Resolves an exact title to its catalog position
    ///
    /// No normalization is applied: case, whitespace and punctuation must match.
    pub fn resolve(&self, title: &str) -> Result<usize, CatalogError> {
        self.index
            .get(title)
            .copied()
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))
    }

    pub fn get(&self, position: usize) -> Option<&MovieRecord> {
        self.movies.get(position)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Distinct non-empty titles in first-seen order, for client autocomplete
    ///
    /// Empty titles only come from rows with a missing title cell, which the
    /// client has no way to type, so they are left out of the listing.
    pub fn titles(&self) -> Vec<&str> {
        let mut seen = HashSet::with_capacity(self.index.len());
        self.movies
            .iter()
            .map(|movie| movie.title.as_str())
            .filter(|title| !title.is_empty() && seen.insert(*title))
            .collect()
    }

    /// Title column in catalog order
    pub fn title_corpus(&self) -> Vec<&str> {
        self.movies.iter().map(|movie| movie.title.as_str()).collect()
    }

    /// Genre column in catalog order
    pub fn genre_corpus(&self) -> Vec<&str> {
        self.movies.iter().map(|movie| movie.genre.as_str()).collect()
    }
}
