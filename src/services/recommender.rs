use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::models::MovieRecord;

use super::{
    catalog::{Catalog, CatalogError},
    ranker::{rank, RankedResult},
    vectorizer::{TfidfVectorizer, VectorSpace},
};

/// Error types for the recommendation engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Movie '{0}' not found in database.")]
    MovieNotFound(String),
    #[error("Invalid mode '{0}'. Use 'title' or 'genre'.")]
    InvalidMode(String),
}

impl From<CatalogError> for RecommendError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(title) => RecommendError::MovieNotFound(title),
        }
    }
}

/// Which catalog field similarity is measured on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimilarityMode {
    /// Textual similarity of titles
    #[default]
    Title,
    /// Similarity of genre tags
    Genre,
}

impl FromStr for SimilarityMode {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SimilarityMode::Title),
            "genre" => Ok(SimilarityMode::Genre),
            other => Err(RecommendError::InvalidMode(other.to_string())),
        }
    }
}

impl Display for SimilarityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityMode::Title => write!(f, "title"),
            SimilarityMode::Genre => write!(f, "genre"),
        }
    }
}

/// Content-based recommender over a fixed catalog
///
/// Holds the catalog and one fitted vector space per similarity mode. Nothing
/// is mutated after construction, so a single instance can be shared across
/// request handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    titles: VectorSpace,
    genres: VectorSpace,
}

impl Recommender {
    /// Fits the title and genre vector spaces over the catalog
    pub fn new(catalog: Catalog) -> Self {
        let vectorizer = TfidfVectorizer::new();
        let titles = vectorizer.fit(&catalog.title_corpus());
        let genres = vectorizer.fit(&catalog.genre_corpus());

        Self {
            catalog,
            titles,
            genres,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn title_space(&self) -> &VectorSpace {
        &self.titles
    }

    pub fn genre_space(&self) -> &VectorSpace {
        &self.genres
    }

    /// Recommends up to `count` movies similar to `title`
    ///
    /// `mode` must be `"title"` or `"genre"`. The title is resolved before the
    /// mode is checked, so an unknown title wins over a bad mode.
    pub fn recommend(
        &self,
        title: &str,
        count: usize,
        mode: &str,
    ) -> Result<Vec<&MovieRecord>, RecommendError> {
        let position = self.catalog.resolve(title)?;
        let mode = mode.parse::<SimilarityMode>()?;
        Ok(self.recommend_at(position, count, mode))
    }

    fn recommend_at(
        &self,
        position: usize,
        count: usize,
        mode: SimilarityMode,
    ) -> Vec<&MovieRecord> {
        let ranked = self.rank_neighbors(position, mode);

        let movies: Vec<&MovieRecord> = ranked
            .positions()
            .filter(|&candidate| candidate != position)
            .take(count)
            .filter_map(|candidate| self.catalog.get(candidate))
            .collect();

        tracing::debug!(
            position,
            mode = %mode,
            requested = count,
            returned = movies.len(),
            "Computed recommendations"
        );

        movies
    }

    fn rank_neighbors(&self, position: usize, mode: SimilarityMode) -> RankedResult {
        match mode {
            // Already in title space, no re-transform needed
            SimilarityMode::Title => match self.titles.row(position) {
                Some(query) => rank(query, self.titles.matrix()),
                None => RankedResult::default(),
            },
            SimilarityMode::Genre => {
                let genre = self
                    .catalog
                    .get(position)
                    .map(|movie| movie.genre.as_str())
                    .unwrap_or_default();
                let query = self.genres.transform(genre);
                rank(&query, self.genres.matrix())
            }
        }
    }
}
