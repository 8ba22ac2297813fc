//! Catalog loading
//!
//! The catalog is read once at startup from a pluggable source, then turned
//! into an immutable [`Recommender`] that request handlers share.

use std::path::PathBuf;

use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::MovieRow,
};

use super::{catalog::Catalog, recommender::Recommender};

/// Trait for catalog row sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Reads every catalog row in source order
    async fn load_rows(&self) -> AppResult<Vec<MovieRow>>;

    /// Source description for logging
    fn describe(&self) -> String;
}

/// Reads catalog rows from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonFileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_rows(&self) -> AppResult<Vec<MovieRow>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read catalog file");
            e
        })?;

        let rows: Vec<MovieRow> = serde_json::from_slice(&bytes)?;
        tracing::debug!(rows = rows.len(), "Parsed catalog file");

        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Loads the catalog and fits both vector spaces
///
/// Runs once before the server starts accepting requests.
pub async fn initialize(source: &dyn CatalogSource) -> AppResult<Recommender> {
    let rows = source.load_rows().await?;
    if rows.is_empty() {
        return Err(AppError::Catalog(format!(
            "No movies found in {}",
            source.describe()
        )));
    }

    let engine = Recommender::new(Catalog::load(rows));

    tracing::info!(
        source = %source.describe(),
        movies = engine.catalog().len(),
        title_terms = engine.title_space().dimensions(),
        genre_terms = engine.genre_space().dimensions(),
        "Recommendation engine initialized"
    );

    Ok(engine)
}
