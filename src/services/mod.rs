pub mod catalog;
pub mod loader;
pub mod ranker;
pub mod recommender;
pub mod vectorizer;

pub use catalog::{Catalog, CatalogError};
pub use loader::{initialize, CatalogSource, JsonFileSource};
pub use ranker::{rank, RankedResult, ScoredPosition};
pub use recommender::{RecommendError, Recommender, SimilarityMode};
pub use vectorizer::{tokenize, SparseVector, TfidfVectorizer, VectorSpace};
