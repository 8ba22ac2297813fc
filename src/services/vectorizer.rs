//! TF-IDF vectorization of short text fields.
//!
//! A [`TfidfVectorizer`] is fitted once on a corpus and produces a frozen
//! [`VectorSpace`]: the vocabulary, the smoothed IDF weights and one
//! L2-normalized sparse vector per corpus document. New text can be projected
//! into the same space; terms outside the vocabulary are ignored.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse vector as `(dimension, weight)` pairs sorted by dimension
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from entries, sorting them by dimension
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(dimension, _)| *dimension);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// True when no dimension carries weight
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, weight)| *weight == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_dim, a_weight) = self.entries[i];
            let (b_dim, b_weight) = other.entries[j];
            match a_dim.cmp(&b_dim) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in self.entries.iter_mut() {
                *weight /= norm;
            }
        }
    }
}

/// Splits text into lowercase word tokens of at least two characters
///
/// Word characters are alphanumerics and `_`; everything else delimits.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Fits TF-IDF vector spaces over a corpus
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfVectorizer;

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the vocabulary and weights for a corpus
    ///
    /// Dimensions are assigned in lexicographic term order so the same corpus
    /// always yields the same space. IDF is smoothed as
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> VectorSpace {
        let documents: Vec<Vec<String>> = corpus.iter().map(|doc| tokenize(doc.as_ref())).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &documents {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (dimension, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), dimension);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        let mut space = VectorSpace {
            vocabulary,
            idf,
            matrix: Vec::new(),
        };
        space.matrix = documents
            .iter()
            .map(|tokens| space.weigh(tokens))
            .collect();

        tracing::debug!(
            documents = space.matrix.len(),
            vocabulary = space.dimensions(),
            "Fitted TF-IDF vector space"
        );

        space
    }
}

/// Frozen vocabulary, IDF weights and corpus matrix produced by a fit
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    matrix: Vec<SparseVector>,
}

impl VectorSpace {
    /// Projects new text into this space using the fitted vocabulary
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    /// Corpus vectors, one per document in fit order
    pub fn matrix(&self) -> &[SparseVector] {
        &self.matrix
    }

    pub fn row(&self, position: usize) -> Option<&SparseVector> {
        self.matrix.get(position)
    }

    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    pub fn dimension_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&dimension) = self.vocabulary.get(token) {
                *counts.entry(dimension).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector {
            entries: counts
                .into_iter()
                .map(|(dimension, tf)| (dimension, tf * self.idf[dimension]))
                .collect(),
        };
        vector.normalize();
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_tokenize_lowercases_and_splits_on_punctuation() {
        assert_eq!(tokenize("Sci-Fi, Action"), vec!["sci", "fi", "action"]);
        assert_eq!(tokenize("The Dark_Knight"), vec!["the", "dark_knight"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        assert_eq!(tokenize("A Beautiful Mind 2"), vec!["beautiful", "mind"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" - ").is_empty());
    }

    #[test]
    fn test_vocabulary_is_lexicographic() {
        let space = TfidfVectorizer::new().fit(&["drama crime", "action"]);

        assert_eq!(space.dimensions(), 3);
        assert_eq!(space.dimension_of("action"), Some(0));
        assert_eq!(space.dimension_of("crime"), Some(1));
        assert_eq!(space.dimension_of("drama"), Some(2));
    }

    #[test]
    fn test_smoothed_idf() {
        let space = TfidfVectorizer::new().fit(&["drama", "drama crime", "comedy"]);

        let drama = space.dimension_of("drama").unwrap();
        let crime = space.dimension_of("crime").unwrap();
        assert!((space.idf()[drama] - ((4.0_f64 / 3.0).ln() + 1.0)).abs() < EPSILON);
        assert!((space.idf()[crime] - (2.0_f64.ln() + 1.0)).abs() < EPSILON);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let space = TfidfVectorizer::new().fit(&["drama crime drama", "comedy", ""]);

        assert_eq!(space.matrix().len(), 3);
        assert!((space.matrix()[0].norm() - 1.0).abs() < EPSILON);
        assert!((space.matrix()[1].norm() - 1.0).abs() < EPSILON);
        assert!(space.matrix()[2].is_zero());
    }

    #[test]
    fn test_term_frequency_raises_weight() {
        let space = TfidfVectorizer::new().fit(&["drama crime drama", "crime drama"]);
        let row = space.row(0).unwrap();

        let weight = |term: &str| {
            let dimension = space.dimension_of(term).unwrap();
            row.entries()
                .iter()
                .find(|(d, _)| *d == dimension)
                .map(|(_, w)| *w)
                .unwrap()
        };
        assert!(weight("drama") > weight("crime"));
    }

    #[test]
    fn test_transform_ignores_unseen_terms() {
        let space = TfidfVectorizer::new().fit(&["drama", "comedy"]);

        let vector = space.transform("Drama western");
        assert_eq!(vector.entries().len(), 1);
        assert_eq!(vector, space.matrix()[0].clone());
        assert_eq!(space.dimensions(), 2);

        assert!(space.transform("western noir").is_zero());
    }

    #[test]
    fn test_transform_matches_fitted_row() {
        let corpus = ["Crime, Drama", "Sci-Fi", "Crime, Thriller"];
        let space = TfidfVectorizer::new().fit(&corpus);

        for (position, text) in corpus.iter().enumerate() {
            assert_eq!(&space.transform(text), space.row(position).unwrap());
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = vec![
            "The Dark Knight".to_string(),
            "The Dark Knight Rises".to_string(),
            "Knight and Day".to_string(),
            "Batman Begins".to_string(),
        ];

        let first = TfidfVectorizer::new().fit(&corpus);
        let second = TfidfVectorizer::new().fit(&corpus);
        assert_eq!(first, second);
        for (a, b) in first.matrix().iter().zip(second.matrix()) {
            for ((da, wa), (db, wb)) in a.entries().iter().zip(b.entries()) {
                assert_eq!(da, db);
                assert_eq!(wa.to_bits(), wb.to_bits());
            }
        }
    }

    #[test]
    fn test_dot_of_sparse_vectors() {
        let a = SparseVector::from_entries(vec![(3, 2.0), (0, 1.0)]);
        let b = SparseVector::from_entries(vec![(0, 4.0), (1, 5.0), (3, 0.5)]);

        assert_eq!(a.entries(), &[(0, 1.0), (3, 2.0)]);
        assert!((a.dot(&b) - 5.0).abs() < EPSILON);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let space = TfidfVectorizer::new().fit::<&str>(&[]);
        assert_eq!(space.dimensions(), 0);
        assert!(space.matrix().is_empty());
        assert!(space.transform("anything").is_zero());
    }
}
