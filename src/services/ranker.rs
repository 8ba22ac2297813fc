use super::vectorizer::SparseVector;

/// Similarity of one corpus position to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPosition {
    pub position: usize,
    pub score: f64,
}

/// Corpus positions ordered by descending score, ties by ascending position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    entries: Vec<ScoredPosition>,
}

impl RankedResult {
    pub fn entries(&self) -> &[ScoredPosition] {
        &self.entries
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scores every corpus row against the query and sorts them
///
/// Rows are L2-normalized, so the dot product is the cosine similarity. A
/// zero query scores 0 everywhere and the result falls back to corpus order.
pub fn rank(query: &SparseVector, corpus: &[SparseVector]) -> RankedResult {
    let mut entries: Vec<ScoredPosition> = corpus
        .iter()
        .enumerate()
        .map(|(position, row)| ScoredPosition {
            position,
            score: query.dot(row),
        })
        .collect();

    // sort_by is stable, so equal scores keep ascending positions
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    RankedResult { entries }
}
