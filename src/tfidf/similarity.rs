use std::cmp::Ordering;

use rayon::prelude::*;

use crate::tfidf::vectorizer::VectorSpace;

/// All-pairs cosine similarities over the vectorized catalog, stored
/// row-major. Document vectors are L2-normalized at build time, so the dot
/// product of two rows already is the cosine similarity.
pub struct SimilarityMatrix {
    scores: Vec<f64>,
    num_rows: usize,
}

impl SimilarityMatrix {
    pub fn compute_all(vector_space: &VectorSpace) -> SimilarityMatrix {
        let num_rows = vector_space.num_documents();

        let scores: Vec<f64> = (0..num_rows)
            .into_par_iter()
            .flat_map_iter(|row| {
                let row_vector = vector_space.document(row);
                (0..num_rows).map(move |other| dot(row_vector, vector_space.document(other)))
            })
            .collect();

        SimilarityMatrix { scores, num_rows }
    }

    pub fn len(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.scores[row * self.num_rows..(row + 1) * self.num_rows]
    }

    pub fn get(&self, row: usize, other: usize) -> f64 {
        self.scores[row * self.num_rows + other]
    }
}

// Merge walk over two index-sorted sparse vectors.
fn dot(left: &[(usize, f64)], right: &[(usize, f64)]) -> f64 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].0.cmp(&right[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += left[i].1 * right[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
