use hashbrown::HashMap;

/// Sparse tf-idf representation of the catalog's feature keys.
///
/// The vocabulary is fixed once built; new catalog rows require a full
/// rebuild, there is no incremental update path.
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    document_vectors: Vec<Vec<(usize, f64)>>,
}

impl VectorSpace {
    pub fn build(feature_keys: &[String]) -> VectorSpace {
        let num_documents = feature_keys.len();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        let mut term_counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(num_documents);

        for feature_key in feature_keys.iter() {
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for term in feature_key.split_whitespace() {
                // Terms are numbered in first-seen order so builds over the
                // same corpus are deterministic.
                let term_index = match vocabulary.get(term) {
                    Some(index) => *index,
                    None => {
                        let index = vocabulary.len();
                        vocabulary.insert(term.to_string(), index);
                        document_frequency.push(0);
                        index
                    }
                };
                *counts.entry(term_index).or_insert(0) += 1;
            }
            for term_index in counts.keys() {
                document_frequency[*term_index] += 1;
            }
            term_counts.push(counts);
        }

        // Smoothed idf keeps every weight finite and positive, also for
        // single-document corpora and for terms present in every document.
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|df| ((1 + num_documents) as f64 / (1 + df) as f64).ln() + 1.0)
            .collect();

        let document_vectors: Vec<Vec<(usize, f64)>> = term_counts
            .into_iter()
            .map(|counts| {
                let mut weights: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(term_index, tf)| (term_index, tf as f64 * idf[term_index]))
                    .collect();
                weights.sort_unstable_by_key(|(term_index, _)| *term_index);
                l2_normalize(&mut weights);
                weights
            })
            .collect();

        VectorSpace {
            vocabulary,
            idf,
            document_vectors,
        }
    }

    pub fn num_documents(&self) -> usize {
        self.document_vectors.len()
    }

    pub fn num_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// Sparse weight vector of one document, sorted by term index.
    pub fn document(&self, index: usize) -> &[(usize, f64)] {
        &self.document_vectors[index]
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term_index: usize) -> f64 {
        self.idf[term_index]
    }
}

fn l2_normalize(weights: &mut [(usize, f64)]) {
    let norm = weights.iter().map(|(_, weight)| weight * weight).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in weights.iter_mut() {
            *weight /= norm;
        }
    }
}

#[cfg(test)]
mod vectorizer_test {
    use super::*;
    use float_cmp::approx_eq;

    fn corpus(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn should_number_terms_in_first_seen_order() {
        let space = VectorSpace::build(&corpus(&["DRESS RED COTTON", "SHIRT RED"]));

        assert_eq!(Some(0), space.term_index("DRESS"));
        assert_eq!(Some(1), space.term_index("RED"));
        assert_eq!(Some(2), space.term_index("COTTON"));
        assert_eq!(Some(3), space.term_index("SHIRT"));
        assert_eq!(None, space.term_index("SILK"));
        assert_eq!(4, space.num_terms());
    }

    #[test]
    fn should_weight_rare_terms_higher_than_common_terms() {
        let space = VectorSpace::build(&corpus(&["DRESS RED", "DRESS BLUE", "DRESS GREEN"]));

        let common = space.idf(space.term_index("DRESS").unwrap());
        let rare = space.idf(space.term_index("BLUE").unwrap());

        assert!(rare > common);
        assert!(common > 0.0);
    }

    #[test]
    fn should_normalize_document_vectors_to_unit_length() {
        let space = VectorSpace::build(&corpus(&["DRESS RED COTTON", "SHIRT BLUE SILK"]));

        for index in 0..space.num_documents() {
            let norm: f64 = space
                .document(index)
                .iter()
                .map(|(_, weight)| weight * weight)
                .sum::<f64>()
                .sqrt();
            assert!(approx_eq!(f64, 1.0, norm, epsilon = 1e-12));
        }
    }

    #[test]
    fn handle_single_document_corpus() {
        let space = VectorSpace::build(&corpus(&["DRESS RED COTTON"]));

        let weights = space.document(0);
        assert_eq!(3, weights.len());
        for (_, weight) in weights.iter() {
            assert!(weight.is_finite());
            // idf degenerates to 1 for every term, so equal term frequencies
            // yield equal weights.
            assert!(approx_eq!(f64, 1.0 / 3_f64.sqrt(), *weight, epsilon = 1e-12));
        }
    }

    #[test]
    fn handle_empty_corpus() {
        let space = VectorSpace::build(&[]);

        assert_eq!(0, space.num_documents());
        assert_eq!(0, space.num_terms());
    }

    #[test]
    fn handle_document_without_tokens() {
        let space = VectorSpace::build(&corpus(&["", "DRESS RED"]));

        assert!(space.document(0).is_empty());
        assert_eq!(2, space.document(1).len());
    }
}
