use std::cmp;

use hashbrown::HashSet;

use crate::catalog::Catalog;
use crate::metrics::RecommendationMetric;
use crate::tfidf::ScoredItem;

/// Mean per-attribute uniqueness of the returned lists: 1.0 when no two
/// returned items share a diversify-attribute value, lower when the greedy
/// selection rule is relaxed or bypassed.
pub struct AttributeDiversity {
    row_attributes: Vec<Vec<String>>,
    qty_dimensions: usize,
    sum_of_scores: f64,
    qty: usize,
    length: usize,
}

impl AttributeDiversity {
    pub fn new(catalog: &Catalog, length: usize) -> AttributeDiversity {
        let row_attributes: Vec<Vec<String>> = (0..catalog.len())
            .map(|row| {
                catalog
                    .diversify_values(row)
                    .into_iter()
                    .map(|value| value.to_string())
                    .collect()
            })
            .collect();

        AttributeDiversity {
            row_attributes,
            qty_dimensions: catalog.schema.diversify_indices().len(),
            sum_of_scores: 0.0,
            qty: 0,
            length,
        }
    }
}

impl RecommendationMetric for AttributeDiversity {
    fn add(&mut self, recommendations: &[ScoredItem]) {
        let qty_considered = cmp::min(recommendations.len(), self.length);
        if qty_considered == 0 || self.qty_dimensions == 0 {
            return;
        }
        self.qty += 1;

        let mut sum_uniqueness = 0.0;
        for dimension in 0..self.qty_dimensions {
            let distinct: HashSet<&str> = recommendations
                .iter()
                .take(qty_considered)
                .map(|scored| self.row_attributes[scored.row][dimension].as_str())
                .collect();
            sum_uniqueness += distinct.len() as f64 / qty_considered as f64;
        }
        self.sum_of_scores += sum_uniqueness / self.qty_dimensions as f64;
    }

    fn result(&self) -> f64 {
        if self.qty > 0 {
            self.sum_of_scores / self.qty as f64
        } else {
            0.0
        }
    }

    fn get_name(&self) -> String {
        format!("AttributeDiversity@{}", self.length)
    }
}
