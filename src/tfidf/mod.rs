use std::cmp::Ordering;

use hashbrown::HashSet;

use crate::io::RowIndex;
use crate::tfidf::index::CatalogIndex;

pub mod feature;
pub mod index;
pub mod similarity;
pub mod vectorizer;

#[derive(PartialEq, Debug, Clone)]
pub struct ScoredItem {
    pub row: RowIndex,
    pub score: f64,
}

impl ScoredItem {
    fn new(row: RowIndex, score: f64) -> Self {
        ScoredItem { row, score }
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse order by score
        match self.score.partial_cmp(&other.score) {
            Some(Ordering::Less) => Ordering::Greater,
            Some(Ordering::Greater) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns up to `how_many` diversified recommendations for the item whose
/// display name equals `query_name` (exact, case-sensitive match against
/// the first carrying row; callers uppercase free-text queries).
///
/// Candidates are ranked by similarity to the query row, ties broken by
/// original row order, then accepted greedily: a candidate enters the
/// result only while none of its diversify-attribute values has been seen
/// on an earlier accepted item. An unknown query name yields an empty
/// result, not an error.
pub fn recommend(index: &CatalogIndex, query_name: &str, how_many: usize) -> Vec<ScoredItem> {
    if how_many == 0 {
        return Vec::new();
    }

    let catalog = &index.catalog;
    let query_row = match catalog.find_by_name(query_name) {
        Some(row) => row,
        None => return Vec::new(),
    };

    let mut candidates: Vec<ScoredItem> = index
        .similarities
        .row(query_row)
        .iter()
        .enumerate()
        .map(|(row, score)| ScoredItem::new(row, *score))
        .collect();
    // Stable sort: equal scores keep ascending row order.
    candidates.sort();

    let qty_diversify = catalog.schema.diversify_indices().len();
    let mut seen_values: Vec<HashSet<&str>> = vec![HashSet::new(); qty_diversify];
    let mut accepted: Vec<ScoredItem> = Vec::with_capacity(how_many);

    for candidate in candidates.into_iter() {
        let values = catalog.diversify_values(candidate.row);
        let all_unseen = values
            .iter()
            .zip(seen_values.iter())
            .all(|(value, seen)| !seen.contains(*value));

        if all_unseen {
            // The query item usually lands here first, seeding the seen sets
            // with its own attributes.
            for (value, seen) in values.into_iter().zip(seen_values.iter_mut()) {
                seen.insert(value);
            }
            accepted.push(candidate);
            if accepted.len() >= how_many {
                break;
            }
        }
    }

    accepted
}

#[cfg(test)]
mod recommend_test {
    use float_cmp::approx_eq;
    use hashbrown::HashSet;

    use crate::catalog::{AttributeSchema, Catalog, CatalogItem};

    use super::*;

    fn dress_catalog_index() -> CatalogIndex {
        let schema = AttributeSchema::new(
            vec![
                "Sub Section name".to_string(),
                "COLOR".to_string(),
                "STYLE".to_string(),
                "FABRIC".to_string(),
            ],
            "Sub Section name",
            &["COLOR".to_string(), "STYLE".to_string(), "FABRIC".to_string()],
        )
        .unwrap();

        let items = vec![
            CatalogItem::new(vec!["DRESS".into(), "RED".into(), "A".into(), "COTTON".into()]),
            CatalogItem::new(vec!["DRESS".into(), "RED".into(), "B".into(), "SILK".into()]),
            CatalogItem::new(vec!["DRESS".into(), "BLUE".into(), "A".into(), "COTTON".into()]),
            CatalogItem::new(vec!["DRESS".into(), "BLUE".into(), "B".into(), "SILK".into()]),
        ];

        CatalogIndex::new(Catalog::new(schema, items), false, "simple unittest")
    }

    #[test]
    fn should_accept_the_query_row_first_with_full_similarity() {
        let index = dress_catalog_index();

        let recommendations = recommend(&index, "DRESS", 5);

        assert_eq!(0, recommendations[0].row);
        assert!(approx_eq!(f64, 1.0, recommendations[0].score, epsilon = 1e-12));
    }

    #[test]
    fn should_skip_candidates_sharing_a_seen_attribute() {
        let index = dress_catalog_index();

        let recommendations = recommend(&index, "DRESS", 5);

        // Row 1 shares COLOR=RED, row 2 shares STYLE=A and FABRIC=COTTON
        // with the accepted query row. Only row 3 is fully fresh.
        let accepted_rows: Vec<usize> = recommendations.iter().map(|scored| scored.row).collect();
        assert_eq!(vec![0, 3], accepted_rows);
    }

    #[test]
    fn should_never_repeat_a_diversify_attribute_value() {
        let index = dress_catalog_index();

        let recommendations = recommend(&index, "DRESS", 5);

        for dimension in 0..index.catalog.schema.diversify_indices().len() {
            let values: Vec<&str> = recommendations
                .iter()
                .map(|scored| index.catalog.diversify_values(scored.row)[dimension])
                .collect();
            let distinct: HashSet<&&str> = values.iter().collect();
            assert_eq!(values.len(), distinct.len());
        }
    }

    #[test]
    fn should_shrink_the_result_when_the_catalog_lacks_diversity() {
        let schema = AttributeSchema::new(
            vec![
                "Sub Section name".to_string(),
                "COLOR".to_string(),
                "STYLE".to_string(),
                "FABRIC".to_string(),
            ],
            "Sub Section name",
            &["COLOR".to_string(), "STYLE".to_string(), "FABRIC".to_string()],
        )
        .unwrap();
        // Every other row shares at least one attribute with the query row.
        let items = vec![
            CatalogItem::new(vec!["DRESS".into(), "RED".into(), "A".into(), "COTTON".into()]),
            CatalogItem::new(vec!["DRESS".into(), "RED".into(), "B".into(), "SILK".into()]),
            CatalogItem::new(vec!["DRESS".into(), "BLUE".into(), "A".into(), "COTTON".into()]),
        ];
        let index = CatalogIndex::new(Catalog::new(schema, items), false, "simple unittest");

        let recommendations = recommend(&index, "DRESS", 5);

        assert_eq!(1, recommendations.len());
        assert_eq!(0, recommendations[0].row);
        assert!(approx_eq!(f64, 1.0, recommendations[0].score, epsilon = 1e-12));
    }

    #[test]
    fn should_order_results_by_descending_similarity() {
        let index = dress_catalog_index();

        let recommendations = recommend(&index, "DRESS", 5);

        for pair in recommendations.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn should_cap_the_result_length() {
        let index = dress_catalog_index();

        let recommendations = recommend(&index, "DRESS", 1);

        assert_eq!(1, recommendations.len());
    }

    #[test]
    fn should_return_nothing_for_zero_requested_items() {
        let index = dress_catalog_index();

        assert!(recommend(&index, "DRESS", 0).is_empty());
    }

    #[test]
    fn should_return_empty_for_an_unknown_query_name() {
        let index = dress_catalog_index();

        assert!(recommend(&index, "TROUSERS", 5).is_empty());
        // lookup is case-sensitive, callers uppercase beforehand
        assert!(recommend(&index, "dress", 5).is_empty());
    }

    #[test]
    fn should_be_deterministic_across_calls() {
        let index = dress_catalog_index();

        let first = recommend(&index, "DRESS", 5);
        let second = recommend(&index, "DRESS", 5);

        assert_eq!(first, second);
    }

    #[test]
    fn handle_empty_catalog() {
        let schema = AttributeSchema::new(
            vec!["Sub Section name".to_string(), "COLOR".to_string()],
            "Sub Section name",
            &["COLOR".to_string()],
        )
        .unwrap();
        let index = CatalogIndex::new(Catalog::new(schema, Vec::new()), false, "empty unittest");

        assert!(recommend(&index, "DRESS", 5).is_empty());
    }

    #[test]
    fn handle_reverse_ordering_scoreditem() {
        let largest = ScoredItem::new(2, 0.9);
        let middle = ScoredItem::new(0, 0.5);
        let smallest = ScoredItem::new(1, 0.1);

        let mut scored = vec![middle.clone(), largest.clone(), smallest.clone()];
        scored.sort();

        assert_eq!(vec![largest, middle, smallest], scored);
    }

    #[test]
    fn handle_stable_tie_break_on_equal_scores() {
        let first = ScoredItem::new(3, 0.5);
        let second = ScoredItem::new(7, 0.5);
        let third = ScoredItem::new(1, 0.5);

        let mut scored = vec![first.clone(), second.clone(), third.clone()];
        scored.sort();

        // equal scores keep their original order
        assert_eq!(vec![first, second, third], scored);
    }
}
