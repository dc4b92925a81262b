use std::time::Instant;

use anyhow::Result;

use crate::catalog::{determine_catalog_statistics, AttributeSchema, Catalog, CatalogStats};
use crate::io;
use crate::tfidf::feature::compose_feature_key;
use crate::tfidf::similarity::SimilarityMatrix;
use crate::tfidf::vectorizer::VectorSpace;

/// Immutable query index over one catalog snapshot: the catalog itself and
/// the all-pairs similarity matrix, built eagerly before any query is
/// served. A changed catalog means a full rebuild.
pub struct CatalogIndex {
    pub catalog: Catalog,
    pub similarities: SimilarityMatrix,
    pub stats: CatalogStats,
}

impl CatalogIndex {
    pub fn new_from_csv(
        catalog_path: &str,
        schema: AttributeSchema,
        max_rows: usize,
    ) -> Result<Self> {
        let start_time = Instant::now();
        println!("reading catalog, selecting feature columns {}", catalog_path);
        let (items, truncated) = io::read_catalog(catalog_path, &schema, max_rows)?;
        println!("reading catalog:{} micros", start_time.elapsed().as_micros());

        let catalog = Catalog::new(schema, items);
        Ok(CatalogIndex::new(catalog, truncated, catalog_path))
    }

    pub fn new(catalog: Catalog, truncated: bool, descriptive_name: &str) -> Self {
        let start_time = Instant::now();
        println!("prepare tf-idf vectors and similarity matrix");

        let feature_keys: Vec<String> = (0..catalog.len())
            .map(|row| compose_feature_key(&catalog.feature_values(row)))
            .collect();
        let vector_space = VectorSpace::build(&feature_keys);
        let similarities = SimilarityMatrix::compute_all(&vector_space);

        println!(
            "prepare similarity matrix:{} micros",
            start_time.elapsed().as_micros()
        );

        let stats = determine_catalog_statistics(
            descriptive_name,
            &catalog,
            truncated,
            vector_space.num_terms(),
        );

        CatalogIndex {
            catalog,
            similarities,
            stats,
        }
    }
}
