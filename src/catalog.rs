use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::io::RowIndex;
use crate::tfidf::index::CatalogIndex;

/// Ordered attribute configuration for a catalog snapshot.
///
/// `feature_columns` defines the composition order of the feature key,
/// `name_column` the user-facing lookup key and `diversify_columns` the
/// attributes that must not repeat within a recommendation list. The name
/// and diversify columns must be members of the feature columns; this is
/// checked on construction.
#[derive(Clone, Debug)]
pub struct AttributeSchema {
    feature_columns: Vec<String>,
    name_index: usize,
    diversify_indices: Vec<usize>,
}

impl AttributeSchema {
    pub fn new(
        feature_columns: Vec<String>,
        name_column: &str,
        diversify_columns: &[String],
    ) -> Result<AttributeSchema> {
        let position = |column: &str| feature_columns.iter().position(|c| c == column);

        let name_index = position(name_column).ok_or_else(|| {
            anyhow!("name column '{}' is not one of the feature columns", name_column)
        })?;
        let diversify_indices = diversify_columns
            .iter()
            .map(|column| {
                position(column).ok_or_else(|| {
                    anyhow!("diversify column '{}' is not one of the feature columns", column)
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        Ok(AttributeSchema {
            feature_columns,
            name_index,
            diversify_indices,
        })
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn name_index(&self) -> usize {
        self.name_index
    }

    pub fn diversify_indices(&self) -> &[usize] {
        &self.diversify_indices
    }

    pub fn diversify_columns(&self) -> Vec<&str> {
        self.diversify_indices
            .iter()
            .map(|index| self.feature_columns[*index].as_str())
            .collect()
    }
}

/// One catalog row, values stored in schema column order.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    values: Vec<String>,
}

impl CatalogItem {
    pub fn new(values: Vec<String>) -> Self {
        CatalogItem { values }
    }

    pub fn value(&self, column_index: usize) -> &str {
        &self.values[column_index]
    }

    pub fn values(&self) -> Vec<&str> {
        self.values.iter().map(String::as_str).collect()
    }
}

/// Immutable catalog snapshot. Items are identified by their row position.
pub struct Catalog {
    pub schema: AttributeSchema,
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(schema: AttributeSchema, items: Vec<CatalogItem>) -> Self {
        Catalog { schema, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn display_name(&self, row: RowIndex) -> &str {
        self.items[row].value(self.schema.name_index())
    }

    /// Resolves a display key to the first catalog row carrying it.
    pub fn find_by_name(&self, name: &str) -> Option<RowIndex> {
        self.items
            .iter()
            .position(|item| item.value(self.schema.name_index()) == name)
    }

    pub fn feature_values(&self, row: RowIndex) -> Vec<&str> {
        self.items[row].values()
    }

    pub fn diversify_values(&self, row: RowIndex) -> Vec<&str> {
        self.schema
            .diversify_indices()
            .iter()
            .map(|index| self.items[row].value(*index))
            .collect()
    }

    /// Distinct display names in order of first appearance, the enumerable
    /// query choices for a caller.
    pub fn distinct_names(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.value(self.schema.name_index()).to_string())
            .unique()
            .collect()
    }
}

pub struct CatalogStats {
    pub descriptive_name: String,
    pub qty_rows: usize,
    pub truncated: bool,
    pub qty_distinct_names: usize,
    pub qty_distinct_attribute_values: Vec<(String, usize)>,
    pub vocabulary_size: usize,
    pub loaded_at: NaiveDateTime,
}

pub fn determine_catalog_statistics(
    descriptive_name: &str,
    catalog: &Catalog,
    truncated: bool,
    vocabulary_size: usize,
) -> CatalogStats {
    let qty_rows = catalog.len();
    let qty_distinct_names = catalog.distinct_names().len();

    let qty_distinct_attribute_values: Vec<(String, usize)> = catalog
        .schema
        .diversify_indices()
        .iter()
        .map(|index| {
            let qty_distinct = catalog
                .items
                .iter()
                .map(|item| item.value(*index))
                .unique()
                .count();
            (catalog.schema.feature_columns()[*index].clone(), qty_distinct)
        })
        .collect();

    println!("Loaded {}", descriptive_name);
    println!(
        "\tRows: {}{}",
        qty_rows,
        if truncated { " (truncated)" } else { "" }
    );
    println!("\tDistinct names: {}", qty_distinct_names);
    for (column, qty_distinct) in qty_distinct_attribute_values.iter() {
        println!("\tDistinct {}: {}", column, qty_distinct);
    }
    println!("\tVocabulary terms: {}", vocabulary_size);

    CatalogStats {
        descriptive_name: descriptive_name.to_string(),
        qty_rows,
        truncated,
        qty_distinct_names,
        qty_distinct_attribute_values,
        vocabulary_size,
        loaded_at: chrono::Utc::now().naive_utc(),
    }
}

pub struct SharedHandlesAndConfig {
    pub catalog_index: Arc<CatalogIndex>,
    pub num_items_to_recommend: usize,
    pub qty_workers: usize,
}
