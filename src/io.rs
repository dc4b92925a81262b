use anyhow::{anyhow, Context, Result};

use crate::catalog::{AttributeSchema, CatalogItem};

pub type RowIndex = usize;

/// Empty cells become this stable term so that missing values still
/// contribute a comparable token to the feature key.
pub const MISSING_VALUE: &str = "nan";

/// Reads the catalog file and projects every row onto the configured
/// feature columns. Returns the retained rows and whether the input was
/// truncated at `max_rows`.
pub fn read_catalog(
    catalog_path: &str,
    schema: &AttributeSchema,
    max_rows: usize,
) -> Result<(Vec<CatalogItem>, bool)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_path(catalog_path)
        .with_context(|| format!("Unable to open catalog file {}", catalog_path))?;

    parse_catalog(&mut reader, schema, max_rows)
}

fn parse_catalog<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    schema: &AttributeSchema,
    max_rows: usize,
) -> Result<(Vec<CatalogItem>, bool)> {
    let headers = reader.headers()?.clone();

    // Resolve the configured columns against the header up front instead of
    // failing lazily on first row access.
    let column_positions: Vec<usize> = schema
        .feature_columns()
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| anyhow!("Catalog file is missing required column '{}'", column))
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut items: Vec<CatalogItem> = Vec::new();
    let mut truncated = false;

    for result in reader.records() {
        match result {
            Ok(record) => {
                if items.len() >= max_rows {
                    // The row cap is a resource bound, the tail is dropped silently.
                    truncated = true;
                    break;
                }
                let values: Vec<String> = column_positions
                    .iter()
                    .map(|position| {
                        let raw = record.get(*position).unwrap_or("").trim();
                        if raw.is_empty() {
                            MISSING_VALUE.to_string()
                        } else {
                            raw.to_string()
                        }
                    })
                    .collect();
                items.push(CatalogItem::new(values));
            }
            Err(_) => eprintln!("Unable to parse catalog row!"),
        }
    }

    Ok((items, truncated))
}
