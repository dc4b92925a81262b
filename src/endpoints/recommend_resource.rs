use std::collections::HashMap;

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::catalog::SharedHandlesAndConfig;
use crate::tfidf;

#[derive(Debug, Deserialize)]
pub struct V1QueryParams {
    item_name: String,
}

/// One recommendation record: display name, the diversify-attribute values
/// keyed by column name, and the similarity score rounded to two decimals.
#[derive(Debug, Serialize)]
pub struct RecommendedItem {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub score: f64,
}

// Wardrobe's main endpoint. Free-text queries are uppercased here, the
// catalog lookup itself stays case-sensitive. An empty array is the valid
// "no recommendations" response, never an error status.
#[get("/v1/recommend")]
pub async fn v1_recommend(
    data: web::Data<SharedHandlesAndConfig>,
    query: web::Query<V1QueryParams>,
) -> HttpResponse {
    let catalog_index = data.catalog_index.as_ref();
    let item_name = query.item_name.trim().to_uppercase();

    let recommendations = tfidf::recommend(catalog_index, &item_name, data.num_items_to_recommend);

    let catalog = &catalog_index.catalog;
    let recommended_items: Vec<RecommendedItem> = recommendations
        .iter()
        .map(|scored| {
            let attributes: HashMap<String, String> = catalog
                .schema
                .diversify_columns()
                .into_iter()
                .map(str::to_string)
                .zip(
                    catalog
                        .diversify_values(scored.row)
                        .into_iter()
                        .map(str::to_string),
                )
                .collect();

            RecommendedItem {
                name: catalog.display_name(scored.row).to_string(),
                attributes,
                score: (scored.score * 100.0).round() / 100.0,
            }
        })
        .collect();

    HttpResponse::Ok().json(recommended_items)
}
