extern crate sys_info;

use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use crate::catalog::SharedHandlesAndConfig;
use web::Data;

#[get("/internal")]
pub async fn internal(config: Data<SharedHandlesAndConfig>) -> HttpResponse {
    let mut html = "<html>wardrobe: content-based apparel recommendations.<br />".to_string();

    let stats = &config.catalog_index.stats;
    html.push_str("<h3>Catalog</h3>");
    html.push_str("Loaded: ");
    html.push_str(&*stats.descriptive_name);
    html.push_str("<br />Qty Rows: ");
    html.push_str(&*stats.qty_rows.to_string());
    if stats.truncated {
        html.push_str(" (truncated at the configured maximum)");
    }
    html.push_str("<br />Qty Distinct Names: ");
    html.push_str(&*stats.qty_distinct_names.to_string());
    for (column, qty_distinct) in stats.qty_distinct_attribute_values.iter() {
        html.push_str("<br />Qty Distinct ");
        html.push_str(column);
        html.push_str(": ");
        html.push_str(&*qty_distinct.to_string());
    }
    html.push_str("<br />Vocabulary Terms: ");
    html.push_str(&*stats.vocabulary_size.to_string());
    html.push_str("<br />Loaded At: ");
    html.push_str(&stats.loaded_at.to_string());
    html.push_str("<br />Age (hours): ");

    let age_hours = (Utc::now().naive_utc() - stats.loaded_at).num_hours();
    html.push_str(&*age_hours.to_string());

    let schema = &config.catalog_index.catalog.schema;
    html.push_str("<h3>Model</h3>");
    html.push_str("Feature columns: ");
    html.push_str(&schema.feature_columns().join(", "));
    html.push_str("<br />Diversify columns: ");
    html.push_str(&schema.diversify_columns().join(", "));
    html.push_str("<br />Qty items to recommend: ");
    html.push_str(&*config.num_items_to_recommend.to_string());
    html.push_str("<br /><a href=\"/v1/recommend?item_name=DRESS\">v1 endpoint of our model</a>");

    html.push_str("<h3>Machine instance</h3>");
    html.push_str("<br />Qty CPU's detected: ");
    html.push_str(&*sys_info::cpu_num().unwrap_or(0).to_string());
    html.push_str("<br />Qty actix workers set: ");
    html.push_str(&*config.qty_workers.to_string());
    html.push_str("<br />CPU speed: ");
    html.push_str(&*sys_info::cpu_speed().unwrap_or(0).to_string());
    html.push_str("MHz");
    html.push_str("<br />Active processes on instance: ");
    html.push_str(&*sys_info::proc_total().unwrap_or(0).to_string());

    html.push_str("<h3>Metrics</h3>");
    html.push_str("<a href=\"/internal/prometheus\">prometheus</a>");
    html.push_str("</html>");

    HttpResponse::Ok().body(html)
}
