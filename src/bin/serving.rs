use actix_web::{
    http::ContentEncoding, middleware, web, App, HttpRequest, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;

use actix_web::http::header;
use std::path::Path;
use std::sync::Arc;

use wardrobe::catalog::SharedHandlesAndConfig;
use wardrobe::config::AppConfig;
use wardrobe::endpoints::index_resource::internal;
use wardrobe::endpoints::recommend_resource::v1_recommend;
use wardrobe::tfidf::index::CatalogIndex;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(config_path);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let num_items_to_recommend = config.model.num_items_to_recommend;
    let qty_workers = config.server.num_workers;

    let schema = config
        .model
        .schema()
        .expect("Invalid model column configuration.");

    let catalog_path = Path::new(&config.data.catalog_path);
    let catalog_index = if catalog_path.is_file() {
        // The index is built eagerly from the catalog snapshot and stays
        // read-only for the process lifetime.
        Arc::new(
            CatalogIndex::new_from_csv(
                &config.data.catalog_path,
                schema,
                config.data.max_catalog_rows,
            )
            .expect("Unable to load catalog file."),
        )
    } else {
        panic!(
            "Catalog file does not exist: {}",
            &config.data.catalog_path
        )
    };

    println!("start metrics");
    let prometheus = PrometheusMetrics::new("api", Some("/internal/prometheus"), None);

    println!("Done. start httpd at http://{}", &bind_address);
    HttpServer::new(move || {
        let handles_and_config = SharedHandlesAndConfig {
            catalog_index: catalog_index.clone(),
            num_items_to_recommend,
            qty_workers,
        };

        App::new()
            .wrap(middleware::Compress::new(ContentEncoding::Identity))
            .wrap(prometheus.clone())
            .wrap(
                middleware::DefaultHeaders::new()
                    .header("Cache-Control", "no-cache, no-store, must-revalidate")
                    .header("Pragma", "no-cache")
                    .header("Expires", "0"),
            )
            .data(handles_and_config)
            .service(v1_recommend)
            .service(internal)
            .service(web::resource("/").route(web::get().to(|_req: HttpRequest| {
                HttpResponse::Found()
                    .header(header::LOCATION, "/internal")
                    .finish()
            })))
    })
    .workers(config.server.num_workers)
    .bind(&bind_address)
    .unwrap_or_else(|_| panic!("Could not bind server to address {}", &bind_address))
    .run()
    .await
}
