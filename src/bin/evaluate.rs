use std::path::Path;

use rand::seq::SliceRandom;
use rand::thread_rng;

use wardrobe::config::AppConfig;
use wardrobe::metrics::evaluation_reporter::EvaluationReporter;
use wardrobe::stopwatch::Stopwatch;
use wardrobe::tfidf;
use wardrobe::tfidf::index::CatalogIndex;

fn main() {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(config_path);

    let num_items_to_recommend = config.model.num_items_to_recommend;
    let schema = config
        .model
        .schema()
        .expect("Invalid model column configuration.");

    let catalog_path = Path::new(&config.data.catalog_path);
    let catalog_index = if catalog_path.is_file() {
        CatalogIndex::new_from_csv(
            &config.data.catalog_path,
            schema,
            config.data.max_catalog_rows,
        )
        .expect("Unable to load catalog file.")
    } else {
        panic!(
            "Catalog file does not exist: {}",
            &config.data.catalog_path
        )
    };

    let mut query_names = catalog_index.catalog.distinct_names();
    if query_names.len() > config.eval.sample_size {
        // Large catalogs are evaluated on a random sample of query names.
        query_names.shuffle(&mut thread_rng());
        query_names.truncate(config.eval.sample_size);
    }

    let mut reporter = EvaluationReporter::new(&catalog_index.catalog, num_items_to_recommend);
    let mut stopwatch = Stopwatch::new();

    for query_name in query_names.iter() {
        stopwatch.start();
        let recommendations = tfidf::recommend(&catalog_index, query_name, num_items_to_recommend);
        stopwatch.stop();
        reporter.add(&recommendations);
    }

    println!("===============================================================");
    println!("===              START EVALUATING CATALOG                  ====");
    println!("===============================================================");
    println!("{}", reporter.get_name());
    println!("{}", reporter.result());
    println!("Qty evaluated queries: {}", stopwatch.get_n());
    println!("Prediction latency");
    println!("p90 (microseconds): {}", stopwatch.get_percentile_in_micros(0.90));
    println!("p95 (microseconds): {}", stopwatch.get_percentile_in_micros(0.95));
    println!("p99.5 (microseconds): {}", stopwatch.get_percentile_in_micros(0.995));
}
