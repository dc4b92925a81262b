use crate::catalog::Catalog;
use crate::metrics::attribute_diversity::AttributeDiversity;
use crate::metrics::coverage::Coverage;
use crate::metrics::mean_similarity::MeanSimilarity;
use crate::metrics::RecommendationMetric;
use crate::tfidf::ScoredItem;

pub struct EvaluationReporter {
    attribute_diversity: AttributeDiversity,
    coverage: Coverage,
    mean_similarity: MeanSimilarity,
}

impl EvaluationReporter {
    pub fn new(catalog: &Catalog, length: usize) -> EvaluationReporter {
        let attribute_diversity = AttributeDiversity::new(catalog, length);
        let coverage = Coverage::new(catalog.len(), length);
        let mean_similarity = MeanSimilarity::new(length);

        EvaluationReporter {
            attribute_diversity,
            coverage,
            mean_similarity,
        }
    }

    pub fn add(&mut self, recommendations: &[ScoredItem]) {
        self.attribute_diversity.add(recommendations);
        self.coverage.add(recommendations);
        self.mean_similarity.add(recommendations);
    }

    pub fn result(&self) -> String {
        let diversity_score = format!("{:.4}", self.attribute_diversity.result());
        let coverage_score = format!("{:.4}", self.coverage.result());
        let similarity_score = format!("{:.4}", self.mean_similarity.result());
        format!("{},{},{}", diversity_score, coverage_score, similarity_score)
    }

    pub fn get_name(&self) -> String {
        format!(
            "{},{},{}",
            self.attribute_diversity.get_name(),
            self.coverage.get_name(),
            self.mean_similarity.get_name()
        )
    }
}
