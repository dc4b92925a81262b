/// Composes the textual feature key for one catalog item: its attribute
/// values joined by single spaces, in schema column order. Deterministic,
/// missing values arrive here already replaced by the load-time sentinel.
pub fn compose_feature_key(values: &[&str]) -> String {
    values.join(" ")
}
