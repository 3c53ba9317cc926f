use crate::canonicalizer::Canonicalizer;
use crate::schema::{DetectionSource, LabelAnnotation, ObjectAnnotation, ScanReport};

/// Drives the [`Canonicalizer`] over the two detection streams of one
/// classification response and folds the results into a single report.
///
/// Stateless across calls: each `aggregate` is a single-pass transform
/// with no detection history.
pub struct DetectionAggregator {
    canonicalizer: Canonicalizer,
}

impl DetectionAggregator {
    pub fn new(canonicalizer: Canonicalizer) -> Self {
        Self { canonicalizer }
    }

    /// Process label detections first, then object detections.
    ///
    /// Every raw detection produces one diagnostic line in arrival order,
    /// accepted or not. Accepted canonical names land in one set shared
    /// by both streams, so an ingredient seen as both a label and an
    /// object appears exactly once. A rejected detection never aborts
    /// processing of the remainder.
    pub fn aggregate(
        &self,
        labels: &[LabelAnnotation],
        objects: &[ObjectAnnotation],
    ) -> ScanReport {
        let mut report = ScanReport::default();
        report.diagnostics.reserve(labels.len() + objects.len());

        for label in labels {
            self.ingest(
                &label.description,
                label.score,
                DetectionSource::Label,
                &mut report,
            );
        }
        for object in objects {
            self.ingest(
                &object.name,
                object.score,
                DetectionSource::Object,
                &mut report,
            );
        }

        report
    }

    fn ingest(&self, raw_name: &str, score: f32, source: DetectionSource, report: &mut ScanReport) {
        let name = raw_name.to_lowercase();
        report.diagnostics.push(diagnostic_line(&name, score));
        if let Some(canonical) = self.canonicalizer.canonicalize(raw_name, score, source) {
            report.ingredients.insert(canonical.to_string());
        }
    }
}

impl Default for DetectionAggregator {
    fn default() -> Self {
        Self::new(Canonicalizer::default())
    }
}

/// `"<name> (<score*100 to one decimal>%)"`, e.g. `"orange (45.0%)"`.
fn diagnostic_line(name: &str, score: f32) -> String {
    format!("{} ({:.1}%)", name, score * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn label(description: &str, score: f32) -> LabelAnnotation {
        LabelAnnotation {
            description: description.to_string(),
            score,
        }
    }

    fn object(name: &str, score: f32) -> ObjectAnnotation {
        ObjectAnnotation {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn mixed_streams_merge_into_one_deduplicated_set() {
        let aggregator = DetectionAggregator::default();
        let labels = vec![label("orange", 0.45), label("tomato", 0.6), label("plate", 0.9)];
        let objects = vec![object("tomato", 0.55)];

        let report = aggregator.aggregate(&labels, &objects);

        let expected: BTreeSet<String> =
            ["orange", "tomato"].iter().map(|s| s.to_string()).collect();
        assert_eq!(report.ingredients, expected);
        assert_eq!(
            report.diagnostics,
            vec![
                "orange (45.0%)",
                "tomato (60.0%)",
                "plate (90.0%)",
                "tomato (55.0%)",
            ]
        );
    }

    #[test]
    fn diagnostics_preserve_arrival_order_labels_first() {
        let aggregator = DetectionAggregator::default();
        let labels = vec![label("zucchini", 0.7), label("apple", 0.2)];
        let objects = vec![object("banana", 0.9)];

        let report = aggregator.aggregate(&labels, &objects);

        assert_eq!(
            report.diagnostics,
            vec!["zucchini (70.0%)", "apple (20.0%)", "banana (90.0%)"]
        );
    }

    #[test]
    fn rejected_detections_still_appear_in_diagnostics() {
        let aggregator = DetectionAggregator::default();
        let labels = vec![label("plate", 0.99)];

        let report = aggregator.aggregate(&labels, &[]);

        assert!(report.ingredients.is_empty());
        assert_eq!(report.diagnostics, vec!["plate (99.0%)"]);
    }

    #[test]
    fn diagnostics_use_the_lower_cased_name() {
        let aggregator = DetectionAggregator::default();
        let report = aggregator.aggregate(&[label("Tomato", 0.6)], &[]);
        assert_eq!(report.diagnostics, vec!["tomato (60.0%)"]);
        assert!(report.ingredients.contains("tomato"));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let aggregator = DetectionAggregator::default();
        let labels = vec![label("orange", 0.45), label("scallion", 0.6)];
        let objects = vec![object("chicken", 0.8)];

        let first = aggregator.aggregate(&labels, &objects);
        let second = aggregator.aggregate(&labels, &objects);

        assert_eq!(first, second);
    }

    #[test]
    fn synonym_resolution_stores_the_canonical_name() {
        let aggregator = DetectionAggregator::default();

        let report = aggregator.aggregate(&[label("scallion", 0.6)], &[]);
        assert!(report.ingredients.contains("onion"));
        assert!(!report.ingredients.contains("scallion"));
        // The diagnostic keeps the raw (lower-cased) name.
        assert_eq!(report.diagnostics, vec!["scallion (60.0%)"]);

        let below_gate = aggregator.aggregate(&[label("scallion", 0.45)], &[]);
        assert!(below_gate.ingredients.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let aggregator = DetectionAggregator::default();
        let report = aggregator.aggregate(&[], &[]);
        assert!(report.ingredients.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn percentages_format_to_one_decimal() {
        assert_eq!(diagnostic_line("orange", 0.45), "orange (45.0%)");
        assert_eq!(diagnostic_line("tomato", 0.555), "tomato (55.5%)");
        assert_eq!(diagnostic_line("egg", 1.0), "egg (100.0%)");
        assert_eq!(diagnostic_line("salt", 0.0), "salt (0.0%)");
    }
}
