use crate::domain::model::ClassificationList;

/// Forwards the label sequence of a classification result.
///
/// Independent of the landmark stages; it only sees classifier output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelExtractor;

impl LabelExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, classifications: &ClassificationList) -> Vec<String> {
        self.extract_scored(classifications).0
    }

    pub fn extract_scored(&self, classifications: &ClassificationList) -> (Vec<String>, Vec<f32>) {
        let mut labels = Vec::with_capacity(classifications.len());
        let mut scores = Vec::with_capacity(classifications.len());

        for classification in classifications {
            tracing::debug!(label = %classification.label, score = classification.score, "classification");
            labels.push(classification.label.clone());
            scores.push(classification.score);
        }

        (labels, scores)
    }
}
